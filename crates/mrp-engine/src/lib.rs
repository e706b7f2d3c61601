//! # MRP Engine
//!
//! 時間分段淨算管線：低階碼 → 計劃屬性目錄 → 需求/供應載入 →
//! 逐層淨算、批量化與 BOM 展開

pub mod catalog;
pub mod control;
pub mod events;
pub mod explosion;
pub mod levels;
pub mod lot_sizing;
pub mod netting;
pub mod requirements;
pub mod runner;
pub mod supplies;

// Re-export 主要類型
pub use catalog::{Catalog, PlanningAttributes};
pub use control::{CancelToken, RunControl};
pub use events::{EventSink, NullEventSink, TracingEventSink};
pub use levels::LevelAssigner;
pub use lot_sizing::LotSizingCalculator;
pub use netting::{NettingCalculator, PartNetting};
pub use requirements::RequirementsLoader;
pub use runner::{MrpEngine, MrpRunOutcome};
pub use supplies::SuppliesLoader;
