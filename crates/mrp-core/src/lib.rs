//! # MRP Core
//!
//! 核心資料模型與類型定義

pub mod bom;
pub mod config;
pub mod dates;
pub mod demand;
pub mod level;
pub mod plan;
pub mod summary;
pub mod supply;

// Re-export 主要類型
pub use bom::{Bom, BomEdge};
pub use config::MrpRunConfig;
pub use demand::{DemandType, Requirement};
pub use level::LevelRecord;
pub use plan::{OrderType, PlannedOrder};
pub use summary::{PartSummary, RunSummary, RunWarning};
pub use supply::{Supply, SupplyType, PAST_DUE};

/// 儲存層錯誤（包裝轉接器的底層原因）
#[derive(Debug, thiserror::Error)]
#[error("儲存層錯誤: {0}")]
pub struct StorageError(pub Box<dyn std::error::Error + Send + Sync + 'static>);

impl StorageError {
    /// 包裝任意底層錯誤
    pub fn new(cause: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>) -> Self {
        Self(cause.into())
    }
}

/// MRP 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum MrpError {
    #[error("BOM 含有循環，層級計算無法收斂（見證料號: {0}）")]
    CyclicBom(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("已有另一次 MRP 運行進行中")]
    AlreadyRunning,

    #[error("運行已取消")]
    Cancelled,

    #[error("配置錯誤: {field}: {reason}")]
    Config { field: &'static str, reason: String },

    #[error("內部不變量違反: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, MrpError>;
