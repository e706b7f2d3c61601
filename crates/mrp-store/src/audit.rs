//! 參數稽核列

use chrono::NaiveDateTime;
use mrp_core::MrpRunConfig;
use serde::{Deserialize, Serialize};

/// 每次運行落一列的參數快照（旗標以 y/n 記錄）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParametersRow {
    /// 運行時間戳
    pub run_at: NaiveDateTime,

    /// 是否納入 MRP 需求單
    pub use_mrp_demands: String,

    /// 是否納入再訂購點補貨需求
    pub use_reorder_level_demands: String,

    /// 是否啟用 EOQ 批量
    pub use_eoq: String,

    /// 是否啟用包裝倍量湊整
    pub use_pan_size: String,

    /// 是否啟用損耗放大
    pub use_shrinkage: String,

    /// 改期寬限天數
    pub leeway_days: i64,

    /// 倉庫過濾（逗號串接）
    pub locations: String,
}

impl ParametersRow {
    /// 由運行配置產生稽核列
    pub fn from_config(config: &MrpRunConfig, run_at: NaiveDateTime) -> Self {
        Self {
            run_at,
            use_mrp_demands: yn(config.use_mrp_demands),
            use_reorder_level_demands: yn(config.use_reorder_level_demands),
            use_eoq: yn(config.use_eoq),
            use_pan_size: yn(config.use_pan_size),
            use_shrinkage: yn(config.use_shrinkage),
            leeway_days: config.leeway_days,
            locations: config
                .locations
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

fn yn(flag: bool) -> String {
    let mark = if flag { "y" } else { "n" };
    mark.to_string()
}
