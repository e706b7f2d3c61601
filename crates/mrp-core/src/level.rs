//! 層級記錄模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 層級記錄：低階碼加上淨算所需的計劃屬性
///
/// 不變量：`llc >= 0`；任一有效邊 (p, c) 滿足 `llc(c) > llc(p)`；
/// `0 <= shrink_factor < 100`；`pan_size >= 0`；`eoq >= 0`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelRecord {
    /// 料號
    pub part_id: String,

    /// 低階碼（自頂層組件起的最長路徑深度）
    pub llc: u32,

    /// 提前期（天）
    pub lead_time_days: u32,

    /// 包裝倍量（計劃量向上湊整的倍數；0 表示不湊整）
    pub pan_size: Decimal,

    /// 損耗率（百分比，0–100 不含上限）
    pub shrink_factor: Decimal,

    /// 經濟訂購量（0 表示不適用）
    pub eoq: Decimal,
}

impl LevelRecord {
    /// 創建新的層級記錄
    pub fn new(part_id: impl Into<String>, llc: u32) -> Self {
        Self {
            part_id: part_id.into(),
            llc,
            lead_time_days: 0,
            pan_size: Decimal::ZERO,
            shrink_factor: Decimal::ZERO,
            eoq: Decimal::ZERO,
        }
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置包裝倍量
    pub fn with_pan_size(mut self, pan_size: Decimal) -> Self {
        self.pan_size = pan_size;
        self
    }

    /// 建構器模式：設置損耗率
    pub fn with_shrink_factor(mut self, shrink_factor: Decimal) -> Self {
        self.shrink_factor = shrink_factor;
        self
    }

    /// 建構器模式：設置經濟訂購量
    pub fn with_eoq(mut self, eoq: Decimal) -> Self {
        self.eoq = eoq;
        self
    }
}
