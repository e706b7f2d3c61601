//! MRP 運行配置

use crate::{MrpError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 一次 MRP 運行的配置
///
/// `run_date` 是顯式傳入的「今天」：生效邊判定與再訂購點需求日
/// 都以它為準，管線內不讀時鐘，相同輸入必得相同輸出。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrpRunConfig {
    /// 運行日（生效判定與再訂購點需求的基準日）
    pub run_date: NaiveDate,

    /// 是否納入 MRP 需求單
    pub use_mrp_demands: bool,

    /// 是否納入再訂購點補貨需求
    pub use_reorder_level_demands: bool,

    /// 淨需求不足經濟訂購量時是否放大到 EOQ
    pub use_eoq: bool,

    /// 是否將計劃量向上湊整到包裝倍量
    pub use_pan_size: bool,

    /// 是否依損耗率放大計劃量
    pub use_shrinkage: bool,

    /// 供應晚於需求多少天以內不建議改期
    pub leeway_days: i64,

    /// 倉庫過濾（僅作用於再訂購點與現有庫存來源；
    /// 空集合或含 "All" 表示不過濾）
    pub locations: BTreeSet<String>,

    /// 運行結束後是否保留工作集快照供稽核
    pub retain_snapshot: bool,
}

impl MrpRunConfig {
    /// 創建新的運行配置（所有選項關閉、不過濾倉庫）
    pub fn new(run_date: NaiveDate) -> Self {
        Self {
            run_date,
            use_mrp_demands: false,
            use_reorder_level_demands: false,
            use_eoq: false,
            use_pan_size: false,
            use_shrinkage: false,
            leeway_days: 0,
            locations: BTreeSet::new(),
            retain_snapshot: false,
        }
    }

    /// 建構器模式：納入 MRP 需求單
    pub fn with_mrp_demands(mut self, on: bool) -> Self {
        self.use_mrp_demands = on;
        self
    }

    /// 建構器模式：納入再訂購點補貨需求
    pub fn with_reorder_level_demands(mut self, on: bool) -> Self {
        self.use_reorder_level_demands = on;
        self
    }

    /// 建構器模式：啟用 EOQ 批量
    pub fn with_eoq(mut self, on: bool) -> Self {
        self.use_eoq = on;
        self
    }

    /// 建構器模式：啟用包裝倍量湊整
    pub fn with_pan_size(mut self, on: bool) -> Self {
        self.use_pan_size = on;
        self
    }

    /// 建構器模式：啟用損耗放大
    pub fn with_shrinkage(mut self, on: bool) -> Self {
        self.use_shrinkage = on;
        self
    }

    /// 建構器模式：設置改期寬限天數
    pub fn with_leeway_days(mut self, days: i64) -> Self {
        self.leeway_days = days;
        self
    }

    /// 建構器模式：設置倉庫過濾
    pub fn with_locations(mut self, locations: impl IntoIterator<Item = String>) -> Self {
        self.locations = locations.into_iter().collect();
        self
    }

    /// 建構器模式：保留工作集快照
    pub fn with_retained_snapshot(mut self, on: bool) -> Self {
        self.retain_snapshot = on;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.leeway_days < 0 {
            return Err(MrpError::Config {
                field: "leeway_days",
                reason: format!("不可為負值: {}", self.leeway_days),
            });
        }
        if self.locations.iter().any(|l| l.trim().is_empty()) {
            return Err(MrpError::Config {
                field: "locations",
                reason: "倉庫代碼不可為空白".to_string(),
            });
        }
        Ok(())
    }

    /// 取得生效的倉庫過濾（空集合或含 "All" 時為 `None`）
    pub fn location_filter(&self) -> Option<&BTreeSet<String>> {
        if self.locations.is_empty() || self.locations.contains("All") {
            None
        } else {
            Some(&self.locations)
        }
    }
}
