//! BOM 模型
//!
//! 父件 → 子件的多對多圖。層級計算使用全部邊（含已失效者，
//! 讓低階碼跨時間穩定）；展開只使用當日有效的邊。

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單條 BOM 邊（父件 → 子件，含單位用量與生效區間）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BomEdge {
    /// 父件料號
    pub parent_id: String,

    /// 子件料號
    pub child_id: String,

    /// 單位用量（> 0）
    pub quantity_per: Decimal,

    /// 生效起日（含）
    pub effective_from: NaiveDate,

    /// 生效迄日（不含）
    pub effective_to: NaiveDate,
}

impl BomEdge {
    /// 創建永遠有效的 BOM 邊
    pub fn new(
        parent_id: impl Into<String>,
        child_id: impl Into<String>,
        quantity_per: Decimal,
    ) -> Self {
        Self {
            parent_id: parent_id.into(),
            child_id: child_id.into(),
            quantity_per,
            effective_from: NaiveDate::MIN,
            effective_to: NaiveDate::MAX,
        }
    }

    /// 建構器模式：設置生效區間
    pub fn with_effectivity(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.effective_from = from;
        self.effective_to = to;
        self
    }

    /// 檢查當日是否有效（起日含、迄日不含）
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.effective_from <= today && today < self.effective_to
    }
}

/// BOM 邊集合
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bom {
    edges: Vec<BomEdge>,
}

impl Bom {
    /// 從邊列表創建 BOM
    pub fn new(edges: Vec<BomEdge>) -> Self {
        Self { edges }
    }

    /// 全部邊（含已失效者）
    pub fn edges(&self) -> &[BomEdge] {
        &self.edges
    }

    /// 某父件當日有效的子件邊
    pub fn active_children<'a>(
        &'a self,
        parent_id: &'a str,
        today: NaiveDate,
    ) -> impl Iterator<Item = &'a BomEdge> {
        self.edges
            .iter()
            .filter(move |e| e.parent_id == parent_id && e.is_active(today))
    }

    /// 檢查某料號當日是否還有有效子件
    pub fn has_active_children(&self, parent_id: &str, today: NaiveDate) -> bool {
        self.active_children(parent_id, today).next().is_some()
    }
}
