//! 計劃屬性目錄
//!
//! 由物料主檔與優先供應商資料解析每料號的計劃屬性；建成後唯讀。

use mrp_store::{ItemPlanningData, MakeOrBuy, SupplierLeadTime};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// 每料號的計劃屬性
#[derive(Debug, Clone, Copy)]
pub struct PlanningAttributes {
    /// 提前期（天）：優先供應商為正值時優先，否則取主檔
    pub lead_time_days: u32,

    /// 經濟訂購量
    pub eoq: Decimal,

    /// 包裝倍量
    pub pan_size: Decimal,

    /// 損耗率（百分比）
    pub shrink_factor: Decimal,

    /// 自製/外購
    pub make_or_buy: MakeOrBuy,
}

impl Default for PlanningAttributes {
    /// 主檔缺漏時的直通預設：全零、外購
    fn default() -> Self {
        Self {
            lead_time_days: 0,
            eoq: Decimal::ZERO,
            pan_size: Decimal::ZERO,
            shrink_factor: Decimal::ZERO,
            make_or_buy: MakeOrBuy::Buy,
        }
    }
}

/// 計劃屬性目錄
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    attributes: BTreeMap<String, PlanningAttributes>,
    discontinued: BTreeSet<String>,
}

impl Catalog {
    /// 由主檔與優先供應商提前期建立目錄
    pub fn build(items: &[ItemPlanningData], supplier_lead_times: &[SupplierLeadTime]) -> Self {
        let supplier: BTreeMap<&str, u32> = supplier_lead_times
            .iter()
            .map(|s| (s.part_id.as_str(), s.lead_time_days))
            .collect();

        let mut attributes = BTreeMap::new();
        let mut discontinued = BTreeSet::new();

        for item in items {
            let lead_time_days = match supplier.get(item.part_id.as_str()) {
                Some(&days) if days > 0 => days,
                _ => item.lead_time_days,
            };

            attributes.insert(
                item.part_id.clone(),
                PlanningAttributes {
                    lead_time_days,
                    eoq: item.eoq,
                    pan_size: item.pan_size,
                    shrink_factor: item.shrink_factor,
                    make_or_buy: item.make_or_buy,
                },
            );

            if item.discontinued {
                discontinued.insert(item.part_id.clone());
            }
        }

        Self {
            attributes,
            discontinued,
        }
    }

    /// 取得料號的計劃屬性（缺漏時回傳直通預設）
    pub fn attributes(&self, part_id: &str) -> PlanningAttributes {
        self.attributes
            .get(part_id)
            .copied()
            .unwrap_or_default()
    }

    /// 取得料號的自製/外購標記（缺漏時視為外購）
    pub fn make_or_buy(&self, part_id: &str) -> MakeOrBuy {
        self.attributes(part_id).make_or_buy
    }

    /// 檢查料號是否已停用
    pub fn is_discontinued(&self, part_id: &str) -> bool {
        self.discontinued.contains(part_id)
    }

    /// 主檔上的全部料號（升冪）
    pub fn parts(&self) -> impl Iterator<Item = &String> {
        self.attributes.keys()
    }
}
