//! 供應載入
//!
//! 自三個來源填入供應工作集：未結採購、現有庫存（逾期桶）與
//! 未結工單產出。`mrp_date` 初始等於 `due_date`。

use mrp_core::{MrpRunConfig, Result, Supply, SupplyType};
use mrp_store::{PlanningSource, SupplySet};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// 供應載入器
pub struct SuppliesLoader;

impl SuppliesLoader {
    /// 載入全部供應
    pub fn load(source: &dyn PlanningSource, config: &MrpRunConfig) -> Result<SupplySet> {
        let mut set = SupplySet::new();

        // 採購訂單行：未收餘量
        for line in source.open_purchase_orders()? {
            if !line.status.is_open() {
                continue;
            }
            let outstanding = line.qty_ordered - line.qty_received;
            if outstanding > Decimal::ZERO {
                set.push(Supply::new(
                    line.part_id,
                    outstanding,
                    line.delivery_date,
                    SupplyType::PurchaseOrder,
                    line.order_no,
                ));
            }
        }

        // 現有庫存：正向異動逐料號彙總，掛在逾期哨兵日期；
        // 未過濾時視為全部倉庫合併
        let mut on_hand: BTreeMap<String, Decimal> = BTreeMap::new();
        for mv in source.positive_stock_moves(config.location_filter())? {
            if mv.quantity > Decimal::ZERO {
                *on_hand.entry(mv.part_id).or_default() += mv.quantity;
            }
        }
        for (part_id, quantity) in on_hand {
            set.push(Supply::on_hand(part_id, quantity));
        }

        // 工單產出：未入庫餘量
        for wo in source.open_work_orders()? {
            if wo.closed {
                continue;
            }
            let outstanding = wo.qty_reqd - wo.qty_received;
            if outstanding > Decimal::ZERO {
                set.push(Supply::new(
                    wo.part_id,
                    outstanding,
                    wo.required_by,
                    SupplyType::WorkOrder,
                    wo.order_no,
                ));
            }
        }

        tracing::debug!("供應載入完成: {} 筆", set.len());
        Ok(set)
    }
}
