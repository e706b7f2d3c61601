//! 相依需求展開
//!
//! 每張計劃訂單沿當日有效的 BOM 邊展開：子件數量 = 計劃量 ×
//! 單位用量，需求日 = 父件下單日（子件自身的提前期由子件淨算
//! 時回推，這裡不再偏移）。需求類型與來源單號沿父件傳遞。

use chrono::NaiveDate;
use mrp_core::{Bom, PlannedOrder, Requirement};

/// BOM 展開器
pub struct BomExplosion;

impl BomExplosion {
    /// 將一批計劃訂單展開為子件相依需求
    pub fn explode(
        parent_id: &str,
        planned: &[PlannedOrder],
        bom: &Bom,
        today: NaiveDate,
    ) -> Vec<Requirement> {
        let mut dependents = Vec::new();

        for order in planned {
            for edge in bom.active_children(parent_id, today) {
                dependents.push(Requirement::dependent(
                    edge.child_id.clone(),
                    order.quantity * edge.quantity_per,
                    order.due_date,
                    order.source_demand_type,
                    order.source_order_no.clone(),
                    parent_id,
                ));
            }
        }

        dependents
    }
}
