//! 供應模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 現有庫存的「逾期」哨兵日期：排序時必然在所有實際日期之前，
/// 保證庫存先於任何在途供應被消耗。
pub const PAST_DUE: NaiveDate = NaiveDate::MIN;

/// 供應類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplyType {
    /// 採購訂單
    PurchaseOrder,
    /// 生產工單產出
    WorkOrder,
    /// 現有庫存
    OnHand,
}

/// 供應
///
/// 載入時 `quantity > 0`；淨算過程中被需求逐步消耗。
/// `mrp_date` 記錄建議改期（實際 `due_date` 不變，純屬建議輸出）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
    /// 供應ID
    pub id: Uuid,

    /// 料號
    pub part_id: String,

    /// 到期日
    pub due_date: NaiveDate,

    /// 供應數量（殘量）
    pub quantity: Decimal,

    /// 供應類型
    pub supply_type: SupplyType,

    /// 來源單號
    pub order_no: String,

    /// 建議日期（初始等於 `due_date`）
    pub mrp_date: NaiveDate,

    /// 是否已被建議改期
    pub update_flag: bool,
}

impl Supply {
    /// 創建新的供應
    pub fn new(
        part_id: impl Into<String>,
        quantity: Decimal,
        due_date: NaiveDate,
        supply_type: SupplyType,
        order_no: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            part_id: part_id.into(),
            due_date,
            quantity,
            supply_type,
            order_no: order_no.into(),
            mrp_date: due_date,
            update_flag: false,
        }
    }

    /// 創建現有庫存供應（掛在逾期哨兵日期）
    pub fn on_hand(part_id: impl Into<String>, quantity: Decimal) -> Self {
        Self::new(part_id, quantity, PAST_DUE, SupplyType::OnHand, "")
    }

    /// 標記建議改期
    ///
    /// 只在 `mrp_date` 尚未偏離 `due_date` 時生效，每筆供應至多
    /// 被建議一次。回傳是否實際寫入。
    pub fn advise_reschedule(&mut self, date: NaiveDate) -> bool {
        if self.mrp_date != self.due_date {
            return false;
        }
        self.mrp_date = date;
        self.update_flag = true;
        true
    }

    /// 檢查是否已被完全消耗
    pub fn is_consumed(&self) -> bool {
        self.quantity <= Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_hand_sorts_before_dated_supply() {
        let qoh = Supply::on_hand("BRAKE-PAD", Decimal::from(50));
        let po = Supply::new(
            "BRAKE-PAD",
            Decimal::from(30),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            SupplyType::PurchaseOrder,
            "500",
        );

        assert!(qoh.due_date < po.due_date);
        assert_eq!(qoh.supply_type, SupplyType::OnHand);
        assert_eq!(qoh.mrp_date, PAST_DUE);
    }

    #[test]
    fn test_advise_reschedule_fires_once() {
        let mut supply = Supply::new(
            "BRAKE-PAD",
            Decimal::from(50),
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            SupplyType::PurchaseOrder,
            "500",
        );

        let first = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        assert!(supply.advise_reschedule(first));
        assert_eq!(supply.mrp_date, first);
        assert!(supply.update_flag);
        // 實際到期日不變
        assert_eq!(
            supply.due_date,
            NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()
        );

        // 第二次建議不再生效
        let second = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(!supply.advise_reschedule(second));
        assert_eq!(supply.mrp_date, first);
    }
}
