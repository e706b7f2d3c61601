//! 計劃訂單模型

use crate::demand::DemandType;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 計劃訂單類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    /// 採購
    Purchase,
    /// 生產
    Production,
}

/// 計劃訂單（MRP 計算結果）
///
/// 同一次運行中不會回饋為供應；它驅動的是下一層的相依需求。
/// 不帶生成式識別碼：相同輸入重跑必須產生逐位相同的輸出。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedOrder {
    /// 料號
    pub part_id: String,

    /// 下單日（需求日回推提前期；允許落在過去，表示來不及的需求）
    pub due_date: NaiveDate,

    /// 計劃數量
    pub quantity: Decimal,

    /// 訂單類型（依料號自製/外購）
    pub order_type: OrderType,

    /// 驅動它的需求類型
    pub source_demand_type: DemandType,

    /// 驅動它的來源單號
    pub source_order_no: String,
}

impl PlannedOrder {
    /// 創建新的計劃訂單
    pub fn new(
        part_id: impl Into<String>,
        quantity: Decimal,
        due_date: NaiveDate,
        order_type: OrderType,
        source_demand_type: DemandType,
        source_order_no: impl Into<String>,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            due_date,
            quantity,
            order_type,
            source_demand_type,
            source_order_no: source_order_no.into(),
        }
    }

    /// 檢查下單日是否已落在運行日之前（需求無法如期滿足）
    pub fn is_past_due(&self, run_date: NaiveDate) -> bool {
        self.due_date < run_date
    }

    /// 檢查是否為採購訂單
    pub fn is_purchase(&self) -> bool {
        self.order_type == OrderType::Purchase
    }
}
