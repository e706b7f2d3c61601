//! 需求模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 需求類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DemandType {
    /// 銷售訂單
    SalesOrder,
    /// 生產工單用料
    WorkOrder,
    /// MRP 需求單（預測）
    MrpDemand,
    /// 再訂購點補貨
    ReorderLevel,
}

/// 需求
///
/// 載入時 `quantity > 0`；淨算過程中會被供應逐步沖銷，可降至 0。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    /// 料號
    pub part_id: String,

    /// 需求日期
    pub date_required: NaiveDate,

    /// 需求數量（殘量）
    pub quantity: Decimal,

    /// 需求類型
    pub demand_type: DemandType,

    /// 來源單號
    pub order_no: String,

    /// 是否為獨立需求（銷售/工單/預測/再訂購點）
    pub direct_demand: bool,

    /// 需求發生處（獨立需求為自身，相依需求為展開它的父件）
    pub where_required: String,
}

impl Requirement {
    /// 創建獨立需求
    pub fn direct(
        part_id: impl Into<String>,
        quantity: Decimal,
        date_required: NaiveDate,
        demand_type: DemandType,
        order_no: impl Into<String>,
    ) -> Self {
        let part_id = part_id.into();
        Self {
            where_required: part_id.clone(),
            part_id,
            date_required,
            quantity,
            demand_type,
            order_no: order_no.into(),
            direct_demand: true,
        }
    }

    /// 創建相依需求（BOM 展開注入）
    pub fn dependent(
        part_id: impl Into<String>,
        quantity: Decimal,
        date_required: NaiveDate,
        demand_type: DemandType,
        order_no: impl Into<String>,
        where_required: impl Into<String>,
    ) -> Self {
        Self {
            part_id: part_id.into(),
            date_required,
            quantity,
            demand_type,
            order_no: order_no.into(),
            direct_demand: false,
            where_required: where_required.into(),
        }
    }

    /// 檢查是否為獨立需求
    pub fn is_direct(&self) -> bool {
        self.direct_demand
    }

    /// 檢查分配後是否仍有未滿足殘量
    pub fn is_unmet(&self) -> bool {
        self.quantity > Decimal::ZERO
    }
}
