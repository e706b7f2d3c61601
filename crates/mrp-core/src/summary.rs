//! 運行彙總模型

use crate::config::MrpRunConfig;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單一料號的彙總列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartSummary {
    /// 料號
    pub part_id: String,

    /// 毛需求合計
    pub gross_requirements: Decimal,

    /// 預計收貨合計（含現有庫存）
    pub scheduled_receipts: Decimal,

    /// 預計結餘 = 供應合計 − 需求合計
    pub projected_balance: Decimal,

    /// 淨需求合計（分配後未滿足殘量）
    pub net_requirements: Decimal,

    /// 首張計劃訂單數量
    pub first_planned_qty: Option<Decimal>,

    /// 首張計劃訂單下單日
    pub first_planned_date: Option<NaiveDate>,
}

/// 運行警告（例如下單日已落在過去的計劃訂單）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunWarning {
    /// 料號
    pub part_id: String,

    /// 警告內容
    pub message: String,
}

/// 一次 MRP 運行的彙總
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// 參數快照
    pub parameters: MrpRunConfig,

    /// 計劃訂單張數
    pub planned_order_count: usize,

    /// 計劃訂單總量
    pub total_planned_qty: Decimal,

    /// 各料號彙總（依料號升冪）
    pub parts: Vec<PartSummary>,

    /// 運行警告
    pub warnings: Vec<RunWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl RunSummary {
    /// 依料號查找彙總列
    pub fn part(&self, part_id: &str) -> Option<&PartSummary> {
        self.parts.iter().find(|p| p.part_id == part_id)
    }
}
