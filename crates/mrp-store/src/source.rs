//! 來源讀取介面
//!
//! 引擎透過 `PlanningSource` 讀取快照資料；每個方法回傳有限、
//! 可重複讀取的記錄序列。底層是資料庫、檔案或記憶體都可以，
//! 暫態性的儲存錯誤由轉接器自行重試，引擎只看到最終結果。

use chrono::NaiveDate;
use mrp_core::{BomEdge, StorageError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::audit::ParametersRow;

/// 自製/外購標記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MakeOrBuy {
    /// 自製
    Make,
    /// 外購
    Buy,
}

/// 物料主檔計劃資料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPlanningData {
    /// 料號
    pub part_id: String,

    /// 主檔提前期（天）
    pub lead_time_days: u32,

    /// 經濟訂購量
    pub eoq: Decimal,

    /// 包裝倍量
    pub pan_size: Decimal,

    /// 損耗率（百分比）
    pub shrink_factor: Decimal,

    /// 自製/外購
    pub make_or_buy: MakeOrBuy,

    /// 是否已停用
    pub discontinued: bool,
}

impl ItemPlanningData {
    /// 創建新的主檔計劃資料（預設外購、零屬性）
    pub fn new(part_id: impl Into<String>) -> Self {
        Self {
            part_id: part_id.into(),
            lead_time_days: 0,
            eoq: Decimal::ZERO,
            pan_size: Decimal::ZERO,
            shrink_factor: Decimal::ZERO,
            make_or_buy: MakeOrBuy::Buy,
            discontinued: false,
        }
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置經濟訂購量
    pub fn with_eoq(mut self, eoq: Decimal) -> Self {
        self.eoq = eoq;
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

    /// 建構器模式：設置自製/外購
    pub fn with_make_or_buy(mut self, make_or_buy: MakeOrBuy) -> Self {
        self.make_or_buy = make_or_buy;
        self
    }

    /// 建構器模式：標記停用
    pub fn as_discontinued(mut self) -> Self {
        self.discontinued = true;
        self
    }
}

/// 優先供應商提前期
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierLeadTime {
    /// 料號
    pub part_id: String,

    /// 供應商承諾提前期（天）
    pub lead_time_days: u32,
}

/// 銷售訂單行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrderLine {
    /// 訂單號
    pub order_no: String,

    /// 料號
    pub part_id: String,

    /// 行到期日
    pub due_date: NaiveDate,

    /// 訂購量
    pub qty_ordered: Decimal,

    /// 已開票量
    pub qty_invoiced: Decimal,

    /// 是否為報價單
    pub quotation: bool,
}

/// 生產工單（含用料行）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    /// 工單號
    pub order_no: String,

    /// 產出料號
    pub part_id: String,

    /// 需求產量
    pub qty_reqd: Decimal,

    /// 已入庫量
    pub qty_received: Decimal,

    /// 完工期限
    pub required_by: NaiveDate,

    /// 是否已結案
    pub closed: bool,

    /// 用料行
    pub components: Vec<WorkOrderComponent>,
}

/// 生產工單用料行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderComponent {
    /// 用料料號
    pub part_id: String,

    /// 每單位產出的用量
    pub qty_per_unit: Decimal,
}

/// 工單已發料的庫存異動
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedStockMove {
    /// 料號
    pub part_id: String,

    /// 已發數量
    pub quantity: Decimal,
}

/// MRP 需求單（預測性需求）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrpDemandRecord {
    /// 需求單號
    pub demand_id: String,

    /// 料號
    pub part_id: String,

    /// 數量
    pub quantity: Decimal,

    /// 需求日期
    pub due_date: NaiveDate,
}

/// 各倉庫的庫存水位（再訂購點來源）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationStock {
    /// 料號
    pub part_id: String,

    /// 倉庫
    pub location: String,

    /// 再訂購點
    pub reorder_level: Decimal,

    /// 現有量
    pub on_hand: Decimal,
}

/// 採購訂單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoStatus {
    /// 待核准
    Pending,
    /// 已核准
    Authorised,
    /// 已列印
    Printed,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
    /// 已退回
    Rejected,
}

impl PoStatus {
    /// 檢查是否仍屬在途供應
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled | Self::Rejected)
    }
}

/// 採購訂單行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// 訂單號
    pub order_no: String,

    /// 料號
    pub part_id: String,

    /// 行交期
    pub delivery_date: NaiveDate,

    /// 訂購量
    pub qty_ordered: Decimal,

    /// 已收量
    pub qty_received: Decimal,

    /// 狀態
    pub status: PoStatus,
}

/// 庫存異動（現有庫存彙總來源）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMove {
    /// 料號
    pub part_id: String,

    /// 倉庫
    pub location: String,

    /// 異動量
    pub quantity: Decimal,
}

/// 計劃來源讀取介面
///
/// 寫入端只有一個：`record_parameters` 為每次運行落一列參數稽核。
pub trait PlanningSource: Send + Sync {
    /// 全部 BOM 邊（含已失效者）
    fn bom_edges(&self) -> Result<Vec<BomEdge>, StorageError>;

    /// 物料主檔計劃資料
    fn item_master(&self) -> Result<Vec<ItemPlanningData>, StorageError>;

    /// 優先供應商提前期
    fn preferred_supplier_lead_times(&self) -> Result<Vec<SupplierLeadTime>, StorageError>;

    /// 未結銷售訂單行
    fn open_sales_orders(&self) -> Result<Vec<SalesOrderLine>, StorageError>;

    /// 未結生產工單（含用料行）
    fn open_work_orders(&self) -> Result<Vec<WorkOrder>, StorageError>;

    /// 某工單已發料的庫存異動
    fn issued_stock_moves_for_work_order(
        &self,
        order_no: &str,
    ) -> Result<Vec<IssuedStockMove>, StorageError>;

    /// MRP 需求單
    fn mrp_demands(&self) -> Result<Vec<MrpDemandRecord>, StorageError>;

    /// 各倉庫庫存水位（`filter` 為 `None` 時不過濾）
    fn location_stock(
        &self,
        filter: Option<&BTreeSet<String>>,
    ) -> Result<Vec<LocationStock>, StorageError>;

    /// 未結採購訂單行
    fn open_purchase_orders(&self) -> Result<Vec<PurchaseOrderLine>, StorageError>;

    /// 正向庫存異動（`filter` 為 `None` 時不過濾）
    fn positive_stock_moves(
        &self,
        filter: Option<&BTreeSet<String>>,
    ) -> Result<Vec<StockMove>, StorageError>;

    /// 落一列參數稽核
    fn record_parameters(&self, row: &ParametersRow) -> Result<(), StorageError>;
}
