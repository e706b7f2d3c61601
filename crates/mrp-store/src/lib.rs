//! # MRP Store
//!
//! 儲存邊界：來源讀取介面、每次運行獨占的工作集與參數稽核列

pub mod audit;
pub mod memory;
pub mod source;
pub mod workset;

// Re-export 主要類型
pub use audit::ParametersRow;
pub use memory::MemorySource;
pub use source::{
    ItemPlanningData, IssuedStockMove, LocationStock, MakeOrBuy, MrpDemandRecord, PlanningSource,
    PoStatus, PurchaseOrderLine, SalesOrderLine, StockMove, SupplierLeadTime, WorkOrder,
    WorkOrderComponent,
};
pub use workset::{
    LevelTable, PlannedOrderSet, RequirementSet, SupplySet, WorkingSets,
};
