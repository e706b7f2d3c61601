//! 記憶體來源
//!
//! 測試與內嵌呼叫端用的 `PlanningSource` 實作：全部資料先以
//! 建構器填入，讀取時複製回傳，天然滿足「有限、可重複讀取」。

use mrp_core::{BomEdge, StorageError};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use crate::audit::ParametersRow;
use crate::source::{
    ItemPlanningData, IssuedStockMove, LocationStock, MrpDemandRecord, PlanningSource,
    PurchaseOrderLine, SalesOrderLine, StockMove, SupplierLeadTime, WorkOrder,
};

/// 記憶體計劃來源
#[derive(Debug, Default)]
pub struct MemorySource {
    bom_edges: Vec<BomEdge>,
    items: Vec<ItemPlanningData>,
    supplier_lead_times: Vec<SupplierLeadTime>,
    sales_orders: Vec<SalesOrderLine>,
    work_orders: Vec<WorkOrder>,
    issued_moves: BTreeMap<String, Vec<IssuedStockMove>>,
    mrp_demands: Vec<MrpDemandRecord>,
    location_stock: Vec<LocationStock>,
    purchase_orders: Vec<PurchaseOrderLine>,
    stock_moves: Vec<StockMove>,
    parameters: Mutex<Vec<ParametersRow>>,
}

impl MemorySource {
    /// 創建空的來源
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入 BOM 邊
    pub fn with_bom_edge(mut self, edge: BomEdge) -> Self {
        self.bom_edges.push(edge);
        self
    }

    /// 建構器模式：加入主檔資料
    pub fn with_item(mut self, item: ItemPlanningData) -> Self {
        self.items.push(item);
        self
    }

    /// 建構器模式：加入優先供應商提前期
    pub fn with_supplier_lead_time(mut self, record: SupplierLeadTime) -> Self {
        self.supplier_lead_times.push(record);
        self
    }

    /// 建構器模式：加入銷售訂單行
    pub fn with_sales_order(mut self, line: SalesOrderLine) -> Self {
        self.sales_orders.push(line);
        self
    }

    /// 建構器模式：加入生產工單
    pub fn with_work_order(mut self, order: WorkOrder) -> Self {
        self.work_orders.push(order);
        self
    }

    /// 建構器模式：加入某工單的已發料異動
    pub fn with_issued_moves(
        mut self,
        order_no: impl Into<String>,
        moves: Vec<IssuedStockMove>,
    ) -> Self {
        self.issued_moves.entry(order_no.into()).or_default().extend(moves);
        self
    }

    /// 建構器模式：加入 MRP 需求單
    pub fn with_mrp_demand(mut self, record: MrpDemandRecord) -> Self {
        self.mrp_demands.push(record);
        self
    }

    /// 建構器模式：加入倉庫庫存水位
    pub fn with_location_stock(mut self, record: LocationStock) -> Self {
        self.location_stock.push(record);
        self
    }

    /// 建構器模式：加入採購訂單行
    pub fn with_purchase_order(mut self, line: PurchaseOrderLine) -> Self {
        self.purchase_orders.push(line);
        self
    }

    /// 建構器模式：加入庫存異動
    pub fn with_stock_move(mut self, record: StockMove) -> Self {
        self.stock_moves.push(record);
        self
    }

    /// 已落的參數稽核列（測試用）
    pub fn parameter_rows(&self) -> Vec<ParametersRow> {
        self.parameters.lock().expect("稽核鎖中毒").clone()
    }
}

fn location_matches(filter: Option<&BTreeSet<String>>, location: &str) -> bool {
    filter.map_or(true, |set| set.contains(location))
}

impl PlanningSource for MemorySource {
    fn bom_edges(&self) -> Result<Vec<BomEdge>, StorageError> {
        Ok(self.bom_edges.clone())
    }

    fn item_master(&self) -> Result<Vec<ItemPlanningData>, StorageError> {
        Ok(self.items.clone())
    }

    fn preferred_supplier_lead_times(&self) -> Result<Vec<SupplierLeadTime>, StorageError> {
        Ok(self.supplier_lead_times.clone())
    }

    fn open_sales_orders(&self) -> Result<Vec<SalesOrderLine>, StorageError> {
        Ok(self.sales_orders.clone())
    }

    fn open_work_orders(&self) -> Result<Vec<WorkOrder>, StorageError> {
        Ok(self.work_orders.clone())
    }

    fn issued_stock_moves_for_work_order(
        &self,
        order_no: &str,
    ) -> Result<Vec<IssuedStockMove>, StorageError> {
        Ok(self.issued_moves.get(order_no).cloned().unwrap_or_default())
    }

    fn mrp_demands(&self) -> Result<Vec<MrpDemandRecord>, StorageError> {
        Ok(self.mrp_demands.clone())
    }

    fn location_stock(
        &self,
        filter: Option<&BTreeSet<String>>,
    ) -> Result<Vec<LocationStock>, StorageError> {
        Ok(self
            .location_stock
            .iter()
            .filter(|r| location_matches(filter, &r.location))
            .cloned()
            .collect())
    }

    fn open_purchase_orders(&self) -> Result<Vec<PurchaseOrderLine>, StorageError> {
        Ok(self.purchase_orders.clone())
    }

    fn positive_stock_moves(
        &self,
        filter: Option<&BTreeSet<String>>,
    ) -> Result<Vec<StockMove>, StorageError> {
        Ok(self
            .stock_moves
            .iter()
            .filter(|m| location_matches(filter, &m.location))
            .cloned()
            .collect())
    }

    fn record_parameters(&self, row: &ParametersRow) -> Result<(), StorageError> {
        self.parameters
            .lock()
            .map_err(|_| StorageError::new("稽核鎖中毒"))?
            .push(row.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn test_location_filter_applies_to_stock_sources() {
        let source = MemorySource::new()
            .with_location_stock(LocationStock {
                part_id: "TYRE".to_string(),
                location: "TPE".to_string(),
                reorder_level: Decimal::from(20),
                on_hand: Decimal::from(5),
            })
            .with_location_stock(LocationStock {
                part_id: "TYRE".to_string(),
                location: "KHH".to_string(),
                reorder_level: Decimal::from(10),
                on_hand: Decimal::from(8),
            })
            .with_stock_move(StockMove {
                part_id: "TYRE".to_string(),
                location: "TPE".to_string(),
                quantity: Decimal::from(5),
            })
            .with_stock_move(StockMove {
                part_id: "TYRE".to_string(),
                location: "KHH".to_string(),
                quantity: Decimal::from(8),
            });

        let filter: BTreeSet<String> = ["TPE".to_string()].into_iter().collect();

        let stock = source.location_stock(Some(&filter)).unwrap();
        assert_eq!(stock.len(), 1);
        assert_eq!(stock[0].location, "TPE");

        let moves = source.positive_stock_moves(None).unwrap();
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_parameter_rows_accumulate() {
        let source = MemorySource::new();
        let config =
            mrp_core::MrpRunConfig::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        let run_at = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();

        source
            .record_parameters(&ParametersRow::from_config(&config, run_at))
            .unwrap();

        assert_eq!(source.parameter_rows().len(), 1);
    }
}
