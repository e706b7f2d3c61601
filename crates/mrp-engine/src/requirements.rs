//! 需求載入
//!
//! 自四個來源填入需求工作集，每筆來源記錄至多寫一列，數量必為
//! 正值。倉庫過濾只作用於再訂購點來源；訂單類來源與倉庫無關。

use mrp_core::{DemandType, MrpRunConfig, Requirement, Result};
use mrp_store::{PlanningSource, RequirementSet};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::catalog::Catalog;

/// 需求載入器
pub struct RequirementsLoader;

impl RequirementsLoader {
    /// 載入全部獨立需求
    pub fn load(
        source: &dyn PlanningSource,
        catalog: &Catalog,
        config: &MrpRunConfig,
    ) -> Result<RequirementSet> {
        let mut set = RequirementSet::new();

        Self::load_sales_orders(source, catalog, &mut set)?;
        Self::load_work_order_components(source, catalog, &mut set)?;

        if config.use_mrp_demands {
            Self::load_mrp_demands(source, &mut set)?;
        }
        if config.use_reorder_level_demands {
            Self::load_reorder_gaps(source, config, &mut set)?;
        }

        tracing::debug!("需求載入完成: {} 筆", set.len());
        Ok(set)
    }

    /// 銷售訂單行：未開票餘量（排除報價單與停用料號）
    fn load_sales_orders(
        source: &dyn PlanningSource,
        catalog: &Catalog,
        set: &mut RequirementSet,
    ) -> Result<()> {
        for line in source.open_sales_orders()? {
            if line.quotation || catalog.is_discontinued(&line.part_id) {
                continue;
            }
            let outstanding = line.qty_ordered - line.qty_invoiced;
            if outstanding > Decimal::ZERO {
                set.push(Requirement::direct(
                    line.part_id,
                    outstanding,
                    line.due_date,
                    DemandType::SalesOrder,
                    line.order_no,
                ));
            }
        }
        Ok(())
    }

    /// 工單用料：`qty_per_unit · qty_reqd − 已發料`（排除停用料號）
    fn load_work_order_components(
        source: &dyn PlanningSource,
        catalog: &Catalog,
        set: &mut RequirementSet,
    ) -> Result<()> {
        for wo in source.open_work_orders()? {
            if wo.closed {
                continue;
            }

            let mut issued: BTreeMap<String, Decimal> = BTreeMap::new();
            for mv in source.issued_stock_moves_for_work_order(&wo.order_no)? {
                *issued.entry(mv.part_id).or_default() += mv.quantity;
            }

            for component in &wo.components {
                if catalog.is_discontinued(&component.part_id) {
                    continue;
                }
                let already_issued = issued
                    .get(&component.part_id)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let outstanding = component.qty_per_unit * wo.qty_reqd - already_issued;
                if outstanding > Decimal::ZERO {
                    set.push(Requirement::direct(
                        component.part_id.clone(),
                        outstanding,
                        wo.required_by,
                        DemandType::WorkOrder,
                        wo.order_no.clone(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// MRP 需求單：照錄
    fn load_mrp_demands(source: &dyn PlanningSource, set: &mut RequirementSet) -> Result<()> {
        for record in source.mrp_demands()? {
            if record.quantity > Decimal::ZERO {
                set.push(Requirement::direct(
                    record.part_id,
                    record.quantity,
                    record.due_date,
                    DemandType::MrpDemand,
                    record.demand_id,
                ));
            }
        }
        Ok(())
    }

    /// 再訂購點缺口：逐倉 `reorder_level − on_hand`，需求日為運行日
    fn load_reorder_gaps(
        source: &dyn PlanningSource,
        config: &MrpRunConfig,
        set: &mut RequirementSet,
    ) -> Result<()> {
        for record in source.location_stock(config.location_filter())? {
            let gap = record.reorder_level - record.on_hand;
            if gap > Decimal::ZERO {
                set.push(Requirement::direct(
                    record.part_id,
                    gap,
                    config.run_date,
                    DemandType::ReorderLevel,
                    record.location,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mrp_store::{
        IssuedStockMove, ItemPlanningData, LocationStock, MemorySource, MrpDemandRecord,
        SalesOrderLine, WorkOrder, WorkOrderComponent,
    };

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn so(order_no: &str, part: &str, ordered: i64, invoiced: i64, quotation: bool) -> SalesOrderLine {
        SalesOrderLine {
            order_no: order_no.to_string(),
            part_id: part.to_string(),
            due_date: d(2024, 2, 10),
            qty_ordered: Decimal::from(ordered),
            qty_invoiced: Decimal::from(invoiced),
            quotation,
        }
    }

    #[test]
    fn test_sales_order_outstanding_quantity() {
        let source = MemorySource::new()
            .with_sales_order(so("100", "BELL", 50, 20, false))
            // 報價單與已出清的行不產生需求
            .with_sales_order(so("101", "BELL", 10, 0, true))
            .with_sales_order(so("102", "BELL", 30, 30, false));
        let catalog = Catalog::build(&[], &[]);
        let config = MrpRunConfig::new(d(2024, 2, 1));

        let set = RequirementsLoader::load(&source, &catalog, &config).unwrap();
        let reqs = set.for_part("BELL");

        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].quantity, Decimal::from(30));
        assert_eq!(reqs[0].demand_type, DemandType::SalesOrder);
        assert!(reqs[0].direct_demand);
        assert_eq!(reqs[0].where_required, "BELL");
    }

    #[test]
    fn test_discontinued_part_excluded() {
        let source = MemorySource::new().with_sales_order(so("100", "OLD-FORK", 50, 0, false));
        let items = vec![ItemPlanningData::new("OLD-FORK").as_discontinued()];
        let catalog = Catalog::build(&items, &[]);
        let config = MrpRunConfig::new(d(2024, 2, 1));

        let set = RequirementsLoader::load(&source, &catalog, &config).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_work_order_components_net_of_issued() {
        let source = MemorySource::new()
            .with_work_order(WorkOrder {
                order_no: "WO-7".to_string(),
                part_id: "WHEEL".to_string(),
                qty_reqd: Decimal::from(10),
                qty_received: Decimal::ZERO,
                required_by: d(2024, 2, 15),
                closed: false,
                components: vec![
                    WorkOrderComponent {
                        part_id: "SPOKE".to_string(),
                        qty_per_unit: Decimal::from(36),
                    },
                    WorkOrderComponent {
                        part_id: "RIM".to_string(),
                        qty_per_unit: Decimal::ONE,
                    },
                ],
            })
            .with_issued_moves(
                "WO-7",
                vec![IssuedStockMove {
                    part_id: "SPOKE".to_string(),
                    quantity: Decimal::from(100),
                }],
            );
        let catalog = Catalog::build(&[], &[]);
        let config = MrpRunConfig::new(d(2024, 2, 1));

        let set = RequirementsLoader::load(&source, &catalog, &config).unwrap();

        // 36 · 10 − 100 = 260
        assert_eq!(set.for_part("SPOKE")[0].quantity, Decimal::from(260));
        assert_eq!(set.for_part("RIM")[0].quantity, Decimal::from(10));
        assert_eq!(set.for_part("SPOKE")[0].demand_type, DemandType::WorkOrder);
    }

    #[test]
    fn test_optional_sources_behind_flags() {
        let source = MemorySource::new()
            .with_mrp_demand(MrpDemandRecord {
                demand_id: "FC-1".to_string(),
                part_id: "TYRE".to_string(),
                quantity: Decimal::from(25),
                due_date: d(2024, 3, 1),
            })
            .with_location_stock(LocationStock {
                part_id: "TUBE".to_string(),
                location: "TPE".to_string(),
                reorder_level: Decimal::from(20),
                on_hand: Decimal::from(5),
            });
        let catalog = Catalog::build(&[], &[]);

        // 兩個旗標都關：不載入
        let config = MrpRunConfig::new(d(2024, 2, 1));
        let set = RequirementsLoader::load(&source, &catalog, &config).unwrap();
        assert!(set.is_empty());

        // 開啟後各寫一列；再訂購點需求日為運行日
        let config = MrpRunConfig::new(d(2024, 2, 1))
            .with_mrp_demands(true)
            .with_reorder_level_demands(true);
        let set = RequirementsLoader::load(&source, &catalog, &config).unwrap();

        assert_eq!(set.for_part("TYRE")[0].demand_type, DemandType::MrpDemand);
        let reorder = &set.for_part("TUBE")[0];
        assert_eq!(reorder.quantity, Decimal::from(15));
        assert_eq!(reorder.date_required, d(2024, 2, 1));
        assert_eq!(reorder.demand_type, DemandType::ReorderLevel);
    }
}
