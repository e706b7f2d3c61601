//! MRP 主引擎
//!
//! 五段管線的調度：讀入快照 → 低階碼 → 目錄 → 載入需求/供應 →
//! 逐層淨算與展開。層序是硬約束：料號必須等其所有父件（較小
//! 低階碼）發完計劃訂單、注入相依需求之後才能處理，且每料號
//! 恰好處理一次。同一資料集不允許並行運行。

use chrono::Utc;
use mrp_core::{
    Bom, LevelRecord, MrpError, MrpRunConfig, PartSummary, Result, RunSummary, RunWarning,
};
use mrp_store::{ParametersRow, PlanningSource, WorkingSets};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::catalog::Catalog;
use crate::control::RunControl;
use crate::events::{EventSink, NullEventSink};
use crate::explosion::BomExplosion;
use crate::levels::LevelAssigner;
use crate::lot_sizing::LotSizingCalculator;
use crate::netting::NettingCalculator;
use crate::requirements::RequirementsLoader;
use crate::supplies::SuppliesLoader;

/// 一次運行的產出
#[derive(Debug)]
pub struct MrpRunOutcome {
    /// 運行彙總
    pub summary: RunSummary,

    /// 工作集快照（`retain_snapshot` 開啟時才保留）
    pub snapshot: Option<WorkingSets>,
}

/// MRP 引擎
pub struct MrpEngine {
    source: Arc<dyn PlanningSource>,
    events: Arc<dyn EventSink>,
    in_flight: AtomicBool,
}

impl MrpEngine {
    /// 創建新的引擎（預設不匯出事件）
    pub fn new(source: Arc<dyn PlanningSource>) -> Self {
        Self {
            source,
            events: Arc::new(NullEventSink),
            in_flight: AtomicBool::new(false),
        }
    }

    /// 建構器模式：掛上事件匯出
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// 執行一次運行（無取消、無截止）
    pub fn run(&self, config: &MrpRunConfig) -> Result<MrpRunOutcome> {
        self.run_with_control(config, &RunControl::unbounded())
    }

    /// 執行一次運行
    ///
    /// 失敗即中止：任何錯誤都會匯出 `failed` 並以類型化錯誤回傳，
    /// 工作集隨所有權在每條離開路徑上釋放，引擎內不做重試。
    pub fn run_with_control(
        &self,
        config: &MrpRunConfig,
        control: &RunControl,
    ) -> Result<MrpRunOutcome> {
        let _guard = RunGuard::acquire(&self.in_flight)?;

        self.events.started(config);
        let result = config
            .validate()
            .and_then(|_| self.execute(config, control));

        match result {
            Ok(outcome) => {
                self.events.succeeded(&outcome.summary);
                Ok(outcome)
            }
            Err(error) => {
                self.events.failed(&error, config);
                Err(error)
            }
        }
    }

    fn execute(&self, config: &MrpRunConfig, control: &RunControl) -> Result<MrpRunOutcome> {
        let started = Instant::now();
        control.checkpoint()?;

        // Step 1: 讀入 BOM 與主檔，解析計劃屬性
        tracing::debug!("Step 1: 讀入 BOM 與主檔");
        let bom = Bom::new(self.source.bom_edges()?);
        let items = self.source.item_master()?;
        let supplier_lead_times = self.source.preferred_supplier_lead_times()?;
        let catalog = Catalog::build(&items, &supplier_lead_times);

        // Step 2: 低階碼
        tracing::debug!("Step 2: 低階碼計算");
        let llcs = LevelAssigner::assign(&bom, catalog.parts().cloned())?;
        control.checkpoint()?;

        // Step 3: 載入需求與供應
        tracing::debug!("Step 3: 載入需求與供應");
        let mut sets = WorkingSets::new();
        sets.requirements = RequirementsLoader::load(self.source.as_ref(), &catalog, config)?;
        sets.supplies = SuppliesLoader::load(self.source.as_ref(), config)?;

        tracing::info!(
            "開始 MRP 淨算：需求 {} 筆，供應 {} 筆，料號 {} 個",
            sets.requirements.len(),
            sets.supplies.len(),
            llcs.len()
        );

        // 參數稽核：每次運行落一列
        self.source
            .record_parameters(&ParametersRow::from_config(config, Utc::now().naive_utc()))?;

        // Step 4: 組層級表（低階碼 + 計劃屬性）；
        // 工作集裡出現但不在表上的料號補在第 0 階
        for (part_id, llc) in llcs {
            let attrs = catalog.attributes(&part_id);
            sets.levels.insert(
                LevelRecord::new(part_id, llc)
                    .with_lead_time_days(attrs.lead_time_days)
                    .with_pan_size(attrs.pan_size)
                    .with_shrink_factor(attrs.shrink_factor)
                    .with_eoq(attrs.eoq),
            );
        }
        let loose: Vec<String> = sets
            .requirements
            .parts()
            .chain(sets.supplies.parts())
            .filter(|p| !sets.levels.contains(p.as_str()))
            .cloned()
            .collect();
        for part_id in loose {
            sets.levels.insert(LevelRecord::new(part_id, 0));
        }

        // Step 5: 逐層淨算（父件先於子件，每料號恰好一次）
        tracing::debug!("Step 5: 逐層淨算");
        let mut part_summaries: BTreeMap<String, PartSummary> = BTreeMap::new();
        let mut warnings: Vec<RunWarning> = Vec::new();
        let max_llc = sets.levels.max_llc();

        for llc in 0..=max_llc {
            control.checkpoint()?;

            for record in sets.levels.records_at_level(llc) {
                control.checkpoint()?;

                let part_id = record.part_id.clone();
                if !sets.requirements.contains(&part_id) && !sets.supplies.contains(&part_id) {
                    continue;
                }
                tracing::debug!("淨算料號 {}（LLC {}）", part_id, llc);

                let mut requirements = sets.requirements.remove_part(&part_id);
                let mut supplies = sets.supplies.remove_part(&part_id);
                NettingCalculator::sort_requirements(&mut requirements);
                NettingCalculator::sort_supplies(&mut supplies);

                let netting = NettingCalculator::allocate(
                    &mut requirements,
                    &mut supplies,
                    config.leeway_days,
                );

                // 計劃屬性讀自本次運行的層級表，不再回頭查目錄
                let planned = LotSizingCalculator::apply(
                    &record,
                    &requirements,
                    catalog.make_or_buy(&part_id),
                    config,
                );

                // 下單日落在過去不是錯誤：列入報告警告，由計劃員處置
                for order in &planned {
                    if order.is_past_due(config.run_date) {
                        warnings.push(RunWarning {
                            part_id: part_id.clone(),
                            message: format!(
                                "計劃訂單下單日 {} 早於運行日 {}，來源單號 {} 的需求無法如期滿足",
                                order.due_date, config.run_date, order.source_order_no
                            ),
                        });
                    }
                }

                // 相依需求只許寫入更深的層；同層或更淺表示資料已壞
                if !planned.is_empty() {
                    for dependent in
                        BomExplosion::explode(&part_id, &planned, &bom, config.run_date)
                    {
                        let child_llc = sets
                            .levels
                            .get(&dependent.part_id)
                            .map(|r| r.llc)
                            .unwrap_or(0);
                        if child_llc <= llc {
                            return Err(MrpError::InvariantViolation(format!(
                                "相依需求寫入 {}（LLC {}），未深於父件 {}（LLC {}）",
                                dependent.part_id, child_llc, part_id, llc
                            )));
                        }
                        sets.requirements.push(dependent);
                    }
                }

                part_summaries.insert(
                    part_id.clone(),
                    PartSummary {
                        part_id: part_id.clone(),
                        gross_requirements: netting.gross_requirements,
                        scheduled_receipts: netting.scheduled_receipts,
                        projected_balance: netting.scheduled_receipts
                            - netting.gross_requirements,
                        net_requirements: netting.net_requirements,
                        first_planned_qty: planned.first().map(|o| o.quantity),
                        first_planned_date: planned.first().map(|o| o.due_date),
                    },
                );

                sets.planned_orders.extend(planned);
                sets.requirements.restore_part(&part_id, requirements);
                sets.supplies.restore_part(&part_id, supplies);
            }
        }

        let summary = RunSummary {
            parameters: config.clone(),
            planned_order_count: sets.planned_orders.len(),
            total_planned_qty: sets.planned_orders.total_quantity(),
            parts: part_summaries.into_values().collect(),
            warnings,
            calculation_time_ms: Some(started.elapsed().as_millis()),
        };

        tracing::info!(
            "MRP 淨算完成：計劃訂單 {} 張，總量 {}，耗時 {:?}",
            summary.planned_order_count,
            summary.total_planned_qty,
            started.elapsed()
        );

        Ok(MrpRunOutcome {
            snapshot: config.retain_snapshot.then(|| sets),
            summary,
        })
    }
}

/// 單一運行守衛：建立時佔用、任何離開路徑都會釋放
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| MrpError::AlreadyRunning)?;
        Ok(Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
