//! 運行生命週期事件
//!
//! 射後不理：引擎依序通知，不等待處理者，也不保證訂閱者之間
//! 的順序。處理者不可回傳錯誤影響運行。

use mrp_core::{MrpError, MrpRunConfig, RunSummary};

/// 事件匯出介面
pub trait EventSink: Send + Sync {
    /// 運行開始
    fn started(&self, _config: &MrpRunConfig) {}

    /// 運行成功
    fn succeeded(&self, _summary: &RunSummary) {}

    /// 運行失敗
    fn failed(&self, _error: &MrpError, _config: &MrpRunConfig) {}
}

/// 不做任何事的匯出
#[derive(Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {}

/// 以 tracing 記錄生命週期的匯出
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn started(&self, config: &MrpRunConfig) {
        tracing::info!("MRP 運行開始（運行日 {}）", config.run_date);
    }

    fn succeeded(&self, summary: &RunSummary) {
        tracing::info!(
            "MRP 運行成功：計劃訂單 {} 張，總量 {}",
            summary.planned_order_count,
            summary.total_planned_qty
        );
    }

    fn failed(&self, error: &MrpError, config: &MrpRunConfig) {
        tracing::warn!("MRP 運行失敗（運行日 {}）: {}", config.run_date, error);
    }
}
