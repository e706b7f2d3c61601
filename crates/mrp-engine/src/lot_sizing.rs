//! 批量化
//!
//! 將分配後仍有殘量的需求轉為計劃訂單：損耗放大 → 前批結轉
//! 沖抵 → EOQ 墊高（超出部分進結轉）→ 包裝倍量向上湊整（不產
//! 生結轉，超出量留在訂單內）→ 需求日回推提前期。計劃屬性一律
//! 取自該料號的層級記錄；結轉只在單一料號的一次走訪內存活，
//! 絕不跨料號。

use mrp_core::dates::offset_days;
use mrp_core::{LevelRecord, MrpRunConfig, OrderType, PlannedOrder, Requirement};
use mrp_store::MakeOrBuy;
use rust_decimal::{Decimal, RoundingStrategy};

/// 批量規則計算器
pub struct LotSizingCalculator;

impl LotSizingCalculator {
    /// 將未滿足需求轉為計劃訂單（依日期升冪走訪）
    pub fn apply(
        record: &LevelRecord,
        unmet: &[Requirement],
        make_or_buy: MakeOrBuy,
        config: &MrpRunConfig,
    ) -> Vec<PlannedOrder> {
        let hundred = Decimal::ONE_HUNDRED;
        let order_type = Self::determine_order_type(make_or_buy);

        let mut planned = Vec::new();
        let mut carry = Decimal::ZERO;

        for requirement in unmet.iter().filter(|r| r.is_unmet()) {
            let mut needed = requirement.quantity;

            // 損耗放大：每筆未滿足需求恰好放大一次
            if config.use_shrinkage
                && record.shrink_factor > Decimal::ZERO
                && record.shrink_factor < hundred
            {
                needed = (needed * hundred / (hundred - record.shrink_factor))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            }

            // 前批結轉足以吸收：不開單
            if carry >= needed {
                carry -= needed;
                continue;
            }

            let mut plan_qty = needed - carry;
            carry = Decimal::ZERO;

            if config.use_eoq && record.eoq > plan_qty {
                carry = record.eoq - plan_qty;
                plan_qty = record.eoq;
            }

            if config.use_pan_size && record.pan_size > Decimal::ZERO {
                plan_qty = (plan_qty / record.pan_size).ceil() * record.pan_size;
            }

            planned.push(PlannedOrder::new(
                record.part_id.clone(),
                plan_qty,
                offset_days(requirement.date_required, -(record.lead_time_days as i64)),
                order_type,
                requirement.demand_type,
                requirement.order_no.clone(),
            ));
        }

        planned
    }

    /// 決定訂單類型
    fn determine_order_type(make_or_buy: MakeOrBuy) -> OrderType {
        match make_or_buy {
            MakeOrBuy::Make => OrderType::Production,
            MakeOrBuy::Buy => OrderType::Purchase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mrp_core::DemandType;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn unmet(qty: i64, date: NaiveDate) -> Requirement {
        Requirement::direct("VALVE", Decimal::from(qty), date, DemandType::SalesOrder, "102")
    }

    fn record() -> LevelRecord {
        LevelRecord::new("VALVE", 0)
    }

    fn config() -> MrpRunConfig {
        MrpRunConfig::new(d(2024, 2, 1))
    }

    #[test]
    fn test_lead_time_offset() {
        let record = record().with_lead_time_days(5);

        let planned = LotSizingCalculator::apply(
            &record,
            &[unmet(30, d(2024, 2, 10))],
            MakeOrBuy::Buy,
            &config(),
        );

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].quantity, Decimal::from(30));
        assert_eq!(planned[0].due_date, d(2024, 2, 5));
        assert_eq!(planned[0].source_order_no, "102");
    }

    #[test]
    fn test_zero_lead_time_dates_coincide() {
        let planned = LotSizingCalculator::apply(
            &record(),
            &[unmet(30, d(2024, 2, 10))],
            MakeOrBuy::Buy,
            &config(),
        );

        assert_eq!(planned[0].due_date, d(2024, 2, 10));
    }

    #[test]
    fn test_shrinkage_inflates_once() {
        let record = record().with_shrink_factor(Decimal::from(10));
        let config = config().with_shrinkage(true);

        let planned = LotSizingCalculator::apply(
            &record,
            &[unmet(90, d(2024, 2, 10))],
            MakeOrBuy::Buy,
            &config,
        );

        // 90 · 100 / 90 = 100.00
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].quantity, Decimal::from(100));
    }

    #[test]
    fn test_shrinkage_disabled_or_out_of_range() {
        let config = config().with_shrinkage(true);

        // 率為 0：不放大
        let planned = LotSizingCalculator::apply(
            &record(),
            &[unmet(90, d(2024, 2, 10))],
            MakeOrBuy::Buy,
            &config,
        );
        assert_eq!(planned[0].quantity, Decimal::from(90));

        // 率為 100：視為無效，不放大
        let bad = record().with_shrink_factor(Decimal::ONE_HUNDRED);
        let planned = LotSizingCalculator::apply(
            &bad,
            &[unmet(90, d(2024, 2, 10))],
            MakeOrBuy::Buy,
            &config,
        );
        assert_eq!(planned[0].quantity, Decimal::from(90));
    }

    #[test]
    fn test_eoq_carry_absorbs_next_requirement() {
        let record = record().with_eoq(Decimal::from(100));
        let config = config().with_eoq(true);

        let planned = LotSizingCalculator::apply(
            &record,
            &[unmet(30, d(2024, 2, 1)), unmet(40, d(2024, 2, 5))],
            MakeOrBuy::Buy,
            &config,
        );

        // 第一筆墊高到 100，結轉 70 吸收第二筆的 40
        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].quantity, Decimal::from(100));
        assert_eq!(planned[0].due_date, d(2024, 2, 1));
    }

    #[test]
    fn test_eoq_carry_partial_absorption() {
        let record = record().with_eoq(Decimal::from(50));
        let config = config().with_eoq(true);

        let planned = LotSizingCalculator::apply(
            &record,
            &[unmet(30, d(2024, 2, 1)), unmet(40, d(2024, 2, 5))],
            MakeOrBuy::Buy,
            &config,
        );

        // 結轉 20 不足 40：第二張訂單補 20，再墊高到 EOQ 50
        assert_eq!(planned.len(), 2);
        assert_eq!(planned[0].quantity, Decimal::from(50));
        assert_eq!(planned[1].quantity, Decimal::from(50));
    }

    #[test]
    fn test_pan_size_rounds_up() {
        let record = record().with_pan_size(Decimal::from(25));
        let config = config().with_pan_size(true);

        let planned = LotSizingCalculator::apply(
            &record,
            &[unmet(30, d(2024, 2, 10))],
            MakeOrBuy::Buy,
            &config,
        );

        assert_eq!(planned[0].quantity, Decimal::from(50));
    }

    #[test]
    fn test_pan_size_idempotent_on_multiple() {
        let record = record().with_pan_size(Decimal::from(25));
        let config = config().with_pan_size(true);

        // 已是倍數：不動
        let planned = LotSizingCalculator::apply(
            &record,
            &[unmet(75, d(2024, 2, 10))],
            MakeOrBuy::Buy,
            &config,
        );

        assert_eq!(planned[0].quantity, Decimal::from(75));
    }

    #[test]
    fn test_make_or_buy_maps_to_order_type() {
        let planned = LotSizingCalculator::apply(
            &record(),
            &[unmet(10, d(2024, 2, 10))],
            MakeOrBuy::Make,
            &config(),
        );
        assert_eq!(planned[0].order_type, OrderType::Production);

        let planned = LotSizingCalculator::apply(
            &record(),
            &[unmet(10, d(2024, 2, 10))],
            MakeOrBuy::Buy,
            &config(),
        );
        assert_eq!(planned[0].order_type, OrderType::Purchase);
    }

    #[test]
    fn test_fully_met_requirements_emit_nothing() {
        let met = Requirement::direct(
            "VALVE",
            Decimal::ZERO,
            d(2024, 2, 10),
            DemandType::SalesOrder,
            "102",
        );

        let planned =
            LotSizingCalculator::apply(&record(), &[met], MakeOrBuy::Buy, &config());
        assert!(planned.is_empty());
    }
}
