//! 淨需求計算
//!
//! 單一料號的時間分段供需分配：需求依需求日、供應依到期日各自
//! 升冪（現有庫存掛逾期哨兵日期，必然最先被消耗），以雙指針互
//! 相沖銷；分配後仍有殘量的需求即為淨需求。

use mrp_core::dates::days_between;
use mrp_core::{Requirement, Supply};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// 單一料號的淨算結果（彙總用）
#[derive(Debug, Clone)]
pub struct PartNetting {
    /// 毛需求合計（分配前）
    pub gross_requirements: Decimal,

    /// 預計收貨合計（分配前，含現有庫存）
    pub scheduled_receipts: Decimal,

    /// 淨需求合計（分配後殘量）
    pub net_requirements: Decimal,
}

/// 淨需求計算器
pub struct NettingCalculator;

impl NettingCalculator {
    /// 依日期排序需求（穩定排序，保留載入順序當平手鍵）
    pub fn sort_requirements(requirements: &mut [Requirement]) {
        requirements.sort_by_key(|r| r.date_required);
    }

    /// 依到期日排序供應
    pub fn sort_supplies(supplies: &mut [Supply]) {
        supplies.sort_by_key(|s| s.due_date);
    }

    /// 供需分配
    ///
    /// 雙指針走訪已排序的需求與供應，逐筆沖銷。當前供應比當前
    /// 需求晚超過 `leeway_days` 時，對該筆供應標記建議改期（寫
    /// `mrp_date`，實際到期日不動，且每筆至多一次）。
    pub fn allocate(
        requirements: &mut [Requirement],
        supplies: &mut [Supply],
        leeway_days: i64,
    ) -> PartNetting {
        let gross_requirements: Decimal = requirements.iter().map(|r| r.quantity).sum();
        let scheduled_receipts: Decimal = supplies.iter().map(|s| s.quantity).sum();

        let (mut r, mut s) = (0usize, 0usize);
        while r < requirements.len() && s < supplies.len() {
            let date_required = requirements[r].date_required;
            let supply = &mut supplies[s];

            if days_between(supply.due_date, date_required) > leeway_days {
                supply.advise_reschedule(date_required);
            }

            let requirement = &mut requirements[r];
            match requirement.quantity.cmp(&supply.quantity) {
                Ordering::Greater => {
                    requirement.quantity -= supply.quantity;
                    supply.quantity = Decimal::ZERO;
                    s += 1;
                }
                Ordering::Less => {
                    supply.quantity -= requirement.quantity;
                    requirement.quantity = Decimal::ZERO;
                    r += 1;
                }
                Ordering::Equal => {
                    supply.quantity = Decimal::ZERO;
                    requirement.quantity = Decimal::ZERO;
                    r += 1;
                    s += 1;
                }
            }
        }

        let net_requirements: Decimal = requirements.iter().map(|r| r.quantity).sum();

        PartNetting {
            gross_requirements,
            scheduled_receipts,
            net_requirements,
        }
    }
}
