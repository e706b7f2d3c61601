//! 日期計算
//!
//! 全部以純日曆天計算；若日後要換成工作日曆，只需替換此處的
//! `offset_days`，淨算邏輯不受影響。

use chrono::{Duration, NaiveDate};

/// 偏移日曆天（`days` 為負值時往前推）
pub fn offset_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .expect("日期溢出")
}

/// 兩日期相差的日曆天數（`a - b`）
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days()
}
