#![allow(dead_code)]

use cadence_core::schedule::{Frequency, RecurringItem};
use chrono::NaiveDate;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

pub fn item(name: &str, start: NaiveDate, frequency: Frequency, amount: f64) -> RecurringItem {
    RecurringItem::new(name, start, frequency, amount)
}

pub fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}
