//! Collapses irregular snapshots into calendar buckets for trend charts.

use std::{collections::BTreeMap, fmt};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use super::frequency::{days_in_month, Frequency};
use super::item::Snapshot;
use crate::errors::ScheduleError;

/// Calendar period a snapshot belongs to. Keys of one variant order
/// chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "period", rename_all = "lowercase")]
pub enum BucketKey {
    Day { date: NaiveDate },
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Year { year: i32 },
}

impl BucketKey {
    pub fn for_date(period: Frequency, date: NaiveDate) -> Result<BucketKey, ScheduleError> {
        let key = match period {
            Frequency::Once => {
                return Err(ScheduleError::UnsupportedFrequency(
                    "one-time periods cannot bucket snapshots".into(),
                ))
            }
            Frequency::Daily => BucketKey::Day { date },
            Frequency::Weekly => {
                let iso = date.iso_week();
                BucketKey::Week {
                    year: iso.year(),
                    week: iso.week(),
                }
            }
            Frequency::Monthly => BucketKey::Month {
                year: date.year(),
                month: date.month(),
            },
            Frequency::Quarterly => BucketKey::Quarter {
                year: date.year(),
                quarter: date.month().div_ceil(3),
            },
            Frequency::Yearly => BucketKey::Year { year: date.year() },
        };
        Ok(key)
    }

    /// First calendar day covered by the bucket.
    pub fn start_date(&self) -> Option<NaiveDate> {
        match *self {
            BucketKey::Day { date } => Some(date),
            BucketKey::Week { year, week } => NaiveDate::from_isoywd_opt(year, week, Weekday::Mon),
            BucketKey::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1),
            BucketKey::Quarter { year, quarter } => {
                let last_month = quarter_end_month(quarter)?;
                NaiveDate::from_ymd_opt(year, last_month - 2, 1)
            }
            BucketKey::Year { year } => NaiveDate::from_ymd_opt(year, 1, 1),
        }
    }

    /// Last calendar day covered by the bucket.
    pub fn end_date(&self) -> Option<NaiveDate> {
        match *self {
            BucketKey::Day { date } => Some(date),
            BucketKey::Week { year, week } => NaiveDate::from_isoywd_opt(year, week, Weekday::Sun),
            BucketKey::Month { year, month } => {
                NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            }
            BucketKey::Quarter { year, quarter } => {
                let month = quarter_end_month(quarter)?;
                NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            }
            BucketKey::Year { year } => NaiveDate::from_ymd_opt(year, 12, 31),
        }
    }
}

/// Last month of a quarter numbered 1 to 4.
fn quarter_end_month(quarter: u32) -> Option<u32> {
    (1..=4).contains(&quarter).then(|| quarter * 3)
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Day { date } => write!(f, "{}", date.format("%Y-%m-%d")),
            BucketKey::Week { year, week } => write!(f, "{year}-W{week:02}"),
            BucketKey::Month { year, month } => write!(f, "{year}-{month:02}"),
            BucketKey::Quarter { year, quarter } => write!(f, "{year}-Q{quarter}"),
            BucketKey::Year { year } => write!(f, "{year}"),
        }
    }
}

/// One chart point: the value as of the end of its period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bucket {
    pub key: BucketKey,
    pub snapshot: Snapshot,
}

/// Groups `snapshots` by `period`, keeping the latest-dated snapshot of each
/// bucket. When two snapshots share that date the later one in input order
/// wins. Empty periods are omitted; output is chronological.
pub fn aggregate(snapshots: &[Snapshot], period: Frequency) -> Result<Vec<Bucket>, ScheduleError> {
    let mut grouped: BTreeMap<BucketKey, Snapshot> = BTreeMap::new();
    for snapshot in snapshots {
        let key = BucketKey::for_date(period, snapshot.date)?;
        grouped
            .entry(key)
            .and_modify(|kept| {
                if snapshot.date >= kept.date {
                    *kept = *snapshot;
                }
            })
            .or_insert(*snapshot);
    }
    debug!(
        snapshots = snapshots.len(),
        buckets = grouped.len(),
        %period,
        "aggregated snapshots"
    );
    Ok(grouped
        .into_iter()
        .map(|(key, snapshot)| Bucket { key, snapshot })
        .collect())
}

/// Appends a synthetic as-of-today point unless the newest bucket already
/// covers its period. Returns whether it was appended.
pub fn append_current(
    buckets: &mut Vec<Bucket>,
    current: Snapshot,
    period: Frequency,
) -> Result<bool, ScheduleError> {
    let key = BucketKey::for_date(period, current.date)?;
    if buckets.last().is_some_and(|last| last.key >= key) {
        return Ok(false);
    }
    buckets.push(Bucket {
        key,
        snapshot: current,
    });
    Ok(true)
}

pub fn aggregate_with_current(
    snapshots: &[Snapshot],
    current: Option<Snapshot>,
    period: Frequency,
) -> Result<Vec<Bucket>, ScheduleError> {
    let mut buckets = aggregate(snapshots, period)?;
    if let Some(current) = current {
        append_current(&mut buckets, current, period)?;
    }
    Ok(buckets)
}

/// Change from each bucket to the next, aligned with `buckets[1..]`.
pub fn bucket_changes(buckets: &[Bucket]) -> Vec<f64> {
    buckets
        .windows(2)
        .map(|pair| pair[1].snapshot.value - pair[0].snapshot.value)
        .collect()
}
