mod common;

use cadence_core::errors::ScheduleError;
use cadence_core::schedule::{
    aggregate_with_current, append_current,
    buckets::aggregate,
    BucketKey, Frequency, Snapshot,
};
use common::date;

fn net_worth() -> Vec<Snapshot> {
    vec![
        Snapshot::new(date(2024, 3, 20), 1_300.0),
        Snapshot::new(date(2024, 1, 10), 1_000.0),
        Snapshot::new(date(2024, 3, 2), 1_250.0),
        Snapshot::new(date(2024, 5, 31), 1_500.0),
    ]
}

#[test]
fn later_snapshot_wins_within_month() {
    let buckets = aggregate(
        &[
            Snapshot::new(date(2024, 3, 20), 2.0),
            Snapshot::new(date(2024, 3, 5), 1.0),
        ],
        Frequency::Monthly,
    )
    .unwrap();
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].snapshot, Snapshot::new(date(2024, 3, 20), 2.0));
    assert_eq!(buckets[0].key.to_string(), "2024-03");
}

#[test]
fn same_date_tie_goes_to_later_input() {
    let buckets = aggregate(
        &[
            Snapshot::new(date(2024, 3, 20), 1.0),
            Snapshot::new(date(2024, 3, 20), 2.0),
        ],
        Frequency::Monthly,
    )
    .unwrap();
    assert_eq!(buckets[0].snapshot.value, 2.0);
}

#[test]
fn empty_periods_are_omitted_and_order_is_chronological() {
    let buckets = aggregate(&net_worth(), Frequency::Monthly).unwrap();
    let keys: Vec<_> = buckets.iter().map(|bucket| bucket.key.to_string()).collect();
    assert_eq!(keys, vec!["2024-01", "2024-03", "2024-05"]);
}

#[test]
fn quarterly_and_yearly_keys() {
    let quarters = aggregate(&net_worth(), Frequency::Quarterly).unwrap();
    let keys: Vec<_> = quarters.iter().map(|bucket| bucket.key).collect();
    assert_eq!(
        keys,
        vec![
            BucketKey::Quarter { year: 2024, quarter: 1 },
            BucketKey::Quarter { year: 2024, quarter: 2 },
        ]
    );
    assert_eq!(quarters[0].snapshot.value, 1_300.0);

    let years = aggregate(&net_worth(), Frequency::Yearly).unwrap();
    assert_eq!(years.len(), 1);
    assert_eq!(years[0].snapshot.date, date(2024, 5, 31));
}

#[test]
fn weekly_keys_use_iso_weeks() {
    let buckets = aggregate(
        &[
            Snapshot::new(date(2023, 1, 1), 1.0),
            Snapshot::new(date(2023, 1, 2), 2.0),
        ],
        Frequency::Weekly,
    )
    .unwrap();
    let keys: Vec<_> = buckets.iter().map(|bucket| bucket.key.to_string()).collect();
    assert_eq!(keys, vec!["2022-W52", "2023-W01"]);
}

#[test]
fn current_point_appended_only_for_new_period() {
    let history = net_worth();
    let same_month = Snapshot::new(date(2024, 5, 31), 1_550.0);
    let buckets = aggregate_with_current(&history, Some(same_month), Frequency::Monthly).unwrap();
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[2].snapshot.value, 1_500.0);

    let next_month = Snapshot::new(date(2024, 6, 3), 1_600.0);
    let buckets = aggregate_with_current(&history, Some(next_month), Frequency::Monthly).unwrap();
    assert_eq!(buckets.len(), 4);
    assert_eq!(buckets[3].key.to_string(), "2024-06");
}

#[test]
fn current_point_starts_an_empty_history() {
    let mut buckets = Vec::new();
    let appended = append_current(
        &mut buckets,
        Snapshot::new(date(2024, 6, 3), 10.0),
        Frequency::Yearly,
    )
    .unwrap();
    assert!(appended);
    assert_eq!(buckets[0].key, BucketKey::Year { year: 2024 });
}

#[test]
fn one_time_period_is_rejected() {
    assert!(matches!(
        aggregate(&net_worth(), Frequency::Once),
        Err(ScheduleError::UnsupportedFrequency(_))
    ));
}
