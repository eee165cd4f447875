mod common;

use cadence_core::schedule::{
    next_occurrence, occurrences_between, previous_occurrence, DateWindow, Frequency,
};
use chrono::Duration;
use common::{date, item};

#[test]
fn monthly_advance_clamps_to_february() {
    assert_eq!(Frequency::Monthly.advance(date(2024, 1, 31)), date(2024, 2, 29));
    assert_eq!(Frequency::Monthly.advance(date(2023, 1, 31)), date(2023, 2, 28));
}

#[test]
fn weekly_series_past_end_date_has_no_occurrence() {
    let gym = item("Gym", date(2024, 1, 1), Frequency::Weekly, 12.0).with_end_date(date(2024, 1, 15));
    assert_eq!(next_occurrence(&gym, date(2024, 1, 20)), None);
}

#[test]
fn end_date_is_inclusive() {
    let gym = item("Gym", date(2024, 1, 1), Frequency::Weekly, 12.0).with_end_date(date(2024, 1, 15));
    assert_eq!(next_occurrence(&gym, date(2024, 1, 10)), Some(date(2024, 1, 15)));
    assert_eq!(next_occurrence(&gym, date(2024, 1, 15)), None);
}

#[test]
fn next_occurrence_is_strictly_after_reference() {
    let rent = item("Rent", date(2024, 1, 5), Frequency::Monthly, 900.0);
    assert_eq!(next_occurrence(&rent, date(2024, 1, 5)), Some(date(2024, 2, 5)));
    assert_eq!(next_occurrence(&rent, date(2024, 1, 4)), Some(date(2024, 1, 5)));
    assert_eq!(next_occurrence(&rent, date(2023, 6, 1)), Some(date(2024, 1, 5)));
}

#[test]
fn next_occurrence_is_idempotent() {
    let plan = item("Cloud", date(2021, 3, 31), Frequency::Quarterly, 30.0);
    let reference = date(2024, 7, 14);
    assert_eq!(next_occurrence(&plan, reference), next_occurrence(&plan, reference));
}

#[test]
fn next_occurrence_is_monotonic_in_reference() {
    for frequency in Frequency::PERIODIC {
        let series = item("Series", date(2023, 1, 31), frequency, 1.0);
        let mut reference = date(2022, 12, 1);
        let mut last = next_occurrence(&series, reference).expect("open-ended series");
        while reference < date(2025, 3, 1) {
            reference = reference + Duration::days(3);
            let next = next_occurrence(&series, reference).expect("open-ended series");
            assert!(next >= last, "{frequency}: {next} before {last}");
            assert!(next > reference);
            last = next;
        }
    }
}

#[test]
fn far_past_weekly_start_resolves_directly() {
    let savings = item("Savings", date(1970, 1, 1), Frequency::Weekly, 5.0);
    assert_eq!(next_occurrence(&savings, date(2024, 3, 1)), Some(date(2024, 3, 7)));
}

#[test]
fn one_time_item_stays_on_its_start_date() {
    let fee = item("Annual fee", date(2024, 5, 1), Frequency::Once, 95.0);
    assert_eq!(next_occurrence(&fee, date(2024, 4, 1)), Some(date(2024, 5, 1)));
    assert_eq!(next_occurrence(&fee, date(2024, 6, 1)), Some(date(2024, 5, 1)));
}

#[test]
fn inactive_item_has_no_occurrence() {
    let paused = item("Paused", date(2024, 1, 1), Frequency::Monthly, 10.0).inactive();
    assert_eq!(next_occurrence(&paused, date(2024, 3, 1)), None);
}

#[test]
fn previous_occurrence_respects_end_date() {
    let loan = item("Loan", date(2024, 1, 10), Frequency::Monthly, 250.0).with_end_date(date(2024, 4, 30));
    assert_eq!(previous_occurrence(&loan, date(2024, 3, 9)), Some(date(2024, 2, 10)));
    assert_eq!(previous_occurrence(&loan, date(2024, 3, 10)), Some(date(2024, 3, 10)));
    assert_eq!(previous_occurrence(&loan, date(2024, 9, 1)), Some(date(2024, 4, 10)));
    assert_eq!(previous_occurrence(&loan, date(2023, 12, 31)), None);
}

#[test]
fn enumeration_covers_every_weekly_date_in_window() {
    let lessons = item("Lessons", date(2024, 1, 3), Frequency::Weekly, 40.0);
    let window = DateWindow::new(date(2024, 1, 10), date(2024, 2, 7)).unwrap();
    assert_eq!(
        occurrences_between(&lessons, window),
        vec![
            date(2024, 1, 10),
            date(2024, 1, 17),
            date(2024, 1, 24),
            date(2024, 1, 31),
            date(2024, 2, 7),
        ]
    );
}

#[test]
fn enumeration_follows_clamped_monthly_steps() {
    let bill = item("Bill", date(2024, 1, 31), Frequency::Monthly, 60.0);
    let window = DateWindow::new(date(2024, 1, 1), date(2024, 4, 30)).unwrap();
    assert_eq!(
        occurrences_between(&bill, window),
        vec![
            date(2024, 1, 31),
            date(2024, 2, 29),
            date(2024, 3, 29),
            date(2024, 4, 29),
        ]
    );
}

#[test]
fn enumeration_of_one_time_item() {
    let fee = item("Fee", date(2024, 2, 14), Frequency::Once, 20.0);
    let inside = DateWindow::new(date(2024, 2, 1), date(2024, 2, 28)).unwrap();
    let outside = DateWindow::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap();
    assert_eq!(occurrences_between(&fee, inside), vec![date(2024, 2, 14)]);
    assert!(occurrences_between(&fee, outside).is_empty());
}
