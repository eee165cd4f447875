mod common;

use cadence_core::schedule::{
    convert,
    rates::{aggregate, round_currency},
    yearly_amount, Frequency, WEEKS_PER_MONTH,
};
use common::{approx_eq, date, item};

#[test]
fn monthly_to_yearly() {
    let yearly = convert(9.99, Frequency::Monthly, Frequency::Yearly).unwrap();
    assert!(approx_eq(yearly, 119.88));
    assert_eq!(round_currency(yearly, 2), 119.88);
}

#[test]
fn one_time_amounts_have_no_rate() {
    assert_eq!(convert(10.0, Frequency::Once, Frequency::Monthly), None);
    assert_eq!(convert(10.0, Frequency::Monthly, Frequency::Once), None);
    let fee = item("Fee", date(2024, 1, 1), Frequency::Once, 10.0);
    assert_eq!(yearly_amount(&fee), None);
}

#[test]
fn direct_and_indirect_conversions_agree() {
    let direct = convert(12.0, Frequency::Weekly, Frequency::Monthly).unwrap();
    let via_year = convert(
        convert(12.0, Frequency::Weekly, Frequency::Yearly).unwrap(),
        Frequency::Yearly,
        Frequency::Monthly,
    )
    .unwrap();
    assert!(approx_eq(direct, via_year));
    assert!(approx_eq(direct, 12.0 * WEEKS_PER_MONTH));
}

#[test]
fn aggregate_sums_yearly_then_converts_once() {
    let items = vec![
        item("Streaming", date(2024, 1, 1), Frequency::Monthly, 9.99),
        item("Paper", date(2024, 1, 1), Frequency::Weekly, 3.0),
        item("Domain", date(2024, 1, 1), Frequency::Yearly, 15.0),
        item("Setup", date(2024, 1, 1), Frequency::Once, 50.0),
        item("Old", date(2024, 1, 1), Frequency::Monthly, 100.0).inactive(),
    ];
    let totals = aggregate(&items);
    let yearly = 9.99 * 12.0 + 3.0 * 52.0 + 15.0;
    assert_eq!(totals.item_count, 3);
    assert!(approx_eq(totals.yearly, yearly));
    assert!(approx_eq(totals.monthly, yearly / 12.0));
    assert!(approx_eq(totals.quarterly, yearly / 4.0));
    assert!(approx_eq(totals.weekly, yearly / 52.0));
    assert_eq!(totals.at(Frequency::Once), None);
}

#[test]
fn aggregate_of_nothing_is_zero() {
    let items: Vec<cadence_core::schedule::RecurringItem> = Vec::new();
    let totals = aggregate(&items);
    assert_eq!(totals.item_count, 0);
    assert_eq!(totals.yearly, 0.0);
    assert_eq!(totals.weekly, 0.0);
}
