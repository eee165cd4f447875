use serde::Serialize;
use tracing::trace;

use super::frequency::Frequency;
use super::item::RecurringItem;

/// Weeks per month derived from the per-year constants (52 / 12), used for
/// every weekly/monthly mix so direct and indirect conversions agree.
pub const WEEKS_PER_MONTH: f64 = 52.0 / 12.0;

/// Converts a per-occurrence amount into the equivalent amount at another
/// frequency, via the yearly total. `None` when either side is one-time.
pub fn convert(amount: f64, from: Frequency, to: Frequency) -> Option<f64> {
    let yearly = amount * from.occurrences_per_year()? as f64;
    from_yearly(yearly, to)
}

fn from_yearly(yearly: f64, to: Frequency) -> Option<f64> {
    Some(yearly / to.occurrences_per_year()? as f64)
}

/// Yearly cost or income of one item; `None` for one-time items.
pub fn yearly_amount(item: &RecurringItem) -> Option<f64> {
    convert(item.amount_per_occurrence, item.frequency, Frequency::Yearly)
}

/// Aggregate equivalent rates of a set of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RateTotals {
    pub weekly: f64,
    pub monthly: f64,
    pub quarterly: f64,
    pub yearly: f64,
    /// Items that contributed; one-time and inactive items are left out.
    pub item_count: usize,
}

impl RateTotals {
    pub fn at(&self, frequency: Frequency) -> Option<f64> {
        match frequency {
            Frequency::Weekly => Some(self.weekly),
            Frequency::Monthly => Some(self.monthly),
            Frequency::Quarterly => Some(self.quarterly),
            Frequency::Yearly => Some(self.yearly),
            Frequency::Daily => from_yearly(self.yearly, Frequency::Daily),
            Frequency::Once => None,
        }
    }
}

/// Sums the yearly equivalent of every active periodic item, then converts the
/// sum once per target period. The weekly figure is the monthly one spread over
/// [`WEEKS_PER_MONTH`].
pub fn aggregate<'a, I>(items: I) -> RateTotals
where
    I: IntoIterator<Item = &'a RecurringItem>,
{
    let mut yearly = 0.0;
    let mut item_count = 0;
    for item in items.into_iter().filter(|item| item.active) {
        if let Some(amount) = yearly_amount(item) {
            yearly += amount;
            item_count += 1;
        } else {
            trace!(item = %item.name, "one-time item left out of rates");
        }
    }
    let monthly = from_yearly(yearly, Frequency::Monthly).unwrap_or_default();
    RateTotals {
        weekly: monthly / WEEKS_PER_MONTH,
        monthly,
        quarterly: from_yearly(yearly, Frequency::Quarterly).unwrap_or_default(),
        yearly,
        item_count,
    }
}

/// Rounds half away from zero to `precision` decimal places for display.
pub fn round_currency(value: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
