use crate::cli::commands::{usage_error, CommandDefinition};
use crate::cli::core::{parse_date, CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::output;
use crate::schedule::{
    aggregate_with_current, buckets::bucket_changes, fire_due, project_all, project_with,
    rates::{self, round_currency},
    DateWindow, DueStatus, Frequency, HorizonSummary, ProjectedOccurrence, Snapshot, Transition,
};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "upcoming",
            "Next occurrence of each item within the horizon",
            "upcoming [days]",
            cmd_upcoming,
        ),
        CommandDefinition::new(
            "calendar",
            "Every occurrence between two dates",
            "calendar <from> <to>",
            cmd_calendar,
        ),
        CommandDefinition::new(
            "rates",
            "Equivalent weekly/monthly/quarterly/yearly totals",
            "rates",
            cmd_rates,
        ),
        CommandDefinition::new(
            "buckets",
            "Snapshots collapsed into calendar periods",
            "buckets [period] [current-value]",
            cmd_buckets,
        ),
        CommandDefinition::new(
            "fire",
            "Roll over every reminder that is due",
            "fire",
            cmd_fire,
        ),
    ]
}

fn cmd_upcoming(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let days = match args {
        [] => None,
        [raw] => Some(raw.parse::<u32>().map_err(|_| usage_error("upcoming [days]"))?),
        _ => return Err(usage_error("upcoming [days]")),
    };
    let today = context.today();
    let options = context.config.horizon(days);
    let precision = context.config.currency_precision;
    let dataset = context.dataset()?;

    let projection = project_with(&dataset.items, today, options);
    output::section(format!(
        "Upcoming from {today} ({} days)",
        options.horizon_days
    ));
    print_projection(&projection, precision);
    print_summary(&projection, precision);
    Ok(LoopControl::Continue)
}

fn cmd_calendar(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [from, to] = args else {
        return Err(usage_error("calendar <from> <to>"));
    };
    let window = DateWindow::new(parse_date(from)?, parse_date(to)?)?;
    let precision = context.config.currency_precision;
    let due_soon_days = context.config.due_soon_days;
    let dataset = context.dataset()?;

    let projection = project_all(&dataset.items, window, due_soon_days);
    output::section(format!("Calendar {} to {}", window.start, window.end));
    print_projection(&projection, precision);
    print_summary(&projection, precision);
    Ok(LoopControl::Continue)
}

fn cmd_rates(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let precision = context.config.currency_precision;
    let dataset = context.dataset()?;
    let totals = rates::aggregate(&dataset.items);

    output::section(format!("Rates across {} items", totals.item_count));
    for frequency in [
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::Quarterly,
        Frequency::Yearly,
    ] {
        let amount = totals.at(frequency).unwrap_or_default();
        output::row(format!(
            "{:<10} {}",
            frequency.label(),
            money(amount, precision)
        ));
    }
    Ok(LoopControl::Continue)
}

fn cmd_buckets(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "buckets [period] [current-value]";
    let (period, current) = match args {
        [] => (context.config.default_bucket_period, None),
        [period] => (period.parse::<Frequency>()?, None),
        [period, value] => {
            let value = value.parse::<f64>().map_err(|_| usage_error(usage))?;
            (period.parse::<Frequency>()?, Some(value))
        }
        _ => return Err(usage_error(usage)),
    };
    let today = context.today();
    let precision = context.config.currency_precision;
    let dataset = context.dataset()?;

    let current = current.map(|value| Snapshot::new(today, value));
    let buckets = aggregate_with_current(&dataset.snapshots, current, period)?;
    let changes = bucket_changes(&buckets);

    output::section(format!("{} buckets", period.label()));
    for (index, bucket) in buckets.iter().enumerate() {
        let change = index
            .checked_sub(1)
            .and_then(|prev| changes.get(prev))
            .map(|delta| format!("  ({:+.*})", precision as usize, delta))
            .unwrap_or_default();
        output::row(format!(
            "{:<10} {}  as of {}{}",
            bucket.key.to_string(),
            money(bucket.snapshot.value, precision),
            bucket.snapshot.date,
            change
        ));
    }
    if buckets.is_empty() {
        output::info("No snapshots to chart.");
    }
    Ok(LoopControl::Continue)
}

fn cmd_fire(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("fire takes no arguments".into()));
    }
    let today = context.today();
    let dataset = context.dataset_mut()?;
    let rollovers = fire_due(&dataset.reminders, today);
    for rollover in &rollovers {
        let title = &rollover.reminder.title;
        match rollover.transition {
            Transition::Advanced { from, to } => {
                output::row(format!("{title}: {from} -> {to}"));
            }
            Transition::Exhausted => {
                output::row(format!(
                    "{title}: one-time reminder fired, still due {}",
                    rollover.reminder.next_due_date
                ));
            }
            _ => {}
        }
    }
    let applied = dataset.apply_rollovers(&rollovers);
    if applied == 0 {
        output::info(format!("No reminders due on {today}."));
    } else {
        output::success(format!(
            "Rolled over {applied} reminders. Use `save` to persist them."
        ));
    }
    Ok(LoopControl::Continue)
}

fn print_projection(projection: &[ProjectedOccurrence<'_>], precision: u8) {
    if projection.is_empty() {
        output::info("Nothing scheduled.");
        return;
    }
    for entry in projection {
        let when = match entry.status {
            DueStatus::DueToday => "due today".to_string(),
            DueStatus::DueSoon | DueStatus::Upcoming => format!("in {} days", entry.days_until),
        };
        output::row(format!(
            "{}  {:<24} {:>12}  {:<10} {}",
            entry.date,
            entry.item.name,
            money(entry.item.amount_per_occurrence, precision),
            entry.item.frequency.label(),
            when
        ));
    }
}

fn print_summary(projection: &[ProjectedOccurrence<'_>], precision: u8) {
    let summary = HorizonSummary::from_projection(projection);
    if summary.occurrences > 0 {
        output::info(format!(
            "{} occurrences totalling {}",
            summary.occurrences,
            money(summary.total_amount, precision)
        ));
    }
}

fn money(value: f64, precision: u8) -> String {
    format!(
        "{:.*}",
        precision as usize,
        round_currency(value, precision)
    )
}
