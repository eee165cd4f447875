#![doc(test(attr(deny(warnings))))]

//! Cadence Core projects recurring financial events (subscriptions, dividend
//! payouts, bills and reminders) and summarizes dated snapshots into chart
//! buckets.
//!
//! The [`schedule`] module is pure and clock-free; the [`cli`] shell is a thin
//! collaborator that feeds it stored records.

pub mod cli;
pub mod config;
pub mod errors;
pub mod schedule;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Cadence Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
