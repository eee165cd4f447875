use thiserror::Error;

/// Error type for conditions the schedule layer reports instead of computing.
///
/// A missing occurrence is never an error; it is `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    #[error("Unsupported frequency: {0}")]
    UnsupportedFrequency(String),
    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}
