//! Line-oriented shell that loads stored records and prints what the schedule
//! layer derives from them.

pub mod clock;
pub mod commands;
pub mod core;
pub mod dataset;
pub mod output;
mod shell;

pub use shell::{run_cli, SCRIPT_MODE_ENV};
