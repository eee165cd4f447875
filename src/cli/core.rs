use std::{io, path::PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::cli::clock::{Clock, FixedClock, SystemClock};
use crate::cli::commands;
use crate::cli::dataset::Dataset;
use crate::cli::output;
use crate::config::{ConfigError, ConfigManager, EngineConfig};
use crate::errors::ScheduleError;

pub const CONFIG_PATH_ENV: &str = "CADENCE_CORE_CONFIG";

/// Errors that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Errors reported for a single command; the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("No dataset loaded. Use `load <path>` first.")]
    DatasetNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Unknown command `{0}`. Type `help` for the command list.")]
    UnknownCommand(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

pub type CommandResult = Result<LoopControl, CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Mutable state of one shell session.
pub struct ShellContext {
    pub mode: CliMode,
    pub running: bool,
    pub config: EngineConfig,
    pub config_manager: ConfigManager,
    pub dataset: Option<Dataset>,
    pub dataset_path: Option<PathBuf>,
    clock: Box<dyn Clock>,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Self {
        let config_manager = std::env::var_os(CONFIG_PATH_ENV)
            .map(|path| ConfigManager::new(PathBuf::from(path)))
            .unwrap_or_else(ConfigManager::at_default_location);
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                output::warning(format!(
                    "Ignoring config at {}: {err}",
                    config_manager.config_path().display()
                ));
                EngineConfig::default()
            }
        };
        Self {
            mode,
            running: true,
            config,
            config_manager,
            dataset: None,
            dataset_path: None,
            clock: Box::new(SystemClock),
        }
    }

    /// Reference date for every projection in this session.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn pin_today(&mut self, date: NaiveDate) {
        self.clock = Box::new(FixedClock(date));
    }

    pub fn dataset(&self) -> Result<&Dataset, CommandError> {
        self.dataset.as_ref().ok_or(CommandError::DatasetNotLoaded)
    }

    pub fn dataset_mut(&mut self) -> Result<&mut Dataset, CommandError> {
        self.dataset.as_mut().ok_or(CommandError::DatasetNotLoaded)
    }

    pub fn prompt(&self) -> String {
        match &self.dataset_path {
            Some(path) => format!(
                "cadence [{}]> ",
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default()
            ),
            None => "cadence> ".into(),
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        commands::all_definitions()
            .into_iter()
            .map(|definition| definition.name)
            .collect()
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> CommandResult {
        tracing::debug!(command, ?args, "dispatching command");
        commands::dispatch(self, command, args)
    }

    pub fn report_error(&self, err: CommandError) {
        output::error(err);
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{raw}` is not a date (expected YYYY-MM-DD)"))
    })
}
