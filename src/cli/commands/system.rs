use std::path::PathBuf;

use crate::cli::commands::{all_definitions, usage_error, CommandDefinition};
use crate::cli::core::{parse_date, CommandError, CommandResult, LoopControl, ShellContext};
use crate::cli::dataset::Dataset;
use crate::cli::output;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help", cmd_help),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "load",
            "Load items, reminders and snapshots from a JSON file",
            "load <path>",
            cmd_load,
        ),
        CommandDefinition::new(
            "save",
            "Write the current dataset back to disk",
            "save [path]",
            cmd_save,
        ),
        CommandDefinition::new(
            "today",
            "Show or pin the reference date",
            "today [YYYY-MM-DD]",
            cmd_today,
        ),
        CommandDefinition::new(
            "config",
            "Show or change engine settings",
            "config [show|set <key> <value>]",
            cmd_config,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_help(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Commands");
    for definition in all_definitions() {
        output::row(format!("{:<28} {}", definition.usage, definition.description));
    }
    Ok(LoopControl::Continue)
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Cadence Core {}", meta.version));
    output::row(format!("Build hash : {} ({})", meta.git_hash, meta.git_status));
    output::row(format!("Built at   : {}", meta.timestamp));
    output::row(format!("Target     : {}", meta.target));
    output::row(format!("Profile    : {}", meta.profile));
    output::row(format!("Rustc      : {}", meta.rustc));
    Ok(LoopControl::Continue)
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error("load <path>"));
    };
    let path = PathBuf::from(raw);
    let dataset = Dataset::load_from_path(&path)?;
    dataset.validate()?;
    output::success(format!(
        "Loaded {} items, {} reminders, {} snapshots from {}",
        dataset.items.len(),
        dataset.reminders.len(),
        dataset.snapshots.len(),
        path.display()
    ));
    context.dataset = Some(dataset);
    context.dataset_path = Some(path);
    Ok(LoopControl::Continue)
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args {
        [raw] => PathBuf::from(raw),
        [] => context
            .dataset_path
            .clone()
            .ok_or_else(|| usage_error("save <path>"))?,
        _ => return Err(usage_error("save [path]")),
    };
    context.dataset()?.save_to_path(&path)?;
    output::success(format!("Dataset saved to {}", path.display()));
    context.dataset_path = Some(path);
    Ok(LoopControl::Continue)
}

fn cmd_today(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {}
        [raw] => context.pin_today(parse_date(raw)?),
        _ => return Err(usage_error("today [YYYY-MM-DD]")),
    }
    output::info(format!("Reference date: {}", context.today()));
    Ok(LoopControl::Continue)
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => show_config(context),
        ["set", key, value @ ..] if !value.is_empty() => {
            let value = value.join(" ");
            context.config.set_value(key, &value)?;
            context.config_manager.save(&context.config)?;
            output::success(format!(
                "{key} set to {value} (saved to {}).",
                context.config_manager.config_path().display()
            ));
            Ok(LoopControl::Continue)
        }
        _ => Err(usage_error("config [show|set <key> <value>]")),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = &context.config;
    output::section("Configuration");
    output::row(format!(
        "Source          : {}",
        context.config_manager.config_path().display()
    ));
    output::row(format!("Horizon days    : {}", config.default_horizon_days));
    output::row(format!("Due-soon days   : {}", config.due_soon_days));
    output::row(format!("Bucket period   : {}", config.default_bucket_period));
    output::row(format!("Precision       : {}", config.currency_precision));
    Ok(LoopControl::Continue)
}

fn cmd_exit(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("exit takes no arguments".into()));
    }
    Ok(LoopControl::Exit)
}
