pub mod schedule;
pub mod system;

use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(schedule::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub(crate) fn dispatch(context: &mut ShellContext, command: &str, args: &[&str]) -> CommandResult {
    let name = match command {
        "quit" => "exit",
        other => other,
    };
    let definition = all_definitions()
        .into_iter()
        .find(|definition| definition.name == name)
        .ok_or_else(|| CommandError::UnknownCommand(command.to_string()))?;
    (definition.handler)(context, args)
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {usage}"))
}
