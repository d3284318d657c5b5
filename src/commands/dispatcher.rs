use super::{
    ChatState, CommandOutput,
    handler::{
        ClearCommand, HelpCommand, HistoryCommand, ModelCommand, QuitCommand, SaveReportCommand,
        SearchCommand, WorkspaceCommand,
    },
    registry::CommandRegistry,
};
use crate::core::error::AgentError;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(
        &self,
        command: &str,
        args: &[&str],
        state: &mut ChatState,
    ) -> Result<CommandOutput, AgentError> {
        self.registry.execute(command, args, state)
    }

    /// Runs `line` if it is a slash command; `None` means it is chat text.
    pub fn execute_line(
        &self,
        line: &str,
        state: &mut ChatState,
    ) -> Option<Result<CommandOutput, AgentError>> {
        let rest = line.trim().strip_prefix('/')?;
        let parts: Vec<&str> = rest.split_whitespace().collect();
        let (command, args) = parts.split_first()?;
        Some(self.execute(command, args, state))
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("quit", QuitCommand);
    registry.register("help", HelpCommand);
    registry.register("clear", ClearCommand);
    registry.register("model", ModelCommand);
    registry.register("save", SaveReportCommand);
    registry.register("history", HistoryCommand);
    registry.register("workspace", WorkspaceCommand);
    registry.register("search", SearchCommand);

    CommandDispatcher::new(Arc::new(registry))
}
