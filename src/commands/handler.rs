use super::{ChatState, CommandOutput};
use crate::config::Provider;
use crate::core::error::AgentError;
use crate::panel::PanelCommand;

use console::style;

pub trait CommandHandler: Send + Sync {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<CommandOutput, AgentError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct ClearCommand;
pub struct ModelCommand;
pub struct SaveReportCommand;
pub struct HistoryCommand;
pub struct WorkspaceCommand;
pub struct SearchCommand;

impl CommandHandler for QuitCommand {
    fn execute(&self, state: &mut ChatState, _args: &[&str]) -> Result<CommandOutput, AgentError> {
        state.should_continue = false;
        Ok(CommandOutput::Nothing)
    }

    fn help(&self) -> &'static str {
        "/quit - Exit the chat session"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(
        &self,
        _state: &mut ChatState,
        _args: &[&str],
    ) -> Result<CommandOutput, AgentError> {
        let title = style("Available Commands").bold().underlined();
        let help_text = [
            title.to_string(),
            WorkspaceCommand.help().to_string(),
            SearchCommand.help().to_string(),
            SaveReportCommand.help().to_string(),
            HistoryCommand.help().to_string(),
            ClearCommand.help().to_string(),
            ModelCommand.help().to_string(),
            HelpCommand.help().to_string(),
            QuitCommand.help().to_string(),
        ]
        .join("\n");

        Ok(CommandOutput::Text(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for ClearCommand {
    fn execute(&self, _state: &mut ChatState, _args: &[&str]) -> Result<CommandOutput, AgentError> {
        Ok(CommandOutput::Panel(PanelCommand::ClearChat))
    }

    fn help(&self) -> &'static str {
        "/clear - Clear conversation history"
    }
}

impl CommandHandler for ModelCommand {
    fn execute(&self, state: &mut ChatState, args: &[&str]) -> Result<CommandOutput, AgentError> {
        let Some(new_model) = args.first() else {
            let current = if state.settings.model.is_empty() {
                "(not set)"
            } else {
                state.settings.model.as_str()
            };
            return Ok(CommandOutput::Text(format!("Current model: {}", current)));
        };

        Provider::from_model(new_model)?;
        state.settings.model = new_model.to_string();
        state.settings_changed = true;
        Ok(CommandOutput::Text(format!(
            "Model changed to: {}",
            state.settings.model
        )))
    }

    fn help(&self) -> &'static str {
        "/model <name> - Show or change the current model"
    }
}

impl CommandHandler for SaveReportCommand {
    fn execute(&self, _state: &mut ChatState, _args: &[&str]) -> Result<CommandOutput, AgentError> {
        Ok(CommandOutput::Panel(PanelCommand::SaveReport))
    }

    fn help(&self) -> &'static str {
        "/save - Write the conversation and workspace summary to bestagent-report.md"
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(&self, _state: &mut ChatState, _args: &[&str]) -> Result<CommandOutput, AgentError> {
        Ok(CommandOutput::Panel(PanelCommand::LoadHistory))
    }

    fn help(&self) -> &'static str {
        "/history - Show the saved conversation"
    }
}

impl CommandHandler for WorkspaceCommand {
    fn execute(&self, _state: &mut ChatState, _args: &[&str]) -> Result<CommandOutput, AgentError> {
        Ok(CommandOutput::Panel(PanelCommand::WorkspaceInfo))
    }

    fn help(&self) -> &'static str {
        "/workspace - Show workspace folders and files"
    }
}

impl CommandHandler for SearchCommand {
    fn execute(&self, _state: &mut ChatState, args: &[&str]) -> Result<CommandOutput, AgentError> {
        if args.is_empty() {
            return Ok(CommandOutput::Text(
                "Please specify part of a filename to search for".to_string(),
            ));
        }
        Ok(CommandOutput::Panel(PanelCommand::SearchFiles {
            term: args.join(" "),
        }))
    }

    fn help(&self) -> &'static str {
        "/search <name> - Find files whose name contains <name>"
    }
}
