pub mod dispatcher;
pub mod handler;
pub mod registry;
pub mod router;

use crate::config::ProviderSettings;
use crate::panel::PanelCommand;
pub use dispatcher::create_command_registry;
pub use router::{CommandRouter, Route};

/// REPL-side state the slash commands act on.
pub struct ChatState {
    pub settings: ProviderSettings,
    pub should_continue: bool,
    pub settings_changed: bool,
}

impl ChatState {
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            should_continue: true,
            settings_changed: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// Forward to the panel
    Panel(PanelCommand),
    /// Print locally
    Text(String),
    Nothing,
}
