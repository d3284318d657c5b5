use crate::chat::ChatClient;
use crate::cli::Args;
use crate::commands::{ChatState, CommandOutput, dispatcher::CommandDispatcher};
use crate::config::{Config, ProviderSettings};
use crate::core::error::AgentError;
use crate::display::{self, Renderer};
use crate::input;
use crate::panel::{Panel, PanelCommand, PanelEvent};
use crate::session::{FileSessionStore, Session};
use crate::workspace::Workspace;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub struct Application {
    pub args: Args,
    pub config: Config,
    pub command_dispatcher: CommandDispatcher,
}

impl Application {
    pub fn new(args: Args, config: Config, command_dispatcher: CommandDispatcher) -> Self {
        Self {
            args,
            config,
            command_dispatcher,
        }
    }

    /// Config file settings, then environment, then command-line flags.
    pub fn effective_settings(&self) -> ProviderSettings {
        let mut settings = self.config.settings.clone();
        settings.apply_env();
        if let Some(model) = &self.args.model {
            settings.model = model.clone();
        }
        if let Some(key) = &self.args.api_key {
            settings.api_key = key.clone();
        }
        if let Some(endpoint) = &self.args.endpoint {
            settings.api_endpoint = Some(endpoint.clone());
        }
        settings
    }

    fn workspace(&self) -> Workspace {
        if !self.args.workspaces.is_empty() {
            return Workspace::new(self.args.workspaces.clone());
        }
        match std::env::current_dir() {
            Ok(dir) => Workspace::new(vec![dir]),
            Err(e) => {
                tracing::warn!(error = %e, "no current directory, running without a workspace");
                Workspace::default()
            }
        }
    }

    pub async fn run(&mut self) -> Result<(), AgentError> {
        let settings = self.effective_settings();
        if self.args.save_settings {
            self.config.settings = settings.clone();
            self.config.save()?;
        }

        let piped = if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| AgentError::Input(format!("Failed to read from stdin: {}", e)))?;
            Some(buffer)
        } else {
            None
        };

        let query = match (self.args.query.clone(), piped) {
            (Some(q), Some(ctx)) => Some(format!("<pipe>{}</pipe>\n\n{}", ctx, q)),
            (None, Some(ctx)) => Some(format!("<pipe>{}</pipe>", ctx)),
            (Some(q), None) => Some(q),
            (None, None) => None,
        };

        match query {
            Some(text) => self.handle_one_shot(text, settings).await,
            None => self.handle_chat_mode(settings).await,
        }
    }

    async fn handle_one_shot(
        &self,
        text: String,
        settings: ProviderSettings,
    ) -> Result<(), AgentError> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut panel = Panel::new(
            Session::ephemeral(),
            self.workspace(),
            ChatClient::default(),
            tx,
        )?;
        let mut renderer = Renderer::new();

        dispatch(
            &mut panel,
            &mut rx,
            &mut renderer,
            PanelCommand::SendMessage { text, settings },
        )
        .await;
        Ok(())
    }

    async fn handle_chat_mode(&mut self, settings: ProviderSettings) -> Result<(), AgentError> {
        let workspace = self.workspace();
        let store = FileSessionStore::new(&Config::sessions_dir(), &workspace.key());
        tracing::debug!(path = %store.path().display(), "using session file");

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut panel = Panel::new(
            Session::open(Box::new(store))?,
            workspace,
            ChatClient::default(),
            tx,
        )?;
        let mut renderer = Renderer::new();
        let mut state = ChatState::new(settings);

        println!("Entering chat mode. Type '/help' for commands, Ctrl+D or /quit to exit.");
        dispatch(&mut panel, &mut rx, &mut renderer, PanelCommand::LoadHistory).await;

        let mut editor = input::create_editor(&self.command_dispatcher)?;

        loop {
            let input = match input::read_input(&mut editor)? {
                Some(input) => input.trim().to_string(),
                None => break,
            };
            if input.is_empty() {
                continue;
            }

            let command = match self.command_dispatcher.execute_line(&input, &mut state) {
                None => Some(PanelCommand::SendMessage {
                    text: input,
                    settings: state.settings.clone(),
                }),
                Some(Ok(CommandOutput::Panel(command))) => Some(command),
                Some(Ok(CommandOutput::Text(text))) => {
                    println!("{}", text);
                    None
                }
                Some(Ok(CommandOutput::Nothing)) => None,
                Some(Err(e)) => {
                    display::display_error(&format!("Error executing command: {}", e));
                    None
                }
            };

            if state.settings_changed {
                self.config.settings.model = state.settings.model.clone();
                if let Err(e) = self.config.save() {
                    tracing::warn!(error = %e, "could not persist settings");
                }
                state.settings_changed = false;
            }

            if let Some(command) = command {
                dispatch(&mut panel, &mut rx, &mut renderer, command).await;
            }

            if !state.should_continue {
                break;
            }
        }

        input::save_history(&mut editor)?;
        Ok(())
    }
}

/// Runs one panel command while rendering its events as they arrive.
async fn dispatch(
    panel: &mut Panel,
    rx: &mut UnboundedReceiver<PanelEvent>,
    renderer: &mut Renderer,
    command: PanelCommand,
) {
    let handled = panel.handle(command);
    tokio::pin!(handled);

    loop {
        tokio::select! {
            biased;
            Some(event) = rx.recv() => renderer.render(&event),
            _ = &mut handled => break,
        }
    }

    while let Ok(event) = rx.try_recv() {
        renderer.render(&event);
    }
}
