//! The chat panel: takes discrete commands from the front end and answers
//! with events, one command at a time.

use crate::chat::ChatClient;
use crate::commands::{CommandRouter, Route};
use crate::config::ProviderSettings;
use crate::core::error::AgentError;
use crate::providers::Message;
use crate::session::Session;
use crate::workspace::{self, Workspace, report};
use tokio::sync::mpsc::UnboundedSender;

pub const ERROR_PREFIX: &str = "❌ Error:";
const WELCOME: &str =
    "👋 Hi! I can answer questions about your code and find files in this workspace.";
const WELCOME_SUMMARY_INTRO: &str = "Here is what I see:";

#[derive(Debug, Clone, PartialEq)]
pub enum PanelCommand {
    SendMessage {
        text: String,
        settings: ProviderSettings,
    },
    WorkspaceInfo,
    SearchFiles {
        term: String,
    },
    SaveReport,
    ClearChat,
    LoadHistory,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    AddMessage(Message),
    SetLoading(bool),
    LoadHistory(Vec<Message>),
    ChatCleared,
    Notice(String),
}

pub struct Panel {
    session: Session,
    workspace: Workspace,
    chat: ChatClient,
    router: CommandRouter,
    events: UnboundedSender<PanelEvent>,
}

impl Panel {
    pub fn new(
        session: Session,
        workspace: Workspace,
        chat: ChatClient,
        events: UnboundedSender<PanelEvent>,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            session,
            workspace,
            chat,
            router: CommandRouter::new()?,
            events,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handles one command. Failures are reported as assistant bubbles, so
    /// the panel stays usable after any error.
    pub async fn handle(&mut self, command: PanelCommand) {
        match command {
            PanelCommand::SendMessage { text, settings } => {
                self.send_message(text, settings).await
            }
            PanelCommand::WorkspaceInfo => {
                let reply = self.workspace.summary();
                self.reply(reply);
            }
            PanelCommand::SearchFiles { term } => {
                let reply = self
                    .workspace
                    .search(&term)
                    .map(|hits| workspace::format_search_results(&term, &hits));
                self.reply(reply);
            }
            PanelCommand::SaveReport => {
                match report::write_report(&self.workspace, self.session.messages()) {
                    Ok(path) => self.emit(PanelEvent::Notice(format!(
                        "✅ Conversation saved to {}",
                        path.display()
                    ))),
                    Err(e) => self.emit(PanelEvent::AddMessage(Message::assistant(format!(
                        "{} Failed to save report: {}",
                        ERROR_PREFIX, e
                    )))),
                }
            }
            PanelCommand::ClearChat => match self.session.clear() {
                Ok(()) => self.emit(PanelEvent::ChatCleared),
                Err(e) => self.reply(Err(e)),
            },
            PanelCommand::LoadHistory => {
                self.emit(PanelEvent::LoadHistory(self.session.messages().to_vec()))
            }
        }
    }

    async fn send_message(&mut self, text: String, settings: ProviderSettings) {
        let text = text.trim().to_string();
        if text.is_empty() {
            return;
        }

        if let Err(e) = settings.validate() {
            self.emit(PanelEvent::AddMessage(Message::assistant(format!("⚠️ {}", e))));
            return;
        }

        self.emit(PanelEvent::AddMessage(Message::user(text.clone())));
        self.greet_once();

        self.emit(PanelEvent::SetLoading(true));
        let reply = match self.router.route(&text, &self.workspace) {
            Route::Search(term) => self
                .workspace
                .search(&term)
                .map(|hits| workspace::format_search_results(&term, &hits)),
            Route::Chat(prompt) => self.chat.send(&mut self.session, &settings, &prompt).await,
        };
        self.reply(reply);
        self.emit(PanelEvent::SetLoading(false));
    }

    /// Shows the workspace greeting on the first message of a conversation.
    fn greet_once(&mut self) {
        if self.session.welcome_shown() {
            return;
        }
        let greeting = match self.workspace.summary() {
            Ok(summary) => format!("{} {}\n\n{}", WELCOME, WELCOME_SUMMARY_INTRO, summary),
            Err(_) => WELCOME.to_string(),
        };
        self.emit(PanelEvent::AddMessage(Message::assistant(greeting)));
        if let Err(e) = self.session.mark_welcome_shown() {
            tracing::warn!(error = %e, "could not persist welcome flag");
        }
    }

    fn reply(&self, reply: Result<String, AgentError>) {
        let content = match reply {
            Ok(text) => text,
            Err(e) => format!("{} {}", ERROR_PREFIX, e),
        };
        self.emit(PanelEvent::AddMessage(Message::assistant(content)));
    }

    fn emit(&self, event: PanelEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("panel event dropped, no listener");
        }
    }
}
