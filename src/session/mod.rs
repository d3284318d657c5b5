//! Conversation log and the per-workspace state persisted with it.

pub mod store;

use crate::core::error::AgentError;
use crate::providers::Message;
use serde::{Deserialize, Serialize};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub welcome_shown: bool,
}

/// Session context: owns the conversation and writes every mutation
/// through to its store before returning.
pub struct Session {
    state: SessionState,
    store: Box<dyn SessionStore>,
}

impl Session {
    pub fn open(store: Box<dyn SessionStore>) -> Result<Self, AgentError> {
        let state = store.load()?;
        tracing::debug!(messages = state.messages.len(), "session opened");
        Ok(Self { state, store })
    }

    /// A throwaway session that never greets, for one-shot questions.
    pub fn ephemeral() -> Self {
        Self {
            state: SessionState {
                messages: Vec::new(),
                welcome_shown: true,
            },
            store: Box::new(MemorySessionStore::new()),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn welcome_shown(&self) -> bool {
        self.state.welcome_shown
    }

    pub fn mark_welcome_shown(&mut self) -> Result<(), AgentError> {
        if self.state.welcome_shown {
            return Ok(());
        }
        self.state.welcome_shown = true;
        self.flush().inspect_err(|_| self.state.welcome_shown = false)
    }

    pub fn append(&mut self, message: Message) -> Result<(), AgentError> {
        self.append_all(vec![message])
    }

    /// Appends a completed exchange as one write.
    pub fn append_turn(&mut self, user: Message, assistant: Message) -> Result<(), AgentError> {
        self.append_all(vec![user, assistant])
    }

    fn append_all(&mut self, messages: Vec<Message>) -> Result<(), AgentError> {
        let len = self.state.messages.len();
        self.state.messages.extend(messages);
        if let Err(e) = self.flush() {
            // keep memory in step with what is stored
            self.state.messages.truncate(len);
            return Err(e);
        }
        Ok(())
    }

    /// Empties the log and re-arms the workspace greeting.
    pub fn clear(&mut self) -> Result<(), AgentError> {
        let previous = std::mem::take(&mut self.state);
        self.flush().inspect_err(|_| self.state = previous)
    }

    fn flush(&mut self) -> Result<(), AgentError> {
        self.store.save(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_keep_order_and_are_written_through() {
        let store = MemorySessionStore::new();
        let mut session = Session::open(Box::new(store.clone())).unwrap();

        session.append(Message::user("M1")).unwrap();
        session.append(Message::assistant("M2")).unwrap();
        session.append(Message::user("M3")).unwrap();

        let contents: Vec<&str> = session.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["M1", "M2", "M3"]);
        assert_eq!(store.save_count(), 3);
        assert_eq!(store.snapshot().messages, session.messages());
    }

    #[test]
    fn reopening_restores_the_log() {
        let store = MemorySessionStore::new();
        {
            let mut session = Session::open(Box::new(store.clone())).unwrap();
            session
                .append_turn(Message::user("hello"), Message::assistant("hi"))
                .unwrap();
            session.mark_welcome_shown().unwrap();
        }

        let session = Session::open(Box::new(store)).unwrap();
        assert_eq!(
            session.messages(),
            [Message::user("hello"), Message::assistant("hi")]
        );
        assert!(session.welcome_shown());
    }

    #[test]
    fn clear_empties_log_and_resets_welcome() {
        let store = MemorySessionStore::with_state(SessionState {
            messages: vec![Message::user("old")],
            welcome_shown: true,
        });
        let mut session = Session::open(Box::new(store.clone())).unwrap();

        session.clear().unwrap();

        assert!(session.messages().is_empty());
        assert!(!session.welcome_shown());
        assert_eq!(store.snapshot(), SessionState::default());
    }

    /// Loads fine, refuses every save.
    struct ReadOnlyStore(SessionState);

    impl SessionStore for ReadOnlyStore {
        fn load(&self) -> Result<SessionState, AgentError> {
            Ok(self.0.clone())
        }

        fn save(&mut self, _state: &SessionState) -> Result<(), AgentError> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    #[test]
    fn failed_writes_leave_memory_unchanged() {
        let mut session = Session::open(Box::new(ReadOnlyStore(SessionState {
            messages: vec![Message::user("kept")],
            welcome_shown: false,
        })))
        .unwrap();

        assert!(session.append(Message::assistant("lost")).is_err());
        assert!(session.mark_welcome_shown().is_err());
        assert!(!session.welcome_shown());
        assert!(session.clear().is_err());
        assert_eq!(session.messages(), [Message::user("kept")]);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(dir.path(), "proj-1234");
        assert_eq!(store.load().unwrap(), SessionState::default());

        let state = SessionState {
            messages: vec![Message::user("q"), Message::assistant("a")],
            welcome_shown: true,
        };
        store.save(&state).unwrap();
        assert!(store.path().ends_with("proj-1234.json"));
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(r#""role": "assistant""#));
        assert_eq!(store.load().unwrap(), state);
    }

    #[test]
    fn corrupt_session_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(dir.path(), "broken");
        std::fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.load().unwrap(), SessionState::default());
        assert_eq!(
            std::fs::read_to_string(store.backup_path()).unwrap(),
            "{not json"
        );

        store.save(&SessionState::default()).unwrap();
        assert_eq!(
            std::fs::read_to_string(store.backup_path()).unwrap(),
            "{not json"
        );
        assert!(store.backup_path().ends_with("broken.json.bak"));
    }
}
