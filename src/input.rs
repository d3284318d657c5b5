use crate::commands::dispatcher::CommandDispatcher;
use crate::config::Config;
use crate::core::error::AgentError;

use console::style;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config as EditorConfig, Context, EditMode, Editor, Helper};

pub type ChatEditor = Editor<ChatHelper, FileHistory>;

/// Completes slash commands and hints from input history.
pub struct ChatHelper {
    commands: Vec<String>,
    history_hinter: HistoryHinter,
}

impl ChatHelper {
    pub fn new(dispatcher: &CommandDispatcher) -> Self {
        Self {
            commands: dispatcher.get_command_names(),
            history_hinter: HistoryHinter {},
        }
    }
}

impl Completer for ChatHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let Some(typed) = line[..pos].strip_prefix('/') else {
            return Ok((pos, Vec::new()));
        };
        if typed.contains(' ') {
            return Ok((pos, Vec::new()));
        }

        let matches = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(typed))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((1, matches))
    }
}

impl Hinter for ChatHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.history_hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ChatHelper {}

impl Validator for ChatHelper {}

impl Helper for ChatHelper {}

/// Creates a configured rustyline editor
pub fn create_editor(dispatcher: &CommandDispatcher) -> Result<ChatEditor, AgentError> {
    let config = EditorConfig::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .edit_mode(EditMode::Emacs)
        .build();

    let mut editor = Editor::with_config(config)
        .map_err(|e| AgentError::Input(format!("Failed to create line editor: {}", e)))?;
    editor.set_helper(Some(ChatHelper::new(dispatcher)));

    if let Err(e) = editor.load_history(&Config::input_history_path()) {
        tracing::debug!(error = %e, "no input history loaded");
    }

    Ok(editor)
}

/// Reads one line; `None` on Ctrl-C or Ctrl-D.
pub fn read_input(editor: &mut ChatEditor) -> Result<Option<String>, AgentError> {
    let prompt = style("> ").bold().cyan().to_string();
    match editor.readline(&prompt) {
        Ok(line) => {
            if !line.trim().is_empty() {
                editor
                    .add_history_entry(&line)
                    .map_err(|e| AgentError::Input(format!("Failed to add history entry: {}", e)))?;
            }
            Ok(Some(line))
        }
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("Exiting...");
            Ok(None)
        }
        Err(err) => Err(AgentError::Input(format!("Input error: {}", err))),
    }
}

pub fn save_history(editor: &mut ChatEditor) -> Result<(), AgentError> {
    let history_path = Config::input_history_path();
    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    editor
        .save_history(&history_path)
        .map_err(|e| AgentError::Input(format!("Failed to save history: {}", e)))
}
