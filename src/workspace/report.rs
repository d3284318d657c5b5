use super::Workspace;
use crate::core::error::AgentError;
use crate::providers::{Message, Role};
use std::fs;
use std::path::PathBuf;

pub const REPORT_FILE_NAME: &str = "bestagent-report.md";

/// Writes the workspace summary and the transcript to
/// `<first folder>/bestagent-report.md`, replacing any previous report.
pub fn write_report(workspace: &Workspace, messages: &[Message]) -> Result<PathBuf, AgentError> {
    let path = workspace.root()?.join(REPORT_FILE_NAME);
    let content = render_report(workspace, messages)?;
    fs::write(&path, content)?;
    tracing::info!(path = %path.display(), messages = messages.len(), "report written");
    Ok(path)
}

pub fn render_report(workspace: &Workspace, messages: &[Message]) -> Result<String, AgentError> {
    let summary = workspace.summary()?;
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    let mut out = String::from("# BestAgent Report\n\n");
    out.push_str(&format!("_Generated: {}_\n\n", generated));
    out.push_str("## Workspace\n\n");
    out.push_str(&summary);
    out.push_str("\n\n## Conversation\n\n");

    if messages.is_empty() {
        out.push_str("_No messages yet._\n");
    }
    for message in messages {
        let heading = match message.role {
            Role::User => "### 👤 User",
            Role::Assistant => "### 🤖 Assistant",
        };
        out.push_str(heading);
        out.push_str("\n\n");
        out.push_str(message.content.trim_end());
        out.push_str("\n\n");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lib.rs"), "").unwrap();
        fs::write(dir.path().join(REPORT_FILE_NAME), "stale").unwrap();
        let ws = Workspace::new(vec![dir.path().to_path_buf()]);

        let messages = vec![Message::user("what is lib.rs?"), Message::assistant("a file")];
        let path = write_report(&ws, &messages).unwrap();

        assert_eq!(path, dir.path().join(REPORT_FILE_NAME));
        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.starts_with("# BestAgent Report"));
        assert!(written.contains("- lib.rs"));
        let user_at = written.find("### 👤 User\n\nwhat is lib.rs?").unwrap();
        let assistant_at = written.find("### 🤖 Assistant\n\na file").unwrap();
        assert!(user_at < assistant_at);
    }

    #[test]
    fn empty_conversation_is_noted() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::new(vec![dir.path().to_path_buf()]);
        let text = render_report(&ws, &[]).unwrap();
        assert!(text.contains("_No messages yet._"));
    }

    #[test]
    fn no_workspace_is_an_error() {
        assert!(matches!(
            write_report(&Workspace::default(), &[]),
            Err(AgentError::NoWorkspace)
        ));
    }
}
