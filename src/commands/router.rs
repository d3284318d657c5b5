//! Free-text heuristics that decide whether a chat message is really a
//! workspace question or a filename lookup.

use crate::core::error::AgentError;
use crate::workspace::Workspace;
use regex::Regex;

const WORKSPACE_KEYWORDS: [&str; 7] = [
    "workspace",
    "project",
    "folder",
    "directory",
    "files",
    "codebase",
    "open files",
];
const SEARCH_KEYWORDS: [&str; 4] = ["find", "search", "locate", "where is"];
const FILE_EXTENSIONS: [&str; 18] = [
    "rs", "ts", "tsx", "js", "jsx", "py", "go", "java", "c", "cpp", "h", "json", "md", "toml",
    "yaml", "yml", "html", "css",
];
// Words that never make a useful filename query.
const FILLER_WORDS: [&str; 7] = ["the", "a", "an", "file", "files", "for", "my"];
const MAX_SEARCH_TOKENS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Send to the provider; the text may carry the workspace summary.
    Chat(String),
    /// Answer locally with a filename search for this term.
    Search(String),
}

pub struct CommandRouter {
    extension: Regex,
    extension_suffix: Regex,
}

impl CommandRouter {
    pub fn new() -> Result<Self, AgentError> {
        let extensions = FILE_EXTENSIONS.join("|");
        let compile = |pattern: String| {
            Regex::new(&pattern)
                .map_err(|e| AgentError::Config(format!("Invalid router pattern: {}", e)))
        };
        let extension = compile(format!(r"(?i)\.({})\b", extensions))?;
        let extension_suffix = compile(format!(r"(?i)\.({})$", extensions))?;

        Ok(Self {
            extension,
            extension_suffix,
        })
    }

    pub fn is_workspace_query(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        WORKSPACE_KEYWORDS.iter().any(|k| lower.contains(k))
    }

    pub fn has_file_extension(&self, text: &str) -> bool {
        self.extension.is_match(text)
    }

    pub fn has_search_keyword(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        SEARCH_KEYWORDS.iter().any(|k| lower.contains(k))
    }

    /// Returns the filename query hidden in `text`, if it reads like one.
    ///
    /// Keywords and filler words are dropped only as whole tokens, so a
    /// name like `my-app.tsx` or `for.rs` survives intact.
    pub fn search_term(&self, text: &str) -> Option<String> {
        let short = text.split_whitespace().count() <= MAX_SEARCH_TOKENS;
        if !(short && (self.has_file_extension(text) || self.has_search_keyword(text))) {
            return None;
        }

        let tokens: Vec<&str> = text
            .split_whitespace()
            .map(|token| {
                token.trim_matches(|c: char| {
                    !(c.is_alphanumeric() || c == '_' || c == '-' || c == '.')
                })
            })
            .filter(|token| !token.is_empty())
            .collect();
        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

        let mut i = 0;
        while i < tokens.len() {
            if let Some(len) = keyword_len(&lowered[i..]) {
                i += len;
                continue;
            }
            if FILLER_WORDS.contains(&lowered[i].as_str()) {
                i += 1;
                continue;
            }

            let term = self.extension_suffix.replace(tokens[i], "");
            let term = term.trim_matches('.');
            if !term.is_empty() {
                return Some(term.to_string());
            }
            i += 1;
        }
        None
    }

    /// Workspace questions get the summary appended; short lookups
    /// short-circuit into a search.
    pub fn route(&self, text: &str, workspace: &Workspace) -> Route {
        if let Some(term) = self.search_term(text) {
            tracing::debug!(term = %term, "routing message to file search");
            return Route::Search(term);
        }

        if self.is_workspace_query(text) {
            match workspace.summary() {
                Ok(summary) => {
                    tracing::debug!("augmenting message with workspace summary");
                    return Route::Chat(format!("{}\n\n[Workspace]\n{}", text, summary));
                }
                Err(e) => tracing::debug!(error = %e, "workspace summary unavailable"),
            }
        }

        Route::Chat(text.to_string())
    }
}

/// Number of tokens taken by a search keyword at the start of `tokens`.
fn keyword_len(tokens: &[String]) -> Option<usize> {
    SEARCH_KEYWORDS.iter().find_map(|keyword| {
        let words: Vec<&str> = keyword.split(' ').collect();
        let matches = tokens.len() >= words.len()
            && words.iter().zip(tokens).all(|(w, t)| *w == t.as_str());
        matches.then_some(words.len())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn router() -> CommandRouter {
        CommandRouter::new().unwrap()
    }

    #[test]
    fn find_with_extension_short_circuits() {
        let r = router();
        assert_eq!(r.search_term("find Button.tsx").as_deref(), Some("Button"));
        assert_eq!(
            r.route("find Button.tsx", &Workspace::default()),
            Route::Search("Button".into())
        );
    }

    #[test]
    fn bare_extension_or_keyword_is_enough() {
        let r = router();
        assert_eq!(r.search_term("main.rs").as_deref(), Some("main"));
        assert_eq!(r.search_term("where is config.yaml?").as_deref(), Some("config"));
        assert_eq!(r.search_term("Search the utils file").as_deref(), Some("utils"));
    }

    #[test]
    fn filenames_made_of_filler_words_survive() {
        let r = router();
        assert_eq!(r.search_term("find my-app.tsx").as_deref(), Some("my-app"));
        assert_eq!(r.search_term("find a.rs").as_deref(), Some("a"));
        assert_eq!(r.search_term("find for.rs").as_deref(), Some("for"));
        assert_eq!(r.search_term("where is the file.md").as_deref(), Some("file"));
        assert_eq!(r.search_term("locate find-utils.js").as_deref(), Some("find-utils"));
    }

    #[test]
    fn long_messages_are_not_searches() {
        let r = router();
        assert_eq!(
            r.search_term("can you find the bug in my parser.rs please"),
            None
        );
    }

    #[test]
    fn nothing_left_after_stripping_falls_through() {
        let r = router();
        assert_eq!(r.search_term("find"), None);
        assert_eq!(r.search_term("search files"), None);
        assert_eq!(
            r.route("search files", &Workspace::default()),
            Route::Chat("search files".into())
        );
    }

    #[test]
    fn extensions_need_a_word_boundary() {
        let r = router();
        assert!(!r.has_file_extension("see google.com"));
        assert!(r.has_file_extension("open App.JSX"));
        assert_eq!(r.search_term("hello there"), None);
    }

    #[test]
    fn workspace_query_is_augmented_not_short_circuited() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "").unwrap();
        let ws = Workspace::new(vec![dir.path().to_path_buf()]);

        match router().route("tell me about workspace", &ws) {
            Route::Chat(text) => {
                assert!(text.starts_with("tell me about workspace\n\n[Workspace]\n"));
                assert!(text.contains("- Cargo.toml"));
            }
            other => panic!("expected chat, got {other:?}"),
        }
    }

    #[test]
    fn workspace_query_without_folders_is_sent_as_is() {
        assert_eq!(
            router().route("describe this Project", &Workspace::default()),
            Route::Chat("describe this Project".into())
        );
    }
}
