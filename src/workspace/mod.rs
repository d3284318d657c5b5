//! Workspace introspection: folder listing, summary text and filename search.

pub mod report;

use crate::core::error::AgentError;
use crate::system::SystemInfo;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

const SKIPPED_DIRS: [&str; 7] = [
    ".git",
    "node_modules",
    "target",
    "dist",
    "build",
    ".venv",
    "__pycache__",
];
const SUMMARY_DEPTH: usize = 3;
const SUMMARY_MAX_FILES: usize = 200;
const SEARCH_DEPTH: usize = 12;
const SEARCH_MAX_RESULTS: usize = 50;
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

#[derive(Debug, Clone, Default)]
pub struct Workspace {
    folders: Vec<PathBuf>,
}

impl Workspace {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self { folders }
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }

    pub fn root(&self) -> Result<&Path, AgentError> {
        self.folders
            .first()
            .map(PathBuf::as_path)
            .ok_or(AgentError::NoWorkspace)
    }

    /// Storage key: readable folder name plus a 64-bit FNV-1a hash of the
    /// canonical folder paths, one per line. The hash must not change across
    /// releases or saved conversations are lost.
    pub fn key(&self) -> String {
        let joined = self
            .folders
            .iter()
            .map(|folder| {
                folder
                    .canonicalize()
                    .unwrap_or_else(|_| folder.clone())
                    .to_string_lossy()
                    .into_owned()
            })
            .collect::<Vec<_>>()
            .join("\n");
        let name = self
            .folders
            .first()
            .and_then(|f| f.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "no-workspace".to_string());
        let name: String = name
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("{}-{:016x}", name, fnv1a(joined.as_bytes()))
    }

    /// Files under every folder, relative and sorted, to a fixed depth.
    pub fn list_files(&self) -> Result<Vec<String>, AgentError> {
        self.root()?;
        let mut files: Vec<String> = self
            .folders
            .iter()
            .flat_map(|folder| self.walk(folder, SUMMARY_DEPTH))
            .collect();
        files.sort();
        Ok(files)
    }

    pub fn summary(&self) -> Result<String, AgentError> {
        let files = self.list_files()?;
        let system = SystemInfo::new();

        let mut out = String::from("📁 Workspace folders:\n");
        for folder in &self.folders {
            out.push_str(&format!("- {} ({})\n", display_name(folder), folder.display()));
        }

        out.push_str(&format!("\n📄 Files ({}):\n", files.len()));
        for file in files.iter().take(SUMMARY_MAX_FILES) {
            out.push_str(&format!("- {}\n", file));
        }
        if files.len() > SUMMARY_MAX_FILES {
            out.push_str(&format!("- … and {} more\n", files.len() - SUMMARY_MAX_FILES));
        }

        out.push_str(&format!(
            "\n💻 Environment: {}, shell {}",
            system.os_info, system.shell
        ));
        Ok(out)
    }

    /// Case-insensitive filename substring search.
    pub fn search(&self, term: &str) -> Result<Vec<String>, AgentError> {
        self.root()?;
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Err(AgentError::Input("Search term is empty".to_string()));
        }

        let mut matches: Vec<String> = self
            .folders
            .iter()
            .flat_map(|folder| self.walk(folder, SEARCH_DEPTH))
            .filter(|path| {
                Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .collect();
        matches.sort();
        matches.truncate(SEARCH_MAX_RESULTS);
        tracing::debug!(term, hits = matches.len(), "file search");
        Ok(matches)
    }

    fn walk(&self, folder: &Path, depth: usize) -> Vec<String> {
        let prefix = (self.folders.len() > 1).then(|| display_name(folder));
        WalkDir::new(folder)
            .max_depth(depth)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped(e))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let rel = e.path().strip_prefix(folder).ok()?;
                let rel = rel.to_string_lossy().replace('\\', "/");
                Some(match &prefix {
                    Some(p) => format!("{}/{}", p, rel),
                    None => rel,
                })
            })
            .collect()
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| SKIPPED_DIRS.contains(&name))
            .unwrap_or(false)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

fn display_name(folder: &Path) -> String {
    folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string())
}

pub fn format_search_results(term: &str, results: &[String]) -> String {
    if results.is_empty() {
        return format!("🔍 No files matching \"{}\".", term);
    }
    let mut out = format!("🔍 Found {} file(s) matching \"{}\":\n", results.len(), term);
    for path in results {
        out.push_str(&format!("- {}\n", path));
    }
    out.trim_end().to_string()
}
