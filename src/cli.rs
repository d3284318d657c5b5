use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Message to send once; starts an interactive chat when omitted
    pub query: Option<String>,

    /// Model to use; the prefix picks the provider (gpt-, claude-, deepseek-, gemini-)
    #[arg(short, long)]
    pub model: Option<String>,

    /// API key for the selected provider
    #[arg(short = 'k', long)]
    pub api_key: Option<String>,

    /// Base URL override for OpenAI-compatible servers
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Workspace folder; repeat for several. Defaults to the current directory
    #[arg(short, long = "workspace")]
    pub workspaces: Vec<PathBuf>,

    /// Store the given model, key and endpoint in the config file
    #[arg(long)]
    pub save_settings: bool,
}
