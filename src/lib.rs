//! Terminal chat client for OpenAI-compatible, Anthropic, DeepSeek and Gemini
//! models, with workspace-aware helpers and a persisted conversation.

pub mod app;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod display;
pub mod input;
pub mod panel;
pub mod providers;
pub mod session;
pub mod system;
pub mod utils;
pub mod workspace;
