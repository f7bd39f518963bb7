//! Non-interactive CLI commands.

pub mod config;
pub mod export;
pub mod generate;
