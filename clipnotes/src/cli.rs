use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// Keeps a searchable history of copied text
#[derive(Debug, Parser)]
#[command(name = "clipnotes", version)]
pub struct Cli {
    /// Config file to use instead of ~/.config/clipnotes/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Watch the clipboard and record every copied text (default)
    Watch,
    /// Show saved snippets, newest first
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show snippets containing a string, ignoring case
    Search { query: String },
    /// Print one snippet in full
    Show { id: Uuid },
    /// Put a snippet back on the clipboard
    Copy { id: Uuid },
    /// Replace a snippet's text
    Edit { id: Uuid, content: String },
    /// Delete one snippet
    Delete {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete every snippet and empty the clipboard
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
