//! Probedit CLI library.
//!
//! The editor client: error-tolerant LaTeX rendering, the editor state
//! machine, and the commands and REPL built on them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod output;
pub mod render;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use editor::{Acknowledgment, Editor, EditorEvent, EditorState};
pub use error::{CliError, Result};
pub use output::Formatter;
