//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Probedit - view, render and edit the current LaTeX problem.
#[derive(Debug, Parser)]
#[command(name = "probedit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Server base URL
    #[arg(short, long, global = true, env = "PROBEDIT_SERVER")]
    pub server: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current problem and its rendering
    Show,

    /// Replace the editable text and save it
    Save(SaveArgs),

    /// Render LaTeX locally without contacting the server
    Render(RenderArgs),

    /// Interactive editing session (default)
    Edit,
}

/// Arguments for the save command.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SaveArgs {
    /// New editable text
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read the new editable text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// LaTeX to render
    pub latex: String,
}
