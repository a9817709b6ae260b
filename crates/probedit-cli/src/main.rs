//! Probedit CLI - view, render and edit the current LaTeX problem.

use clap::Parser;
use probedit_cli::commands;
use probedit_cli::repl;
use probedit_cli::{Cli, Command, Config, Editor, Formatter};
use probedit_sdk::ProblemClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr so they never mix with command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded.
async fn run() -> probedit_cli::Result<bool> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_default(),
    };

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let server_url = config.resolve_server_url(cli.server);
    let mut editor = Editor::new(ProblemClient::new(&server_url));

    match cli.command {
        None | Some(Command::Edit) => {
            repl::run_repl(&mut editor, &config, &formatter).await?;
        }
        Some(Command::Show) => {
            commands::execute_show(&mut editor, &formatter).await?;
        }
        Some(Command::Save(args)) => {
            let ack = commands::execute_save(args, &mut editor, &formatter).await?;
            return Ok(ack.is_success());
        }
        Some(Command::Render(args)) => {
            commands::execute_render(args, &formatter)?;
        }
    }

    Ok(true)
}
