//! Interactive editing session.
//!
//! Each plain line replaces the editable text and prints its fresh rendering.
//! Lines starting with `:` are commands.

use crate::config::Config;
use crate::editor::Editor;
use crate::error::Result;
use crate::output::Formatter;
use rustyline::config::Config as LineConfig;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// One line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum ReplInput {
    Edit(String),
    Show,
    Save,
    Reload,
    Help,
    Quit,
}

/// Parse a REPL line.
fn parse_repl_input(line: &str) -> std::result::Result<ReplInput, String> {
    let trimmed = line.trim();

    if !trimmed.starts_with(':') {
        return Ok(ReplInput::Edit(line.to_string()));
    }

    match trimmed {
        ":show" | ":s" => Ok(ReplInput::Show),
        ":save" | ":w" => Ok(ReplInput::Save),
        ":reload" | ":r" => Ok(ReplInput::Reload),
        ":help" | ":h" | ":?" => Ok(ReplInput::Help),
        ":quit" | ":q" | ":exit" => Ok(ReplInput::Quit),
        other => Err(format!(
            "Unknown command: {}. Type ':help' for available commands.",
            other
        )),
    }
}

/// Run the interactive session.
pub async fn run_repl(editor: &mut Editor, config: &Config, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("Probedit - type LaTeX to replace the editable text, ':help' for commands")
    );

    if editor.load().await {
        println!("{}", formatter.format_state(editor.state())?);
    }
    println!();

    let line_config = LineConfig::builder()
        .max_history_size(config.settings.history_size)?
        .auto_add_history(true)
        .build();
    let mut line_editor = DefaultEditor::with_config(line_config)?;

    let history_path = get_history_path();
    if let Some(path) = &history_path {
        let _ = line_editor.load_history(path);
    }

    loop {
        match line_editor.readline("probedit> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                match parse_repl_input(&line) {
                    Ok(ReplInput::Quit) => break,
                    Ok(ReplInput::Help) => print_help(formatter),
                    Ok(ReplInput::Show) => {
                        println!("{}", formatter.format_state(editor.state())?);
                    }
                    Ok(ReplInput::Reload) => {
                        if editor.load().await {
                            println!("{}", formatter.format_state(editor.state())?);
                        }
                    }
                    Ok(ReplInput::Save) => {
                        let ack = editor.save().await;
                        println!("{}", formatter.acknowledgment(ack));
                    }
                    Ok(ReplInput::Edit(text)) => {
                        editor.edit(text);
                        println!("{}", editor.state().rendered_editable());
                    }
                    Err(message) => eprintln!("{}", formatter.warning(&message)),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use ':quit' to leave"));
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        line_editor.save_history(path).ok();
    }

    Ok(())
}

fn get_history_path() -> Option<PathBuf> {
    Config::dir().ok().map(|dir| dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!("  <latex>      Replace the editable text and show its rendering");
    println!("  :show        Show both texts and their renderings");
    println!("  :save        Save the editable text to the server");
    println!("  :reload      Fetch the current problem again");
    println!("  :help        Show this help");
    println!("  :quit        Leave the editor");
}
