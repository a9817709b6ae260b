//! Save command implementation.

use crate::cli::SaveArgs;
use crate::editor::{Acknowledgment, Editor};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::fs;

/// Execute the save command.
///
/// The acknowledgment is printed either way; only an unreadable input file
/// is an error.
pub async fn execute_save(
    args: SaveArgs,
    editor: &mut Editor,
    formatter: &Formatter,
) -> Result<Acknowledgment> {
    let text = read_text(args)?;

    editor.edit(text);
    let ack = editor.save().await;
    println!("{}", formatter.acknowledgment(ack));

    Ok(ack)
}

/// Resolve the new editable text from the arguments.
fn read_text(args: SaveArgs) -> Result<String> {
    match (args.text, args.file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => Ok(fs::read_to_string(path)?),
        (None, None) => Err(CliError::InvalidInput(
            "Provide the new text with --text or --file".to_string(),
        )),
    }
}
