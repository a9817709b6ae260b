//! Show command implementation.

use crate::editor::Editor;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the show command.
///
/// A failed load is only logged; the empty editor state is shown.
pub async fn execute_show(editor: &mut Editor, formatter: &Formatter) -> Result<String> {
    editor.load().await;

    let output = formatter.format_state(editor.state())?;
    println!("{}", output);
    Ok(output)
}
