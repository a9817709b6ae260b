//! Render command implementation.

use crate::cli::RenderArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::render::render_latex;

/// Execute the render command.
pub fn execute_render(args: RenderArgs, formatter: &Formatter) -> Result<()> {
    let rendered = render_latex(&args.latex);
    println!("{}", formatter.format_rendered(&args.latex, &rendered)?);
    Ok(())
}
