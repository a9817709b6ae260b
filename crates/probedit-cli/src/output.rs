//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::editor::{Acknowledgment, EditorState};
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format both texts and their rendered markup.
    pub fn format_state(&self, state: &EditorState) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_state_json(state),
            OutputFormat::Table => Ok(self.format_state_table(state)),
        }
    }

    fn format_state_json(&self, state: &EditorState) -> Result<String> {
        let value = serde_json::json!({
            "source_problem": state.source_problem(),
            "editable_problem": state.editable_problem(),
            "rendered_source": state.rendered_source(),
            "rendered_editable": state.rendered_editable(),
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_state_table(&self, state: &EditorState) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Field", "LaTeX", "Rendered"]);
        builder.push_record([
            "Source (read-only)",
            state.source_problem(),
            state.rendered_source(),
        ]);
        builder.push_record([
            "Editable",
            state.editable_problem(),
            state.rendered_editable(),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the rendered markup of a single text.
    pub fn format_rendered(&self, latex: &str, rendered: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "latex": latex,
                "rendered": rendered,
            }))?),
            OutputFormat::Table => Ok(rendered.to_string()),
        }
    }

    /// Format a save acknowledgment.
    pub fn acknowledgment(&self, ack: Acknowledgment) -> String {
        if ack.is_success() {
            self.success(ack.message())
        } else {
            self.error(ack.message())
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorEvent;
    use probedit_domain::Problem;

    fn sample_state() -> EditorState {
        let mut state = EditorState::new();
        state.apply(EditorEvent::Loaded(Problem::new("a^2", "b^2")));
        state
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_state(&sample_state()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["source_problem"], "a^2");
        assert_eq!(value["editable_problem"], "b^2");
        assert!(value["rendered_editable"].is_string());
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_state(&sample_state()).unwrap();

        assert!(output.contains("Source (read-only)"));
        assert!(output.contains("Editable"));
        assert!(output.contains("a^2"));
    }

    #[test]
    fn test_rendered_table_is_raw_markup() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.format_rendered("x", "<math/>").unwrap(), "<math/>");
    }

    #[test]
    fn test_acknowledgment_text() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(
            formatter.acknowledgment(Acknowledgment::Saved),
            "✓ Problem saved successfully!"
        );
        assert_eq!(
            formatter.acknowledgment(Acknowledgment::SaveFailed),
            "✗ Failed to save problem. Please try again."
        );
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
