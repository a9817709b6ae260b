//! Error-tolerant LaTeX rendering.
//!
//! LaTeX is converted to display-mode MathML. A conversion that fails, a
//! converter that panics, or input nested deeper than [`MAX_NESTING_DEPTH`]
//! yields [`RENDER_ERROR_PLACEHOLDER`] instead; the failure is only logged.
//!
//! The converter recurses once per group, so it runs on its own thread with a
//! fixed stack of [`RENDER_STACK_SIZE`] bytes and deep input never reaches it.

use latex2mathml::{latex_to_mathml, DisplayStyle};
use std::fmt::Display;
use std::thread;
use tracing::warn;

/// Shown in place of markup when a conversion fails
pub const RENDER_ERROR_PLACEHOLDER: &str = "Error rendering LaTeX";

/// Deepest group nesting handed to the converter
pub const MAX_NESTING_DEPTH: usize = 64;

/// Stack size of the conversion thread
pub const RENDER_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Render LaTeX to display-mode MathML, never failing
///
/// # Examples
///
/// ```
/// use probedit_cli::render::render_latex;
///
/// let markup = render_latex("x^2");
/// assert_eq!(markup, render_latex("x^2"));
/// ```
pub fn render_latex(latex: &str) -> String {
    render_with(latex, |text| latex_to_mathml(text, DisplayStyle::Block))
}

/// Run `convert` on `latex`, replacing errors, panics and over-deep input
/// with the placeholder
pub fn render_with<F, E>(latex: &str, convert: F) -> String
where
    F: FnOnce(&str) -> Result<String, E> + Send,
    E: Display + Send,
{
    let depth = nesting_depth(latex);
    if depth > MAX_NESTING_DEPTH {
        warn!(
            "LaTeX nested {} levels deep, limit is {}",
            depth, MAX_NESTING_DEPTH
        );
        return RENDER_ERROR_PLACEHOLDER.to_string();
    }

    let outcome = thread::scope(|scope| {
        thread::Builder::new()
            .name("latex-render".to_string())
            .stack_size(RENDER_STACK_SIZE)
            .spawn_scoped(scope, move || convert(latex))
            .map(|handle| handle.join())
    });

    match outcome {
        Ok(Ok(Ok(markup))) => markup,
        Ok(Ok(Err(e))) => {
            warn!("Error rendering LaTeX: {}", e);
            RENDER_ERROR_PLACEHOLDER.to_string()
        }
        Ok(Err(_)) => {
            warn!("LaTeX renderer panicked on {} bytes of input", latex.len());
            RENDER_ERROR_PLACEHOLDER.to_string()
        }
        Err(e) => {
            warn!("Could not start LaTeX render thread: {}", e);
            RENDER_ERROR_PLACEHOLDER.to_string()
        }
    }
}

/// Deepest nesting of braces, `\left`/`\right` pairs and environments
///
/// Unbalanced closers never take the depth below zero.
pub fn nesting_depth(latex: &str) -> usize {
    let bytes = latex.as_bytes();
    let mut depth: usize = 0;
    let mut max_depth: usize = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                depth += 1;
                i += 1;
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                i += 1;
            }
            b'\\' => {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
                    end += 1;
                }
                match &latex[start..end] {
                    "left" | "begin" => depth += 1,
                    "right" | "end" => depth = depth.saturating_sub(1),
                    _ => {}
                }
                // Skip a single escaped character such as `\{`
                i = if end == start { end + 1 } else { end };
            }
            _ => i += 1,
        }
        max_depth = max_depth.max(depth);
    }

    max_depth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_or_placeholder(output: &str) -> bool {
        output == RENDER_ERROR_PLACEHOLDER || output.starts_with("<math")
    }

    #[test]
    fn test_well_formed_input_renders_block_math() {
        let markup = render_latex(r"\frac{a}{b} + x^2");
        assert!(markup.starts_with("<math"));
        assert!(markup.contains("block"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        for input in [r"\sum_{i=1}^n i", "", r"\frac{a", "x_1 + x_2"] {
            assert_eq!(render_latex(input), render_latex(input));
        }
    }

    #[test]
    fn test_never_fails_on_awkward_input() {
        let inputs = [
            "",
            " ",
            r"\frac{a",
            "}}}{{{",
            r"\begin{nonsense}",
            r"\left(",
            "^^__",
            r"\\\\",
            "unicode αβγ",
        ];

        for input in inputs {
            let output = render_latex(input);
            assert!(rendered_or_placeholder(&output), "input {:?} gave {:?}", input, output);
        }
    }

    #[test]
    fn test_deep_nesting_becomes_placeholder() {
        let inputs = [
            "{".repeat(10_000),
            format!("{}x{}", "{".repeat(10_000), "}".repeat(10_000)),
            r"\left(".repeat(10_000),
            r"\begin{matrix}".repeat(10_000),
            format!("{}x{}", "{".repeat(500), "}".repeat(500)),
        ];

        for input in &inputs {
            assert_eq!(render_latex(input), RENDER_ERROR_PLACEHOLDER);
        }
    }

    #[test]
    fn test_nesting_at_limit_renders() {
        let input = format!(
            "{}x{}",
            "{".repeat(MAX_NESTING_DEPTH),
            "}".repeat(MAX_NESTING_DEPTH)
        );
        assert!(render_latex(&input).starts_with("<math"));
    }

    #[test]
    fn test_nesting_depth() {
        assert_eq!(nesting_depth(""), 0);
        assert_eq!(nesting_depth(r"\frac{a}{b}"), 1);
        assert_eq!(nesting_depth("{{x}}{y}"), 2);
        assert_eq!(nesting_depth("}}}{{{"), 3);
        assert_eq!(nesting_depth(r"\left( \left[ x \right] \right)"), 2);
        assert_eq!(nesting_depth(r"\begin{cases} x \end{cases}"), 2);
        assert_eq!(nesting_depth(r"\leftarrow \leftarrow \rightarrow"), 0);
        assert_eq!(nesting_depth(r"\{ \{ \{"), 0);
    }

    #[test]
    fn test_deep_input_never_reaches_converter() {
        let input = "{".repeat(MAX_NESTING_DEPTH + 1);
        let output = render_with(&input, |_| -> Result<String, String> {
            panic!("converter called")
        });
        assert_eq!(output, RENDER_ERROR_PLACEHOLDER);
    }

    #[test]
    fn test_conversion_error_becomes_placeholder() {
        let output = render_with("x", |_| Err::<String, _>("unexpected token"));
        assert_eq!(output, RENDER_ERROR_PLACEHOLDER);
    }

    #[test]
    fn test_converter_panic_becomes_placeholder() {
        let output = render_with("x", |_| -> Result<String, String> { panic!("boom") });
        assert_eq!(output, RENDER_ERROR_PLACEHOLDER);
    }

    #[test]
    fn test_successful_conversion_passes_through() {
        let output = render_with("x", |s| Ok::<_, String>(format!("<b>{}</b>", s)));
        assert_eq!(output, "<b>x</b>");
    }
}
