//! Rendering run results for the terminal.

use recast_core::RunResult;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// A header per platform followed by its text
    #[default]
    Human,
    /// A JSON object keyed by platform output key
    Json,
}

/// Renders a run result. An empty result renders as an empty string in
/// human format and `{}` in JSON.
///
/// ```
/// use recast::{OutputFormat, Platform, RunResult, render};
///
/// let result: RunResult = [(Platform::LinkedIn, "Hello".to_string())].into_iter().collect();
/// let json = render(&result, OutputFormat::Json).unwrap();
/// assert!(json.contains("\"linkedin_content\": \"Hello\""));
/// ```
///
/// # Errors
///
/// Only JSON serialization can fail.
pub fn render(result: &RunResult, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result),
        OutputFormat::Human => Ok(result
            .iter()
            .map(|(platform, text)| format!("## {}\n\n{}\n", platform.output_key(), text.trim_end()))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
