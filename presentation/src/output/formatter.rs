//! Output formatter trait

use parley_application::RespondOutput;
use parley_domain::OutputFormat;

/// Trait for rendering a response
pub trait OutputFormatter {
    /// The reply as a person would read it
    fn format_text(&self, output: &RespondOutput) -> String;

    /// Every transcript entry, the brief and disclosures
    fn format_full(&self, output: &RespondOutput) -> String;

    /// Format as JSON
    fn format_json(&self, output: &RespondOutput) -> String;

    fn render(&self, output: &RespondOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.format_text(output),
            OutputFormat::Full => self.format_full(output),
            OutputFormat::Json => self.format_json(output),
        }
    }
}
