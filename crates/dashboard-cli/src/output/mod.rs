pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod view;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
///
/// Dashboard envelopes get the dedicated view renderer in table mode; every
/// other shape falls through to the generic field/value table.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table if view::is_dashboard(value) => view::print_dashboard(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}
