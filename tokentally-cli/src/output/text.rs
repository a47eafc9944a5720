//! Text output formatting.

use serde_json::Value;
use tokentally_core::UsageRecord;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Ledger fields shown by the web usage explorer, in display order.
const LEDGER_FIELDS: [&str; 4] = ["customer_id", "provider", "model", "units"];

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats fetched records under a header naming their source.
    pub fn format_records(&self, source: &str, records: &[UsageRecord]) -> String {
        let mut lines = Vec::with_capacity(records.len() + 1);

        let noun = if records.len() == 1 { "record" } else { "records" };
        lines.push(format!(
            "{} {}",
            self.bold(source),
            self.dim(&format!("({} {noun})", records.len()))
        ));

        if records.is_empty() {
            lines.push("No usage records.".to_string());
        }

        lines.extend(records.iter().map(|r| self.format_record(r)));
        lines.join("\n")
    }

    /// Formats one record on a single line.
    ///
    /// Ledger-shaped records print their ledger fields; anything else prints
    /// as compact JSON.
    pub fn format_record(&self, record: &UsageRecord) -> String {
        ledger_line(record).unwrap_or_else(|| Value::Object(record.clone()).to_string())
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Joins the ledger fields present in `record`, or `None` if it has none.
fn ledger_line(record: &UsageRecord) -> Option<String> {
    let parts: Vec<String> = LEDGER_FIELDS
        .iter()
        .filter_map(|field| record.get(*field))
        .map(display_value)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
