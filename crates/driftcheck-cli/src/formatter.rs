//! Output formatters for comparison reports.

use anyhow::Context;
use clap::ValueEnum;
use comfy_table::{Cell, Color, Table};
use driftcheck_core::compare::{
    count_errors, list_all_errors, logs_to_json, path_prefix, walk, CompareState,
};
use driftcheck_core::CompareLog;

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per difference
    Text,
    /// The full diff log as JSON
    Json,
    /// ASCII table of differences
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter: Send + Sync {
    /// Format the diff log of one run.
    fn format_report(&self, logs: &[CompareLog]) -> anyhow::Result<String>;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}

fn summary(logs: &[CompareLog]) -> String {
    match count_errors(logs) {
        0 => "No differences found".to_string(),
        1 => "1 difference found".to_string(),
        n => format!("{} differences found", n),
    }
}

/// Plain text formatter.
pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_report(&self, logs: &[CompareLog]) -> anyhow::Result<String> {
        let mut output = String::new();
        for line in list_all_errors(logs) {
            output.push_str(&line);
            output.push('\n');
        }
        output.push_str(&summary(logs));
        Ok(output)
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_report(&self, logs: &[CompareLog]) -> anyhow::Result<String> {
        logs_to_json(logs).context("failed to serialize diff log")
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_report(&self, logs: &[CompareLog]) -> anyhow::Result<String> {
        let mut table = Table::new();
        table.set_header(vec!["State", "Path", "Attribute", "Expected", "Found"]);

        walk(logs, &mut |parents, log| {
            if !log.is_error() {
                return;
            }
            let color = match log.state {
                CompareState::NotInDatabase => Color::Red,
                CompareState::ExtraInDatabase => Color::Yellow,
                _ => Color::Magenta,
            };
            let attribute = if log.attribute.is_not_set() {
                String::new()
            } else {
                log.attribute.to_string()
            };
            table.add_row(vec![
                Cell::new(log.state).fg(color),
                Cell::new(format!("{}{} '{}'", path_prefix(parents), log.kind, log.name)),
                Cell::new(attribute),
                Cell::new(log.expected.as_deref().unwrap_or("")),
                Cell::new(log.found.as_deref().unwrap_or("")),
            ]);
        });

        Ok(format!("{}\n{}", table, summary(logs)))
    }
}
