//! Output formatting utilities.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use basis_analytics::pipeline::ReportRow;

use crate::cli::OutputFormat;

/// Prints rows in the requested format.
///
/// Minimal output is the first row as compact JSON; commands with a natural
/// headline value print that themselves instead.
pub fn print_output<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_table(rows));
            Ok(())
        }
        OutputFormat::Json => print_json_value(rows),
        OutputFormat::Csv => print_csv(rows),
        OutputFormat::Minimal => {
            if let Some(first) = rows.first() {
                println!("{}", serde_json::to_string(first)?);
            }
            Ok(())
        }
    }
}

/// Rounded table with a left-aligned first column.
pub fn render_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return "No results.".to_string();
    }
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}

/// Pretty JSON on stdout.
pub fn print_json_value<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// CSV with a header row on stdout.
pub fn print_csv<T: Serialize>(rows: &[T]) -> anyhow::Result<()> {
    write_csv(csv::Writer::from_writer(std::io::stdout()), rows)
}

/// CSV with a header row to a file.
pub fn write_csv_file<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    write_csv(csv::Writer::from_path(path)?, rows)
}

fn write_csv<W: std::io::Write, T: Serialize>(mut wtr: csv::Writer<W>, rows: &[T]) -> anyhow::Result<()> {
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A metric and its formatted value.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn from_f64(key: impl Into<String>, value: f64, precision: usize) -> Self {
        Self::new(key, format!("{value:.precision$}"))
    }

    /// Decimal rate shown as a percentage.
    pub fn from_percent(key: impl Into<String>, rate: f64) -> Self {
        Self::new(key, format!("{:.4}%", rate * 100.0))
    }

    /// Value already in basis points.
    pub fn from_bps(key: impl Into<String>, bps: f64) -> Self {
        Self::new(key, format!("{bps:.2} bps"))
    }
}

/// Table view of a report row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ReportLine {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Unit")]
    pub unit: String,
}

impl From<ReportRow> for ReportLine {
    fn from(row: ReportRow) -> Self {
        Self {
            category: row.category,
            metric: row.metric,
            value: row.value,
            unit: row.unit,
        }
    }
}
