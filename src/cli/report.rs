//! Result collection and rendering.
//!
//! The evaluation core hands one typed outcome per document to this layer,
//! which renders the batch as CSV, JSON, or a console table. Zero-filled
//! score columns for failed documents exist only here, as an explicit
//! output convention; the core itself never fabricates a score.

use clap::ValueEnum;
use comfy_table::{presets, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use serde_json::json;

use crate::domain::models::{ScoreRecord, CRITERIA};

/// Output format for a batch of reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
    Console,
}

/// Outcome of one document, ready for rendering.
///
/// Failures arrive as rendered messages: by this point the distinction
/// that matters to a reader is the text, not the error type.
pub struct DocumentReport {
    pub filename: String,
    pub result: Result<ScoreRecord, String>,
}

impl DocumentReport {
    pub fn new(filename: impl Into<String>, result: Result<ScoreRecord, String>) -> Self {
        Self {
            filename: filename.into(),
            result,
        }
    }

    pub fn status(&self) -> &'static str {
        if self.result.is_ok() {
            "success"
        } else {
            "error"
        }
    }
}

/// Render a batch of reports in the requested format.
pub fn render(format: OutputFormat, reports: &[DocumentReport]) -> String {
    match format {
        OutputFormat::Csv => render_csv(reports),
        OutputFormat::Json => render_json(reports),
        OutputFormat::Console => render_console(reports),
    }
}

fn render_csv(reports: &[DocumentReport]) -> String {
    let mut out = String::new();
    out.push_str("filename,");
    out.push_str(&CRITERIA.join(","));
    out.push_str(",status,error_message\n");

    for report in reports {
        out.push_str(&csv_escape(&report.filename));
        match &report.result {
            Ok(score) => {
                for value in score.values() {
                    out.push_str(&format!(",{value:.2}"));
                }
                out.push_str(",success,\n");
            }
            Err(message) => {
                // Failed documents get zero columns so every row has the
                // same shape; the status column is authoritative.
                for _ in CRITERIA {
                    out.push_str(",0.00");
                }
                out.push_str(",error,");
                out.push_str(&csv_escape(message));
                out.push('\n');
            }
        }
    }

    out
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render_json(reports: &[DocumentReport]) -> String {
    let entries: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| match &report.result {
            Ok(score) => json!({
                "filename": report.filename,
                "status": "success",
                "evaluation": score,
            }),
            Err(message) => json!({
                "filename": report.filename,
                "status": "error",
                "error_message": message,
            }),
        })
        .collect();

    serde_json::to_string_pretty(&entries).expect("report serialization cannot fail")
}

fn render_console(reports: &[DocumentReport]) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut headers = vec![Cell::new("FILE")];
    headers.extend(
        ["REL", "FACT", "CLAR", "HALL", "STYLE", "RAG", "CITE"]
            .iter()
            .map(|h| Cell::new(h).set_alignment(CellAlignment::Right)),
    );
    headers.push(Cell::new("STATUS"));
    table.set_header(headers);

    for report in reports {
        let mut row = vec![Cell::new(&report.filename)];
        match &report.result {
            Ok(score) => {
                row.extend(score.values().iter().map(|&v| {
                    Cell::new(format!("{v:.1}"))
                        .set_alignment(CellAlignment::Right)
                        .fg(score_color(v))
                }));
                row.push(Cell::new("success").fg(Color::Green));
            }
            Err(message) => {
                row.extend(CRITERIA.iter().map(|_| Cell::new("-")));
                row.push(Cell::new(format!("error: {message}")).fg(Color::Red));
            }
        }
        table.add_row(row);
    }

    let total = reports.len();
    let succeeded = reports.iter().filter(|r| r.result.is_ok()).count();
    format!(
        "{}\n{table}\n\n{} {} evaluated, {} succeeded, {} failed",
        style("Document Evaluation Results").bold(),
        total,
        if total == 1 { "document" } else { "documents" },
        succeeded,
        total - succeeded
    )
}

/// Green for strong scores, yellow for middling, red for weak.
fn score_color(value: f64) -> Color {
    if value >= 4.0 {
        Color::Green
    } else if value >= 2.5 {
        Color::Yellow
    } else {
        Color::Red
    }
}
