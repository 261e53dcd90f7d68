//! Result rendering for the terminal.

use clap::ValueEnum;
use serde::Serialize;

use crate::error::Result;

/// Output format selected with `--format`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Box-drawn two-column table.
    #[default]
    Table,
    /// Pretty-printed JSON document.
    Json,
}

/// A command result that can be printed either way.
pub trait Report: Serialize {
    /// Table title.
    fn title(&self) -> &str;

    /// Label/value rows shown in table mode.
    fn rows(&self) -> Vec<(String, String)>;
}

/// Renders `report` in the requested format.
pub fn render<R: Report>(report: &R, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(table(report.title(), &report.rows())),
    }
}

/// Prints `report` to stdout.
pub fn emit<R: Report>(report: &R, format: OutputFormat) -> Result<()> {
    println!("{}", render(report, format)?);
    Ok(())
}

/// Formats a number for table cells.
pub fn number(value: f64) -> String {
    if value != 0.0 && (value.abs() < 1e-4 || value.abs() >= 1e8) {
        format!("{:.6e}", value)
    } else {
        format!("{:.6}", value)
    }
}

fn table(title: &str, rows: &[(String, String)]) -> String {
    let left = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count());
    let right = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    let rule = |l: char, m: char, r: char| {
        format!(
            "{}{}{}{}{}",
            l,
            "─".repeat(left + 2),
            m,
            "─".repeat(right + 2),
            r
        )
    };

    let mut lines = vec![
        rule('┌', '┬', '┐'),
        format!("│ {:<left$} │ {:>right$} │", title, "", left = left, right = right),
        rule('├', '┼', '┤'),
    ];
    for (label, value) in rows {
        lines.push(format!(
            "│ {:<left$} │ {:>right$} │",
            label,
            value,
            left = left,
            right = right
        ));
    }
    lines.push(rule('└', '┴', '┘'));
    lines.join("\n")
}
