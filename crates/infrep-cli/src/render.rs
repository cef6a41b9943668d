//! Terminal, markdown, and JSON rendering of report and raw tables.

use infrep_core::{OutputFormat, ReportRow, ReportTable};
use infrep_workbook::{Cell, RawTable, REPORT_COLUMNS};
use serde_json::{json, Value};

/// Shown in place of a rate or CPA whose denominator is zero.
const MISSING: &str = "\u{2014}";

/// Renders `table`, followed by any `raw` sheets, in `format`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub(crate) fn render(
    format: OutputFormat,
    table: &ReportTable,
    raw: &[&RawTable],
) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Table => {
            let mut sections = vec![text_table(
                &table.title(),
                &report_headers(table),
                &report_cells(table),
            )];
            sections.extend(
                raw.iter()
                    .map(|t| text_table(&t.sheet, &raw_headers(t), &raw_cells(t))),
            );
            sections.join("\n")
        }
        OutputFormat::Markdown => {
            let mut sections = vec![markdown_table(
                &table.title(),
                &report_headers(table),
                &report_cells(table),
            )];
            sections.extend(
                raw.iter()
                    .map(|t| markdown_table(&t.sheet, &raw_headers(t), &raw_cells(t))),
            );
            sections.join("\n")
        }
        OutputFormat::Json => {
            let mut doc = json!({
                "title": table.title(),
                "rows": table.rows,
            });
            if !raw.is_empty() {
                doc["raw"] = raw.iter().map(|t| raw_json(t)).collect();
            }
            let mut text = serde_json::to_string_pretty(&doc)?;
            text.push('\n');
            text
        }
    };
    Ok(output)
}

fn report_headers(table: &ReportTable) -> Vec<String> {
    table
        .dimensions
        .iter()
        .map(|d| d.column_name())
        .chain(REPORT_COLUMNS)
        .map(str::to_owned)
        .collect()
}

fn report_cells(table: &ReportTable) -> Vec<Vec<String>> {
    table.rows.iter().map(report_row_cells).collect()
}

fn report_row_cells(row: &ReportRow) -> Vec<String> {
    let mut cells = row.key.labels();
    cells.push(row.posts.to_string());
    cells.push(format!("{:.2}", row.cost));
    cells.push(row.clicks.to_string());
    cells.push(row.conversions.to_string());
    cells.push(
        row.conversion_rate
            .map_or_else(|| MISSING.to_owned(), |rate| format!("{:.2}%", rate * 100.0)),
    );
    cells.push(
        row.cpa
            .map_or_else(|| MISSING.to_owned(), |cpa| format!("{cpa:.2}")),
    );
    cells
}

fn raw_headers(table: &RawTable) -> Vec<String> {
    table.header.iter().map(ToString::to_string).collect()
}

fn raw_cells(table: &RawTable) -> Vec<Vec<String>> {
    table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(ToString::to_string).collect())
        .collect()
}

fn raw_json(table: &RawTable) -> Value {
    let rows: Vec<Value> = table
        .rows
        .iter()
        .map(|row| row.cells.iter().map(cell_json).collect())
        .collect();
    json!({
        "sheet": table.sheet,
        "header": raw_headers(table),
        "rows": rows,
    })
}

fn cell_json(cell: &Cell) -> Value {
    match cell {
        Cell::Empty => Value::Null,
        Cell::Number(n) => json!(n),
        Cell::Bool(b) => json!(b),
        Cell::Text(_) | Cell::Date(_) | Cell::Error(_) => json!(cell.to_string()),
    }
}

/// Left-aligned columns sized to their widest cell.
fn text_table(title: &str, headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(col) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        padded.join("  ").trim_end().to_owned()
    };

    let mut lines = vec![title.to_owned(), String::new(), line(headers)];
    if rows.is_empty() {
        lines.push("(no rows)".to_owned());
    }
    lines.extend(rows.iter().map(|row| line(row)));
    lines.push(String::new());
    lines.join("\n")
}

fn markdown_table(title: &str, headers: &[String], rows: &[Vec<String>]) -> String {
    let line = |cells: &[String]| -> String {
        let escaped: Vec<String> = cells.iter().map(|c| c.replace('|', "\\|")).collect();
        format!("| {} |", escaped.join(" | "))
    };

    let mut lines = vec![format!("## {title}"), String::new(), line(headers)];
    lines.push(format!("|{}", " --- |".repeat(headers.len())));
    lines.extend(rows.iter().map(|row| line(row)));
    lines.push(String::new());
    lines.join("\n")
}
