//! Report export as a single xlsx workbook.
//!
//! Sheet order: the three report tables, then the raw `Posts` and
//! `Conversions` sheets for traceability.

use infrep_core::{InfluencerReport, ReportTable};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::coerce::datetime_to_excel_serial;
use crate::error::WorkbookError;
use crate::loader::LoadedWorkbook;
use crate::raw::{Cell, RawTable};

/// Metric headers written after the group-key columns of every report sheet.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Number of Posts",
    "Cost",
    "Clicks",
    "Conversions",
    "Conversion Rate",
    "CPA",
];

struct Formats {
    header: Format,
    money: Format,
    percent: Format,
    date: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold(),
            money: Format::new().set_num_format("#,##0.00"),
            percent: Format::new().set_num_format("0.00%"),
            date: Format::new().set_num_format("yyyy-mm-dd"),
        }
    }
}

/// Serializes the report and the raw inputs into xlsx bytes.
///
/// Missing conversion rates and CPAs are written as blank cells.
///
/// # Errors
///
/// Returns [`WorkbookError::Export`] if the workbook cannot be built.
pub fn export_report(
    report: &InfluencerReport,
    inputs: &LoadedWorkbook,
) -> Result<Vec<u8>, WorkbookError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    for table in report.tables() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(table.title())?;
        write_report_sheet(sheet, table, &formats)?;
    }

    for raw in [&inputs.posts_raw, &inputs.conversions] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(&raw.sheet)?;
        write_raw_sheet(sheet, raw, &formats)?;
    }

    let bytes = workbook.save_to_buffer()?;
    tracing::info!(bytes = bytes.len(), "exported report workbook");
    Ok(bytes)
}

fn write_report_sheet(
    sheet: &mut Worksheet,
    table: &ReportTable,
    formats: &Formats,
) -> Result<(), XlsxError> {
    let key_width = table.dimensions.len();

    let headers = table
        .dimensions
        .iter()
        .map(|d| d.column_name())
        .chain(REPORT_COLUMNS);
    for (col, title) in headers.enumerate() {
        sheet.write_string_with_format(0, col_index(col)?, title, &formats.header)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let r = row_index(idx + 1)?;
        for (col, label) in row.key.labels().iter().enumerate() {
            sheet.write_string(r, col_index(col)?, label)?;
        }

        let c = |offset: usize| col_index(key_width + offset);
        sheet.write_number(r, c(0)?, as_number(row.posts as u64))?;
        write_decimal(sheet, r, c(1)?, row.cost, &formats.money)?;
        sheet.write_number(r, c(2)?, as_number(row.clicks))?;
        sheet.write_number(r, c(3)?, as_number(row.conversions))?;
        if let Some(rate) = row.conversion_rate {
            sheet.write_number_with_format(r, c(4)?, rate, &formats.percent)?;
        }
        if let Some(cpa) = row.cpa {
            write_decimal(sheet, r, c(5)?, cpa, &formats.money)?;
        }
    }

    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_raw_sheet(
    sheet: &mut Worksheet,
    table: &RawTable,
    formats: &Formats,
) -> Result<(), XlsxError> {
    for (col, cell) in table.header.iter().enumerate() {
        sheet.write_string_with_format(0, col_index(col)?, cell.to_string(), &formats.header)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let r = row_index(idx + 1)?;
        for (col, cell) in row.cells.iter().enumerate() {
            let c = col_index(col)?;
            match cell {
                Cell::Empty => {}
                Cell::Number(n) => {
                    sheet.write_number(r, c, *n)?;
                }
                Cell::Text(s) | Cell::Error(s) => {
                    sheet.write_string(r, c, s)?;
                }
                Cell::Bool(b) => {
                    sheet.write_boolean(r, c, *b)?;
                }
                Cell::Date(dt) => {
                    sheet.write_number_with_format(
                        r,
                        c,
                        datetime_to_excel_serial(*dt),
                        &formats.date,
                    )?;
                }
            }
        }
    }
    Ok(())
}

fn write_decimal(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Decimal,
    format: &Format,
) -> Result<(), XlsxError> {
    if let Some(number) = value.to_f64() {
        sheet.write_number_with_format(row, col, number, format)?;
    }
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn as_number(n: u64) -> f64 {
    n as f64
}

fn row_index(idx: usize) -> Result<u32, XlsxError> {
    u32::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_index(idx: usize) -> Result<u16, XlsxError> {
    u16::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}
