//! Reshapes the `Conversions` pivot and joins it onto the posts.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use infrep_core::{ConversionCell, Expected, FactRecord, ParseError, PostRecord};
use infrep_workbook::{coerce, Cell, LoadError, RawTable, INFLUENCER_COLUMN};

use crate::error::ReportError;

/// Unpivots the `Conversions` sheet into one cell per (influencer, date).
///
/// Every column other than `influencer` must carry a date header. Empty
/// cells become zero conversions.
///
/// # Errors
///
/// Returns [`ReportError::Parse`] for a header that is not a date, a blank
/// influencer name, or a non-count value, and
/// [`ReportError::DuplicatePivotKey`] if an influencer or date repeats.
pub fn melt_conversions(table: &RawTable) -> Result<Vec<ConversionCell>, ReportError> {
    let key_col = table
        .column_index(INFLUENCER_COLUMN)
        .ok_or_else(|| LoadError::MissingColumn {
            sheet: table.sheet.clone(),
            column: INFLUENCER_COLUMN.to_owned(),
        })?;

    let date_columns = date_columns(table, key_col)?;

    let mut seen_influencers = HashSet::new();
    let mut cells = Vec::with_capacity(table.len() * date_columns.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let key_cell = table.cell(idx, key_col);
        let influencer = coerce::name(key_cell).ok_or_else(|| {
            ParseError::new(
                &table.sheet,
                row.number,
                INFLUENCER_COLUMN,
                key_cell.to_string(),
                Expected::Name,
            )
        })?;
        if !seen_influencers.insert(influencer.clone()) {
            return Err(ReportError::DuplicatePivotKey {
                sheet: table.sheet.clone(),
                what: "influencer",
                key: influencer,
            });
        }

        for &(col, date) in &date_columns {
            let cell = table.cell(idx, col);
            let conversions = if cell.is_empty() {
                0
            } else {
                coerce::count(cell).ok_or_else(|| {
                    ParseError::new(
                        &table.sheet,
                        row.number,
                        &table.header_label(col),
                        cell.to_string(),
                        Expected::Count,
                    )
                })?
            };
            cells.push(ConversionCell {
                influencer: influencer.clone(),
                date,
                conversions,
            });
        }
    }

    Ok(cells)
}

fn date_columns(table: &RawTable, key_col: usize) -> Result<Vec<(usize, NaiveDate)>, ReportError> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(table.width().saturating_sub(1));
    for (col, header) in table.header.iter().enumerate() {
        if col == key_col {
            continue;
        }
        let date = coerce::date(header).ok_or_else(|| header_error(table, col, header))?;
        if !seen.insert(date) {
            return Err(ReportError::DuplicatePivotKey {
                sheet: table.sheet.clone(),
                what: "date",
                key: date.to_string(),
            });
        }
        columns.push((col, date));
    }
    Ok(columns)
}

fn header_error(table: &RawTable, col: usize, header: &Cell) -> ParseError {
    ParseError::new(
        &table.sheet,
        table.header_row,
        &column_letter(col),
        header.to_string(),
        Expected::Date,
    )
}

/// Spreadsheet column letters for a 0-based index: `0 -> "A"`, `27 -> "AB"`.
fn column_letter(col: usize) -> String {
    let mut n = col + 1;
    let mut letters = Vec::new();
    while n > 0 {
        #[allow(clippy::cast_possible_truncation)]
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Inner-joins posts onto conversion cells by (date, influencer).
///
/// Output keeps the order of `posts`. Posts with no matching pivot cell are
/// excluded from every report.
#[must_use]
pub fn join_posts(posts: &[PostRecord], cells: &[ConversionCell]) -> Vec<FactRecord> {
    let lookup: HashMap<(&str, NaiveDate), u64> = cells
        .iter()
        .map(|c| ((c.influencer.as_str(), c.date), c.conversions))
        .collect();

    let facts: Vec<FactRecord> = posts
        .iter()
        .filter_map(|post| {
            lookup
                .get(&(post.influencer.as_str(), post.date))
                .map(|&conversions| FactRecord::new(post.clone(), conversions))
        })
        .collect();

    let dropped = posts.len() - facts.len();
    if dropped > 0 {
        tracing::warn!(
            dropped,
            kept = facts.len(),
            "posts without a matching conversions cell were excluded"
        );
    }
    facts
}

/// Melts the pivot and joins it with the parsed posts.
///
/// # Errors
///
/// Propagates any error from [`melt_conversions`].
pub fn preprocess(
    conversions: &RawTable,
    posts: &[PostRecord],
) -> Result<Vec<FactRecord>, ReportError> {
    let cells = melt_conversions(conversions)?;
    let facts = join_posts(posts, &cells);
    tracing::debug!(cells = cells.len(), facts = facts.len(), "preprocessed inputs");
    Ok(facts)
}

#[cfg(test)]
#[path = "preprocess_test.rs"]
mod tests;
