//! Workbook loading: the `Posts` and `Conversions` sheets into typed form.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use infrep_core::config::DEFAULT_MAX_INPUT_BYTES;
use infrep_core::{Expected, ParseError, PostRecord};

use crate::coerce;
use crate::error::{LoadError, WorkbookError};
use crate::raw::{Cell, RawRow, RawTable};

pub const POSTS_SHEET: &str = "Posts";
pub const CONVERSIONS_SHEET: &str = "Conversions";

/// Key column of the `Conversions` pivot; every other column is a date.
pub const INFLUENCER_COLUMN: &str = "influencer";

const SUPPORTED_EXTENSIONS: &[&str] = &["xlsx", "xls"];

/// Both input sheets, read and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedWorkbook {
    /// The `Conversions` pivot exactly as read.
    pub conversions: RawTable,
    /// The `Posts` sheet exactly as read, kept for the raw-data view and export.
    pub posts_raw: RawTable,
    pub posts: Vec<PostRecord>,
}

/// Reads input workbooks, enforcing the format gate and size limit.
#[derive(Debug, Clone)]
pub struct WorkbookLoader {
    max_input_bytes: u64,
}

impl Default for WorkbookLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_BYTES)
    }
}

impl WorkbookLoader {
    #[must_use]
    pub fn new(max_input_bytes: u64) -> Self {
        Self { max_input_bytes }
    }

    /// Reads the file at `path` fully into memory.
    ///
    /// The file handle is released before this returns, on success and
    /// failure alike.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] for anything other than
    /// `.xlsx`/`.xls`, [`LoadError::TooLarge`] above the size limit, and
    /// [`LoadError::Io`] if the file cannot be read.
    pub fn read_path(&self, path: &Path) -> Result<Vec<u8>, WorkbookError> {
        check_extension(path)?;

        let io_err = |source| LoadError::Io {
            path: path.display().to_string(),
            source,
        };
        let size = std::fs::metadata(path).map_err(io_err)?.len();
        self.check_size(size)?;

        Ok(std::fs::read(path).map_err(io_err)?)
    }

    /// Loads a workbook from a path. See [`WorkbookLoader::load_bytes`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkbookError`] for any load or parse failure.
    pub fn load_path(&self, path: &Path) -> Result<LoadedWorkbook, WorkbookError> {
        let bytes = self.read_path(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read input workbook");
        self.load_bytes(&bytes)
    }

    /// Loads a workbook held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`WorkbookError::Load`] if the bytes are not a workbook or a
    /// required sheet or column is missing, and [`WorkbookError::Parse`] if a
    /// `Posts` cell cannot be coerced to its column type.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<LoadedWorkbook, WorkbookError> {
        self.check_size(bytes.len() as u64)?;

        let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| LoadError::Open(e.to_string()))?;

        let conversions = read_sheet(&mut sheets, CONVERSIONS_SHEET)?;
        if conversions.column_index(INFLUENCER_COLUMN).is_none() {
            return Err(LoadError::MissingColumn {
                sheet: CONVERSIONS_SHEET.to_owned(),
                column: INFLUENCER_COLUMN.to_owned(),
            }
            .into());
        }

        let posts_raw = read_sheet(&mut sheets, POSTS_SHEET)?;
        let posts = parse_posts(&posts_raw)?;

        tracing::info!(
            posts = posts.len(),
            conversion_rows = conversions.len(),
            conversion_columns = conversions.width(),
            "loaded input workbook"
        );

        Ok(LoadedWorkbook {
            conversions,
            posts_raw,
            posts,
        })
    }

    fn check_size(&self, size: u64) -> Result<(), LoadError> {
        if size > self.max_input_bytes {
            return Err(LoadError::TooLarge {
                size,
                limit: self.max_input_bytes,
            });
        }
        Ok(())
    }
}

fn check_extension(path: &Path) -> Result<(), LoadError> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s))
        });
    if supported {
        Ok(())
    } else {
        Err(LoadError::UnsupportedFormat {
            path: path.display().to_string(),
        })
    }
}

fn read_sheet(
    sheets: &mut Sheets<Cursor<&[u8]>>,
    name: &str,
) -> Result<RawTable, LoadError> {
    let names = sheets.sheet_names();
    if !names.iter().any(|n| n == name) {
        return Err(LoadError::MissingSheet {
            sheet: name.to_owned(),
            found: names.join(", "),
        });
    }

    let range = sheets
        .worksheet_range(name)
        .map_err(|e| LoadError::UnreadableSheet {
            sheet: name.to_owned(),
            reason: e.to_string(),
        })?;

    Ok(range_to_table(name, &range))
}

fn range_to_table(name: &str, range: &Range<Data>) -> RawTable {
    // `start()` is 0-based; spreadsheet rows are 1-based.
    let first_row = range.start().map_or(1, |(row, _)| row as usize + 1);
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from_data).collect::<Vec<_>>());
    RawTable::from_rows(name, first_row, rows)
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        #[allow(clippy::cast_precision_loss)]
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            coerce::excel_serial_to_datetime(serial).map_or(Cell::Number(serial), Cell::Date)
        }
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}

/// Column headers of the `Posts` sheet, in the order of [`PostRecord`] fields.
pub const POSTS_COLUMNS: [&str; 9] = [
    "Date",
    "Influencer",
    "Followers",
    "Follower group",
    "Cost",
    "Likes",
    "Comments",
    "Shares",
    "Clicks",
];

/// Coerces every `Posts` row into a [`PostRecord`].
///
/// Columns are located by header, so leading index columns and extra columns
/// are ignored.
///
/// # Errors
///
/// Returns [`LoadError::MissingColumn`] for an absent header and a
/// [`ParseError`] for the first cell that fails coercion.
pub fn parse_posts(table: &RawTable) -> Result<Vec<PostRecord>, WorkbookError> {
    let mut idx = [0usize; POSTS_COLUMNS.len()];
    for (slot, column) in idx.iter_mut().zip(POSTS_COLUMNS) {
        *slot = table
            .column_index(column)
            .ok_or_else(|| LoadError::MissingColumn {
                sheet: table.sheet.clone(),
                column: column.to_owned(),
            })?;
    }
    let [date, influencer, followers, group, cost, likes, comments, shares, clicks] = idx;

    let mut posts = Vec::with_capacity(table.len());
    for row in &table.rows {
        let cells = PostCells { table, row };
        posts.push(PostRecord {
            date: cells.read(date, Expected::Date, coerce::date)?,
            influencer: cells.read(influencer, Expected::Name, coerce::name)?,
            followers: cells.read(followers, Expected::Count, coerce::count)?,
            follower_group: cells.get(group).to_string().trim().to_owned(),
            cost: cells.read(cost, Expected::Amount, coerce::amount)?,
            likes: cells.read(likes, Expected::Count, coerce::count)?,
            comments: cells.read(comments, Expected::Count, coerce::count)?,
            shares: cells.read(shares, Expected::Count, coerce::count)?,
            clicks: cells.read(clicks, Expected::Count, coerce::count)?,
        });
    }
    Ok(posts)
}

struct PostCells<'a> {
    table: &'a RawTable,
    row: &'a RawRow,
}

impl PostCells<'_> {
    fn get(&self, col: usize) -> &Cell {
        self.row.cells.get(col).unwrap_or(&Cell::Empty)
    }

    fn read<T>(
        &self,
        col: usize,
        expected: Expected,
        coerce: impl Fn(&Cell) -> Option<T>,
    ) -> Result<T, ParseError> {
        let cell = self.get(col);
        coerce(cell).ok_or_else(|| {
            ParseError::new(
                &self.table.sheet,
                self.row.number,
                &self.table.header_label(col),
                cell.to_string(),
                expected,
            )
        })
    }
}
