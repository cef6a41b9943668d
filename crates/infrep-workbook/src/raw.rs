//! Schema-free sheet contents, as handed over by the spreadsheet reader.

use chrono::NaiveDateTime;

/// A single spreadsheet cell after reading, before any typed coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDateTime),
    /// Spreadsheet error value such as `#DIV/0!`.
    Error(String),
}

impl Cell {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{n:.0}"),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Text(s) | Cell::Error(s) => f.write_str(s),
            Cell::Bool(b) => write!(f, "{b}"),
            Cell::Date(dt) if dt.time() == chrono::NaiveTime::MIN => {
                write!(f, "{}", dt.format("%Y-%m-%d"))
            }
            Cell::Date(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

/// A data row together with its 1-based spreadsheet row number.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub number: usize,
    pub cells: Vec<Cell>,
}

/// One sheet: a header row followed by data rows.
///
/// Fully blank rows are dropped on construction and every data row is padded
/// to the header width, so `cell(row, col)` is total for in-range columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub sheet: String,
    /// 1-based spreadsheet row number of the header.
    pub header_row: usize,
    pub header: Vec<Cell>,
    pub rows: Vec<RawRow>,
}

const EMPTY: Cell = Cell::Empty;

impl RawTable {
    /// Build a table from sheet rows. `first_row` is the 1-based spreadsheet
    /// row number of the first element of `rows`, which becomes the header.
    #[must_use]
    pub fn from_rows<I>(sheet: &str, first_row: usize, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<Cell>>,
    {
        let mut iter = rows.into_iter();
        let header = iter.next().unwrap_or_default();
        let width = header.len();

        let rows = iter
            .enumerate()
            .filter(|(_, cells)| !cells.iter().all(Cell::is_empty))
            .map(|(idx, mut cells)| {
                if cells.len() < width {
                    cells.resize(width, Cell::Empty);
                }
                RawRow {
                    number: first_row + idx + 1,
                    cells,
                }
            })
            .collect();

        Self {
            sheet: sheet.to_owned(),
            header_row: first_row,
            header,
            rows,
        }
    }

    /// Index of the column whose header text equals `name` (surrounding
    /// whitespace ignored).
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|cell| matches!(cell, Cell::Text(text) if text.trim() == name))
    }

    #[must_use]
    pub fn header_label(&self, col: usize) -> String {
        self.header.get(col).map(ToString::to_string).unwrap_or_default()
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(col))
            .unwrap_or(&EMPTY)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.header.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_owned())
    }

    #[test]
    fn from_rows_skips_blank_rows_and_keeps_numbers() {
        let table = RawTable::from_rows(
            "Posts",
            1,
            vec![
                vec![text("Date"), text("Influencer")],
                vec![text("2024-03-01"), text("Alice")],
                vec![Cell::Empty, Cell::Empty],
                vec![text("2024-03-02"), text("Bob")],
            ],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].number, 2);
        assert_eq!(table.rows[1].number, 4);
    }

    #[test]
    fn from_rows_pads_short_rows() {
        let table = RawTable::from_rows(
            "Posts",
            1,
            vec![vec![text("a"), text("b"), text("c")], vec![text("x")]],
        );
        assert_eq!(table.rows[0].cells.len(), 3);
        assert_eq!(table.cell(0, 2), &Cell::Empty);
    }

    #[test]
    fn column_index_ignores_surrounding_whitespace() {
        let table = RawTable::from_rows("Posts", 1, vec![vec![text(" Cost "), text("Clicks")]]);
        assert_eq!(table.column_index("Cost"), Some(0));
        assert_eq!(table.column_index("Likes"), None);
    }

    #[test]
    fn cell_out_of_range_is_empty() {
        let table = RawTable::from_rows("Posts", 1, Vec::<Vec<Cell>>::new());
        assert!(table.is_empty());
        assert_eq!(table.cell(3, 3), &Cell::Empty);
    }

    #[test]
    fn display_formats_whole_numbers_and_dates() {
        assert_eq!(Cell::Number(4.0).to_string(), "4");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
        let midnight = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Cell::Date(midnight).to_string(), "2024-03-01");
    }
}
