use thiserror::Error;

/// What a cell was expected to hold when coercion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Date,
    /// Non-negative whole number (followers, clicks, conversions, ...).
    Count,
    /// Decimal money amount.
    Amount,
    /// Non-empty influencer name.
    Name,
}

impl std::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Date => write!(f, "a date"),
            Expected::Count => write!(f, "a non-negative whole number"),
            Expected::Amount => write!(f, "a decimal amount"),
            Expected::Name => write!(f, "a non-empty name"),
        }
    }
}

/// A spreadsheet cell that could not be coerced to its expected type.
///
/// `row` is the 1-based spreadsheet row, so the header is row 1 and the
/// first data row is row 2.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read \"{value}\" as {expected} (sheet \"{sheet}\", row {row}, column \"{column}\")")]
pub struct ParseError {
    pub sheet: String,
    pub row: usize,
    pub column: String,
    pub value: String,
    pub expected: Expected,
}

impl ParseError {
    #[must_use]
    pub fn new(
        sheet: &str,
        row: usize,
        column: &str,
        value: impl Into<String>,
        expected: Expected,
    ) -> Self {
        Self {
            sheet: sheet.to_owned(),
            row,
            column: column.to_owned(),
            value: value.into(),
            expected,
        }
    }
}
