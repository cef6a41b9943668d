use infrep_core::ParseError;
use infrep_workbook::{LoadError, WorkbookError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Workbook(#[from] WorkbookError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The pivot names the same influencer (or date) twice, so a post could
    /// match more than one conversion cell.
    #[error("sheet \"{sheet}\" lists {what} \"{key}\" more than once")]
    DuplicatePivotKey {
        sheet: String,
        what: &'static str,
        key: String,
    },

    #[error("a report needs at least one grouping dimension")]
    EmptyGrouping,
}

impl From<LoadError> for ReportError {
    fn from(err: LoadError) -> Self {
        ReportError::Workbook(err.into())
    }
}
