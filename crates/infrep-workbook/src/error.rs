use infrep_core::ParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file type for \"{path}\": expected an .xlsx or .xls workbook")]
    UnsupportedFormat { path: String },

    #[error("failed to read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("input is {size} bytes, above the {limit}-byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("not a readable workbook: {0}")]
    Open(String),

    #[error("workbook has no \"{sheet}\" sheet (found: {found})")]
    MissingSheet { sheet: String, found: String },

    #[error("sheet \"{sheet}\" could not be read: {reason}")]
    UnreadableSheet { sheet: String, reason: String },

    #[error("sheet \"{sheet}\" has no \"{column}\" column")]
    MissingColumn { sheet: String, column: String },
}

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to write report workbook: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),
}

/// Which bucket of the error taxonomy a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing sheet or column, unsupported or unreadable file.
    Load,
    /// A cell could not be coerced to its expected type.
    Parse,
    Export,
}

impl WorkbookError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            WorkbookError::Load(_) => ErrorKind::Load,
            WorkbookError::Parse(_) => ErrorKind::Parse,
            WorkbookError::Export(_) => ErrorKind::Export,
        }
    }
}
