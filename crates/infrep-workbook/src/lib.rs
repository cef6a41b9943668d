//! Spreadsheet boundary for the influencer report.
//!
//! Reads the `Posts` and `Conversions` sheets of an uploaded workbook into
//! [`RawTable`]s and typed [`infrep_core::PostRecord`]s, and writes the
//! finished report back out as a five-sheet xlsx workbook.

pub mod coerce;
pub mod error;
pub mod export;
pub mod loader;
pub mod raw;

pub use error::{ErrorKind, LoadError, WorkbookError};
pub use export::{export_report, REPORT_COLUMNS};
pub use loader::{
    LoadedWorkbook, WorkbookLoader, CONVERSIONS_SHEET, INFLUENCER_COLUMN, POSTS_SHEET,
};
pub use raw::{Cell, RawRow, RawTable};
