use infrep_core::FactRecord;
use infrep_workbook::{LoadedWorkbook, WorkbookLoader};

use crate::error::ReportError;
use crate::preprocess::preprocess;

/// Loaded inputs plus the joined fact table derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub inputs: LoadedWorkbook,
    pub facts: Vec<FactRecord>,
}

/// Loads `bytes` as an input workbook and builds the fact table.
///
/// # Errors
///
/// Returns [`ReportError::Workbook`] for load or posts-parse failures and
/// any error from preprocessing the conversions pivot.
pub fn prepare(loader: &WorkbookLoader, bytes: &[u8]) -> Result<Prepared, ReportError> {
    let inputs = loader.load_bytes(bytes)?;
    let facts = preprocess(&inputs.conversions, &inputs.posts)?;
    Ok(Prepared { inputs, facts })
}
