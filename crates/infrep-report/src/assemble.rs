//! The three standard reports and their export.

use infrep_core::{Dimension, FactRecord, InfluencerReport};
use infrep_workbook::{export_report, LoadedWorkbook};

use crate::aggregate::aggregate;
use crate::error::ReportError;

pub const BY_INFLUENCER: &[Dimension] = &[Dimension::Influencer];
pub const BY_MONTH: &[Dimension] = &[Dimension::Month];
pub const BY_INFLUENCER_MONTH: &[Dimension] = &[Dimension::Influencer, Dimension::Month];

/// Builds the Influencer, Month, and Influencer x Month reports.
///
/// # Errors
///
/// Propagates aggregation errors; none occur for the fixed groupings used
/// here.
pub fn assemble(facts: &[FactRecord]) -> Result<InfluencerReport, ReportError> {
    let report = InfluencerReport {
        by_influencer: aggregate(facts, BY_INFLUENCER)?,
        by_month: aggregate(facts, BY_MONTH)?,
        by_influencer_month: aggregate(facts, BY_INFLUENCER_MONTH)?,
    };
    tracing::info!(
        facts = facts.len(),
        influencers = report.by_influencer.rows.len(),
        months = report.by_month.rows.len(),
        "assembled reports"
    );
    Ok(report)
}

/// Serializes `report` plus the raw input sheets to xlsx bytes.
///
/// # Errors
///
/// Returns [`ReportError::Workbook`] if the workbook cannot be written.
pub fn export(report: &InfluencerReport, inputs: &LoadedWorkbook) -> Result<Vec<u8>, ReportError> {
    Ok(export_report(report, inputs)?)
}
