//! Shared types for the influencer report workspace.
//!
//! Holds the typed records every stage passes along (posts, conversion
//! cells, joined facts, report rows), the cell-level [`ParseError`], and the
//! environment-driven [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod parse_error;
pub mod records;
pub mod report;

use thiserror::Error;

pub use app_config::{AppConfig, OutputFormat};
pub use config::{load_app_config, load_app_config_from_env};
pub use parse_error::{Expected, ParseError};
pub use records::{ConversionCell, FactRecord, PostRecord, YearMonth};
pub use report::{Dimension, GroupKey, GroupValue, InfluencerReport, ReportRow, ReportTable};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
