//! Influencer marketing KPIs: spend, conversion rate, and cost-per-acquisition.
//!
//! Joins the loaded `Posts` and `Conversions` sheets into a fact table,
//! aggregates it by influencer, by month, and by both, and packages the three
//! tables for display or export.

pub mod aggregate;
pub mod assemble;
pub mod error;
pub mod memo;
pub mod pipeline;
pub mod preprocess;

pub use aggregate::aggregate;
pub use assemble::{assemble, export, BY_INFLUENCER, BY_INFLUENCER_MONTH, BY_MONTH};
pub use error::ReportError;
pub use memo::ReportCache;
pub use pipeline::{prepare, Prepared};
pub use preprocess::{join_posts, melt_conversions, preprocess};
