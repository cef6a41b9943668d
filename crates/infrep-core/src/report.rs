use rust_decimal::Decimal;
use serde::Serialize;

use crate::records::{FactRecord, YearMonth};

/// A column the fact table can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    Influencer,
    Month,
}

impl Dimension {
    /// Header used for this dimension in displayed and exported tables.
    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Dimension::Influencer => "Influencer",
            Dimension::Month => "Month",
        }
    }

    #[must_use]
    pub fn value_of(self, fact: &FactRecord) -> GroupValue {
        match self {
            Dimension::Influencer => GroupValue::Influencer(fact.post.influencer.clone()),
            Dimension::Month => GroupValue::Month(fact.month),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One grouping value.
///
/// Values sort by their displayed text, so months order by label
/// (`"April 2024"` before `"March 2023"`), the same way the labels sort in a
/// spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Influencer(String),
    Month(YearMonth),
}

impl Ord for GroupValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (GroupValue::Influencer(a), GroupValue::Influencer(b)) => a.cmp(b),
            // Labels are unique per (year, month), so this agrees with `Eq`.
            (GroupValue::Month(a), GroupValue::Month(b)) => a.label().cmp(&b.label()),
            (GroupValue::Influencer(_), GroupValue::Month(_)) => std::cmp::Ordering::Less,
            (GroupValue::Month(_), GroupValue::Influencer(_)) => std::cmp::Ordering::Greater,
        }
    }
}

impl PartialOrd for GroupValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for GroupValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupValue::Influencer(name) => f.write_str(name),
            GroupValue::Month(month) => write!(f, "{month}"),
        }
    }
}

/// Group values in the order of the grouping dimensions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct GroupKey(pub Vec<GroupValue>);

impl GroupKey {
    #[must_use]
    pub fn values(&self) -> &[GroupValue] {
        &self.0
    }

    /// Display labels, e.g. `["Alice", "March 2024"]`.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

/// KPIs for one group of fact rows.
///
/// `conversion_rate` and `cpa` are `None` when their denominator is zero;
/// `None` is never conflated with `0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub key: GroupKey,
    pub posts: usize,
    pub cost: Decimal,
    pub clicks: u64,
    pub conversions: u64,
    pub conversion_rate: Option<f64>,
    pub cpa: Option<Decimal>,
}

/// One aggregated report, rows ordered by group key ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    pub dimensions: Vec<Dimension>,
    pub rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Sheet title, e.g. `"Report - Influencer and Month"`.
    #[must_use]
    pub fn title(&self) -> String {
        let names: Vec<&str> = self.dimensions.iter().map(|d| d.column_name()).collect();
        format!("Report - {}", names.join(" and "))
    }

    /// Sum of "Number of Posts" across all groups.
    #[must_use]
    pub fn total_posts(&self) -> usize {
        self.rows.iter().map(|r| r.posts).sum()
    }

    /// Find the row whose key labels equal `labels`.
    #[must_use]
    pub fn row(&self, labels: &[&str]) -> Option<&ReportRow> {
        self.rows.iter().find(|row| {
            row.key.0.len() == labels.len()
                && row
                    .key
                    .0
                    .iter()
                    .zip(labels)
                    .all(|(value, label)| value.to_string() == *label)
        })
    }
}

/// The three standard reports produced for one input workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluencerReport {
    pub by_influencer: ReportTable,
    pub by_month: ReportTable,
    pub by_influencer_month: ReportTable,
}

impl InfluencerReport {
    /// Tables in export order.
    #[must_use]
    pub fn tables(&self) -> [&ReportTable; 3] {
        [
            &self.by_influencer,
            &self.by_month,
            &self.by_influencer_month,
        ]
    }
}
