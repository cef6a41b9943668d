use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// One sponsored post, as read from the `Posts` sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRecord {
    pub date: NaiveDate,
    pub influencer: String,
    pub followers: u64,
    /// Follower-count bucket label from the sheet, passed through as-is.
    pub follower_group: String,
    pub cost: Decimal,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub clicks: u64,
}

/// One (influencer, date) cell of the `Conversions` pivot in long form.
///
/// Empty cells in the pivot are zero-filled, so every (influencer, date)
/// pair present in the sheet yields exactly one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionCell {
    pub influencer: String,
    pub date: NaiveDate,
    pub conversions: u64,
}

/// A post joined with its conversion cell, annotated with its month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactRecord {
    pub post: PostRecord,
    pub conversions: u64,
    pub month: YearMonth,
}

impl FactRecord {
    #[must_use]
    pub fn new(post: PostRecord, conversions: u64) -> Self {
        let month = YearMonth::from_date(post.date);
        Self {
            post,
            conversions,
            month,
        }
    }
}

/// Calendar month grouping key.
///
/// Displays as `"March 2024"`. The year is part of the key, so the same
/// month in different years never collapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    /// 1-based month number.
    #[must_use]
    pub fn month(self) -> u32 {
        self.month
    }

    /// Human-readable label, e.g. `"June 2023"`.
    #[must_use]
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => write!(f, "{}", first.format("%B %Y")),
            None => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
