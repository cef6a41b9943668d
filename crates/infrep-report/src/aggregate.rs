use std::collections::BTreeMap;

use infrep_core::{Dimension, FactRecord, GroupKey, ReportRow, ReportTable};
use rust_decimal::Decimal;

use crate::error::ReportError;

#[derive(Debug, Default)]
struct Totals {
    posts: usize,
    cost: Decimal,
    clicks: u64,
    conversions: u64,
}

impl Totals {
    fn add(&mut self, fact: &FactRecord) {
        self.posts += 1;
        self.cost += fact.post.cost;
        self.clicks += fact.post.clicks;
        self.conversions += fact.conversions;
    }

    #[allow(clippy::cast_precision_loss)]
    fn into_row(self, key: GroupKey) -> ReportRow {
        let conversion_rate =
            (self.clicks > 0).then(|| self.conversions as f64 / self.clicks as f64);
        let cpa = if self.conversions > 0 {
            self.cost.checked_div(Decimal::from(self.conversions))
        } else {
            None
        };
        ReportRow {
            key,
            posts: self.posts,
            cost: self.cost,
            clicks: self.clicks,
            conversions: self.conversions,
            conversion_rate,
            cpa,
        }
    }
}

/// Groups facts by `dimensions` and computes the KPI columns per group.
///
/// Rows come out in ascending key order: influencers by name, months by
/// their `"March 2024"` label. Groups with no facts do not appear.
///
/// # Errors
///
/// Returns [`ReportError::EmptyGrouping`] if `dimensions` is empty.
pub fn aggregate(
    facts: &[FactRecord],
    dimensions: &[Dimension],
) -> Result<ReportTable, ReportError> {
    if dimensions.is_empty() {
        return Err(ReportError::EmptyGrouping);
    }

    let mut groups: BTreeMap<GroupKey, Totals> = BTreeMap::new();
    for fact in facts {
        let key = GroupKey(dimensions.iter().map(|d| d.value_of(fact)).collect());
        groups.entry(key).or_default().add(fact);
    }

    let rows = groups
        .into_iter()
        .map(|(key, totals)| totals.into_row(key))
        .collect();

    Ok(ReportTable {
        dimensions: dimensions.to_vec(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use infrep_core::PostRecord;

    fn fact(date: (i32, u32, u32), influencer: &str, cost: i64, clicks: u64, conv: u64) -> FactRecord {
        let post = PostRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            influencer: influencer.to_owned(),
            followers: 5_000,
            follower_group: "1k-10k".to_owned(),
            cost: Decimal::from(cost),
            likes: 0,
            comments: 0,
            shares: 0,
            clicks,
        };
        FactRecord::new(post, conv)
    }

    #[test]
    fn sums_and_ratios_per_influencer() {
        let facts = vec![
            fact((2024, 3, 1), "Alice", 100, 20, 4),
            fact((2024, 3, 2), "Alice", 50, 10, 2),
            fact((2024, 3, 2), "Bob", 80, 40, 0),
        ];
        let table = aggregate(&facts, &[Dimension::Influencer]).unwrap();

        assert_eq!(table.rows.len(), 2);
        let alice = table.row(&["Alice"]).unwrap();
        assert_eq!(alice.posts, 2);
        assert_eq!(alice.cost, Decimal::from(150));
        assert_eq!(alice.clicks, 30);
        assert_eq!(alice.conversions, 6);
        assert_eq!(alice.conversion_rate, Some(0.2));
        assert_eq!(alice.cpa, Some(Decimal::from(25)));

        let bob = table.row(&["Bob"]).unwrap();
        assert_eq!(bob.conversion_rate, Some(0.0));
        assert_eq!(bob.cpa, None);
    }

    #[test]
    fn single_post_rate_and_cpa() {
        let facts = vec![fact((2024, 3, 1), "Alice", 100, 20, 4)];
        let table = aggregate(&facts, &[Dimension::Influencer]).unwrap();
        assert_eq!(table.rows.len(), 1);
        let alice = table.row(&["Alice"]).unwrap();
        assert_eq!(alice.posts, 1);
        assert_eq!(alice.cost, Decimal::from(100));
        assert_eq!(alice.clicks, 20);
        assert_eq!(alice.conversions, 4);
        assert_eq!(alice.conversion_rate, Some(0.2));
        assert_eq!(alice.cpa, Some(Decimal::from(25)));
    }

    #[test]
    fn zero_clicks_leaves_rate_missing() {
        let facts = vec![fact((2024, 3, 1), "Carol", 30, 0, 0)];
        let table = aggregate(&facts, &[Dimension::Influencer]).unwrap();
        let carol = &table.rows[0];
        assert_eq!(carol.conversion_rate, None);
        assert_eq!(carol.cpa, None);
    }

    #[test]
    fn months_sort_by_label_and_keep_year() {
        let facts = vec![
            fact((2024, 3, 5), "Alice", 10, 1, 1),
            fact((2024, 4, 5), "Alice", 10, 1, 1),
            fact((2023, 3, 5), "Alice", 10, 1, 1),
            fact((2024, 3, 20), "Alice", 10, 1, 1),
        ];
        let table = aggregate(&facts, &[Dimension::Month]).unwrap();
        let labels: Vec<String> = table.rows.iter().map(|r| r.key.labels().join("")).collect();
        assert_eq!(labels, vec!["April 2024", "March 2023", "March 2024"]);
        assert_eq!(table.row(&["March 2024"]).unwrap().posts, 2);
    }

    #[test]
    fn two_dimensions_order_by_first_then_second() {
        let facts = vec![
            fact((2024, 4, 1), "Bob", 10, 1, 1),
            fact((2024, 3, 1), "Bob", 10, 1, 1),
            fact((2024, 4, 1), "Alice", 10, 1, 1),
        ];
        let table = aggregate(&facts, &[Dimension::Influencer, Dimension::Month]).unwrap();
        let keys: Vec<Vec<String>> = table.rows.iter().map(|r| r.key.labels()).collect();
        assert_eq!(
            keys,
            vec![
                vec!["Alice".to_owned(), "April 2024".to_owned()],
                vec!["Bob".to_owned(), "April 2024".to_owned()],
                vec!["Bob".to_owned(), "March 2024".to_owned()],
            ]
        );
    }

    #[test]
    fn no_facts_gives_no_rows() {
        let table = aggregate(&[], &[Dimension::Month]).unwrap();
        assert!(table.rows.is_empty());
        assert_eq!(table.dimensions, vec![Dimension::Month]);
    }

    #[test]
    fn empty_grouping_is_rejected() {
        let err = aggregate(&[], &[]).unwrap_err();
        assert!(matches!(err, ReportError::EmptyGrouping));
    }
}
