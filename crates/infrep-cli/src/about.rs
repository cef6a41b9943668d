pub(crate) const ABOUT: &str = "\
Influencer Marketing Report

Generates KPI reports from an Excel workbook of influencer marketing data.

The input workbook (.xlsx or .xls) must contain two worksheets:

  Posts        One row per sponsored post, with the columns
                 Date, Influencer, Followers, Follower group, Cost,
                 Likes, Comments, Shares, Clicks
  Conversions  A pivot table. One column is labeled \"influencer\" with names
               matching the Posts sheet; every other column is a date. Each
               cell holds the conversions (e.g. sales) attributed to that
               influencer on that day. Empty cells count as zero.

Posts with no matching (influencer, date) cell in Conversions are left out
of every report.

Reports are grouped by influencer, by month, or by both, with columns:

  Number of Posts, Cost, Clicks, Conversions
  Conversion Rate  Conversions divided by clicks. If 100 people click through
                   and 3 of them buy, the conversion rate is 3%.
  CPA              Cost per acquisition: cost divided by conversions. If $500
                   of posts lead to 4 purchases, CPA is $125.

A rate or CPA with a zero denominator is shown as \u{2014} (blank in xlsx,
null in JSON).

Usage:
  infrep report <FILE> [--by influencer|month|influencer-month]
                       [--format table|markdown|json] [--raw]
  infrep export <FILE> --out <PATH.xlsx>
";
