//! Typed coercion of [`Cell`]s.
//!
//! Each function returns `None` when the cell cannot be read as the target
//! type; callers attach the sheet location and build the `ParseError`.

use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::raw::Cell;

/// Day zero of the 1900 date system as used by Excel serial numbers.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Serial number of 9999-12-31, the last date a spreadsheet can hold.
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Largest float that still maps onto a `u64` without precision loss.
const MAX_EXACT_COUNT: f64 = 9_007_199_254_740_992.0;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Converts an Excel serial day number (fraction = time of day) to a timestamp.
#[must_use]
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL + 1.0).contains(&serial) {
        return None;
    }
    let (y, m, d) = EXCEL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;
    #[allow(clippy::cast_possible_truncation)]
    let millis = (serial * 86_400_000.0).round() as i64;
    epoch.checked_add_signed(Duration::milliseconds(millis))
}

/// Inverse of [`excel_serial_to_datetime`].
#[must_use]
pub fn datetime_to_excel_serial(dt: NaiveDateTime) -> f64 {
    let (y, m, d) = EXCEL_EPOCH;
    let Some(epoch) = NaiveDate::from_ymd_opt(y, m, d).and_then(|e| e.and_hms_opt(0, 0, 0))
    else {
        return 0.0;
    };
    #[allow(clippy::cast_precision_loss)]
    let millis = (dt - epoch).num_milliseconds() as f64;
    millis / 86_400_000.0
}

/// Parses date text in one of the accepted layouts, dropping any time part.
#[must_use]
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Reads a cell as a calendar day.
///
/// Native spreadsheet dates, Excel serial numbers, and date text are all
/// accepted. Time of day is discarded.
#[must_use]
pub fn date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(dt) => Some(dt.date()),
        Cell::Number(serial) => excel_serial_to_datetime(*serial).map(|dt| dt.date()),
        Cell::Text(text) => parse_date_text(text),
        Cell::Empty | Cell::Bool(_) | Cell::Error(_) => None,
    }
}

/// Reads a cell as a non-negative whole number. `2.0` is accepted, `2.5` and
/// `-1` are not.
#[must_use]
pub fn count(cell: &Cell) -> Option<u64> {
    match cell {
        Cell::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 => {
            if *n > MAX_EXACT_COUNT {
                return None;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let whole = *n as u64;
            Some(whole)
        }
        Cell::Text(text) => {
            let trimmed = text.trim();
            trimmed.parse::<u64>().ok().or_else(|| {
                // "3.0" typed into a text cell
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(|n| count(&Cell::Number(n)))
            })
        }
        _ => None,
    }
}

/// Reads a cell as a decimal amount.
#[must_use]
pub fn amount(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Number(n) if n.is_finite() => Decimal::try_from(*n).ok(),
        Cell::Text(text) => Decimal::from_str(text.trim()).ok(),
        _ => None,
    }
}

/// Reads a cell as a non-empty, trimmed name.
#[must_use]
pub fn name(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Text(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Cell::Number(_) | Cell::Bool(_) | Cell::Date(_) => Some(cell.to_string()),
        Cell::Empty | Cell::Error(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_from_iso_text() {
        assert_eq!(date(&Cell::Text("2024-03-01".into())), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn date_from_text_with_time_drops_time() {
        assert_eq!(
            date(&Cell::Text("2024-03-01 00:00:00".into())),
            Some(ymd(2024, 3, 1))
        );
        assert_eq!(
            date(&Cell::Text("2024-03-01T13:45:00".into())),
            Some(ymd(2024, 3, 1))
        );
    }

    #[test]
    fn date_from_us_and_long_forms() {
        assert_eq!(date(&Cell::Text("03/01/2024".into())), Some(ymd(2024, 3, 1)));
        assert_eq!(date(&Cell::Text("March 1, 2024".into())), Some(ymd(2024, 3, 1)));
        assert_eq!(date(&Cell::Text("01.03.2024".into())), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn date_from_excel_serial() {
        // 45352 is 2024-03-01 in the 1900 date system.
        assert_eq!(date(&Cell::Number(45_352.0)), Some(ymd(2024, 3, 1)));
        assert_eq!(date(&Cell::Number(45_352.75)), Some(ymd(2024, 3, 1)));
    }

    #[test]
    fn date_rejects_garbage() {
        assert_eq!(date(&Cell::Text("soon".into())), None);
        assert_eq!(date(&Cell::Empty), None);
        assert_eq!(date(&Cell::Number(-3.0)), None);
        assert_eq!(date(&Cell::Bool(true)), None);
    }

    #[test]
    fn serial_round_trips_through_datetime() {
        let dt = ymd(2023, 6, 15).and_hms_opt(0, 0, 0).unwrap();
        let serial = datetime_to_excel_serial(dt);
        assert!((serial - 45_092.0).abs() < f64::EPSILON);
        assert_eq!(excel_serial_to_datetime(serial), Some(dt));
    }

    #[test]
    fn count_accepts_whole_numbers_only() {
        assert_eq!(count(&Cell::Number(4.0)), Some(4));
        assert_eq!(count(&Cell::Text(" 12 ".into())), Some(12));
        assert_eq!(count(&Cell::Text("3.0".into())), Some(3));
        assert_eq!(count(&Cell::Number(2.5)), None);
        assert_eq!(count(&Cell::Number(-1.0)), None);
        assert_eq!(count(&Cell::Text("many".into())), None);
        assert_eq!(count(&Cell::Empty), None);
    }

    #[test]
    fn amount_reads_numbers_and_text() {
        assert_eq!(amount(&Cell::Number(100.0)), Some(Decimal::from(100)));
        assert_eq!(amount(&Cell::Text("99.95".into())), Decimal::from_str("99.95").ok());
        assert_eq!(amount(&Cell::Number(f64::NAN)), None);
        assert_eq!(amount(&Cell::Text("$5".into())), None);
    }

    #[test]
    fn name_trims_and_rejects_blank() {
        assert_eq!(name(&Cell::Text("  Alice ".into())), Some("Alice".to_owned()));
        assert_eq!(name(&Cell::Text("   ".into())), None);
        assert_eq!(name(&Cell::Number(7.0)), Some("7".to_owned()));
        assert_eq!(name(&Cell::Empty), None);
    }
}
