//! Converts raw table rows into validated observations.

use chrono::NaiveDate;

use crate::observation::Observation;

use super::page::RawRow;

/// Long-form date label, e.g. "January 1, 2018".
const DATE_FORMAT: &str = "%B %d, %Y";

/// Cell text marking a measurement that was not taken.
const MISSING: &str = "M";

/// Cells needed for a row to be considered: max, min, mean and at least one more.
const MIN_CELLS: usize = 4;

/// Returns the observation described by `row`, or `None` when the row is
/// malformed or carries no measurement at all.
pub fn normalise(row: &RawRow) -> Option<Observation> {
    let date = parse_date(&row.date_label)?;

    if row.cells.len() < MIN_CELLS {
        return None;
    }

    let max_temp = parse_temperature(&row.cells[0])?;
    let min_temp = parse_temperature(&row.cells[1])?;
    let avg_temp = parse_temperature(&row.cells[2])?;

    let observation = Observation {
        date,
        min_temp,
        max_temp,
        avg_temp,
    };

    observation.has_measurement().then_some(observation)
}

pub fn parse_date(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(label.trim(), DATE_FORMAT).ok()
}

// Outer `None` rejects the row; `Some(None)` is a missing measurement.
fn parse_temperature(cell: &str) -> Option<Option<f64>> {
    match cell.trim() {
        MISSING => Some(None),
        text => text.parse::<f64>().ok().map(Some),
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn row(label: &str, cells: &[&str]) -> RawRow {
        RawRow {
            date_label: label.to_string(),
            cells: cells.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn should_normalise_complete_row() {
        let o = normalise(&row("June 1, 2024", &["21.3", " 8.1 ", "-14.7", "3.3"])).unwrap();

        assert_eq!(o.date, date(2024, 6, 1));
        assert_eq!(o.max_temp, Some(21.3));
        assert_eq!(o.min_temp, Some(8.1));
        assert_eq!(o.avg_temp, Some(-14.7));
    }

    #[test]
    fn should_map_sentinel_to_absent_value() {
        let o = normalise(&row("January 15, 2018", &["5.0", "M", "M", ""])).unwrap();

        assert_eq!(o.max_temp, Some(5.0));
        assert_eq!(o.min_temp, None);
        assert_eq!(o.avg_temp, None);
    }

    #[test]
    fn should_keep_zero_distinct_from_missing() {
        let o = normalise(&row("March 3, 2010", &["M", "0", "0.0", ""])).unwrap();

        assert_eq!(o.max_temp, None);
        assert_eq!(o.min_temp, Some(0.0));
        assert_eq!(o.avg_temp, Some(0.0));
    }

    #[test]
    fn should_reject_all_missing_row() {
        assert!(normalise(&row("June 2, 2024", &["M", "M", "M", "12.0"])).is_none());
    }

    #[test]
    fn should_reject_unparseable_date() {
        assert!(normalise(&row("Missing", &["1.0", "2.0", "3.0", ""])).is_none());
        assert!(normalise(&row("2024-06-01", &["1.0", "2.0", "3.0", ""])).is_none());
    }

    #[test]
    fn should_reject_short_row() {
        assert!(normalise(&row("June 1, 2024", &["1.0", "2.0", "3.0"])).is_none());
    }

    #[test]
    fn should_reject_malformed_number() {
        assert!(normalise(&row("June 1, 2024", &["1.0", "2.0E", "3.0", ""])).is_none());
        assert!(normalise(&row("June 1, 2024", &["", "2.0", "3.0", ""])).is_none());
        assert!(normalise(&row("June 1, 2024", &["m", "2.0", "3.0", ""])).is_none());
    }

    #[test]
    fn should_be_deterministic() {
        let r = row("June 1, 2024", &["1.5", "M", "0.5", ""]);
        assert_eq!(normalise(&r), normalise(&r));
    }

    #[test]
    fn should_parse_unpadded_day() {
        assert_eq!(parse_date("February 9, 2001"), Some(date(2001, 2, 9)));
        assert_eq!(parse_date("February 29, 2001"), None);
    }
}
