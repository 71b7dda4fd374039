//! Walks calendar months backwards across a date range.

use chrono::{Datelike, NaiveDate};

/// Yields `(year, month)` from the month containing `end_date` back to the
/// month containing `start_date`, inclusive. Empty when `start_date > end_date`.
#[derive(Debug, Clone)]
pub struct MonthCursor {
    current: Option<NaiveDate>,
    stop: (i32, u32),
}

impl MonthCursor {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let current = (start_date <= end_date).then_some(end_date);

        MonthCursor {
            current,
            stop: (start_date.year(), start_date.month()),
        }
    }
}

impl Iterator for MonthCursor {
    type Item = (i32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        let month = (current.year(), current.month());

        self.current = if month == self.stop {
            None
        } else {
            previous_month(current)
        };

        Some(month)
    }
}

// First of the month minus one day always lands in the prior month.
fn previous_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1).and_then(|first| first.pred_opt())
}

// -- Tests -------------------------------------------------------------------
