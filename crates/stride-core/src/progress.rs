//! Progress ledger types.
//!
//! A progress entry is keyed by (user, streak, date) and only ever exists in
//! the done state: marking done upserts, deleting removes. Both operations
//! are idempotent, so repeated calls are safe regardless of arrival order.

use chrono::{Duration, NaiveDate};

/// Inclusive `[start, end]` range of calendar dates for progress queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
  pub start: NaiveDate,
  pub end:   NaiveDate,
}

impl DateRange {
  /// The default query window: the trailing 90 days ending at `today`,
  /// inclusive on both ends.
  pub fn trailing_90_days(today: NaiveDate) -> Self {
    Self { start: today - Duration::days(90), end: today }
  }

  pub fn contains(&self, date: NaiveDate) -> bool {
    self.start <= date && date <= self.end
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
  }

  #[test]
  fn trailing_window_is_inclusive_on_both_ends() {
    let today = date("2025-10-01");
    let range = DateRange::trailing_90_days(today);

    assert_eq!(range.end, today);
    assert_eq!(range.start, date("2025-07-03"));
    assert!(range.contains(range.start));
    assert!(range.contains(range.end));
    assert!(!range.contains(date("2025-07-02")));
    assert!(!range.contains(date("2025-10-02")));
  }
}
