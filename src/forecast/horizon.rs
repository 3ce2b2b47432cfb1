//! Weekly horizon anchoring

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Next `boundary` strictly after `date`. A date that already falls on the
/// boundary anchors to the following week.
pub fn next_weekly_boundary(date: NaiveDate, boundary: Weekday) -> NaiveDate {
    let today = date.weekday().num_days_from_monday() as i64;
    let target = boundary.num_days_from_monday() as i64;
    let mut ahead = (target - today).rem_euclid(7);
    if ahead == 0 {
        ahead = 7;
    }
    date.checked_add_days(Days::new(ahead as u64))
        .unwrap_or(NaiveDate::MAX)
}
