//! Study day counting with a daily reset hour.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};

/// Calendar date of the study day containing `at`.
///
/// Before `daily_reset_hour` the time still belongs to the previous day, so
/// late-night study counts toward the day it started on. At the very start of
/// chrono's range, where the shift would overflow, the unshifted date is used.
pub fn study_date<Tz: TimeZone>(at: &DateTime<Tz>, daily_reset_hour: u32) -> NaiveDate {
    let hours = i64::from(daily_reset_hour.min(23));
    let local = at.naive_local();
    local
        .checked_sub_signed(Duration::hours(hours))
        .unwrap_or(local)
        .date()
}

/// Day counter for the practice selector: whole study days since `start`.
///
/// Negative when `now` falls on a study day before `start`.
pub fn study_day<Tz: TimeZone>(
    start: &DateTime<Tz>,
    now: &DateTime<Tz>,
    daily_reset_hour: u32,
) -> i64 {
    (study_date(now, daily_reset_hour) - study_date(start, daily_reset_hour)).num_days()
}
