use chrono::{Duration, NaiveDate};

/// Length of the plan in days. Day numbers are 1-indexed.
pub const PLAN_DAYS: u16 = 365;

/// Plan-day number for a calendar date. Day 1 is the start date itself,
/// earlier dates yield 0 or negative numbers. Returns the 0 sentinel when
/// the plan has not started.
pub fn day_number_for(date: NaiveDate, start: Option<NaiveDate>) -> i64 {
    match start {
        Some(start) => (date - start).num_days() + 1,
        None => 0,
    }
}

/// Calendar date for a plan-day number.
pub fn date_for_day(day: u16, start: NaiveDate) -> NaiveDate {
    start + Duration::days(i64::from(day) - 1)
}

/// Clamp an arbitrary day number into the valid plan range.
pub fn clamp_day(day: i64) -> u16 {
    day.clamp(1, i64::from(PLAN_DAYS)) as u16
}
