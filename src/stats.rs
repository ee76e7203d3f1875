use crate::days::PLAN_DAYS;
use crate::models::StatsResponse;
use std::collections::BTreeSet;

pub fn build_stats(completed: &BTreeSet<u16>, today_day_num: i64) -> StatsResponse {
    StatsResponse {
        days_completed: completed.len(),
        current_streak: current_streak(completed, today_day_num),
        percent: progress_percent(completed),
        missed_days: missed_days(completed, today_day_num),
    }
}

/// Count of consecutive completed days ending at today or yesterday.
///
/// A streak survives today not being marked yet: only a maximum completed
/// day older than yesterday breaks it. Walks the completed set downward
/// from its maximum and stops at the first gap.
pub fn current_streak(completed: &BTreeSet<u16>, today_day_num: i64) -> u32 {
    let Some(&max) = completed.iter().next_back() else {
        return 0;
    };
    if i64::from(max) < today_day_num - 1 {
        return 0;
    }

    let mut streak = 1;
    let mut previous = max;
    for &day in completed.iter().rev().skip(1) {
        if previous - day != 1 {
            break;
        }
        streak += 1;
        previous = day;
    }
    streak
}

/// Day numbers before today that were never completed, ascending.
pub fn missed_days(completed: &BTreeSet<u16>, today_day_num: i64) -> Vec<u16> {
    let last = today_day_num - 1;
    if last < 1 {
        return Vec::new();
    }
    let last = last.min(i64::from(PLAN_DAYS)) as u16;
    (1..=last).filter(|day| !completed.contains(day)).collect()
}

pub fn progress_percent(completed: &BTreeSet<u16>) -> u32 {
    (completed.len() as f64 / f64::from(PLAN_DAYS) * 100.0).round() as u32
}
