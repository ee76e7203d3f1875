use crate::days::{PLAN_DAYS, clamp_day};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical progress state. One instance per process, behind the app mutex.
#[derive(Debug, Clone, Default)]
pub struct PlanState {
    pub start_date: Option<NaiveDate>,
    pub completed_days: BTreeSet<u16>,
    /// Transient UI cursor. Kept in memory only; never persisted and never
    /// part of the sync token.
    pub current_view_day: Option<u16>,
}

impl PlanState {
    pub fn started(&self) -> bool {
        self.start_date.is_some()
    }

    /// Begin the plan: set the start date and drop any previous progress.
    pub fn start(&mut self, start_date: NaiveDate, view_day: i64) {
        self.start_date = Some(start_date);
        self.completed_days.clear();
        self.current_view_day = Some(clamp_day(view_day));
    }

    /// Idempotent completion. Returns whether the set actually changed so
    /// callers can skip the persistence write on repeats.
    pub fn mark_complete(&mut self, day: u16) -> bool {
        debug_assert!((1..=PLAN_DAYS).contains(&day));
        self.completed_days.insert(day)
    }

    /// Wholesale overwrite used by sync import. Out-of-range day numbers
    /// from a foreign token are dropped rather than stored.
    pub fn replace_with(&mut self, start_date: NaiveDate, completed_days: BTreeSet<u16>) {
        self.start_date = Some(start_date);
        self.completed_days = completed_days
            .into_iter()
            .filter(|day| (1..=PLAN_DAYS).contains(day))
            .collect();
    }

    pub fn set_view(&mut self, day: i64) -> u16 {
        let clamped = clamp_day(day);
        self.current_view_day = Some(clamped);
        clamped
    }

    pub fn reset(&mut self) {
        self.start_date = None;
        self.completed_days.clear();
        self.current_view_day = None;
    }
}

/// The single persisted record. `current_view_day` is deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredState {
    pub start_date: Option<String>,
    #[serde(default)]
    pub completed_days: Vec<u16>,
}

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub start_date: String,
}

#[derive(Debug, Deserialize)]
pub struct DayRequest {
    pub day: i64,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ReminderQuery {
    pub time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub started: bool,
    pub day: Option<u16>,
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub readings: Vec<String>,
    pub completed: bool,
    pub days_completed: usize,
    pub current_streak: u32,
    pub percent: u32,
}

#[derive(Debug, Serialize)]
pub struct DayResponse {
    pub day: u16,
    pub date: String,
    pub readings: Vec<String>,
    pub completed: bool,
    pub is_today: bool,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub days_completed: usize,
    pub current_streak: u32,
    pub percent: u32,
    pub missed_days: Vec<u16>,
}

#[derive(Debug, Serialize)]
pub struct SyncTokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SyncPreviewResponse {
    pub start_date: String,
    pub days_completed: usize,
    pub completed_days: Vec<u16>,
}
