use crate::calendar::{DEFAULT_REMINDER_TIME, reminder_ics};
use crate::days::{PLAN_DAYS, clamp_day, date_for_day, day_number_for};
use crate::errors::AppError;
use crate::models::{
    DayRequest, DayResponse, PlanState, ReminderQuery, StartRequest, StatsResponse,
    SyncPreviewResponse, SyncTokenResponse, TodayResponse, TokenRequest,
};
use crate::plan::ReadingPlan;
use crate::state::AppState;
use crate::stats::{build_stats, current_streak, progress_percent};
use crate::storage::{clear_state, persist_state};
use crate::sync::{self, SyncError};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
};
use chrono::{Local, NaiveDate, NaiveTime};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let progress = state.progress.lock().await;
    Html(render_index(progress.started()))
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let progress = state.progress.lock().await;
    Json(build_today(&state.plan, &progress, today()))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(day): Path<i64>,
) -> Result<Json<DayResponse>, AppError> {
    let progress = state.progress.lock().await;
    let start = require_started(&progress)?;
    let day = valid_day(day)?;
    Ok(Json(build_day(&state.plan, &progress, start, day, today())))
}

pub async fn set_view(
    State(state): State<AppState>,
    Json(payload): Json<DayRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let mut progress = state.progress.lock().await;
    let start = require_started(&progress)?;
    // The cursor clamps rather than rejects, matching prev/next navigation
    // walking off either end of the plan.
    let day = progress.set_view(payload.day);
    Ok(Json(build_day(&state.plan, &progress, start, day, today())))
}

pub async fn start_plan(
    State(state): State<AppState>,
    Json(payload): Json<StartRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    let start_date = payload
        .start_date
        .parse::<NaiveDate>()
        .map_err(|_| AppError::bad_request("start_date must be a YYYY-MM-DD date"))?;

    let today = today();
    let mut progress = state.progress.lock().await;
    progress.start(start_date, day_number_for(today, Some(start_date)));
    persist_state(&state.data_path, &progress).await?;
    Ok(Json(build_today(&state.plan, &progress, today)))
}

pub async fn mark_complete(
    State(state): State<AppState>,
    Json(payload): Json<DayRequest>,
) -> Result<Json<StatsResponse>, AppError> {
    let mut progress = state.progress.lock().await;
    require_started(&progress)?;
    let day = valid_day(payload.day)?;

    // Idempotent: a repeat completion changes nothing and writes nothing.
    if progress.mark_complete(day) {
        persist_state(&state.data_path, &progress).await?;
    }

    let today_num = day_number_for(today(), progress.start_date);
    Ok(Json(build_stats(&progress.completed_days, today_num)))
}

pub async fn reset_plan(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let mut progress = state.progress.lock().await;
    progress.reset();
    clear_state(&state.data_path).await?;
    Ok(Json(build_today(&state.plan, &progress, today())))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let progress = state.progress.lock().await;
    let today_num = day_number_for(today(), progress.start_date);
    Json(build_stats(&progress.completed_days, today_num))
}

pub async fn sync_export(
    State(state): State<AppState>,
) -> Result<Json<SyncTokenResponse>, AppError> {
    let progress = state.progress.lock().await;
    let start = require_started(&progress)?;
    Ok(Json(SyncTokenResponse {
        token: sync::encode(start, &progress.completed_days),
    }))
}

/// Decode only; the caller shows the result and asks the user before
/// committing via `sync_import`.
pub async fn sync_preview(
    Json(payload): Json<TokenRequest>,
) -> Result<Json<SyncPreviewResponse>, AppError> {
    let snapshot = sync::decode(sync::normalize_token_input(&payload.token))?;
    Ok(Json(SyncPreviewResponse {
        start_date: snapshot.start_date.to_string(),
        days_completed: snapshot.completed_days.len(),
        completed_days: snapshot.completed_days.into_iter().collect(),
    }))
}

pub async fn sync_import(
    State(state): State<AppState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    // Decode fully before touching state so a bad token mutates nothing.
    let snapshot = sync::decode(sync::normalize_token_input(&payload.token))?;

    let today = today();
    let mut progress = state.progress.lock().await;
    progress.replace_with(snapshot.start_date, snapshot.completed_days);
    let today_num = day_number_for(today, progress.start_date);
    progress.set_view(today_num);
    persist_state(&state.data_path, &progress).await?;
    Ok(Json(build_today(&state.plan, &progress, today)))
}

pub async fn reminder(
    State(state): State<AppState>,
    Query(query): Query<ReminderQuery>,
) -> Result<impl IntoResponse, AppError> {
    let time = query.time.as_deref().unwrap_or(DEFAULT_REMINDER_TIME);
    let time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| AppError::bad_request("time must be HH:MM"))?;

    let progress = state.progress.lock().await;
    let start = require_started(&progress)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"reading-reminder.ics\"",
            ),
        ],
        reminder_ics(start, time),
    ))
}

fn require_started(progress: &PlanState) -> Result<NaiveDate, AppError> {
    progress.start_date.ok_or(SyncError::NotStarted.into())
}

fn valid_day(day: i64) -> Result<u16, AppError> {
    if (1..=i64::from(PLAN_DAYS)).contains(&day) {
        Ok(day as u16)
    } else {
        Err(AppError::bad_request(format!(
            "day must be between 1 and {PLAN_DAYS}"
        )))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn build_today(plan: &ReadingPlan, progress: &PlanState, today: NaiveDate) -> TodayResponse {
    let Some(start) = progress.start_date else {
        return TodayResponse {
            started: false,
            day: None,
            date: None,
            start_date: None,
            readings: Vec::new(),
            completed: false,
            days_completed: 0,
            current_streak: 0,
            percent: 0,
        };
    };

    let today_num = day_number_for(today, Some(start));
    let day = clamp_day(today_num);
    TodayResponse {
        started: true,
        day: Some(day),
        date: Some(date_for_day(day, start).to_string()),
        start_date: Some(start.to_string()),
        readings: plan.readings(day).to_vec(),
        completed: progress.completed_days.contains(&day),
        days_completed: progress.completed_days.len(),
        current_streak: current_streak(&progress.completed_days, today_num),
        percent: progress_percent(&progress.completed_days),
    }
}

fn build_day(
    plan: &ReadingPlan,
    progress: &PlanState,
    start: NaiveDate,
    day: u16,
    today: NaiveDate,
) -> DayResponse {
    DayResponse {
        day,
        date: date_for_day(day, start).to_string(),
        readings: plan.readings(day).to_vec(),
        completed: progress.completed_days.contains(&day),
        is_today: day_number_for(today, Some(start)) == i64::from(day),
    }
}
