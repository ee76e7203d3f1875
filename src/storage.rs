use crate::errors::AppError;
use crate::models::{PlanState, StoredState};
use chrono::NaiveDate;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

/// Load the persisted record. Anything unreadable degrades to "not started"
/// rather than erroring: a missing file is first run, a corrupt file is
/// logged and discarded.
pub async fn load_state(path: &Path) -> PlanState {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<StoredState>(&bytes) {
            Ok(stored) => from_stored(stored),
            Err(err) => {
                error!("failed to parse state file: {err}");
                PlanState::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => PlanState::default(),
        Err(err) => {
            error!("failed to read state file: {err}");
            PlanState::default()
        }
    }
}

pub async fn persist_state(path: &Path, state: &PlanState) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(&to_stored(state)).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Reset removes the record itself, not an empty overwrite.
pub async fn clear_state(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(AppError::internal(err)),
    }
}

fn to_stored(state: &PlanState) -> StoredState {
    StoredState {
        start_date: state.start_date.map(|date| date.to_string()),
        completed_days: state.completed_days.iter().copied().collect(),
    }
}

fn from_stored(stored: StoredState) -> PlanState {
    let start_date = match stored.start_date {
        Some(text) => match text.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(err) => {
                error!("ignoring stored start date {text:?}: {err}");
                None
            }
        },
        None => None,
    };

    // A record with no start date is "not started" regardless of what else
    // it carries.
    match start_date {
        Some(date) => {
            let mut state = PlanState::default();
            state.replace_with(date, stored.completed_days.into_iter().collect());
            state
        }
        None => PlanState::default(),
    }
}
