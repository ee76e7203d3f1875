use crate::days::PLAN_DAYS;
use std::{env, path::Path, path::PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("failed to read plan file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse plan file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("plan file {path} has {got} days, expected {PLAN_DAYS}")]
    WrongLength { path: String, got: usize },
}

/// The 365-entry reading table. Opaque to the rest of the app: one ordered
/// list of reference strings per plan day.
#[derive(Debug, Clone)]
pub struct ReadingPlan {
    days: Vec<Vec<String>>,
}

impl ReadingPlan {
    /// Readings for a plan day in `[1, 365]`.
    pub fn readings(&self, day: u16) -> &[String] {
        &self.days[usize::from(day - 1)]
    }
}

pub fn resolve_plan_path() -> PathBuf {
    match env::var("PLAN_PATH") {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from("data/plan.json"),
    }
}

/// Loaded once in `main`; any failure here aborts startup.
pub async fn load_plan(path: &Path) -> Result<ReadingPlan, PlanError> {
    let display = path.display().to_string();
    let bytes = fs::read(path).await.map_err(|source| PlanError::Read {
        path: display.clone(),
        source,
    })?;
    let days: Vec<Vec<String>> =
        serde_json::from_slice(&bytes).map_err(|source| PlanError::Parse {
            path: display.clone(),
            source,
        })?;
    if days.len() != usize::from(PLAN_DAYS) {
        return Err(PlanError::WrongLength {
            path: display,
            got: days.len(),
        });
    }
    Ok(ReadingPlan { days })
}
