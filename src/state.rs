use crate::models::PlanState;
use crate::plan::ReadingPlan;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub plan: Arc<ReadingPlan>,
    pub progress: Arc<Mutex<PlanState>>,
}

impl AppState {
    pub fn new(data_path: PathBuf, plan: ReadingPlan, progress: PlanState) -> Self {
        Self {
            data_path,
            plan: Arc::new(plan),
            progress: Arc::new(Mutex::new(progress)),
        }
    }
}
