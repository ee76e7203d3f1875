pub mod app;
pub mod calendar;
pub mod days;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod plan;
pub mod state;
pub mod stats;
pub mod storage;
pub mod sync;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_state, resolve_data_path};
