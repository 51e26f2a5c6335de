use axum::{Router, routing::get};

use crate::state::AppState;

use super::handlers::export_stage_csv;

pub fn routes() -> Router<AppState> {
    Router::new().route("/export/stage.csv", get(export_stage_csv))
}
