use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use bot::export::build_stage_csv;
use bot::token::verify_export_token;

use crate::error::{WebError, WebResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    stage_id: Option<String>,
    token: Option<String>,
}

/// Capability-token-gated CSV export of one stage's registration list.
pub async fn export_stage_csv(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> WebResult<Response> {
    let stage_id = query
        .stage_id
        .filter(|v| !v.is_empty())
        .ok_or_else(|| WebError::BadRequest("missing stage_id".into()))?;
    let token = query
        .token
        .filter(|v| !v.is_empty())
        .ok_or_else(|| WebError::BadRequest("missing token".into()))?;

    if !verify_export_token(&state.webhook_secret, &stage_id, &token) {
        tracing::warn!(stage_id, "export token rejected");
        return Err(WebError::Forbidden);
    }

    let csv = build_stage_csv(state.engine.store(), &stage_id).await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"stage_{stage_id}.csv\""),
        ),
    ];
    Ok((headers, csv).into_response())
}
