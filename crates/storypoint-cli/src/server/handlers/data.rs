//! Historical data validation handler.

use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use storypoint::{Diagnostics, Estimator, TableSummary};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for the validate endpoint.
#[derive(Serialize)]
pub struct ValidateResponse {
    /// Row figures for the cleaned table.
    pub summary: TableSummary,
    /// Non-fatal notes raised while cleaning.
    pub warnings: Vec<String>,
}

/// POST /api/validate - Check an uploaded CSV and summarize it.
///
/// The request body is the raw CSV file. Bytes that do not decode as
/// UTF-8 are reported as an unreadable upload.
pub async fn validate_history(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ValidateResponse>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::BadRequest(
            "Please load historical data.".to_string(),
        ));
    }

    let estimator = Estimator::with_config((*state.config).clone());
    let mut sink = Diagnostics::new();
    let history = estimator.load_history_bytes(&body, &mut sink)?;

    tracing::info!(rows = history.len(), "validated uploaded history");

    Ok(Json(ValidateResponse {
        summary: history.summary(),
        warnings: sink.into_events().iter().map(ToString::to_string).collect(),
    }))
}
