//! Estimation handler.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use storypoint::{
    Diagnostics, Estimator, GeminiModel, GeminiProvider, LlmProvider, NewStoryRequest, StoryTable,
};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Request body for an estimate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    /// Gemini API key; the server's key is used when blank.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model to call.
    #[serde(default)]
    pub model: Option<GeminiModel>,
    /// Historical data as CSV text.
    #[serde(default)]
    pub csv: Option<String>,
    /// The story to estimate.
    #[serde(flatten)]
    pub story: NewStoryRequest,
}

/// Response for an estimate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    /// The model's answer, unparsed.
    pub estimate: String,
    /// Model that answered.
    pub model: GeminiModel,
    /// Historical examples included in the prompt.
    pub examples_used: usize,
    /// Non-fatal notes raised while preparing the prompt.
    pub warnings: Vec<String>,
}

/// POST /api/estimate - Estimate a story against uploaded history.
///
/// Inputs are checked in form order: key, then history, then summary.
pub async fn estimate_story(
    State(state): State<AppState>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, ApiError> {
    let api_key = state
        .resolve_api_key(request.api_key.as_deref())
        .ok_or_else(|| ApiError::BadRequest("Please provide a Gemini API Key.".to_string()))?;

    let csv = request
        .csv
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Please load historical data.".to_string()))?;

    let model = request.model.unwrap_or(state.config.llm.model);
    let mut config = (*state.config).clone();
    config.llm.model = model;
    let estimator = Estimator::with_config(config);

    let mut sink = Diagnostics::new();
    let history = estimator.load_history_bytes(csv.as_bytes(), &mut sink)?;

    if request.story.is_missing_summary() {
        return Err(ApiError::BadRequest(
            "Please provide a story summary.".to_string(),
        ));
    }

    let story = request.story;
    let provider = state.llm_provider.clone();

    // The Gemini client blocks, so the model call runs off the runtime.
    tokio::task::spawn_blocking(move || {
        run_estimate(estimator, provider, api_key, &story, &history, sink)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?
    .map(Json)
}

fn run_estimate(
    estimator: Estimator,
    provider: Option<Arc<dyn LlmProvider>>,
    api_key: String,
    story: &NewStoryRequest,
    history: &StoryTable,
    mut sink: Diagnostics,
) -> Result<EstimateResponse, ApiError> {
    let provider: Arc<dyn LlmProvider> = match provider {
        Some(provider) => provider,
        None => Arc::new(GeminiProvider::with_config(
            api_key,
            estimator.config().llm.clone(),
        )?),
    };

    let estimator = estimator.with_shared_llm(provider);
    let estimation = estimator.estimate(story, history, &mut sink)?;

    tracing::info!(
        model = %estimation.model,
        examples = estimation.examples_used,
        "estimate returned"
    );

    Ok(EstimateResponse {
        estimate: estimation.response,
        model: estimation.model,
        examples_used: estimation.examples_used,
        warnings: sink.into_events().iter().map(ToString::to_string).collect(),
    })
}
