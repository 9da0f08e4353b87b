//! Model list handler.

use axum::Json;
use serde::Serialize;
use storypoint::GeminiModel;

/// Response for the model list endpoint.
#[derive(Serialize)]
pub struct ModelsResponse {
    /// Selectable models, default first.
    pub models: Vec<GeminiModel>,
    /// Model used when a request names none.
    pub default: GeminiModel,
}

/// GET /api/models - List the models the form may select.
pub async fn list_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: GeminiModel::ALL.to_vec(),
        default: GeminiModel::default(),
    })
}
