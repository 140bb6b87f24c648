use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde::Deserialize;
use serde_json::json;

use crate::AppState;
use crate::error::AppError;

#[derive(Deserialize)]
pub struct UploadParams {
    /// Client filename hint, folded into the stored object name.
    #[serde(default)]
    name: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/images", post(upload_image))
}

async fn upload_image(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    if body.is_empty() {
        return Err(AppError::Validation("Image body is empty".to_string()));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let url = state
        .images
        .store(&params.name, &content_type, body.to_vec())
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "url": url }))))
}
