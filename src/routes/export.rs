use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;

use crate::AppState;
use crate::error::AppError;
use crate::models::Entry;

#[derive(Serialize)]
struct ExportData {
    exported_at: String,
    entries: Vec<Entry>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export_data))
}

async fn export_data(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let entries: Vec<Entry> = sqlx::query_as("SELECT * FROM entries ORDER BY created_at")
        .fetch_all(&state.db)
        .await?;

    let export = ExportData {
        exported_at: chrono::Utc::now().to_rfc3339(),
        entries,
    };

    let filename = format!("brewlog-export-{}.json", chrono::Local::now().format("%Y-%m-%d"));
    let content_disposition = format!("attachment; filename=\"{}\"", filename);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&content_disposition).unwrap(),
    );

    Ok((headers, Json(export)))
}
