use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use serde_json::json;

use crate::AppState;
use crate::error::AppError;
use crate::models::{Entry, EntryInput};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/{id}", put(update_entry).delete(delete_entry))
}

fn validate(input: &EntryInput) -> Result<(String, String), AppError> {
    input.required_names().ok_or_else(|| {
        AppError::Validation("Drink name and location are required.".to_string())
    })
}

/// Coordinates from the body when both are present, otherwise one
/// best-match geocode of the location text. Soft failure leaves both
/// halves absent.
async fn resolve_coordinates(
    state: &AppState,
    input: &EntryInput,
    location_name: &str,
) -> (Option<f64>, Option<f64>) {
    let coords = match input.coordinates() {
        Some(pair) => Some(pair),
        None => state.geocoder.best_match(location_name).await,
    };
    match coords {
        Some((lat, lng)) => (Some(lat), Some(lng)),
        None => (None, None),
    }
}

async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, AppError> {
    // SQLite sorts NULL lowest, so DESC puts undated entries last
    let entries: Vec<Entry> =
        sqlx::query_as("SELECT * FROM entries ORDER BY date DESC, created_at DESC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(entries))
}

async fn create_entry(
    State(state): State<AppState>,
    Json(input): Json<EntryInput>,
) -> Result<impl IntoResponse, AppError> {
    let (drink_name, location_name) = validate(&input)?;
    let (lat, lng) = resolve_coordinates(&state, &input, &location_name).await;

    let id = uuid::Uuid::new_v4().to_string();
    let created_at = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO entries (id, drink_name, location_name, sweetness, rating, price, lat, lng, date, added_by, notes, image_url, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#
    )
    .bind(&id)
    .bind(&drink_name)
    .bind(&location_name)
    .bind(input.sweetness)
    .bind(input.rating)
    .bind(input.price)
    .bind(lat)
    .bind(lng)
    .bind(input.normalized_date())
    .bind(input.trimmed_added_by())
    .bind(input.trimmed_notes())
    .bind(&input.image_url)
    .bind(&created_at)
    .execute(&state.db)
    .await?;

    let entry: Entry = sqlx::query_as("SELECT * FROM entries WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<EntryInput>,
) -> Result<impl IntoResponse, AppError> {
    let existing: Option<Entry> = sqlx::query_as("SELECT * FROM entries WHERE id = ?")
        .bind(&id)
        .fetch_optional(&state.db)
        .await?;

    if existing.is_none() {
        return Err(AppError::NotFound);
    }

    let (drink_name, location_name) = validate(&input)?;
    let (lat, lng) = resolve_coordinates(&state, &input, &location_name).await;

    // full replace of the editable fields; id and created_at are immutable
    sqlx::query(
        r#"
        UPDATE entries
        SET drink_name = ?, location_name = ?, sweetness = ?, rating = ?, price = ?,
            lat = ?, lng = ?, date = ?, added_by = ?, notes = ?, image_url = ?
        WHERE id = ?
        "#,
    )
    .bind(&drink_name)
    .bind(&location_name)
    .bind(input.sweetness)
    .bind(input.rating)
    .bind(input.price)
    .bind(lat)
    .bind(lng)
    .bind(input.normalized_date())
    .bind(input.trimmed_added_by())
    .bind(input.trimmed_notes())
    .bind(&input.image_url)
    .bind(&id)
    .execute(&state.db)
    .await?;

    let entry: Entry = sqlx::query_as("SELECT * FROM entries WHERE id = ?")
        .bind(&id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(entry))
}

async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM entries WHERE id = ?")
        .bind(&id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    Ok(Json(json!({ "success": true })))
}
