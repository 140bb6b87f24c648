use axum::{Json, Router, extract::Query, extract::State, routing::get};
use serde::Deserialize;

use crate::AppState;
use crate::models::Place;

const SUGGESTION_LIMIT: u8 = 5;

#[derive(Deserialize)]
pub struct PlacesQuery {
    #[serde(default)]
    q: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/places", get(search_places))
}

/// Autocomplete proxy. Always 200: an empty query short-circuits and a
/// provider failure comes back as an empty list, since suggestions are a
/// convenience rather than the primary action.
async fn search_places(
    State(state): State<AppState>,
    Query(query): Query<PlacesQuery>,
) -> Json<Vec<Place>> {
    let q = query.q.trim();
    if q.is_empty() {
        return Json(Vec::new());
    }

    Json(state.geocoder.search(q, SUGGESTION_LIMIT).await)
}
