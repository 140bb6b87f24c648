use async_trait::async_trait;
use reqwest::header;

use crate::models::Place;

/// Port for the external geocoding service.
///
/// Geocoding is a convenience feature, so failures are soft by contract:
/// a provider error or unreachable host yields an empty result, never an
/// error the caller has to handle. Causes are logged.
#[async_trait]
pub trait Geocode: Send + Sync {
    /// Ranked candidates for a free-text query, provider order preserved.
    async fn search(&self, query: &str, limit: u8) -> Vec<Place>;

    /// Best-match coordinates for a location string, if the provider
    /// knows the place.
    async fn best_match(&self, query: &str) -> Option<(f64, f64)> {
        self.search(query, 1)
            .await
            .into_iter()
            .next()
            .map(|place| (place.lat, place.lon))
    }
}

/// Nominatim-backed geocoder.
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl NominatimClient {
    pub fn new(base_url: String, user_agent: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            user_agent,
        }
    }
}

#[async_trait]
impl Geocode for NominatimClient {
    async fn search(&self, query: &str, limit: u8) -> Vec<Place> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let limit = limit.to_string();
        let result = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("format", "json"), ("limit", &limit), ("q", query)])
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::ACCEPT_LANGUAGE, "en")
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                tracing::error!("Geocoder returned {}", response.status());
                return Vec::new();
            }
            Err(e) => {
                tracing::error!("Geocoder request failed: {e}");
                return Vec::new();
            }
        };

        match response.json().await {
            Ok(places) => places,
            Err(e) => {
                tracing::error!("Geocoder response not understood: {e}");
                Vec::new()
            }
        }
    }
}
