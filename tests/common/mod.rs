use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use brewlog::geocode::Geocode;
use brewlog::images::{ImageStore, UploadError};
use brewlog::models::Place;

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
}

impl TestApp {
    /// App with a geocoder that never finds anything and an image store
    /// that always succeeds.
    pub async fn new() -> Self {
        Self::with_collaborators(Arc::new(EmptyGeocoder), Arc::new(StaticImageStore::ok())).await
    }

    pub async fn with_geocoder(geocoder: Arc<dyn Geocode>) -> Self {
        Self::with_collaborators(geocoder, Arc::new(StaticImageStore::ok())).await
    }

    pub async fn with_images(images: Arc<dyn ImageStore>) -> Self {
        Self::with_collaborators(Arc::new(EmptyGeocoder), images).await
    }

    pub async fn with_collaborators(
        geocoder: Arc<dyn Geocode>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to create in-memory SQLite pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let router = brewlog::build_app(pool.clone(), geocoder, images);

        Self { router, db: pool }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.request(req).await
    }

    pub async fn post_json(&self, uri: &str, body: &serde_json::Value) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(req).await
    }

    pub async fn put_json(&self, uri: &str, body: &serde_json::Value) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("PUT")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(req).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        let req = Request::builder()
            .uri(uri)
            .method("DELETE")
            .body(Body::empty())
            .unwrap();
        self.request(req).await
    }

    /// Insert an entry directly and return its id.
    pub async fn seed_entry(&self, drink_name: &str, location_name: &str) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let now = chrono::Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO entries (id, drink_name, location_name, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(drink_name)
        .bind(location_name)
        .bind(&now)
        .execute(&self.db)
        .await
        .expect("Failed to seed test entry");

        id
    }
}

/// Read the full response body as a String.
pub async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Read the full response body as JSON.
pub async fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp).await).unwrap()
}

pub fn place(id: &str, name: &str, lat: f64, lon: f64) -> Place {
    Place {
        place_id: id.to_string(),
        display_name: name.to_string(),
        lat,
        lon,
    }
}

/// Geocoder that finds nothing, like a provider with no match (or a
/// provider error, which the soft-failure contract maps to the same).
pub struct EmptyGeocoder;

#[async_trait]
impl Geocode for EmptyGeocoder {
    async fn search(&self, _query: &str, _limit: u8) -> Vec<Place> {
        Vec::new()
    }
}

/// Geocoder returning the same canned candidates for every query, and
/// recording what it was asked.
pub struct StaticGeocoder {
    pub places: Vec<Place>,
    pub queries: Mutex<Vec<String>>,
}

impl StaticGeocoder {
    pub fn new(places: Vec<Place>) -> Self {
        Self {
            places,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Geocode for StaticGeocoder {
    async fn search(&self, query: &str, _limit: u8) -> Vec<Place> {
        self.queries.lock().unwrap().push(query.to_string());
        self.places.clone()
    }
}

/// Image store that either always succeeds with a predictable URL or
/// always fails.
pub struct StaticImageStore {
    fail: bool,
}

impl StaticImageStore {
    pub fn ok() -> Self {
        Self { fail: false }
    }

    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl ImageStore for StaticImageStore {
    async fn store(
        &self,
        name_hint: &str,
        _content_type: &str,
        _bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        if self.fail {
            Err(UploadError("store offline".to_string()))
        } else {
            Ok(format!("https://images.example/coffee/{name_hint}"))
        }
    }
}
