use std::env;

/// Runtime configuration, read from the environment with local-dev
/// defaults. `dotenvy` is loaded by `main` before this runs.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub geocoder_url: String,
    pub geocoder_user_agent: String,
    pub image_store_url: String,
    pub image_bucket: String,
    pub image_store_key: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: var_or("PORT", "3000").parse().expect("PORT must be a number"),
            database_url: var_or("DATABASE_URL", "sqlite:data/brewlog.db"),
            geocoder_url: var_or("GEOCODER_URL", "https://nominatim.openstreetmap.org"),
            // Nominatim wants a real User-Agent on every request
            geocoder_user_agent: var_or("GEOCODER_USER_AGENT", "brewlog/0.1"),
            image_store_url: var_or("IMAGE_STORE_URL", "http://localhost:8000/storage/v1"),
            image_bucket: var_or("IMAGE_BUCKET", "coffee-images"),
            image_store_key: var_or("IMAGE_STORE_KEY", ""),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        tracing::info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
