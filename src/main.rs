use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use brewlog::config::Config;
use brewlog::geocode::NominatimClient;
use brewlog::images::ObjectStoreClient;
use brewlog::{build_app, db};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let config = Config::load();

    let pool = db::init_pool(&config.database_url).await;

    let geocoder = Arc::new(NominatimClient::new(
        config.geocoder_url.clone(),
        config.geocoder_user_agent.clone(),
    ));
    let images = Arc::new(ObjectStoreClient::new(
        config.image_store_url.clone(),
        config.image_bucket.clone(),
        config.image_store_key.clone(),
    ));

    let app = build_app(pool, geocoder, images);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.unwrap();

    tracing::info!("listening on {}", addr);
    axum::serve(listener, app).await.unwrap();
}
