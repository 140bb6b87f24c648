use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const MAX_CONNECTIONS: u32 = 5;

/// Open the entry store and bring its schema up to date.
pub async fn init_pool(database_url: &str) -> SqlitePool {
    // file-backed databases live under a data directory that may not
    // exist on first run
    if let Some(dir) = database_dir(database_url) {
        std::fs::create_dir_all(&dir).ok();
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .expect("DATABASE_URL is not a valid sqlite URL")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .expect("Failed to open the entry store");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate the entry store");

    pool
}

/// Directory holding a file-backed database, if the URL names one.
/// `sqlite::memory:` and bare filenames have nothing to create.
fn database_dir(database_url: &str) -> Option<PathBuf> {
    let path = database_url.strip_prefix("sqlite:")?;
    if path.starts_with(':') {
        return None;
    }
    let parent = Path::new(path).parent()?;
    if parent.as_os_str().is_empty() {
        return None;
    }
    Some(parent.to_path_buf())
}
