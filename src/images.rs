use async_trait::async_trait;
use reqwest::header;
use uuid::Uuid;

/// Port for the hosted image store.
///
/// Unlike geocoding, an upload failure is fatal to the submission it
/// belongs to: an entry must never be written pointing at an image that
/// was not stored.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the bytes under a fresh object name and return the public URL.
    async fn store(
        &self,
        name_hint: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError>;
}

#[derive(Debug)]
pub struct UploadError(pub String);

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UploadError {}

/// Client for a Supabase-style object store: authenticated uploads under
/// a bucket, public read URLs derived from the object name.
pub struct ObjectStoreClient {
    http: reqwest::Client,
    base_url: String,
    bucket: String,
    api_key: String,
}

impl ObjectStoreClient {
    pub fn new(base_url: String, bucket: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            bucket,
            api_key,
        }
    }
}

#[async_trait]
impl ImageStore for ObjectStoreClient {
    async fn store(
        &self,
        name_hint: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, UploadError> {
        let object_name = object_name(name_hint);

        let response = self
            .http
            .post(format!(
                "{}/object/{}/{}",
                self.base_url, self.bucket, object_name
            ))
            .bearer_auth(&self.api_key)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| UploadError(format!("upload request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(UploadError(format!(
                "image store returned {}",
                response.status()
            )));
        }

        Ok(format!(
            "{}/object/public/{}/{}",
            self.base_url, self.bucket, object_name
        ))
    }
}

/// Unique object name: uuid prefix plus a sanitized slice of the
/// client-provided filename so stored objects stay recognizable.
fn object_name(hint: &str) -> String {
    let hint: String = hint
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();

    if hint.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        format!("{}-{}", Uuid::new_v4(), hint)
    }
}
