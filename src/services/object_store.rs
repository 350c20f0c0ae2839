use crate::services::blob::{BlobError, UploadKind};
use reqwest::Client;
use std::time::Duration;
use uuid::Uuid;

/// Client for a bucket-style HTTP object store.
///
/// Objects live at `{base_url}/{bucket}/{key}`; an optional bearer token
/// authenticates write operations. Upload returns the `/api/files/{key}`
/// reference the service itself serves the object back under.
pub struct ObjectStoreClient {
    base_url: String,
    bucket: String,
    token: Option<String>,
    client: Client,
}

impl ObjectStoreClient {
    pub fn new(base_url: String, bucket: String, token: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            bucket,
            token,
            client,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.bucket,
            key
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Generate a unique storage key for an uploaded file, keeping its
    /// extension so the content type can be recovered when serving.
    pub fn generate_key(&self, kind: UploadKind, filename: &str) -> String {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext))
            .unwrap_or_default();

        format!("{}/{}{}", kind.folder(), Uuid::new_v4().simple(), extension)
    }

    /// Store bytes under `key` and return the servable reference.
    pub async fn upload(&self, key: &str, data: Vec<u8>) -> Result<String, BlobError> {
        let response = self
            .authorize(self.client.put(self.object_url(key)))
            .body(data)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BlobError::Api(format!(
                "Upload failed: {}",
                response.status()
            )));
        }

        tracing::debug!("Uploaded object: {}", key);

        Ok(format!("/api/files/{}", key))
    }

    pub async fn download(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        let response = self
            .authorize(self.client.get(self.object_url(key)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(BlobError::NotFound(key.to_string()));
        }
        if !response.status().is_success() {
            return Err(BlobError::Api(format!(
                "Download failed: {}",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    pub async fn delete(&self, key: &str) -> Result<bool, BlobError> {
        let response = self
            .authorize(self.client.delete(self.object_url(key)))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !response.status().is_success() {
            return Err(BlobError::Api(format!(
                "Delete failed: {}",
                response.status()
            )));
        }

        tracing::debug!("Deleted object: {}", key);

        Ok(true)
    }
}
