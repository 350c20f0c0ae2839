use crate::services::cloudinary::CloudinaryClient;
use crate::services::object_store::ObjectStoreClient;
use thiserror::Error;

/// Errors that can occur when talking to a blob backend
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    Api(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// What an uploaded file is, which decides its storage folder and how the
/// request layer validates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProfilePicture,
    Document,
}

impl UploadKind {
    pub fn folder(self) -> &'static str {
        match self {
            UploadKind::ProfilePicture => "profile-pictures",
            UploadKind::Document => "documents",
        }
    }
}

/// Which backend receives new uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadBackend {
    Cloudinary,
    ObjectStore,
}

/// Facade over the two interchangeable blob backends.
///
/// New uploads go to the configured backend; downloads and deletes
/// dispatch on the shape of the stored reference (CDN delivery URL vs
/// `/api/files/{key}`), so rows written under either backend stay
/// servable after a backend switch.
pub struct BlobStorage {
    backend: UploadBackend,
    cloudinary: CloudinaryClient,
    object_store: ObjectStoreClient,
}

impl BlobStorage {
    pub fn new(
        backend: UploadBackend,
        cloudinary: CloudinaryClient,
        object_store: ObjectStoreClient,
    ) -> Self {
        Self {
            backend,
            cloudinary,
            object_store,
        }
    }

    /// Upload a file and return the reference to persist on the profile.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        kind: UploadKind,
        filename: &str,
    ) -> Result<String, BlobError> {
        match self.backend {
            UploadBackend::Cloudinary => {
                self.cloudinary.upload(data, kind.folder(), filename).await
            }
            UploadBackend::ObjectStore => {
                let key = self.object_store.generate_key(kind, filename);
                self.object_store.upload(&key, data).await
            }
        }
    }

    /// Fetch the bytes behind a stored reference.
    pub async fn download(&self, reference: &str) -> Result<Vec<u8>, BlobError> {
        if reference.contains("cloudinary.com") {
            self.cloudinary.fetch(reference).await
        } else if let Some(key) = reference.strip_prefix("/api/files/") {
            self.object_store.download(key).await
        } else {
            Err(BlobError::NotFound(format!(
                "Unrecognized file reference: {}",
                reference
            )))
        }
    }

    /// Fetch a blob from the object store by raw storage key.
    pub async fn download_key(&self, key: &str) -> Result<Vec<u8>, BlobError> {
        self.object_store.download(key).await
    }

    /// Best-effort delete of a stored reference. Returns whether the
    /// backend acknowledged the removal.
    pub async fn delete(&self, reference: &str) -> Result<bool, BlobError> {
        if reference.contains("cloudinary.com") {
            let public_id = CloudinaryClient::public_id_from_url(reference);
            self.cloudinary.delete(&public_id).await
        } else if let Some(key) = reference.strip_prefix("/api/files/") {
            self.object_store.delete(key).await
        } else {
            Ok(false)
        }
    }
}
