use crate::services::blob::BlobError;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::time::Duration;
use uuid::Uuid;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary REST client
///
/// Uploads go through the signed upload endpoint; the returned delivery
/// URL is what gets persisted on the profile row.
pub struct CloudinaryClient {
    cloud_name: String,
    api_key: String,
    api_secret: String,
    folder: String,
    client: Client,
}

impl CloudinaryClient {
    pub fn new(cloud_name: String, api_key: String, api_secret: String, folder: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            cloud_name,
            api_key,
            api_secret,
            folder,
            client,
        }
    }

    /// Upload a file into `{folder}/{subfolder}` and return its delivery URL.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        subfolder: &str,
        filename: &str,
    ) -> Result<String, BlobError> {
        let folder = format!("{}/{}", self.folder, subfolder);
        let stem = filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(filename);
        let public_id = format!("{}_{}", Uuid::new_v4().simple(), stem);

        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign(&[
            ("folder", folder.as_str()),
            ("public_id", public_id.as_str()),
            ("timestamp", &timestamp.to_string()),
        ]);

        let url = format!("{}/{}/auto/upload", API_BASE, self.cloud_name);

        let form = Form::new()
            .part("file", Part::bytes(data).file_name(filename.to_string()))
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", folder)
            .text("public_id", public_id)
            .text("signature_algorithm", "sha256")
            .text("signature", signature);

        let response = self.client.post(&url).multipart(form).send().await?;

        if !response.status().is_success() {
            return Err(BlobError::Api(format!(
                "Upload failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let secure_url = json
            .get("secure_url")
            .and_then(|u| u.as_str())
            .ok_or_else(|| BlobError::InvalidResponse("Missing secure_url".into()))?;

        tracing::debug!("Uploaded file to Cloudinary: {}", secure_url);

        Ok(secure_url.to_string())
    }

    /// Delete an asset by public id.
    pub async fn delete(&self, public_id: &str) -> Result<bool, BlobError> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign(&[
            ("public_id", public_id),
            ("timestamp", &timestamp.to_string()),
        ]);

        let url = format!("{}/{}/image/destroy", API_BASE, self.cloud_name);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("public_id", public_id),
                ("api_key", &self.api_key),
                ("timestamp", &timestamp.to_string()),
                ("signature_algorithm", "sha256"),
                ("signature", &signature),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BlobError::Api(format!(
                "Destroy failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let result = json.get("result").and_then(|r| r.as_str()).unwrap_or("");

        Ok(result == "ok")
    }

    /// Fetch the bytes behind a delivery URL.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, BlobError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(BlobError::NotFound(format!(
                "File fetch failed: {}",
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    /// Extract the public id (folder path included, extension dropped)
    /// from a delivery URL like
    /// `https://res.cloudinary.com/demo/image/upload/v1/a/b/c_name.jpg`.
    pub fn public_id_from_url(url: &str) -> String {
        let Some((_, path)) = url.split_once("/upload/") else {
            return url.to_string();
        };

        // Skip the version segment when present.
        let path = match path.split_once('/') {
            Some((first, rest))
                if first.len() > 1
                    && first.starts_with('v')
                    && first[1..].chars().all(|c| c.is_ascii_digit()) =>
            {
                rest
            }
            _ => path,
        };

        match path.rsplit_once('.') {
            Some((public_id, _)) => public_id.to_string(),
            None => path.to_string(),
        }
    }

    /// SHA-256 request signature: the sorted `key=value` parameter string
    /// with the API secret appended, hex encoded.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let mut sorted: Vec<(&str, &str)> = params.to_vec();
        sorted.sort_by_key(|(key, _)| *key);

        let joined = sorted
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.api_secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CloudinaryClient {
        CloudinaryClient::new(
            "demo".to_string(),
            "key".to_string(),
            "secret".to_string(),
            "ghotokbari".to_string(),
        )
    }

    #[test]
    fn test_signature_is_deterministic_and_sorted() {
        let client = client();

        let a = client.sign(&[("timestamp", "1730000000"), ("public_id", "x/y")]);
        let b = client.sign(&[("public_id", "x/y"), ("timestamp", "1730000000")]);

        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));

        // A different secret must change the signature.
        let other = CloudinaryClient::new(
            "demo".to_string(),
            "key".to_string(),
            "other".to_string(),
            "ghotokbari".to_string(),
        );
        assert_ne!(a, other.sign(&[("public_id", "x/y"), ("timestamp", "1730000000")]));
    }

    #[test]
    fn test_public_id_from_url_keeps_folder_path() {
        let url =
            "https://res.cloudinary.com/demo/image/upload/v1730000000/ghotokbari/profile-pictures/abc_photo.jpg";
        assert_eq!(
            CloudinaryClient::public_id_from_url(url),
            "ghotokbari/profile-pictures/abc_photo"
        );
    }

    #[test]
    fn test_public_id_from_url_without_version_segment() {
        let url = "https://res.cloudinary.com/demo/image/upload/ghotokbari/documents/doc.pdf";
        assert_eq!(
            CloudinaryClient::public_id_from_url(url),
            "ghotokbari/documents/doc"
        );
    }
}
