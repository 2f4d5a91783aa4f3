//! Object storage uploads.
//!
//! Uploaded images land in a bucket on the platform's storage service and
//! are addressed afterwards by their public URL. Upload failures abort the
//! enclosing save; no URL is ever produced for a failed upload.

use super::ApiError;

/// Client for one storage bucket.
#[derive(Clone)]
pub struct ObjectStorage {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

impl ObjectStorage {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, bucket: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Store an object and return its public URL.
    pub async fn upload(&self, object_path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, ApiError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, object_path);
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let code = status.as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(match code {
                401 | 403 => ApiError::Auth(format!("storage upload ({})", code)),
                _ => ApiError::Status { status: code, body },
            });
        }

        Ok(self.public_url(object_path))
    }

    /// Public URL an uploaded object is served from.
    pub fn public_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, object_path
        )
    }
}
