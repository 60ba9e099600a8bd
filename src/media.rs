use reqwest::multipart;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media host request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("media host rejected the upload with status {0}")]
    Rejected(reqwest::StatusCode),

    #[error("media host response carried no url")]
    MalformedResponse,
}

/// Typed upload result; the URL is the only thing callers may rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

/// Client for the external image host (unsigned upload endpoint).
#[derive(Debug, Clone)]
pub struct MediaClient {
    http: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl MediaClient {
    pub fn new(upload_url: impl Into<String>, upload_preset: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            upload_url: upload_url.into(),
            upload_preset: upload_preset.into(),
        }
    }

    /// Upload one image and return its stable retrieval URL. The host may
    /// retain the file even if the caller's subsequent store write fails;
    /// no compensating delete is attempted.
    pub async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, MediaError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = multipart::Form::new()
            .text("upload_preset", self.upload_preset.clone())
            .part("file", part);

        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MediaError::Rejected(status));
        }

        let body: UploadResponse = response.json().await?;
        let url = body
            .secure_url
            .or(body.url)
            .filter(|u| !u.is_empty())
            .ok_or(MediaError::MalformedResponse)?;

        tracing::debug!(%url, "image uploaded");
        Ok(UploadedImage { url })
    }
}
