//! REST client for the remote enhancement service.
//!
//! Wraps the service's HTTP API (`POST /enhance`, `GET /health`) using
//! [`reqwest`]. The [`EnhancementService`] trait is the seam the pipeline
//! talks to, so tests can drive it against a stub.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::fetch::Asset;

/// Host the studio talks to when no override is configured.
pub const DEFAULT_API_URL: &str = "https://la-paris-editor.onrender.com";

/// Error text used when the service rejects a request with an empty body.
pub const DEFAULT_REJECTION_MESSAGE: &str = "Backend processing failed";

/// Error text used when a failure carries no message of its own.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Processing failed";

// Multipart field names expected by `/enhance`.
const FIELD_FILE: &str = "file";
const FIELD_PRESET: &str = "preset";
const FIELD_LOGO: &str = "logoBase64";
const FIELD_COLOR: &str = "selectedColor";

/// Everything sent to `/enhance` for one image.
#[derive(Debug, Clone)]
pub struct Submission {
    /// The original image bytes, content type and file name.
    pub file: Asset,
    /// Preset identifier from the static catalog.
    pub preset: String,
    /// Raw base64 logo payload (no data-URL prefix).
    pub logo_base64: Option<String>,
    /// Display name of the selected colour swatch.
    pub selected_color: Option<String>,
}

impl Submission {
    /// Build the multipart body. Empty optional values are omitted.
    pub fn into_form(self) -> Result<Form, EnhanceError> {
        let file = Part::bytes(self.file.bytes)
            .file_name(self.file.file_name)
            .mime_str(&self.file.content_type)?;

        let mut form = Form::new()
            .part(FIELD_FILE, file)
            .text(FIELD_PRESET, self.preset);

        if let Some(logo) = self.logo_base64.filter(|s| !s.is_empty()) {
            form = form.text(FIELD_LOGO, logo);
        }
        if let Some(color) = self.selected_color.filter(|s| !s.is_empty()) {
            form = form.text(FIELD_COLOR, color);
        }
        Ok(form)
    }
}

/// A successful enhancement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedImage {
    /// Where the processed image can be fetched from.
    pub image_url: String,
}

/// Errors from the enhancement API layer.
#[derive(Debug, thiserror::Error)]
pub enum EnhanceError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    ///
    /// `message` is the response body verbatim, or
    /// [`DEFAULT_REJECTION_MESSAGE`] when the body was empty.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response whose body could not be understood.
    #[error("Invalid enhancement response: {0}")]
    InvalidResponse(String),
}

impl EnhanceError {
    /// Build a [`EnhanceError::Rejected`] from a status and raw body.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.is_empty() {
            DEFAULT_REJECTION_MESSAGE.to_string()
        } else {
            body
        };
        EnhanceError::Rejected { status, message }
    }
}

/// Anything that can turn a [`Submission`] into an [`EnhancedImage`].
#[async_trait]
pub trait EnhancementService: Send + Sync {
    async fn enhance(&self, submission: Submission) -> Result<EnhancedImage, EnhanceError>;
}

/// HTTP client for the remote enhancement service.
pub struct EnhanceApi {
    client: reqwest::Client,
    api_url: String,
}

impl EnhanceApi {
    /// Create a new API client.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `https://host`. A trailing slash is
    ///   ignored.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (e.g. one built with a request timeout).
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Submit one image for enhancement via `POST /enhance`.
    pub async fn submit(&self, submission: Submission) -> Result<EnhancedImage, EnhanceError> {
        let preset = submission.preset.clone();
        let form = submission.into_form()?;

        let response = self
            .client
            .post(format!("{}/enhance", self.api_url))
            .multipart(form)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        let enhanced = parse_enhanced(&body)?;

        tracing::debug!(preset = %preset, image_url = %enhanced.image_url, "Enhancement succeeded");
        Ok(enhanced)
    }

    /// Call `GET /health`; succeeds only for `{"status": "ok"}`.
    pub async fn health(&self) -> Result<(), EnhanceError> {
        let response = self
            .client
            .get(format!("{}/health", self.api_url))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body: HealthResponse = response.json().await?;
        if body.status == "ok" {
            Ok(())
        } else {
            Err(EnhanceError::InvalidResponse(format!(
                "unexpected health status: {}",
                body.status
            )))
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`EnhanceError::Rejected`]
    /// carrying the body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, EnhanceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Enhancement service rejected request");
            return Err(EnhanceError::rejected(status.as_u16(), body));
        }
        Ok(response)
    }
}

#[async_trait]
impl EnhancementService for EnhanceApi {
    async fn enhance(&self, submission: Submission) -> Result<EnhancedImage, EnhanceError> {
        self.submit(submission).await
    }
}

/// Success body of `POST /enhance`. Extra fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EnhanceResponse {
    image_url: String,
}

/// Body of `GET /health`.
#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Extract the `imageUrl` field from a successful response body.
pub fn parse_enhanced(body: &str) -> Result<EnhancedImage, EnhanceError> {
    let response: EnhanceResponse = serde_json::from_str(body)
        .map_err(|e| EnhanceError::InvalidResponse(format!("unexpected response body: {e}")))?;

    if response.image_url.is_empty() {
        return Err(EnhanceError::InvalidResponse(
            "empty imageUrl field".to_string(),
        ));
    }
    Ok(EnhancedImage {
        image_url: response.image_url,
    })
}
