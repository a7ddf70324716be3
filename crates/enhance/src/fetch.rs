//! Reading image and logo bytes from their [`SourceRef`].
//!
//! Local paths are read with `tokio::fs`; URLs are downloaded with
//! [`reqwest`]. Content types are preserved so the enhancement request
//! carries the same type the source had.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use laparis_core::types::SourceRef;

/// Content type used when none can be determined.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// File name used when the source has no usable final segment.
pub const FALLBACK_FILE_NAME: &str = "upload";

/// Bytes of a fetched image or logo plus the metadata needed to resubmit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl Asset {
    /// Replace the file name, e.g. with a record's display name.
    pub fn renamed(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

/// Errors raised while fetching an asset.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Reading a local file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request itself failed.
    #[error("Failed to fetch asset: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Fetching {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Anything that can resolve a [`SourceRef`] to bytes.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, source: &SourceRef) -> Result<Asset, FetchError>;
}

/// Default fetcher: filesystem for paths, HTTP for URLs.
#[derive(Clone, Default)]
pub struct HttpAssetFetcher {
    client: reqwest::Client,
}

impl HttpAssetFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch_path(&self, path: &Path) -> Result<Asset, FetchError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Asset {
            bytes,
            content_type: content_type_for_path(path).to_string(),
            file_name: SourceRef::Path(path.to_path_buf())
                .file_name()
                .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string()),
        })
    }

    async fn fetch_url(&self, url: &str) -> Result<Asset, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();
        let bytes = response.bytes().await?.to_vec();

        Ok(Asset {
            bytes,
            content_type,
            file_name: SourceRef::Url(url.to_string())
                .file_name()
                .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string()),
        })
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, source: &SourceRef) -> Result<Asset, FetchError> {
        tracing::trace!(source = %source, "Fetching asset");
        match source {
            SourceRef::Path(path) => self.fetch_path(path).await,
            SourceRef::Url(url) => self.fetch_url(url).await,
        }
    }
}

/// Guess a MIME type from a file extension.
///
/// Image extensions map to their image type; anything else is
/// [`FALLBACK_CONTENT_TYPE`]. No validation happens beyond that.
pub fn content_type_for_path(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}
