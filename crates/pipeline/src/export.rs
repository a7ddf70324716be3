//! Saving completed results to disk under the brand's file name.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use laparis_core::naming::download_file_name;
use laparis_core::types::{ImageId, SourceRef};
use laparis_enhance::{AssetFetcher, FetchError};

/// Errors from exporting a result.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Image {0} is not in the queue")]
    NotFound(ImageId),

    #[error("Image {0} has no processed result to export")]
    NotCompleted(ImageId),

    /// The result reference is not an http(s) URL.
    #[error("Result reference '{0}' is not an http(s) URL")]
    NotAUrl(String),

    #[error("Failed to download result: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Downloads a result reference and writes it to a directory.
#[derive(Clone)]
pub struct ResultExporter {
    fetcher: Arc<dyn AssetFetcher>,
}

impl ResultExporter {
    pub fn new(fetcher: Arc<dyn AssetFetcher>) -> Self {
        Self { fetcher }
    }

    /// Save `processed_url` as `dir/LaParis_Studio_{display_name}.png`,
    /// creating `dir` if needed. An existing file is overwritten.
    ///
    /// Only http(s) references are downloaded; anything else is rejected
    /// before a fetch is attempted.
    pub async fn export(
        &self,
        processed_url: &str,
        display_name: &str,
        dir: &Path,
    ) -> Result<PathBuf, ExportError> {
        let source = match SourceRef::parse(processed_url) {
            url @ SourceRef::Url(_) => url,
            SourceRef::Path(_) => {
                tracing::warn!(processed_url, "Refusing to export a non-URL result reference");
                return Err(ExportError::NotAUrl(processed_url.to_string()));
            }
        };
        let asset = self.fetcher.fetch(&source).await?;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| ExportError::Io {
                path: dir.to_path_buf(),
                source,
            })?;

        let path = dir.join(download_file_name(display_name));
        tokio::fs::write(&path, &asset.bytes)
            .await
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), bytes = asset.bytes.len(), "Result exported");
        Ok(path)
    }
}
