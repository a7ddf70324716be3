//! [`Studio`]: the facade a front end drives.
//!
//! Owns the upload queue, branding store and logo registry, and dispatches
//! pipeline invocations. "Process all" fans out one task per eligible
//! record with no concurrency limit, batching or retry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use laparis_core::error::CoreError;
use laparis_core::types::{
    BrandLogo, BrandingConfig, BrandingUpdate, ImageId, ImageRecord, ImageStatus, LogoId,
    SourceRef,
};
use laparis_enhance::{AssetFetcher, EnhancementService};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::branding::{BrandingStore, LogoRegistry};
use crate::events::{self, emit, StudioEvent};
use crate::export::{ExportError, ResultExporter};
use crate::processor::{DispatchContext, Pipeline};
use crate::queue::{NewUpload, UploadQueue};

/// Handle to one dispatched invocation.
pub type Dispatched = JoinHandle<Option<ImageStatus>>;

pub struct Studio {
    queue: UploadQueue,
    branding: BrandingStore,
    logos: LogoRegistry,
    pipeline: Pipeline,
    exporter: ResultExporter,
    events: broadcast::Sender<StudioEvent>,
}

impl Studio {
    pub fn new(
        service: Arc<dyn EnhancementService>,
        fetcher: Arc<dyn AssetFetcher>,
        branding: BrandingConfig,
    ) -> Self {
        let queue = UploadQueue::new();
        let events = events::channel();
        let pipeline = Pipeline::new(queue.clone(), service, Arc::clone(&fetcher), events.clone());

        Self {
            queue,
            branding: BrandingStore::new(branding),
            logos: LogoRegistry::new(),
            pipeline,
            exporter: ResultExporter::new(fetcher),
            events,
        }
    }

    /// Subscribe to queue and processing events.
    pub fn subscribe(&self) -> broadcast::Receiver<StudioEvent> {
        self.events.subscribe()
    }

    pub fn queue(&self) -> &UploadQueue {
        &self.queue
    }

    // ---- upload queue ----

    /// Queue local files. No type filtering or deduplication.
    pub async fn upload_files(&self, paths: impl IntoIterator<Item = PathBuf>) -> Vec<ImageId> {
        let uploads = paths
            .into_iter()
            .map(|p| NewUpload::from_source(SourceRef::Path(p)));
        self.upload(uploads).await
    }

    /// Queue sources that may be local paths or remote URLs.
    pub async fn upload_sources(
        &self,
        sources: impl IntoIterator<Item = SourceRef>,
    ) -> Vec<ImageId> {
        self.upload(sources.into_iter().map(NewUpload::from_source))
            .await
    }

    pub async fn upload(&self, uploads: impl IntoIterator<Item = NewUpload>) -> Vec<ImageId> {
        let ids = self.queue.add_batch(uploads).await;
        for id in &ids {
            let name = self
                .queue
                .get(id)
                .await
                .map(|r| r.name)
                .unwrap_or_default();
            emit(
                &self.events,
                StudioEvent::ImageQueued {
                    image_id: id.clone(),
                    name,
                },
            );
        }
        tracing::info!(count = ids.len(), "Images queued");
        ids
    }

    /// Remove a record. Does not cancel an in-flight invocation.
    pub async fn remove_image(&self, id: &ImageId) -> bool {
        let removed = self.queue.remove(id).await;
        if removed {
            tracing::info!(image_id = %id, "Image removed");
            emit(
                &self.events,
                StudioEvent::ImageRemoved {
                    image_id: id.clone(),
                },
            );
        }
        removed
    }

    pub async fn images(&self) -> Vec<ImageRecord> {
        self.queue.snapshot().await
    }

    pub async fn image(&self, id: &ImageId) -> Option<ImageRecord> {
        self.queue.get(id).await
    }

    // ---- branding ----

    pub async fn branding(&self) -> BrandingConfig {
        self.branding.get().await
    }

    pub async fn update_branding(&self, update: BrandingUpdate) -> BrandingConfig {
        self.branding.update(update).await
    }

    /// Select a registered logo; unknown ids are rejected.
    pub async fn select_logo(&self, id: LogoId) -> Result<BrandingConfig, CoreError> {
        if !self.logos.contains(&id).await {
            return Err(CoreError::NotFound {
                entity: "logo",
                id: id.to_string(),
            });
        }
        Ok(self
            .branding
            .update(BrandingUpdate {
                selected_logo_id: Some(Some(id)),
                ..Default::default()
            })
            .await)
    }

    pub async fn add_logo(&self, name: impl Into<String>, source: SourceRef) -> LogoId {
        self.logos.add(name, source).await
    }

    pub async fn logos(&self) -> Vec<BrandLogo> {
        self.logos.list().await
    }

    // ---- processing ----

    /// Process one record and wait for the outcome.
    ///
    /// The record's current status is not checked: a completed or failed
    /// record is processed again. Returns `None` if `id` is not queued.
    pub async fn process_image(&self, id: &ImageId) -> Option<ImageStatus> {
        let ctx = DispatchContext::capture(&self.branding, &self.logos).await;
        self.pipeline.run(id, &ctx).await
    }

    /// Dispatch every pending or failed record concurrently.
    ///
    /// Branding is captured once, before any task starts. The dispatched
    /// records are already `Processing` when this returns, so a second
    /// call does not send them again. The returned handles may be awaited
    /// or dropped; dropping them does not cancel the work.
    pub async fn process_all(&self) -> Vec<Dispatched> {
        let ctx = Arc::new(DispatchContext::capture(&self.branding, &self.logos).await);
        let claimed = self.queue.claim_eligible().await;
        tracing::info!(count = claimed.len(), "Dispatching eligible images");

        claimed
            .into_iter()
            .map(|record| {
                let pipeline = self.pipeline.clone();
                let ctx = Arc::clone(&ctx);
                tokio::spawn(async move { Some(pipeline.run_claimed(record, &ctx).await) })
            })
            .collect()
    }

    // ---- export ----

    /// Save a completed record's result into `dir`.
    pub async fn export_result(&self, id: &ImageId, dir: &Path) -> Result<PathBuf, ExportError> {
        let record = self
            .queue
            .get(id)
            .await
            .ok_or_else(|| ExportError::NotFound(id.clone()))?;

        let processed_url = match (record.status, record.processed_url) {
            (ImageStatus::Completed, Some(url)) => url,
            _ => return Err(ExportError::NotCompleted(id.clone())),
        };

        let path = self.exporter.export(&processed_url, &record.name, dir).await?;
        emit(
            &self.events,
            StudioEvent::ResultExported {
                image_id: id.clone(),
                path: path.clone(),
            },
        );
        Ok(path)
    }
}

/// Wait for dispatched invocations, in dispatch order.
///
/// A task that panicked is logged and reported as `None`.
pub async fn join_dispatched(handles: Vec<Dispatched>) -> Vec<Option<ImageStatus>> {
    futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|joined| match joined {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(error = %e, "Pipeline task aborted");
                None
            }
        })
        .collect()
}
