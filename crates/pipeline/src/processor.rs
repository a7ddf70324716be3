//! One pipeline invocation: drive a single record from pending/failed to
//! completed or failed via one enhancement request.
//!
//! Steps run strictly in order: mark processing, resolve the logo (if
//! enabled), read the original, submit, store the outcome. Every failure
//! is caught here and recorded on the record; nothing escapes to the
//! caller or affects other invocations.
//!
//! There is no cancellation. If the record is removed while its request is
//! in flight, the request still completes and the final update is dropped
//! because the identity is no longer queued.

use std::sync::Arc;

use laparis_core::types::{BrandLogo, BrandingConfig, ImageId, ImageRecord, ImageStatus};
use laparis_enhance::api::DEFAULT_FAILURE_MESSAGE;
use laparis_enhance::encoding::encode_logo;
use laparis_enhance::{
    AssetFetcher, EnhanceError, EnhancedImage, EnhancementService, FetchError, Submission,
};
use tokio::sync::broadcast;

use crate::branding::{BrandingStore, LogoRegistry};
use crate::events::{emit, StudioEvent};
use crate::queue::UploadQueue;

/// Branding settings frozen at dispatch time.
///
/// Later edits to the branding store do not affect invocations that were
/// already dispatched with an earlier context.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    pub branding: BrandingConfig,
    /// The logo to embed, resolved only when logos are visible and the
    /// selected id exists in the registry.
    pub logo: Option<BrandLogo>,
}

impl DispatchContext {
    pub async fn capture(store: &BrandingStore, logos: &LogoRegistry) -> Self {
        let branding = store.get().await;
        let logo = match (&branding.selected_logo_id, branding.logo_visible) {
            (Some(id), true) => logos.get(id).await,
            _ => None,
        };
        Self { branding, logo }
    }
}

/// Failure of a single invocation.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The selected logo could not be fetched.
    #[error("Logo could not be loaded: {0}")]
    Logo(#[source] FetchError),

    /// The original image could not be read.
    #[error("Image could not be read: {0}")]
    Source(#[source] FetchError),

    /// The enhancement request failed.
    #[error(transparent)]
    Enhance(#[from] EnhanceError),
}

impl PipelineError {
    /// Message stored on the failed record; never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            DEFAULT_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Everything an invocation needs. Cheap to clone into spawned tasks.
#[derive(Clone)]
pub struct Pipeline {
    queue: UploadQueue,
    service: Arc<dyn EnhancementService>,
    fetcher: Arc<dyn AssetFetcher>,
    events: broadcast::Sender<StudioEvent>,
}

impl Pipeline {
    pub fn new(
        queue: UploadQueue,
        service: Arc<dyn EnhancementService>,
        fetcher: Arc<dyn AssetFetcher>,
        events: broadcast::Sender<StudioEvent>,
    ) -> Self {
        Self {
            queue,
            service,
            fetcher,
            events,
        }
    }

    /// Claim the record with `id` and process it.
    ///
    /// Returns `None` without touching anything when `id` is not queued.
    /// Otherwise returns the terminal status the invocation reached, even
    /// if the record was removed before it could be stored.
    pub async fn run(&self, id: &ImageId, ctx: &DispatchContext) -> Option<ImageStatus> {
        let Some(record) = self.queue.update(id, |r| r.begin_processing()).await else {
            tracing::debug!(image_id = %id, "Image not queued, nothing to process");
            return None;
        };
        Some(self.run_claimed(record, ctx).await)
    }

    /// Process a record that has already been moved to processing, for
    /// example by [`UploadQueue::claim_eligible`].
    pub async fn run_claimed(&self, record: ImageRecord, ctx: &DispatchContext) -> ImageStatus {
        let id = &record.id;
        tracing::info!(image_id = %id, preset = %ctx.branding.active_preset, "Processing image");
        emit(
            &self.events,
            StudioEvent::ProcessingStarted {
                image_id: id.clone(),
            },
        );

        match self.attempt(&record, ctx).await {
            Ok(enhanced) => {
                let url = enhanced.image_url;
                let stored = self.queue.update(id, |r| r.complete(url.clone())).await;
                if stored.is_some() {
                    tracing::info!(image_id = %id, processed_url = %url, "Image enhanced");
                    emit(
                        &self.events,
                        StudioEvent::ProcessingCompleted {
                            image_id: id.clone(),
                            processed_url: url,
                        },
                    );
                } else {
                    tracing::debug!(image_id = %id, "Image removed while processing, result dropped");
                }
                ImageStatus::Completed
            }
            Err(e) => {
                let message = e.user_message();
                let stored = self.queue.update(id, |r| r.fail(message.clone())).await;
                if stored.is_some() {
                    tracing::warn!(image_id = %id, error = %e, "Image processing failed");
                    emit(
                        &self.events,
                        StudioEvent::ProcessingFailed {
                            image_id: id.clone(),
                            error: message,
                        },
                    );
                } else {
                    tracing::debug!(image_id = %id, error = %e, "Image removed while processing, error dropped");
                }
                ImageStatus::Failed
            }
        }
    }

    async fn attempt(
        &self,
        record: &ImageRecord,
        ctx: &DispatchContext,
    ) -> Result<EnhancedImage, PipelineError> {
        let logo_base64 = match &ctx.logo {
            Some(logo) => {
                let asset = self
                    .fetcher
                    .fetch(&logo.source)
                    .await
                    .map_err(PipelineError::Logo)?;
                Some(encode_logo(&asset))
            }
            None => None,
        };

        let file = self
            .fetcher
            .fetch(&record.original)
            .await
            .map_err(PipelineError::Source)?
            .renamed(record.name.clone());

        let submission = Submission {
            file,
            preset: ctx.branding.active_preset.clone(),
            logo_base64,
            selected_color: ctx.branding.selected_color.clone(),
        };

        Ok(self.service.enhance(submission).await?)
    }
}
