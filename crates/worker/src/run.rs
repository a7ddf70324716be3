//! One headless batch: queue files, process all, export what completed.

use std::path::PathBuf;
use std::sync::Arc;

use laparis_core::types::ImageStatus;
use laparis_enhance::{EnhanceApi, HttpAssetFetcher};
use laparis_pipeline::{join_dispatched, Studio, StudioEvent};
use tokio::sync::broadcast;

use crate::config::WorkerConfig;

/// Display name of a logo registered from `STUDIO_LOGO_PATH`.
const CUSTOM_LOGO_NAME: &str = "Custom logo";

/// Counts reported at the end of a batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub queued: usize,
    pub completed: usize,
    pub failed: usize,
    pub exported: Vec<PathBuf>,
}

/// Build a studio from `config` and run a single batch over `files`.
pub async fn run_batch(config: &WorkerConfig, files: Vec<PathBuf>) -> anyhow::Result<RunSummary> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    let api = EnhanceApi::with_client(client.clone(), config.api_url.clone());
    if let Err(e) = api.health().await {
        tracing::warn!(api_url = %api.api_url(), error = %e, "Enhancement service health check failed");
    }

    let studio = Studio::new(
        Arc::new(api),
        Arc::new(HttpAssetFetcher::with_client(client)),
        config.branding.clone(),
    );

    if let Some(source) = &config.logo_source {
        let logo_id = studio.add_logo(CUSTOM_LOGO_NAME, source.clone()).await;
        studio.select_logo(logo_id).await?;
    }

    let event_log = tokio::spawn(log_events(studio.subscribe()));

    let ids = studio.upload_files(files).await;
    let outcomes = join_dispatched(studio.process_all().await).await;

    let mut summary = RunSummary {
        queued: ids.len(),
        ..Default::default()
    };
    for (id, outcome) in ids.iter().zip(outcomes) {
        match outcome {
            Some(ImageStatus::Completed) => {
                summary.completed += 1;
                match studio.export_result(id, &config.output_dir).await {
                    Ok(path) => summary.exported.push(path),
                    Err(e) => tracing::error!(image_id = %id, error = %e, "Export failed"),
                }
            }
            Some(_) => summary.failed += 1,
            None => {}
        }
    }

    drop(studio);
    let _ = event_log.await;

    Ok(summary)
}

/// Log every studio event as JSON until the studio is dropped.
async fn log_events(mut rx: broadcast::Receiver<StudioEvent>) {
    loop {
        match rx.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(json) => tracing::debug!(event = %json, "Studio event"),
                Err(e) => tracing::warn!(error = %e, "Failed to serialize studio event"),
            },
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event log lagged");
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}
