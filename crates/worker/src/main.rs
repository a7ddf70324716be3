//! `laparis-worker` -- enhance a batch of product photos from the shell.
//!
//! Usage: `laparis-worker <image>...`
//!
//! Branding and endpoint settings come from the environment (see
//! [`WorkerConfig::from_env`]). Completed results are written to
//! `STUDIO_OUTPUT_DIR` as `LaParis_Studio_{name}.png`.

use std::path::PathBuf;

use laparis_worker::config::WorkerConfig;
use laparis_worker::run::run_batch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "laparis_worker=debug,laparis_pipeline=debug,laparis_enhance=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let files: Vec<PathBuf> = std::env::args().skip(1).map(PathBuf::from).collect();
    if files.is_empty() {
        tracing::error!("Usage: laparis-worker <image>...");
        std::process::exit(2);
    }

    let config = WorkerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });
    tracing::info!(
        api_url = %config.api_url,
        preset = %config.branding.active_preset,
        output_dir = %config.output_dir.display(),
        "Loaded worker configuration"
    );

    let summary = match run_batch(&config, files).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::error!(error = %e, "Batch aborted");
            std::process::exit(1);
        }
    };

    tracing::info!(
        queued = summary.queued,
        completed = summary.completed,
        failed = summary.failed,
        exported = summary.exported.len(),
        "Batch finished"
    );

    if summary.failed > 0 {
        std::process::exit(1);
    }
}
