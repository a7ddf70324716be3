//! Studio events broadcast to whatever renders the queue.
//!
//! Subscribe with [`Studio::subscribe`](crate::studio::Studio::subscribe).
//! Sends with no live receivers are dropped silently.

use std::path::PathBuf;

use laparis_core::types::ImageId;
use serde::Serialize;
use tokio::sync::broadcast;

/// Broadcast channel capacity for studio events.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A state change of the upload queue or of one image record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StudioEvent {
    /// A new record entered the queue as pending.
    ImageQueued { image_id: ImageId, name: String },

    /// A record was removed by the user.
    ImageRemoved { image_id: ImageId },

    /// A pipeline invocation picked the record up.
    ProcessingStarted { image_id: ImageId },

    /// The service returned a result reference.
    ProcessingCompleted {
        image_id: ImageId,
        processed_url: String,
    },

    /// The invocation failed.
    ProcessingFailed {
        image_id: ImageId,
        /// Human-readable error description.
        error: String,
    },

    /// A completed result was saved locally.
    ResultExported { image_id: ImageId, path: PathBuf },
}

pub(crate) fn channel() -> broadcast::Sender<StudioEvent> {
    let (tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
    tx
}

pub(crate) fn emit(tx: &broadcast::Sender<StudioEvent>, event: StudioEvent) {
    // Ignore the SendError: it only means nobody is listening.
    let _ = tx.send(event);
}
