//! Shared stubs for pipeline integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use laparis_core::types::{BrandingConfig, ImageId, ImageRecord, ImageStatus, SourceRef};
use laparis_enhance::{
    Asset, AssetFetcher, EnhanceError, EnhancedImage, EnhancementService, FetchError, Submission,
};
use laparis_pipeline::Studio;
use tokio::sync::Semaphore;

type Responder = dyn Fn(&Submission) -> Result<EnhancedImage, EnhanceError> + Send + Sync;

/// Enhancement service that records every submission and answers with a
/// caller-supplied closure. Optionally blocks each call on a gate.
pub struct StubService {
    responder: Box<Responder>,
    pub submissions: Mutex<Vec<Submission>>,
    gate: Option<Arc<Semaphore>>,
}

impl StubService {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Submission) -> Result<EnhancedImage, EnhanceError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            submissions: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Always succeed with `url`.
    pub fn returning(url: &str) -> Self {
        let url = url.to_string();
        Self::new(move |_| {
            Ok(EnhancedImage {
                image_url: url.clone(),
            })
        })
    }

    /// Hold every call until a permit is added to the returned semaphore.
    pub fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    pub fn calls(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl EnhancementService for StubService {
    async fn enhance(&self, submission: Submission) -> Result<EnhancedImage, EnhanceError> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        let result = (self.responder)(&submission);
        self.submissions.lock().unwrap().push(submission);
        result
    }
}

/// Fetcher backed by an in-memory table. Unknown sources fail with 404.
#[derive(Default)]
pub struct StubFetcher {
    assets: Mutex<HashMap<String, Asset>>,
    pub fetched: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn with(self, source: &SourceRef, bytes: &[u8], content_type: &str) -> Self {
        self.assets.lock().unwrap().insert(
            source.to_string(),
            Asset {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
                file_name: source.file_name().unwrap_or_default(),
            },
        );
        self
    }
}

#[async_trait]
impl AssetFetcher for StubFetcher {
    async fn fetch(&self, source: &SourceRef) -> Result<Asset, FetchError> {
        let key = source.to_string();
        self.fetched.lock().unwrap().push(key.clone());
        self.assets
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .ok_or(FetchError::Status {
                url: key,
                status: 404,
            })
    }
}

pub fn photo_source(name: &str) -> SourceRef {
    SourceRef::parse(&format!("/photos/{name}.jpg"))
}

/// A record with a fixed id and status, pointing at [`photo_source`].
pub fn record(id: &str, status: ImageStatus) -> ImageRecord {
    let mut r = ImageRecord::with_id(ImageId::from(id), photo_source(id), id);
    match status {
        ImageStatus::Pending => {}
        ImageStatus::Processing => r.begin_processing(),
        ImageStatus::Completed => {
            r.begin_processing();
            r.complete(format!("https://done/{id}.png"));
        }
        ImageStatus::Failed => {
            r.begin_processing();
            r.fail("earlier failure");
        }
    }
    r
}

pub fn studio(
    service: Arc<StubService>,
    fetcher: Arc<StubFetcher>,
    branding: BrandingConfig,
) -> Studio {
    Studio::new(service, fetcher, branding)
}
