//! Client for the remote image-enhancement service.
//!
//! Provides the multipart `/enhance` API wrapper, asset fetching for local
//! and remote sources, and the base64 encoding used for logo payloads.

pub mod api;
pub mod encoding;
pub mod fetch;

pub use api::{EnhanceApi, EnhanceError, EnhancedImage, EnhancementService, Submission};
pub use fetch::{Asset, AssetFetcher, FetchError, HttpAssetFetcher};
