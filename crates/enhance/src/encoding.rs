//! Base64 and data-URL helpers for the logo payload.
//!
//! The service expects the logo as raw base64 with no `data:` prefix.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::fetch::Asset;

/// Render bytes as a `data:{type};base64,{payload}` URL.
pub fn to_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(bytes))
}

/// Drop everything up to and including the first `,` of a data URL.
///
/// Input without a comma is returned unchanged.
pub fn strip_data_url_prefix(data_url: &str) -> &str {
    data_url
        .split_once(',')
        .map_or(data_url, |(_, payload)| payload)
}

/// Encode a fetched logo as the raw base64 payload sent to `/enhance`:
/// read it as a data URL, then keep only the payload.
pub fn encode_logo(asset: &Asset) -> String {
    let data_url = to_data_url(&asset.content_type, &asset.bytes);
    strip_data_url_prefix(&data_url).to_string()
}
