//! File naming conventions for uploads and exported results.

/// Prefix of every exported result file.
pub const EXPORT_PREFIX: &str = "LaParis_Studio_";

/// Extension of every exported result file.
pub const EXPORT_EXTENSION: &str = "png";

/// Derive a record's display name from an uploaded file name.
///
/// Keeps everything before the first `.`; a name that would come out empty
/// (e.g. `.hidden`) is kept whole.
///
/// # Examples
///
/// ```
/// use laparis_core::naming::display_name;
///
/// assert_eq!(display_name("bag.jpg"), "bag");
/// assert_eq!(display_name("bag.final.jpg"), "bag");
/// assert_eq!(display_name("README"), "README");
/// ```
pub fn display_name(file_name: &str) -> String {
    match file_name.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

/// File name an exported result is saved under.
///
/// ```
/// use laparis_core::naming::download_file_name;
///
/// assert_eq!(download_file_name("bag"), "LaParis_Studio_bag.png");
/// ```
pub fn download_file_name(display_name: &str) -> String {
    format!("{EXPORT_PREFIX}{display_name}.{EXPORT_EXTENSION}")
}
