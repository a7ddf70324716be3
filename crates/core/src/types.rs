//! Domain types shared by the queue, the pipeline and the worker.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Optimistic progress value set when a record enters processing.
pub const PROGRESS_STARTED: u8 = 10;

/// Progress value of a completed record.
pub const PROGRESS_DONE: u8 = 100;

// ---------------------------------------------------------------------------
// Identities
// ---------------------------------------------------------------------------

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random identity.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

opaque_id!(
    /// Identity of an image record in the upload queue.
    ImageId
);

opaque_id!(
    /// Identity of a brand logo in the logo registry.
    LogoId
);

// ---------------------------------------------------------------------------
// Source references
// ---------------------------------------------------------------------------

/// Where the bytes of an image or logo can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum SourceRef {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// A remote `http://` or `https://` resource.
    Url(String),
}

impl SourceRef {
    /// Classify a raw location string.
    ///
    /// Anything starting with `http://` or `https://` is a URL; every other
    /// string is treated as a local path.
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            SourceRef::Url(raw.to_string())
        } else {
            SourceRef::Path(PathBuf::from(raw))
        }
    }

    /// The final path segment, used as the uploaded file name.
    pub fn file_name(&self) -> Option<String> {
        match self {
            SourceRef::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            SourceRef::Url(url) => {
                let without_query = url.split(['?', '#']).next().unwrap_or(url);
                without_query
                    .rsplit('/')
                    .next()
                    .filter(|segment| !segment.is_empty() && !segment.contains(':'))
                    .map(str::to_string)
            }
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceRef::Path(path) => write!(f, "{}", path.display()),
            SourceRef::Url(url) => f.write_str(url),
        }
    }
}

// ---------------------------------------------------------------------------
// Image records
// ---------------------------------------------------------------------------

/// Processing state of an image record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ImageStatus {
    /// Whether a "process all" sweep should dispatch this record.
    pub fn is_eligible(self) -> bool {
        matches!(self, ImageStatus::Pending | ImageStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ImageStatus::Pending => "pending",
            ImageStatus::Processing => "processing",
            ImageStatus::Completed => "completed",
            ImageStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One queued product photograph and its processing outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: ImageId,
    /// Where the original bytes are read from at submission time.
    pub original: SourceRef,
    pub status: ImageStatus,
    /// File name without extension.
    pub name: String,
    /// 0-100.
    pub progress: u8,
    pub processed_url: Option<String>,
    pub error: Option<String>,
    pub queued_at: Timestamp,
}

impl ImageRecord {
    /// Create a pending record with a fresh identity.
    pub fn new(original: SourceRef, name: impl Into<String>) -> Self {
        Self::with_id(ImageId::generate(), original, name)
    }

    /// Create a pending record with a caller-chosen identity.
    pub fn with_id(id: ImageId, original: SourceRef, name: impl Into<String>) -> Self {
        Self {
            id,
            original,
            status: ImageStatus::Pending,
            name: name.into(),
            progress: 0,
            processed_url: None,
            error: None,
            queued_at: chrono::Utc::now(),
        }
    }

    /// Enter the processing state. Any previous outcome is discarded.
    pub fn begin_processing(&mut self) {
        self.status = ImageStatus::Processing;
        self.progress = PROGRESS_STARTED;
        self.processed_url = None;
        self.error = None;
    }

    pub fn complete(&mut self, processed_url: impl Into<String>) {
        self.status = ImageStatus::Completed;
        self.progress = PROGRESS_DONE;
        self.processed_url = Some(processed_url.into());
        self.error = None;
    }

    /// Progress is left where it was; it only reaches 100 on completion.
    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = ImageStatus::Failed;
        self.processed_url = None;
        self.error = Some(error.into());
    }
}

// ---------------------------------------------------------------------------
// Branding
// ---------------------------------------------------------------------------

/// Screen corner the logo is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl LogoPosition {
    pub const ALL: [LogoPosition; 4] = [
        LogoPosition::TopLeft,
        LogoPosition::TopRight,
        LogoPosition::BottomLeft,
        LogoPosition::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LogoPosition::TopLeft => "top-left",
            LogoPosition::TopRight => "top-right",
            LogoPosition::BottomLeft => "bottom-left",
            LogoPosition::BottomRight => "bottom-right",
        }
    }
}

impl FromStr for LogoPosition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogoPosition::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid logo position '{s}'. Must be one of: top-left, top-right, bottom-left, bottom-right"
                ))
            })
    }
}

impl fmt::Display for LogoPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-controlled parameters sent with every enhancement request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingConfig {
    pub logo_visible: bool,
    pub logo_position: LogoPosition,
    /// Expected in `0.0..=1.0`; not enforced by in-process updates.
    pub logo_opacity: f32,
    pub upscale: bool,
    pub active_preset: String,
    pub selected_logo_id: Option<LogoId>,
    pub selected_color: Option<String>,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            logo_visible: false,
            logo_position: LogoPosition::BottomRight,
            logo_opacity: 0.85,
            upscale: true,
            active_preset: crate::catalog::DEFAULT_PRESET_ID.to_string(),
            selected_logo_id: Some(LogoId::from(crate::catalog::DEFAULT_LOGO_ID)),
            selected_color: Some(crate::catalog::DEFAULT_COLOR_NAME.to_string()),
        }
    }
}

/// Field-level patch for [`BrandingConfig`]. Unset fields are left alone.
///
/// The optional config fields use `Option<Option<_>>` so a patch can clear
/// them (`Some(None)`) as well as set them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandingUpdate {
    pub logo_visible: Option<bool>,
    pub logo_position: Option<LogoPosition>,
    pub logo_opacity: Option<f32>,
    pub upscale: Option<bool>,
    pub active_preset: Option<String>,
    pub selected_logo_id: Option<Option<LogoId>>,
    pub selected_color: Option<Option<String>>,
}

impl BrandingUpdate {
    pub fn apply(self, config: &mut BrandingConfig) {
        if let Some(v) = self.logo_visible {
            config.logo_visible = v;
        }
        if let Some(v) = self.logo_position {
            config.logo_position = v;
        }
        if let Some(v) = self.logo_opacity {
            config.logo_opacity = v;
        }
        if let Some(v) = self.upscale {
            config.upscale = v;
        }
        if let Some(v) = self.active_preset {
            config.active_preset = v;
        }
        if let Some(v) = self.selected_logo_id {
            config.selected_logo_id = v;
        }
        if let Some(v) = self.selected_color {
            config.selected_color = v;
        }
    }
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

/// A selectable brand logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandLogo {
    pub id: LogoId,
    pub name: String,
    pub source: SourceRef,
}

/// A named visual style template applied server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Icon name understood by the presentation layer.
    pub icon: &'static str,
}

/// A background colour choice sent by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorSwatch {
    pub name: &'static str,
    /// `#RRGGBB`.
    pub value: &'static str,
}
