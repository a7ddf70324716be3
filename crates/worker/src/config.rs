use std::path::PathBuf;
use std::time::Duration;

use laparis_core::error::CoreError;
use laparis_core::types::{BrandingConfig, LogoPosition, SourceRef};
use laparis_core::validation::{validate_branding, validate_preset_id};
use laparis_enhance::api::DEFAULT_API_URL;

/// Default directory exported results are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "./enhanced";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is invalid: {message}")]
    Invalid { key: &'static str, message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Worker configuration loaded from environment variables.
///
/// Every field has a default; an empty environment reproduces the
/// studio's out-of-the-box branding against the hosted service.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base URL of the enhancement service.
    pub api_url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    pub branding: BrandingConfig,
    /// Custom logo to register and select, if any.
    pub logo_source: Option<SourceRef>,
    /// Directory exported results are written to.
    pub output_dir: PathBuf,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                |
    /// |------------------------|----------------------------------------|
    /// | `ENHANCE_API_URL`      | `https://la-paris-editor.onrender.com` |
    /// | `ENHANCE_TIMEOUT_SECS` | unset (no timeout)                     |
    /// | `STUDIO_PRESET`        | `avenue-montaigne`                     |
    /// | `STUDIO_COLOR`         | `Ivory Cream` (empty = none)           |
    /// | `STUDIO_LOGO_VISIBLE`  | `false`                                |
    /// | `STUDIO_LOGO_PATH`     | unset (built-in logo)                  |
    /// | `STUDIO_LOGO_POSITION` | `bottom-right`                         |
    /// | `STUDIO_LOGO_OPACITY`  | `0.85`                                 |
    /// | `STUDIO_UPSCALE`       | `true`                                 |
    /// | `STUDIO_OUTPUT_DIR`    | `./enhanced`                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading values through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("ENHANCE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());

        let request_timeout = match lookup("ENHANCE_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    key: "ENHANCE_TIMEOUT_SECS",
                    message: format!("'{raw}' is not a whole number of seconds"),
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let mut branding = BrandingConfig::default();

        if let Some(preset) = lookup("STUDIO_PRESET") {
            validate_preset_id(&preset)?;
            branding.active_preset = preset;
        }
        if let Some(color) = lookup("STUDIO_COLOR") {
            branding.selected_color = (!color.is_empty()).then_some(color);
        }
        if let Some(raw) = lookup("STUDIO_LOGO_VISIBLE") {
            branding.logo_visible = parse_bool("STUDIO_LOGO_VISIBLE", &raw)?;
        }
        if let Some(raw) = lookup("STUDIO_LOGO_POSITION") {
            branding.logo_position = raw.parse::<LogoPosition>()?;
        }
        if let Some(raw) = lookup("STUDIO_LOGO_OPACITY") {
            branding.logo_opacity = raw.parse().map_err(|_| ConfigError::Invalid {
                key: "STUDIO_LOGO_OPACITY",
                message: format!("'{raw}' is not a number"),
            })?;
        }
        if let Some(raw) = lookup("STUDIO_UPSCALE") {
            branding.upscale = parse_bool("STUDIO_UPSCALE", &raw)?;
        }
        validate_branding(&branding)?;

        let logo_source = lookup("STUDIO_LOGO_PATH")
            .filter(|s| !s.is_empty())
            .map(|s| SourceRef::parse(&s));

        let output_dir: PathBuf = lookup("STUDIO_OUTPUT_DIR")
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.into())
            .into();

        Ok(Self {
            api_url,
            request_timeout,
            branding,
            logo_source,
            output_dir,
        })
    }
}

fn parse_bool(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            message: format!("'{raw}' is not a boolean"),
        }),
    }
}
