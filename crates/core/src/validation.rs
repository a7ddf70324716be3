//! Boundary checks for branding values arriving from outside the process
//! (environment, config files).
//!
//! In-process updates through the branding store are deliberately not
//! routed through here; callers that want the checks opt in.

use crate::catalog::{find_color, find_preset, PRESETS};
use crate::error::CoreError;
use crate::types::BrandingConfig;

pub const MIN_OPACITY: f32 = 0.0;
pub const MAX_OPACITY: f32 = 1.0;

/// Validate that a logo opacity lies in `0.0..=1.0`.
pub fn validate_opacity(opacity: f32) -> Result<(), CoreError> {
    if !(MIN_OPACITY..=MAX_OPACITY).contains(&opacity) {
        return Err(CoreError::Validation(format!(
            "Logo opacity must be between {MIN_OPACITY} and {MAX_OPACITY}, got {opacity}"
        )));
    }
    Ok(())
}

/// Validate that `id` names a preset from the static catalog.
pub fn validate_preset_id(id: &str) -> Result<(), CoreError> {
    if find_preset(id).is_some() {
        Ok(())
    } else {
        let valid: Vec<&str> = PRESETS.iter().map(|p| p.id).collect();
        Err(CoreError::Validation(format!(
            "Unknown preset '{id}'. Valid presets: {}",
            valid.join(", ")
        )))
    }
}

/// Validate that `name` is one of the catalog colour swatches.
pub fn validate_color_name(name: &str) -> Result<(), CoreError> {
    if find_color(name).is_some() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Unknown colour '{name}'")))
    }
}

/// Run every boundary check against a whole configuration.
pub fn validate_branding(config: &BrandingConfig) -> Result<(), CoreError> {
    validate_opacity(config.logo_opacity)?;
    validate_preset_id(&config.active_preset)?;
    if let Some(color) = &config.selected_color {
        validate_color_name(color)?;
    }
    Ok(())
}
