//! Branding configuration store and brand-logo registry.

use std::sync::Arc;

use indexmap::IndexMap;
use laparis_core::catalog::default_logo;
use laparis_core::types::{BrandLogo, BrandingConfig, BrandingUpdate, LogoId, SourceRef};
use tokio::sync::RwLock;

/// Holds the process-lifetime branding configuration.
///
/// Updates are field-level merges and are not validated; see
/// [`laparis_core::validation`] for opt-in boundary checks.
#[derive(Clone, Default)]
pub struct BrandingStore {
    config: Arc<RwLock<BrandingConfig>>,
}

impl BrandingStore {
    pub fn new(config: BrandingConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// Snapshot of the current configuration.
    pub async fn get(&self) -> BrandingConfig {
        self.config.read().await.clone()
    }

    /// Merge `update` into the configuration and return the result.
    pub async fn update(&self, update: BrandingUpdate) -> BrandingConfig {
        let mut config = self.config.write().await;
        update.apply(&mut config);
        tracing::debug!(preset = %config.active_preset, logo_visible = config.logo_visible, "Branding updated");
        config.clone()
    }
}

/// Logos the user can pick from. Always contains the default logo; logos
/// can be added but never removed.
#[derive(Clone)]
pub struct LogoRegistry {
    logos: Arc<RwLock<IndexMap<LogoId, BrandLogo>>>,
}

impl Default for LogoRegistry {
    fn default() -> Self {
        let default = default_logo();
        let mut logos = IndexMap::new();
        logos.insert(default.id.clone(), default);
        Self {
            logos: Arc::new(RwLock::new(logos)),
        }
    }
}

impl LogoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new logo under a fresh identity.
    pub async fn add(&self, name: impl Into<String>, source: SourceRef) -> LogoId {
        let logo = BrandLogo {
            id: LogoId::generate(),
            name: name.into(),
            source,
        };
        let id = logo.id.clone();
        tracing::info!(logo_id = %id, name = %logo.name, "Brand logo added");
        self.logos.write().await.insert(id.clone(), logo);
        id
    }

    pub async fn get(&self, id: &LogoId) -> Option<BrandLogo> {
        self.logos.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &LogoId) -> bool {
        self.logos.read().await.contains_key(id)
    }

    pub async fn list(&self) -> Vec<BrandLogo> {
        self.logos.read().await.values().cloned().collect()
    }
}
