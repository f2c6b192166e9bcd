//! Leaflet Layers — map embedding plugin.
//!
//! The plugin's components are built once at bootstrap, their hooks are
//! queued on a [`HookRegistry`], and the registry is flushed into the host.

pub mod plugin;

use std::sync::Arc;

use leaflet_hooks::{HookHost, HookRegistry};
use tracing::info;

use crate::plugin::{AdminController, ContentFilters, PublicMapController};

/// The plugin's long-lived components. Callers own these; the registry and
/// the host only hold shared references.
#[derive(Debug, Clone)]
pub struct LeafletLayers {
    /// Shortcode renderer and front-end asset loader.
    pub public: Arc<PublicMapController>,
    /// Admin screens.
    pub admin: Arc<AdminController>,
    /// Content filters.
    pub filters: Arc<ContentFilters>,
}

impl LeafletLayers {
    /// Builds the plugin components.
    pub fn new(tile_server: impl Into<String>) -> Self {
        Self {
            public: Arc::new(PublicMapController::new(tile_server)),
            admin: Arc::new(AdminController::default()),
            filters: Arc::new(ContentFilters::default()),
        }
    }

    /// Creates a registry bound to the public controller and queues every
    /// hook the plugin needs.
    pub fn registry(&self) -> HookRegistry<PublicMapController> {
        let mut registry = HookRegistry::new(self.public.clone());
        plugin::define_admin_hooks(&mut registry, &self.admin);
        plugin::define_public_hooks(&mut registry, &self.public, &self.filters);
        registry
    }

    /// Queues and flushes every hook into `host`.
    pub fn run<H: HookHost + ?Sized>(&self, host: &mut H) -> HookRegistry<PublicMapController> {
        let mut registry = self.registry();
        registry.initialize(host);

        info!(
            filters = registry.filters().len(),
            actions = registry.actions().len(),
            shortcodes = registry.shortcodes().len(),
            "Leaflet Layers hooks registered"
        );

        registry
    }
}
