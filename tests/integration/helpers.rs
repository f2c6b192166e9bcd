//! Shared test helpers for integration tests.

use leaflet_hooks::{HookKind, HookRegistry, InMemoryHost};
use leaflet_layers::LeafletLayers;
use leaflet_layers::plugin::PublicMapController;

/// Tile server used by every test plugin instance.
pub const TILE_SERVER: &str = "https://tiles.test";

/// Test application context
pub struct TestApp {
    /// The plugin components
    pub plugin: LeafletLayers,
    /// Host the registry was flushed into
    pub host: InMemoryHost,
    /// The flushed registry
    pub registry: HookRegistry<PublicMapController>,
}

impl TestApp {
    /// Bootstrap a plugin into a fresh host
    pub fn new() -> Self {
        let plugin = LeafletLayers::new(TILE_SERVER);
        let mut host = InMemoryHost::new();
        let registry = plugin.run(&mut host);

        Self {
            plugin,
            host,
            registry,
        }
    }

    /// Names registered with the host, tagged with their kind, in call order
    pub fn registration_order(&self) -> Vec<(HookKind, String)> {
        self.host
            .registrations()
            .iter()
            .map(|r| (r.kind, r.name.clone()))
            .collect()
    }
}
