//! Plugin components and the hooks they register.

use std::sync::{Arc, Mutex, PoisonError};

use leaflet_hooks::prelude::*;

/// Slug of the admin settings page.
pub const SETTINGS_SLUG: &str = "leaflet-layers";

/// Main plugin file as the host identifies it.
pub const PLUGIN_FILE: &str = "leaflet-layers/leaflet-layers.php";

/// Renders maps on the public side. Every shortcode binds here.
#[derive(Debug)]
pub struct PublicMapController {
    tile_server: String,
    enqueued: Mutex<Vec<String>>,
}

impl PublicController for PublicMapController {}

impl PublicMapController {
    /// Creates a controller rendering tiles from `tile_server`.
    pub fn new(tile_server: impl Into<String>) -> Self {
        Self {
            tile_server: tile_server.into(),
            enqueued: Mutex::new(Vec::new()),
        }
    }

    /// `[leaflet_map lat=".." lng=".." zoom=".."]`
    pub fn render_map(&self, args: &ShortcodeArgs) -> String {
        format!(
            "<div class=\"leaflet-map\" data-tiles=\"{}\" data-lat=\"{}\" data-lng=\"{}\" data-zoom=\"{}\"></div>",
            self.tile_server,
            args.attribute("lat").unwrap_or("51.505"),
            args.attribute("lng").unwrap_or("-0.09"),
            args.attribute("zoom").unwrap_or("13"),
        )
    }

    /// `[leaflet_layer url=".."]title[/leaflet_layer]`
    pub fn render_layer(&self, args: &ShortcodeArgs) -> String {
        format!(
            "<div class=\"leaflet-layer\" data-url=\"{}\">{}</div>",
            args.attribute("url").unwrap_or_default(),
            args.content.as_deref().unwrap_or_default(),
        )
    }

    /// Action: queue the front-end stylesheet and script.
    pub fn enqueue_assets(&self, _args: &[Value]) -> Value {
        let mut enqueued = self.enqueued.lock().unwrap_or_else(PoisonError::into_inner);
        enqueued.push("leaflet.css".to_string());
        enqueued.push("leaflet.js".to_string());
        Value::Null
    }

    /// Returns the assets queued so far.
    pub fn enqueued_assets(&self) -> Vec<String> {
        self.enqueued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Admin-side screens.
#[derive(Debug, Default)]
pub struct AdminController {
    menus: Mutex<Vec<String>>,
}

impl AdminController {
    /// Action: add the settings page to the admin menu.
    pub fn add_menu(&self, _args: &[Value]) -> Value {
        self.menus
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SETTINGS_SLUG.to_string());
        Value::Null
    }

    /// Filter: prepend a settings link to this plugin's action links.
    /// Receives `[links, plugin_file]`.
    pub fn action_links(&self, args: &[Value]) -> Value {
        let mut links = match args.first() {
            Some(Value::Array(links)) => links.clone(),
            _ => Vec::new(),
        };

        if args.get(1).and_then(Value::as_str) == Some(PLUGIN_FILE) {
            links.insert(
                0,
                json!(format!(
                    "<a href=\"options-general.php?page={SETTINGS_SLUG}\">Settings</a>"
                )),
            );
        }

        Value::Array(links)
    }

    /// Returns the admin menu slugs added so far.
    pub fn menus(&self) -> Vec<String> {
        self.menus
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Post content filters.
#[derive(Debug, Default)]
pub struct ContentFilters;

impl ContentFilters {
    /// Filter: wrap content that embeds a map so the stylesheet can size it.
    pub fn wrap_maps(&self, args: &[Value]) -> Value {
        match args.first() {
            Some(Value::String(content)) if content.contains("leaflet-map") => {
                let wrapped = format!("<div class=\"leaflet-layers-content\">{content}</div>");
                Value::String(wrapped)
            }
            Some(other) => other.clone(),
            None => Value::Null,
        }
    }
}

/// Queues the admin-side hooks.
pub fn define_admin_hooks(
    registry: &mut HookRegistry<PublicMapController>,
    admin: &Arc<AdminController>,
) {
    registry.add_action(
        "admin_menu",
        Callback::bind(admin, "add_menu", AdminController::add_menu),
    );
    registry.add_filter_with(
        "plugin_action_links",
        Callback::bind(admin, "action_links", AdminController::action_links),
        10,
        2,
    );
}

/// Queues the public-side hooks and shortcodes.
pub fn define_public_hooks(
    registry: &mut HookRegistry<PublicMapController>,
    public: &Arc<PublicMapController>,
    filters: &Arc<ContentFilters>,
) {
    registry.add_action(
        "wp_enqueue_scripts",
        Callback::bind(public, "enqueue_assets", PublicMapController::enqueue_assets),
    );
    registry.add_filter_with(
        "the_content",
        Callback::bind(filters, "wrap_maps", ContentFilters::wrap_maps),
        20,
        1,
    );
    registry.add_shortcode("leaflet_map", "render_map", PublicMapController::render_map);
    registry.add_shortcode(
        "leaflet_layer",
        "render_layer",
        PublicMapController::render_layer,
    );
}
