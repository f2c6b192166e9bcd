//! Leaflet Layers — plugin bootstrap.
//!
//! Loads configuration, wires the plugin components into a hook registry,
//! flushes the registry into an in-memory host, and fires the hooks a
//! page request would fire.

use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt};

use leaflet_core::config::AppConfig;
use leaflet_core::error::AppError;
use leaflet_core::result::AppResult;
use leaflet_hooks::{InMemoryHost, ShortcodeArgs};
use leaflet_layers::LeafletLayers;
use leaflet_layers::plugin::PLUGIN_FILE;

fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config) {
        tracing::error!("Bootstrap error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> AppResult<AppConfig> {
    match std::env::var("LEAFLET_CONFIG") {
        Ok(path) => AppConfig::load_from(&path),
        Err(_) => {
            let env = std::env::var("LEAFLET_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Bootstrap the plugin and drive one simulated request through the host.
fn run(config: AppConfig) -> AppResult<()> {
    let span = tracing::info_span!("plugin", name = %config.plugin.name);
    let _guard = span.enter();

    tracing::info!("Bootstrapping {} v{}", config.plugin.name, config.plugin.version);

    let plugin = LeafletLayers::new("https://tile.openstreetmap.org");
    let mut host = InMemoryHost::new();
    plugin.run(&mut host);

    host.do_action("admin_menu", &[]);
    host.do_action("wp_enqueue_scripts", &[]);

    let links = host.apply_filters(
        "plugin_action_links",
        json!(["<a>Deactivate</a>"]),
        &[json!(PLUGIN_FILE)],
    );

    let map = host
        .do_shortcode(
            "leaflet_map",
            &ShortcodeArgs::default()
                .with_attribute("lat", "48.8566")
                .with_attribute("lng", "2.3522"),
        )
        .ok_or_else(|| AppError::bootstrap("leaflet_map shortcode was not registered"))?;

    let content = host.apply_filters("the_content", json!(map), &[]);

    tracing::info!(
        menus = ?plugin.admin.menus(),
        assets = ?plugin.public.enqueued_assets(),
        links = %links,
        "Request hooks fired"
    );

    println!("{}", serde_json::to_string_pretty(&content)?);

    Ok(())
}
