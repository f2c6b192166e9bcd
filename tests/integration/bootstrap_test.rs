use serde_json::json;

use leaflet_hooks::{HookKind, RegistryState, ShortcodeArgs};
use leaflet_layers::plugin::PLUGIN_FILE;

use crate::helpers::{TILE_SERVER, TestApp};

#[test]
fn test_bootstrap_registers_filters_then_actions_then_shortcodes() {
    let app = TestApp::new();

    assert_eq!(app.registry.state(), RegistryState::Flushed);
    assert_eq!(
        app.registration_order(),
        vec![
            (HookKind::Filter, "plugin_action_links".to_string()),
            (HookKind::Filter, "the_content".to_string()),
            (HookKind::Action, "admin_menu".to_string()),
            (HookKind::Action, "wp_enqueue_scripts".to_string()),
            (HookKind::Shortcode, "leaflet_map".to_string()),
            (HookKind::Shortcode, "leaflet_layer".to_string()),
        ]
    );
}

#[test]
fn test_registrations_carry_priority_and_arg_count() {
    let app = TestApp::new();

    let links = &app.host.registrations()[0];
    assert_eq!(links.priority, Some(10));
    assert_eq!(links.accepted_args, Some(2));
    assert!(links.callback.is_bound_to(&app.plugin.admin));

    let content = &app.host.registrations()[1];
    assert_eq!(content.priority, Some(20));
    assert_eq!(content.accepted_args, Some(1));
    assert!(content.callback.is_bound_to(&app.plugin.filters));

    for shortcode in app.host.registrations_of(HookKind::Shortcode) {
        assert!(shortcode.callback.is_bound_to(&app.plugin.public));
        assert_eq!(shortcode.priority, None);
    }
}

#[test]
fn test_actions_reach_components() {
    let app = TestApp::new();

    assert_eq!(app.host.do_action("admin_menu", &[]), 1);
    assert_eq!(app.host.do_action("wp_enqueue_scripts", &[json!("ignored")]), 1);
    assert_eq!(app.host.do_action("unknown_hook", &[]), 0);

    assert_eq!(app.plugin.admin.menus(), vec!["leaflet-layers"]);
    assert_eq!(
        app.plugin.public.enqueued_assets(),
        vec!["leaflet.css", "leaflet.js"]
    );
}

#[test]
fn test_action_links_filter_receives_two_args() {
    let app = TestApp::new();

    let links = app.host.apply_filters(
        "plugin_action_links",
        json!(["<a>Deactivate</a>"]),
        &[json!(PLUGIN_FILE)],
    );

    let links = links.as_array().expect("array");
    assert_eq!(links.len(), 2);
    assert!(links[0].as_str().unwrap_or_default().contains("Settings"));
}

#[test]
fn test_shortcode_output_flows_through_content_filter() {
    let app = TestApp::new();

    let map = app
        .host
        .do_shortcode("leaflet_map", &ShortcodeArgs::default().with_attribute("zoom", "4"))
        .expect("leaflet_map registered");
    assert!(map.contains(TILE_SERVER));
    assert!(map.contains("data-zoom=\"4\""));

    let content = app.host.apply_filters("the_content", json!(map), &[]);
    let content = content.as_str().expect("string");
    assert!(content.starts_with("<div class=\"leaflet-layers-content\">"));

    let layer = app
        .host
        .do_shortcode(
            "leaflet_layer",
            &ShortcodeArgs::default()
                .with_attribute("url", "/geo.json")
                .with_content("Rivers"),
        )
        .expect("leaflet_layer registered");
    assert_eq!(
        layer,
        "<div class=\"leaflet-layer\" data-url=\"/geo.json\">Rivers</div>"
    );
}

#[test]
fn test_second_flush_doubles_every_registration() {
    let mut app = TestApp::new();
    let first = app.host.registrations().len();

    app.registry.initialize(&mut app.host);

    assert_eq!(app.registry.flush_count(), 2);
    assert_eq!(app.host.registrations().len(), first * 2);
    assert_eq!(app.host.do_action("admin_menu", &[]), 2);
    assert_eq!(app.plugin.admin.menus().len(), 2);
}
