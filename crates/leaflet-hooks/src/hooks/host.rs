//! Host boundary — the registration primitives the registry flushes into,
//! and an in-memory host that stores and dispatches them.
//!
//! Dispatch rules of [`InMemoryHost`]:
//! - Callbacks on a hook run in ascending priority; equal priorities run in
//!   registration order.
//! - Each callback receives at most its `accepted_args` arguments.
//! - Unknown hook names are a silent no-op.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, trace};

use super::callback::Callback;
use super::definitions::{HookKind, ShortcodeArgs};

/// The host platform's hook registration primitives.
///
/// All three are infallible from the caller's point of view; whatever the
/// host does with a malformed name is its own business.
pub trait HookHost {
    /// Registers a filter callback.
    fn add_filter(&mut self, hook: &str, callback: Callback, priority: i32, accepted_args: usize);

    /// Registers an action callback.
    fn add_action(&mut self, hook: &str, callback: Callback, priority: i32, accepted_args: usize);

    /// Registers a shortcode callback.
    fn add_shortcode(&mut self, tag: &str, callback: Callback);
}

/// One call received by the host, in the order it arrived.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Which primitive was called.
    pub kind: HookKind,
    /// Hook name or shortcode tag.
    pub name: String,
    /// The registered callback.
    pub callback: Callback,
    /// Priority (filters and actions only).
    pub priority: Option<i32>,
    /// Accepted argument count (filters and actions only).
    pub accepted_args: Option<usize>,
}

/// Entry in a per-hook handler list.
#[derive(Debug, Clone)]
struct HostEntry {
    /// The callback.
    callback: Callback,
    /// Priority (lower = earlier execution).
    priority: i32,
    /// Maximum number of arguments passed on dispatch.
    accepted_args: usize,
}

/// A complete host kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    /// Every registration in arrival order.
    registrations: Vec<Registration>,
    /// Filter name → handlers sorted by priority.
    filters: HashMap<String, Vec<HostEntry>>,
    /// Action name → handlers sorted by priority.
    actions: HashMap<String, Vec<HostEntry>>,
    /// Shortcode tag → callback. Last registration wins.
    shortcodes: HashMap<String, Callback>,
}

impl InMemoryHost {
    /// Creates an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every registration received, in arrival order.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Returns the registrations of one kind, in arrival order.
    pub fn registrations_of(&self, kind: HookKind) -> Vec<&Registration> {
        self.registrations
            .iter()
            .filter(|r| r.kind == kind)
            .collect()
    }

    /// Runs every action callback registered on `hook`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn do_action(&self, hook: &str, args: &[Value]) -> usize {
        let Some(entries) = self.actions.get(hook) else {
            trace!(hook = %hook, "No action handlers registered");
            return 0;
        };

        debug!(hook = %hook, handler_count = entries.len(), "Dispatching action");

        for entry in entries {
            let passed = &args[..args.len().min(entry.accepted_args)];
            entry.callback.invoke(passed);
        }

        entries.len()
    }

    /// Chains `value` through every filter callback registered on `hook`.
    ///
    /// Each callback is called with `[value, extra...]` truncated to its
    /// accepted argument count, and its return value becomes the next
    /// callback's `value`.
    pub fn apply_filters(&self, hook: &str, value: Value, extra: &[Value]) -> Value {
        let Some(entries) = self.filters.get(hook) else {
            trace!(hook = %hook, "No filter handlers registered");
            return value;
        };

        debug!(hook = %hook, handler_count = entries.len(), "Applying filters");

        entries.iter().fold(value, |current, entry| {
            let mut args = Vec::with_capacity(1 + extra.len());
            args.push(current);
            args.extend_from_slice(extra);
            args.truncate(entry.accepted_args);

            // A callback that takes no arguments still produces the new value.
            entry.callback.invoke(&args)
        })
    }

    /// Renders a shortcode. Returns `None` when the tag is unknown.
    pub fn do_shortcode(&self, tag: &str, args: &ShortcodeArgs) -> Option<String> {
        let callback = self.shortcodes.get(tag)?;

        let mut args = args.clone();
        args.tag = tag.to_string();

        let rendered = match callback.invoke(&args.to_args()) {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };

        Some(rendered)
    }

    /// Returns whether any action callbacks are registered on `hook`.
    pub fn has_action(&self, hook: &str) -> bool {
        self.actions.get(hook).is_some_and(|e| !e.is_empty())
    }

    /// Returns whether any filter callbacks are registered on `hook`.
    pub fn has_filter(&self, hook: &str) -> bool {
        self.filters.get(hook).is_some_and(|e| !e.is_empty())
    }

    /// Returns whether a shortcode is registered for `tag`.
    pub fn has_shortcode(&self, tag: &str) -> bool {
        self.shortcodes.contains_key(tag)
    }

    /// Returns the number of callbacks of `kind` registered under `name`.
    pub fn handler_count(&self, kind: HookKind, name: &str) -> usize {
        match kind {
            HookKind::Filter => self.filters.get(name).map(Vec::len).unwrap_or(0),
            HookKind::Action => self.actions.get(name).map(Vec::len).unwrap_or(0),
            HookKind::Shortcode => usize::from(self.shortcodes.contains_key(name)),
        }
    }

    fn insert_entry(
        table: &mut HashMap<String, Vec<HostEntry>>,
        hook: &str,
        callback: Callback,
        priority: i32,
        accepted_args: usize,
    ) {
        let entries = table.entry(hook.to_string()).or_default();
        entries.push(HostEntry {
            callback,
            priority,
            accepted_args,
        });

        // Stable, so equal priorities keep registration order.
        entries.sort_by_key(|e| e.priority);
    }
}

impl HookHost for InMemoryHost {
    fn add_filter(&mut self, hook: &str, callback: Callback, priority: i32, accepted_args: usize) {
        self.registrations.push(Registration {
            kind: HookKind::Filter,
            name: hook.to_string(),
            callback: callback.clone(),
            priority: Some(priority),
            accepted_args: Some(accepted_args),
        });
        Self::insert_entry(&mut self.filters, hook, callback, priority, accepted_args);
    }

    fn add_action(&mut self, hook: &str, callback: Callback, priority: i32, accepted_args: usize) {
        self.registrations.push(Registration {
            kind: HookKind::Action,
            name: hook.to_string(),
            callback: callback.clone(),
            priority: Some(priority),
            accepted_args: Some(accepted_args),
        });
        Self::insert_entry(&mut self.actions, hook, callback, priority, accepted_args);
    }

    fn add_shortcode(&mut self, tag: &str, callback: Callback) {
        self.registrations.push(Registration {
            kind: HookKind::Shortcode,
            name: tag.to_string(),
            callback: callback.clone(),
            priority: None,
            accepted_args: None,
        });
        self.shortcodes.insert(tag.to_string(), callback);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    #[derive(Debug, Default)]
    struct Journal {
        entries: Mutex<Vec<String>>,
    }

    impl Journal {
        fn entries(&self) -> Vec<String> {
            self.entries.lock().expect("journal lock").clone()
        }

        fn note(&self, label: &str, args: &[Value]) {
            self.entries
                .lock()
                .expect("journal lock")
                .push(format!("{label}:{}", args.len()));
        }
    }

    fn noting(journal: &Arc<Journal>, label: &'static str) -> Callback {
        Callback::bind(journal, label, move |j: &Journal, args: &[Value]| {
            j.note(label, args);
            Value::Null
        })
    }

    #[test]
    fn test_actions_run_by_priority_then_registration_order() {
        let journal = Arc::new(Journal::default());
        let mut host = InMemoryHost::new();

        host.add_action("init", noting(&journal, "late"), 20, 1);
        host.add_action("init", noting(&journal, "first"), 10, 1);
        host.add_action("init", noting(&journal, "second"), 10, 1);
        host.add_action("init", noting(&journal, "early"), 1, 1);

        assert_eq!(host.do_action("init", &[json!("x")]), 4);
        assert_eq!(
            journal.entries(),
            vec!["early:1", "first:1", "second:1", "late:1"]
        );
    }

    #[test]
    fn test_accepted_args_truncates() {
        let journal = Arc::new(Journal::default());
        let mut host = InMemoryHost::new();

        host.add_action("save_post", noting(&journal, "none"), 10, 0);
        host.add_action("save_post", noting(&journal, "two"), 10, 2);
        host.add_action("save_post", noting(&journal, "many"), 10, 9);

        host.do_action("save_post", &[json!(1), json!(2), json!(3)]);
        assert_eq!(journal.entries(), vec!["none:0", "two:2", "many:3"]);
    }

    #[test]
    fn test_unknown_hooks_are_noops() {
        let host = InMemoryHost::new();
        assert_eq!(host.do_action("nothing_here", &[]), 0);

        let filtered = host.apply_filters("nothing_here", json!("v"), &[]);
        assert_eq!(filtered, json!("v"));

        let rendered = host.do_shortcode("nothing_here", &ShortcodeArgs::default());
        assert!(rendered.is_none());

        assert!(!host.has_action("nothing_here"));
        assert!(!host.has_filter("nothing_here"));
        assert!(!host.has_shortcode("nothing_here"));
    }

    #[test]
    fn test_has_handlers_after_registration() {
        let journal = Arc::new(Journal::default());
        let mut host = InMemoryHost::new();

        host.add_action("init", noting(&journal, "init"), 10, 1);
        host.add_shortcode("leaflet_map", noting(&journal, "map"));

        assert!(host.has_action("init"));
        assert!(!host.has_action("leaflet_map"));
        assert!(!host.has_filter("init"));

        assert!(host.has_shortcode("leaflet_map"));
        assert!(!host.has_shortcode("init"));
        assert!(!host.has_shortcode("leaflet_layer"));
    }

    #[test]
    fn test_filters_chain_values() {
        #[derive(Debug)]
        struct Suffix(&'static str);

        let a = Arc::new(Suffix("-a"));
        let b = Arc::new(Suffix("-b"));
        let mut host = InMemoryHost::new();

        let append = |s: &Suffix, args: &[Value]| {
            json!(format!("{}{}", args[0].as_str().unwrap_or_default(), s.0))
        };
        host.add_filter("the_title", Callback::bind(&b, "append", append), 20, 1);
        host.add_filter("the_title", Callback::bind(&a, "append", append), 5, 1);

        let out = host.apply_filters("the_title", json!("t"), &[json!(42)]);
        assert_eq!(out, json!("t-a-b"));
        assert!(host.has_filter("the_title"));
        assert_eq!(host.handler_count(HookKind::Filter, "the_title"), 2);
    }

    #[test]
    fn test_shortcode_replaced_on_reregistration() {
        #[derive(Debug)]
        struct Renderer;

        let renderer = Arc::new(Renderer);
        let mut host = InMemoryHost::new();
        let old = |_: &Renderer, _: &[Value]| json!("old");
        host.add_shortcode("map", Callback::bind(&renderer, "old", old));
        host.add_shortcode(
            "map",
            Callback::bind(&renderer, "new", |_: &Renderer, args: &[Value]| {
                let args = ShortcodeArgs::from_args(args);
                json!(format!("<div data-tag=\"{}\"></div>", args.tag))
            }),
        );

        let rendered = host.do_shortcode("map", &ShortcodeArgs::default());
        assert_eq!(rendered.as_deref(), Some("<div data-tag=\"map\"></div>"));
        assert_eq!(host.registrations_of(HookKind::Shortcode).len(), 2);
        assert_eq!(host.handler_count(HookKind::Shortcode, "map"), 1);
    }
}
