//! Hook registry — collects action, filter, and shortcode bindings during
//! plugin bootstrap and flushes them into the host in one pass.
//!
//! The registry has two states. It starts `Accumulating`; the first
//! [`HookRegistry::initialize`] moves it to `Flushed`. Nothing stops a second
//! flush, and a second flush registers every record again.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::callback::Callback;
use super::definitions::{
    BindingRecord, DEFAULT_ACCEPTED_ARGS, DEFAULT_PRIORITY, HookKind, ShortcodeArgs, ShortcodeFn,
    ShortcodeRecord,
};
use super::host::HookHost;
use crate::controller::PublicController;

/// Lifecycle of a [`HookRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryState {
    /// `add_*` calls are being collected.
    Accumulating,
    /// `initialize` has run at least once.
    Flushed,
}

/// Deferred registry of hook bindings.
///
/// `C` is the public controller type. Every shortcode binds to the one
/// controller instance the registry was created with; actions and filters
/// bind to whatever target the caller supplies.
#[derive(Debug)]
pub struct HookRegistry<C: PublicController> {
    /// Target of every shortcode callback.
    controller: Arc<C>,
    /// Pending filters, in insertion order.
    filters: Vec<BindingRecord>,
    /// Pending actions, in insertion order.
    actions: Vec<BindingRecord>,
    /// Pending shortcodes, in insertion order.
    shortcodes: Vec<ShortcodeRecord<C>>,
    state: RegistryState,
    flush_count: usize,
}

impl<C: PublicController> HookRegistry<C> {
    /// Creates an empty registry whose shortcodes bind to `controller`.
    pub fn new(controller: Arc<C>) -> Self {
        Self {
            controller,
            filters: Vec::new(),
            actions: Vec::new(),
            shortcodes: Vec::new(),
            state: RegistryState::Accumulating,
            flush_count: 0,
        }
    }

    /// Queues an action with the default priority and argument count.
    pub fn add_action(&mut self, hook: impl Into<String>, callback: Callback) {
        self.add_action_with(hook, callback, DEFAULT_PRIORITY, DEFAULT_ACCEPTED_ARGS);
    }

    /// Queues an action.
    pub fn add_action_with(
        &mut self,
        hook: impl Into<String>,
        callback: Callback,
        priority: i32,
        accepted_args: usize,
    ) {
        Self::push_binding(
            self.state,
            &mut self.actions,
            HookKind::Action,
            hook.into(),
            callback,
            priority,
            accepted_args,
        );
    }

    /// Queues a filter with the default priority and argument count.
    pub fn add_filter(&mut self, hook: impl Into<String>, callback: Callback) {
        self.add_filter_with(hook, callback, DEFAULT_PRIORITY, DEFAULT_ACCEPTED_ARGS);
    }

    /// Queues a filter.
    pub fn add_filter_with(
        &mut self,
        hook: impl Into<String>,
        callback: Callback,
        priority: i32,
        accepted_args: usize,
    ) {
        Self::push_binding(
            self.state,
            &mut self.filters,
            HookKind::Filter,
            hook.into(),
            callback,
            priority,
            accepted_args,
        );
    }

    /// Queues a shortcode rendered by `render`, the controller method
    /// named `function_name`.
    pub fn add_shortcode(
        &mut self,
        tag: impl Into<String>,
        function_name: impl Into<String>,
        render: ShortcodeFn<C>,
    ) {
        let record = ShortcodeRecord {
            tag: tag.into(),
            function_name: function_name.into(),
            render,
        };

        warn_if_flushed(self.state, HookKind::Shortcode, &record.tag);
        debug!(
            tag = %record.tag,
            function = %record.function_name,
            "Shortcode queued"
        );

        self.shortcodes.push(record);
    }

    /// Flushes every queued binding into `host`: all filters, then all
    /// actions, then all shortcodes, each in insertion order.
    pub fn initialize<H: HookHost + ?Sized>(&mut self, host: &mut H) {
        if self.state == RegistryState::Flushed {
            warn!(
                flush_count = self.flush_count,
                "Hook registry flushed again; every binding will be registered twice"
            );
        }

        for record in &self.filters {
            host.add_filter(
                &record.hook,
                record.callback.clone(),
                record.priority,
                record.accepted_args,
            );
        }

        for record in &self.actions {
            host.add_action(
                &record.hook,
                record.callback.clone(),
                record.priority,
                record.accepted_args,
            );
        }

        for record in &self.shortcodes {
            host.add_shortcode(&record.tag, self.bind_shortcode(record));
        }

        self.state = RegistryState::Flushed;
        self.flush_count += 1;

        info!(
            filters = self.filters.len(),
            actions = self.actions.len(),
            shortcodes = self.shortcodes.len(),
            "Hook registry flushed"
        );
    }

    /// Returns queued filters in insertion order.
    pub fn filters(&self) -> &[BindingRecord] {
        &self.filters
    }

    /// Returns queued actions in insertion order.
    pub fn actions(&self) -> &[BindingRecord] {
        &self.actions
    }

    /// Returns queued shortcodes in insertion order.
    pub fn shortcodes(&self) -> &[ShortcodeRecord<C>] {
        &self.shortcodes
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> RegistryState {
        self.state
    }

    /// Returns how many times `initialize` has run.
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// Returns the controller shortcodes bind to.
    pub fn controller(&self) -> &Arc<C> {
        &self.controller
    }

    /// Appends to one of the binding sequences. The only insertion path for
    /// actions and filters.
    fn push_binding(
        state: RegistryState,
        sequence: &mut Vec<BindingRecord>,
        kind: HookKind,
        hook: String,
        callback: Callback,
        priority: i32,
        accepted_args: usize,
    ) {
        warn_if_flushed(state, kind, &hook);
        debug!(
            kind = %kind,
            hook = %hook,
            target_type = callback.target_type(),
            method = callback.method(),
            priority = priority,
            accepted_args = accepted_args,
            "Binding queued"
        );

        sequence.push(BindingRecord {
            hook,
            callback,
            priority,
            accepted_args,
        });
    }

    fn bind_shortcode(&self, record: &ShortcodeRecord<C>) -> Callback {
        let render = record.render;
        Callback::bind(
            &self.controller,
            record.function_name.clone(),
            move |controller: &C, args: &[Value]| {
                Value::String(render(controller, &ShortcodeArgs::from_args(args)))
            },
        )
    }
}

fn warn_if_flushed(state: RegistryState, kind: HookKind, name: &str) {
    if state == RegistryState::Flushed {
        warn!(
            kind = %kind,
            name = %name,
            "Binding queued after flush; it reaches the host only if initialize runs again"
        );
    }
}
