//! # leaflet-hooks
//!
//! Deferred hook registration for Leaflet Layers. Provides:
//!
//! - A registry that queues action, filter, and shortcode bindings during
//!   bootstrap and flushes them into the host in one pass
//! - Bound callbacks holding a shared reference to their target
//! - The host boundary trait and an in-memory host that dispatches

pub mod controller;
pub mod hooks;
pub mod prelude;

pub use controller::PublicController;
pub use hooks::callback::Callback;
pub use hooks::definitions::{
    BindingRecord, DEFAULT_ACCEPTED_ARGS, DEFAULT_PRIORITY, HookKind, ShortcodeArgs,
    ShortcodeRecord,
};
pub use hooks::host::{HookHost, InMemoryHost, Registration};
pub use hooks::registry::{HookRegistry, RegistryState};
