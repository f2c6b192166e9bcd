//! Hook system — deferred registry, bound callbacks, and the host boundary.

pub mod callback;
pub mod definitions;
pub mod host;
pub mod registry;

pub use callback::Callback;
pub use definitions::{BindingRecord, HookKind, ShortcodeArgs, ShortcodeRecord};
pub use host::{HookHost, InMemoryHost, Registration};
pub use registry::{HookRegistry, RegistryState};
