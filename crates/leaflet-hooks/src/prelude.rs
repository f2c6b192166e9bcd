//! Prelude for convenient imports.

pub use serde_json::{Value, json};

pub use crate::controller::PublicController;
pub use crate::hooks::callback::Callback;
pub use crate::hooks::definitions::{HookKind, ShortcodeArgs};
pub use crate::hooks::host::{HookHost, InMemoryHost};
pub use crate::hooks::registry::HookRegistry;
