//! Record types held by the registry while it accumulates bindings.

use std::collections::BTreeMap;

use serde_json::Value;

use super::callback::Callback;

/// Priority used when the caller does not pass one. Lower runs earlier.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Number of arguments handed to a callback when the caller does not say.
pub const DEFAULT_ACCEPTED_ARGS: usize = 1;

/// The three kinds of binding the host knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Value-transformation point; return values are chained.
    Filter,
    /// Notification point; return values are discarded.
    Action,
    /// Textual placeholder rendered by a callback.
    Shortcode,
}

impl HookKind {
    /// Returns the string name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filter => "filter",
            Self::Action => "action",
            Self::Shortcode => "shortcode",
        }
    }
}

impl std::fmt::Display for HookKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A pending action or filter binding.
#[derive(Debug, Clone)]
pub struct BindingRecord {
    /// Name of the event or filter point.
    pub hook: String,
    /// Target object and method to invoke.
    pub callback: Callback,
    /// Ordering key among callbacks on the same hook.
    pub priority: i32,
    /// How many arguments the host passes to the callback.
    pub accepted_args: usize,
}

/// Signature of a shortcode method on the public controller `C`.
pub type ShortcodeFn<C> = fn(&C, &ShortcodeArgs) -> String;

/// A pending shortcode binding. The target is always the registry's
/// public controller, so only the method is recorded.
pub struct ShortcodeRecord<C> {
    /// Shortcode tag, e.g. `leaflet_map`.
    pub tag: String,
    /// Name of the controller method that renders the tag.
    pub function_name: String,
    /// The controller method itself.
    pub render: ShortcodeFn<C>,
}

impl<C> Clone for ShortcodeRecord<C> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            function_name: self.function_name.clone(),
            render: self.render,
        }
    }
}

impl<C> std::fmt::Debug for ShortcodeRecord<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcodeRecord")
            .field("tag", &self.tag)
            .field("function_name", &self.function_name)
            .field("render", &"<fn>")
            .finish()
    }
}

/// Arguments the host hands to a shortcode callback: the parsed
/// attributes, the enclosed content (if any), and the tag that matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeArgs {
    /// Attribute name → raw value.
    pub attributes: BTreeMap<String, String>,
    /// Enclosed content for `[tag]...[/tag]` usage.
    pub content: Option<String>,
    /// The tag being rendered.
    pub tag: String,
}

impl ShortcodeArgs {
    /// Creates empty arguments for a tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Sets the enclosed content.
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Gets an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Flattens into the host's positional argument list
    /// `[attributes, content, tag]`.
    pub fn to_args(&self) -> Vec<Value> {
        let attributes = self
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        vec![
            Value::Object(attributes),
            self.content
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
            Value::String(self.tag.clone()),
        ]
    }

    /// Rebuilds from a positional argument list. Missing or mistyped
    /// positions fall back to empty values; non-string attribute values
    /// are rendered with their JSON text.
    pub fn from_args(args: &[Value]) -> Self {
        let attributes = match args.first() {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect(),
            _ => BTreeMap::new(),
        };

        let content = args.get(1).and_then(Value::as_str).map(str::to_string);

        let tag = args
            .get(2)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self {
            attributes,
            content,
            tag,
        }
    }
}
