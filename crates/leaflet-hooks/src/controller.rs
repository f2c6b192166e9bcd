//! The public controller — the single type shortcodes may bind to.

/// Marker for the type that owns every shortcode renderer.
///
/// Actions and filters accept any target. Shortcodes do not: a
/// [`HookRegistry`](crate::HookRegistry) is created with one controller
/// instance and every shortcode it flushes is bound to that instance.
pub trait PublicController: Send + Sync + 'static {}
