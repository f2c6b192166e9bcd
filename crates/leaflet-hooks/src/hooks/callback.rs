//! Bound callbacks: a shared reference to a caller-owned target plus the
//! method to call on it.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

type HookFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A method bound to a target object.
///
/// The callback keeps an `Arc` clone of the target, so the caller and the
/// host share it. The method is stored as a closure at bind time; the
/// method name is kept alongside for logging and inspection only and is
/// never looked up at dispatch.
#[derive(Clone)]
pub struct Callback {
    /// Identity of the bound target.
    target: Arc<dyn Any + Send + Sync>,
    /// Type name of the bound target.
    target_type: &'static str,
    /// Name of the bound method.
    method: String,
    /// The bound method.
    func: Arc<HookFn>,
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callback")
            .field("target_type", &self.target_type)
            .field("method", &self.method)
            .field("func", &"<closure>")
            .finish()
    }
}

impl Callback {
    /// Binds `method` on `target`.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use leaflet_hooks::Callback;
    /// use serde_json::{json, Value};
    ///
    /// struct Greeter;
    ///
    /// impl Greeter {
    ///     fn greet(&self, args: &[Value]) -> Value {
    ///         json!(format!("hello {}", args[0].as_str().unwrap_or("?")))
    ///     }
    /// }
    ///
    /// let greeter = Arc::new(Greeter);
    /// let callback = Callback::bind(&greeter, "greet", Greeter::greet);
    /// assert_eq!(callback.invoke(&[json!("map")]), json!("hello map"));
    /// assert!(callback.is_bound_to(&greeter));
    /// ```
    pub fn bind<T, F>(target: &Arc<T>, method: impl Into<String>, f: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&T, &[Value]) -> Value + Send + Sync + 'static,
    {
        let bound = Arc::clone(target);
        let func: Arc<HookFn> = Arc::new(move |args: &[Value]| f(bound.as_ref(), args));

        Self {
            target: target.clone(),
            target_type: std::any::type_name::<T>(),
            method: method.into(),
            func,
        }
    }

    /// Invokes the bound method with the given arguments.
    pub fn invoke(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    /// Returns the bound method's name.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the type name of the bound target.
    pub fn target_type(&self) -> &'static str {
        self.target_type
    }

    /// Returns whether this callback is bound to exactly this instance.
    pub fn is_bound_to<T: ?Sized>(&self, target: &Arc<T>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.target), Arc::as_ptr(target))
    }
}
