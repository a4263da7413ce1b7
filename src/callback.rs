//! Callback slots for component events.
//!
//! Components in this crate expose their events (load progress, session
//! completion, ...) as owned callback fields instead of inheriting from an
//! emitter type. A `Callback<T>` is a single optional handler; emitting is
//! an explicit method call on the owning component.

use std::fmt;

/// An optional event handler taking a borrowed payload.
pub struct Callback<T> {
    f: Option<Box<dyn Fn(&T)>>,
}

impl<T> Callback<T> {
    /// Create a callback from a handler function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&T) + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback (no handler).
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Invoke the handler with a payload, if one is set.
    pub fn emit(&self, value: &T) {
        if let Some(ref f) = self.f {
            f(value);
        }
    }

    /// Check if a handler is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl<T> Default for Callback<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> fmt::Debug for Callback<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("set", &self.is_some())
            .finish()
    }
}

/// An optional event handler taking no payload.
pub struct Callback0 {
    f: Option<Box<dyn Fn()>>,
}

impl Callback0 {
    /// Create a callback from a handler function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// Create an empty callback.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Invoke the handler, if one is set.
    pub fn emit(&self) {
        if let Some(ref f) = self.f {
            f();
        }
    }

    /// Check if a handler is set.
    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl Default for Callback0 {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for Callback0 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback0")
            .field("set", &self.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_empty_callback_is_noop() {
        let cb: Callback<u32> = Callback::none();
        cb.emit(&1);
        assert!(!cb.is_some());
    }

    #[test]
    fn test_callback_receives_payload() {
        let seen = Rc::new(Cell::new(0u32));
        let seen_inner = seen.clone();
        let cb = Callback::new(move |v: &u32| seen_inner.set(*v));

        cb.emit(&42);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_callback0_counts_invocations() {
        let count = Rc::new(Cell::new(0));
        let count_inner = count.clone();
        let cb = Callback0::new(move || count_inner.set(count_inner.get() + 1));

        cb.emit();
        cb.emit();
        assert_eq!(count.get(), 2);
    }
}
