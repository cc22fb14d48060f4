//! Observable value wrapper.
//!
//! A [`Property`] owns a value and a list of change listeners. Setting a
//! value that differs from the current one (by `PartialEq`) runs every
//! listener synchronously, in registration order, before `set` returns.

use std::fmt;

type Listener<T> = Box<dyn FnMut(&T, &T)>;

pub struct Property<T> {
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T: PartialEq> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Register a listener called with `(old, new)` on every change.
    pub fn on_change(&mut self, listener: impl FnMut(&T, &T) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Store `value`. Returns `true` and notifies listeners only when the
    /// stored value actually changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        let old = std::mem::replace(&mut self.value, value);
        for listener in &mut self.listeners {
            listener(&old, &self.value);
        }
        true
    }
}

impl<T: Copy + PartialEq> Property<T> {
    pub fn value(&self) -> T {
        self.value
    }
}

impl<T: Default + PartialEq> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
