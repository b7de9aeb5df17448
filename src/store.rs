//! Key-value persistence for the two page flags (theme, drawer open).
//!
//! Components take any [`KvStore`]; the browser build passes `localStorage`,
//! tests pass a [`MemoryStore`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// String key-value store with best-effort writes.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

impl<T: KvStore + ?Sized> KvStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }
}

/// In-memory store. Used by tests and as the fallback when `localStorage` is
/// unavailable (privacy modes, sandboxed iframes).
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with initial entries.
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (k, v) in entries {
            store.set(k, v);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

/// Persisted booleans are the strings "true" / "false".
pub fn get_flag(store: &impl KvStore, key: &str) -> bool {
    store.get(key).as_deref() == Some("true")
}

pub fn set_flag(store: &impl KvStore, key: &str, on: bool) {
    store.set(key, if on { "true" } else { "false" });
}
