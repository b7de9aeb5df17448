use std::rc::Rc;

use web_sys::{Storage, Window};

use crate::store::{KvStore, MemoryStore};

/// `window.localStorage`. Write failures (quota, privacy mode) are logged and dropped.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open(win: &Window) -> Option<Self> {
        let storage = win.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KvStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            log::debug!("[stud] localStorage write failed for '{key}': {e:?}");
        }
    }
}

/// The page store: `localStorage` when available, otherwise memory for this session.
pub fn site_store(win: &Window) -> Rc<dyn KvStore> {
    match LocalStore::open(win) {
        Some(store) => Rc::new(store),
        None => {
            log::warn!("[stud] localStorage unavailable; preferences will not persist");
            Rc::new(MemoryStore::new())
        }
    }
}
