use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Storage;

use fontpreview_core::{KeyValueStore, MemoryStore, StoreError};

pub(crate) type AppStore = Rc<dyn KeyValueStore>;

/// `window.localStorage` behind the persistence trait.
pub(crate) struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub(crate) fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|err| backend_err("get", key, err))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| backend_err("set", key, err))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|err| backend_err("remove", key, err))
    }
}

/// Browser storage when present, otherwise an in-memory map for this page.
pub(crate) fn open_store() -> AppStore {
    match LocalStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(err) => {
            gloo::console::warn!("storage: falling back to memory,", err.to_string());
            Rc::new(MemoryStore::new())
        }
    }
}

fn backend_err(op: &'static str, key: &str, err: JsValue) -> StoreError {
    StoreError::Backend {
        op,
        key: key.to_string(),
        message: js_err(&err),
    }
}

pub(crate) fn js_err(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
