use supportchat_client::{MemoryStore, SessionStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `localStorage` when the page may use it, memory otherwise.
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn local_or_memory() -> Self {
        match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(Some(storage))) => BrowserStore::Local(storage),
            _ => {
                log::warn!("localStorage unavailable; session will not survive a reload");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

fn unavailable(e: JsValue) -> StoreError {
    StoreError::Unavailable(format!("{:?}", e))
}

impl SessionStore for BrowserStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            BrowserStore::Local(storage) => storage.get_item(key).map_err(unavailable),
            BrowserStore::Memory(store) => store.load(key),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            BrowserStore::Local(storage) => storage.set_item(key, value).map_err(unavailable),
            BrowserStore::Memory(store) => store.save(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            BrowserStore::Local(storage) => storage.remove_item(key).map_err(unavailable),
            BrowserStore::Memory(store) => store.remove(key),
        }
    }
}
