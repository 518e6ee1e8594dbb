use rig_core::{KeyValueStore, MemoryStore, Result, RigError};
use web_sys as web;

/// `localStorage` when the page has it, memory otherwise (private browsing,
/// sandboxed frames).
pub enum BrowserStore {
    Local(web::Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open(window: &web::Window) -> Self {
        match window.local_storage() {
            Ok(Some(storage)) => BrowserStore::Local(storage),
            Ok(None) => {
                log::warn!("[store] localStorage unavailable; widgets will not persist");
                BrowserStore::Memory(MemoryStore::new())
            }
            Err(e) => {
                log::warn!("[store] localStorage blocked: {:?}", e);
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> RigError {
    RigError::Storage(format!("{:?}", e))
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            BrowserStore::Local(s) => s.get_item(key).map_err(js_err),
            BrowserStore::Memory(m) => m.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            BrowserStore::Local(s) => s.set_item(key, value).map_err(js_err),
            BrowserStore::Memory(m) => m.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match self {
            BrowserStore::Local(s) => s.remove_item(key).map_err(js_err),
            BrowserStore::Memory(m) => m.remove(key),
        }
    }
}
