//! Session Storage

use std::rc::Rc;

use ajax_controls::{MemoryStore, SessionStore};
use tracing::warn;
use web_sys::Storage;

pub struct BrowserSession {
    storage: Storage,
}

impl BrowserSession {
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.session_storage().ok()??;
        Some(Self { storage })
    }
}

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            warn!("sessionStorage rejected {key}: {e:?}");
        }
    }
}

/// `sessionStorage` when the browser allows it, otherwise memory for this page view
pub fn session_store() -> Rc<dyn SessionStore> {
    match BrowserSession::open() {
        Some(session) => Rc::new(session),
        None => {
            warn!("sessionStorage unavailable, tab choice will not survive reloads");
            Rc::new(MemoryStore::default())
        }
    }
}
