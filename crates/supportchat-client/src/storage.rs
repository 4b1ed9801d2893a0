use std::collections::HashMap;

use supportchat_types::{SessionId, SESSION_STORAGE_KEY};

use crate::error::StoreError;

/// Durable key/value storage owned by one client profile.
pub trait SessionStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Non-durable store, for tests and for hosts without persistent storage.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Return the persisted session identifier, minting and saving one if it is
/// absent or not usable as a URL path segment.
///
/// Store failures degrade to an identifier that lives only as long as the
/// caller keeps it.
pub fn ensure_session_id<S: SessionStore + ?Sized>(store: &mut S) -> SessionId {
    match store.load(SESSION_STORAGE_KEY) {
        Ok(Some(existing)) => match SessionId::parse(&existing) {
            Some(session_id) => return session_id,
            None => log::warn!("Ignoring malformed stored session id {:?}", existing),
        },
        Ok(None) => {}
        Err(e) => log::warn!("Could not read session id, minting a new one: {}", e),
    }

    let session_id = SessionId::generate();
    if let Err(e) = store.save(SESSION_STORAGE_KEY, session_id.as_str()) {
        log::warn!("Could not persist session id {}: {}", session_id, e);
    }
    session_id
}

/// Drop the persisted identifier so the next [`ensure_session_id`] mints a new one.
pub fn forget_session_id<S: SessionStore + ?Sized>(store: &mut S) {
    if let Err(e) = store.remove(SESSION_STORAGE_KEY) {
        log::warn!("Could not remove session id: {}", e);
    }
}
