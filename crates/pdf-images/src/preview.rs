//! Revocable preview handles
//!
//! A preview handle is a second, display-only reference to an entry's bytes.
//! Handles are registered with a [`PreviewRegistry`] and stay live until
//! they are explicitly revoked. Dropping a handle does not release it, so a
//! forgotten revoke shows up in [`PreviewRegistry::live_count`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Key into a [`PreviewRegistry`]. Not `Clone`: each handle is revoked once.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "preview handles must be revoked through their registry"]
pub struct PreviewHandle {
    key: u64,
}

impl PreviewHandle {
    pub fn key(&self) -> u64 {
        self.key
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview://{}", self.key)
    }
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_key: u64,
    live: HashMap<u64, Arc<[u8]>>,
}

/// Shared table of live preview handles
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes for display and hand out a new handle
    pub fn create(&self, bytes: Arc<[u8]>) -> PreviewHandle {
        let mut inner = self.inner.lock().unwrap();
        inner.next_key += 1;
        let key = inner.next_key;
        inner.live.insert(key, bytes);
        PreviewHandle { key }
    }

    /// Bytes behind a handle, `None` once revoked
    pub fn resolve(&self, handle: &PreviewHandle) -> Option<Arc<[u8]>> {
        self.inner.lock().unwrap().live.get(&handle.key).cloned()
    }

    /// Release a handle. Returns false if it was already gone.
    pub fn revoke(&self, handle: PreviewHandle) -> bool {
        self.inner.lock().unwrap().live.remove(&handle.key).is_some()
    }

    /// Number of handles created and not yet revoked
    pub fn live_count(&self) -> usize {
        self.inner.lock().unwrap().live.len()
    }
}
