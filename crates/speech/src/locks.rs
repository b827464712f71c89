use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockMap = DashMap<String, Arc<Mutex<()>>>;

/// Per-key async mutexes, created on demand and dropped with their last holder
#[derive(Default)]
pub struct KeyLocks {
    locks: Arc<LockMap>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive ownership of `key`
    pub async fn acquire(&self, key: &str) -> KeyGuard {
        let lock = Arc::clone(self.locks.entry(key.to_owned()).or_default().value());
        let guard = lock.lock_owned().await;

        KeyGuard {
            key: key.to_owned(),
            locks: Arc::clone(&self.locks),
            _guard: guard,
        }
    }
}

/// Holds a key until dropped
pub struct KeyGuard {
    key: String,
    locks: Arc<LockMap>,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        // One reference in the map, one in our guard; anything more is a waiter
        self.locks.remove_if(&self.key, |_, lock| Arc::strong_count(lock) <= 2);
    }
}
