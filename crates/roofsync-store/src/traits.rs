//! Storage abstraction.

use crate::Result;

/// Durable string key/value storage.
///
/// Implementations must be synchronous and durable: once [`write`] returns
/// `Ok`, a subsequent [`read`] from the same process observes the new value.
/// There is no write-behind queue.
///
/// [`write`]: KeyValueStore::write
/// [`read`]: KeyValueStore::read
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written or removed.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
