//! Store contract definition.

use crate::error::StorageResult;
use std::sync::Arc;

/// A key-value pair returned by a prefix scan.
pub type KvPair = (Vec<u8>, Vec<u8>);

/// An ordered key-value store.
///
/// This is the only boundary the indexing layer depends on. Keys and values
/// are opaque bytes; ordering is plain lexicographic comparison of raw keys.
///
/// # Invariants
///
/// - `get`, `put` and `delete` are atomic per key
/// - `scan_prefix` returns every entry whose key starts with the prefix,
///   sorted ascending by raw key bytes
/// - A scan is a finite snapshot of its own call; calling it again restarts it
/// - No isolation is promised between a scan and concurrent writes
///
/// # Implementors
///
/// - [`super::InMemoryStore`] - For testing
pub trait KvStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to serve the read.
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Removes `key`.
    ///
    /// Returns `true` if the key existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete(&self, key: &[u8]) -> StorageResult<bool>;

    /// Returns all entries whose key starts with `prefix`, ascending by key.
    ///
    /// An empty prefix scans the whole store.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan fails.
    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<Vec<KvPair>>;
}

impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &[u8]) -> StorageResult<bool> {
        (**self).delete(key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<Vec<KvPair>> {
        (**self).scan_prefix(prefix)
    }
}

impl<S: KvStore + ?Sized> KvStore for Box<S> {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn delete(&self, key: &[u8]) -> StorageResult<bool> {
        (**self).delete(key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<Vec<KvPair>> {
        (**self).scan_prefix(prefix)
    }
}
