//! Fault injection.
//!
//! [`FailingStore`] wraps another store and starts failing mutations after
//! a configurable number of successes. It simulates a crash or outage in
//! the middle of a multi-key save or delete.

use indexkv_storage::{KvPair, KvStore, StorageError, StorageResult};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A store that fails puts and deletes once its budget runs out.
///
/// Reads and scans always go through.
#[derive(Debug)]
pub struct FailingStore<S> {
    inner: S,
    /// Remaining successful mutations. `usize::MAX` means unlimited.
    budget: AtomicUsize,
    mutations: AtomicUsize,
}

impl<S: KvStore> FailingStore<S> {
    /// Wraps `inner` with an unlimited budget.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            budget: AtomicUsize::new(usize::MAX),
            mutations: AtomicUsize::new(0),
        }
    }

    /// Allows `n` more successful mutations, then fails the rest.
    pub fn fail_after(&self, n: usize) {
        self.budget.store(n, Ordering::SeqCst);
    }

    /// Removes the limit.
    pub fn heal(&self) {
        self.budget.store(usize::MAX, Ordering::SeqCst);
    }

    /// Returns the number of successful mutations so far.
    pub fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn spend(&self) -> StorageResult<()> {
        let granted = self
            .budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                usize::MAX => Some(usize::MAX),
                0 => None,
                n => Some(n - 1),
            })
            .is_ok();
        if granted {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        } else {
            Err(StorageError::unavailable("injected failure"))
        }
    }
}

impl<S: KvStore> KvStore for FailingStore<S> {
    fn get(&self, key: &[u8]) -> StorageResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        self.spend()?;
        self.inner.put(key, value)
    }

    fn delete(&self, key: &[u8]) -> StorageResult<bool> {
        self.spend()?;
        self.inner.delete(key)
    }

    fn scan_prefix(&self, prefix: &[u8]) -> StorageResult<Vec<KvPair>> {
        self.inner.scan_prefix(prefix)
    }
}
