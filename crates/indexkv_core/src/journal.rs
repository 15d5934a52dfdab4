//! Write-ahead intents for multi-key updates.
//!
//! With journaling enabled, a save or delete first stores an [`Intent`]
//! naming every key it will delete and put. The intent is removed once all
//! index writes are done. An intent still present afterwards marks an
//! interrupted operation; re-applying it is idempotent and brings every index
//! in line with the intended state.
//!
//! Intents live under their own label inside the collection namespace, so
//! index scans never see them. There is one intent slot per record id.

use crate::error::{CoreError, CoreResult};
use indexkv_codec::{compose_prefix_key, escape_into};
use indexkv_storage::KvStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Key label reserved for intents. Index labels never take this form.
pub const INTENT_LABEL: &str = "__intent";

/// The keys an operation on one record is about to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Record id.
    pub id: String,
    /// Keys to delete, in order.
    pub deletes: Vec<Vec<u8>>,
    /// Keys to write `value` under, in order.
    pub puts: Vec<Vec<u8>>,
    /// Serialized record written under each key in `puts`.
    pub value: Vec<u8>,
}

impl Intent {
    /// Performs the intent's deletes, then its puts.
    ///
    /// # Errors
    ///
    /// Returns the first store error. Keys already handled stay handled.
    pub fn apply<S: KvStore + ?Sized>(&self, store: &S) -> CoreResult<()> {
        for key in &self.deletes {
            debug!(key = %key.escape_ascii(), "delete");
            store.delete(key)?;
        }
        for key in &self.puts {
            debug!(key = %key.escape_ascii(), "put");
            store.put(key, &self.value)?;
        }
        Ok(())
    }
}

/// Intent storage for one namespace.
pub struct Journal<'a, S: KvStore + ?Sized> {
    store: &'a S,
    namespace: &'a str,
}

impl<'a, S: KvStore + ?Sized> Journal<'a, S> {
    /// Creates a journal over `store` for `namespace`.
    pub fn new(store: &'a S, namespace: &'a str) -> Self {
        Self { store, namespace }
    }

    /// Returns the key holding the intent for `id`.
    #[must_use]
    pub fn intent_key(&self, id: &str) -> Vec<u8> {
        let mut key = self.prefix();
        escape_into(id.as_bytes(), &mut key);
        key
    }

    fn prefix(&self) -> Vec<u8> {
        compose_prefix_key(self.namespace, INTENT_LABEL, None)
    }

    /// Stores an intent, replacing any previous one for the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the intent cannot be serialized or stored.
    pub fn begin(&self, intent: &Intent) -> CoreResult<()> {
        let mut buf = Vec::new();
        ciborium::into_writer(intent, &mut buf)
            .map_err(|e| CoreError::serialization(format!("encode intent: {e}")))?;
        self.store.put(&self.intent_key(&intent.id), &buf)?;
        Ok(())
    }

    /// Removes the intent for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn complete(&self, id: &str) -> CoreResult<()> {
        self.store.delete(&self.intent_key(id))?;
        Ok(())
    }

    /// Returns the outstanding intent for `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the intent cannot be decoded.
    pub fn load(&self, id: &str) -> CoreResult<Option<Intent>> {
        self.store
            .get(&self.intent_key(id))?
            .map(|bytes| decode_intent(&bytes))
            .transpose()
    }

    /// Returns every outstanding intent, ordered by record id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or an intent cannot be decoded.
    pub fn pending(&self) -> CoreResult<Vec<Intent>> {
        self.store
            .scan_prefix(&self.prefix())?
            .into_iter()
            .map(|(_, bytes)| decode_intent(&bytes))
            .collect()
    }

    /// Re-applies and clears the outstanding intent for `id`, if any.
    ///
    /// Returns true if there was one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails; the intent is then kept.
    pub fn resume(&self, id: &str) -> CoreResult<bool> {
        match self.load(id)? {
            Some(intent) => {
                intent.apply(self.store)?;
                self.complete(id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

fn decode_intent(bytes: &[u8]) -> CoreResult<Intent> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::serialization(format!("decode intent: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexkv_storage::InMemoryStore;

    fn intent(id: &str) -> Intent {
        Intent {
            id: id.to_string(),
            deletes: vec![b"old".to_vec()],
            puts: vec![b"new-a".to_vec(), b"new-b".to_vec()],
            value: b"payload".to_vec(),
        }
    }

    #[test]
    fn begin_load_complete() {
        let store = InMemoryStore::new();
        let journal = Journal::new(&store, "ns");

        journal.begin(&intent("r1")).unwrap();
        assert_eq!(journal.load("r1").unwrap(), Some(intent("r1")));
        assert_eq!(journal.pending().unwrap().len(), 1);

        journal.complete("r1").unwrap();
        assert_eq!(journal.load("r1").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn apply_deletes_then_puts() {
        let store = InMemoryStore::new();
        store.put(b"old", b"stale").unwrap();

        intent("r1").apply(&store).unwrap();
        assert_eq!(store.get(b"old").unwrap(), None);
        assert_eq!(store.get(b"new-a").unwrap(), Some(b"payload".to_vec()));
        assert_eq!(store.get(b"new-b").unwrap(), Some(b"payload".to_vec()));

        // Idempotent.
        intent("r1").apply(&store).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn resume_applies_and_clears() {
        let store = InMemoryStore::new();
        let journal = Journal::new(&store, "ns");
        journal.begin(&intent("r1")).unwrap();

        assert!(journal.resume("r1").unwrap());
        assert!(!journal.resume("r1").unwrap());
        assert!(journal.pending().unwrap().is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn namespaces_are_isolated() {
        let store = InMemoryStore::new();
        Journal::new(&store, "a").begin(&intent("r1")).unwrap();
        Journal::new(&store, "b").begin(&intent("r2")).unwrap();

        let pending = Journal::new(&store, "a").pending().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "r1");
    }

    #[test]
    fn ids_with_separators_get_distinct_slots() {
        let store = InMemoryStore::new();
        let journal = Journal::new(&store, "ns");
        assert_ne!(journal.intent_key("a"), journal.intent_key("a\0"));
        assert_ne!(journal.intent_key("a"), journal.intent_key("a\0\0b"));
    }
}
