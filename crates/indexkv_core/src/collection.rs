//! Indexed collection: save, query and delete over N physical index entries.

use crate::config::CollectionConfig;
use crate::error::{CoreError, CoreResult};
use crate::index::{Index, IndexCatalog, QueryPlanner};
use crate::journal::{Intent, Journal};
use crate::query::Query;
use crate::record::{decode_record, encode_record, indexed_value, Record};
use indexkv_codec::{compose_key, compose_prefix_key, encode_value, key_id};
use indexkv_storage::KvStore;
use std::iter;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// A collection of records of type `T` kept in `S`, with one physical entry
/// per registered index per record.
///
/// Each entry's key is `namespace : index label : encoded value : id` and its
/// value is the whole serialized record, so any index can answer a query on
/// its own. The identity entry is the authoritative copy used to find stale
/// entries when a record changes.
///
/// # Consistency
///
/// The store only offers single-key operations. A save or delete touches
/// several keys one after another and is **not** atomic:
///
/// - A failure part-way leaves some indexes updated and others not. Nothing
///   is rolled back. The identity entry is always written (or removed) last,
///   so it reflects the last fully applied save, and repeating a failed
///   delete finishes it.
/// - Two concurrent saves of one id can interleave and leave indexes that
///   disagree.
/// - The unique check runs before any write and is racy: two saves may both
///   pass it. A real guarantee needs compare-and-set in the store.
/// - Queries are not isolated from concurrent writes.
///
/// Enabling [`CollectionConfig::journal`] records each operation's key set
/// before touching any index, so [`IndexedCollection::repair`] can finish an
/// interrupted operation.
///
/// # Example
///
/// ```rust
/// use indexkv_core::{CollectionConfig, FieldValue, Index, IndexedCollection, Query, Record};
/// use indexkv_storage::InMemoryStore;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Post {
///     id: String,
///     created: i64,
/// }
///
/// impl Record for Post {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         (name == "created").then(|| self.created.into())
///     }
/// }
///
/// let posts: IndexedCollection<Post, _> = IndexedCollection::new(
///     InMemoryStore::new(),
///     CollectionConfig::new("posts"),
///     vec![Index::by_equality("created").descending()],
/// )
/// .unwrap();
///
/// posts.save(&Post { id: "a".into(), created: 20 }).unwrap();
/// posts.save(&Post { id: "b".into(), created: 30 }).unwrap();
///
/// let newest = posts.query(&Query::all("created").descending()).unwrap();
/// assert_eq!(newest[0].id, "b");
/// ```
pub struct IndexedCollection<T, S> {
    store: S,
    catalog: IndexCatalog,
    config: CollectionConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record, S: KvStore> IndexedCollection<T, S> {
    /// Creates a collection over `store` with the given indexes.
    ///
    /// The identity index is added automatically.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the configuration is invalid.
    pub fn new(
        store: S,
        config: CollectionConfig,
        indexes: impl IntoIterator<Item = Index>,
    ) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            catalog: IndexCatalog::new(indexes),
            config,
            _marker: PhantomData,
        })
    }

    /// Returns the index catalog.
    pub fn catalog(&self) -> &IndexCatalog {
        &self.catalog
    }

    /// Returns the configuration.
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn planner(&self) -> QueryPlanner<'_> {
        QueryPlanner::new(&self.catalog, &self.config)
    }

    fn journal(&self) -> Journal<'_, S> {
        Journal::new(&self.store, &self.config.namespace)
    }

    /// Secondary indexes first, identity last.
    fn write_order(&self) -> impl Iterator<Item = &Index> {
        self.catalog
            .secondary()
            .iter()
            .chain(iter::once(self.catalog.identity()))
    }

    /// Returns the encoded value component and full key of `record` in
    /// `index`, or `None` if the record has no value for the field.
    fn entry(&self, index: &Index, record: &T) -> CoreResult<Option<(Vec<u8>, Vec<u8>)>> {
        let Some(value) = indexed_value(record, index.field()) else {
            return Ok(None);
        };
        let encoded = encode_value(&value, &index.encode_options())?;
        let key = compose_key(&self.config.namespace, &index.label(), &encoded, record.id());
        Ok(Some((encoded, key)))
    }

    fn identity_key(&self, id: &str) -> CoreResult<Vec<u8>> {
        let identity = self.catalog.identity();
        let encoded = encode_value(&id.into(), &identity.encode_options())?;
        Ok(compose_key(
            &self.config.namespace,
            &identity.label(),
            &encoded,
            id,
        ))
    }

    /// Loads a record through the identity index.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or the stored value is malformed.
    pub fn get(&self, id: &str) -> CoreResult<Option<T>> {
        match self.store.get(&self.identity_key(id)?)? {
            Some(bytes) => Ok(Some(decode_record(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Saves a record, creating or replacing it in every index.
    ///
    /// Entries left over from the previous version of the record are
    /// removed. An index on a field the record has no value for gets no entry.
    /// Nothing is written if the record cannot be encoded or would violate a
    /// unique index.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingId`] if the id is empty
    /// - [`CoreError::Encoding`] if a field value cannot be encoded
    /// - [`CoreError::UniqueConstraintViolation`] on a unique collision
    /// - [`CoreError::Storage`] if the store fails, possibly after some
    ///   entries were written
    pub fn save(&self, record: &T) -> CoreResult<()> {
        let id = record.id();
        if id.is_empty() {
            return Err(CoreError::MissingId);
        }
        if self.config.journal && self.journal().resume(id)? {
            warn!(id, "completed an interrupted write before saving");
        }

        let previous = self.get(id)?;
        let value = encode_record(record)?;

        let mut deletes = Vec::new();
        let mut puts = Vec::with_capacity(self.catalog.len());
        for index in self.write_order() {
            // A record without a value for the field has no entry in the index.
            let new_entry = self.entry(index, record)?;

            if let Some((encoded, _)) = &new_entry {
                if index.is_unique() && !index.is_identity() {
                    self.check_unique(index, encoded, id)?;
                }
            }

            if let Some(previous) = &previous {
                if let Some((_, old_key)) = self.entry(index, previous)? {
                    if new_entry.as_ref().map_or(true, |(_, key)| *key != old_key) {
                        deletes.push(old_key);
                    }
                }
            }
            if let Some((_, new_key)) = new_entry {
                puts.push(new_key);
            }
        }

        debug!(
            namespace = %self.config.namespace,
            id,
            created = previous.is_none(),
            stale = deletes.len(),
            "save"
        );
        self.execute(&Intent {
            id: id.to_string(),
            deletes,
            puts,
            value,
        })
    }

    /// Fails if another record already holds `encoded` in `index`.
    fn check_unique(&self, index: &Index, encoded: &[u8], id: &str) -> CoreResult<()> {
        let prefix = compose_prefix_key(&self.config.namespace, &index.label(), Some(encoded));
        for (key, _) in self.store.scan_prefix(&prefix)? {
            let owner = key_id(&key)?;
            if owner != id {
                return Err(CoreError::UniqueConstraintViolation {
                    index: index.label(),
                    existing_id: owner,
                });
            }
        }
        Ok(())
    }

    /// Runs an operation's writes, journaled if configured.
    fn execute(&self, intent: &Intent) -> CoreResult<()> {
        if self.config.journal {
            let journal = self.journal();
            journal.begin(intent)?;
            intent.apply(&self.store)?;
            journal.complete(&intent.id)
        } else {
            intent.apply(&self.store)
        }
    }

    /// Runs a query against its matching index.
    ///
    /// Results come back in the index's key order, windowed by the query's
    /// offset and limit.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NoMatchingIndex`] if no index matches the query
    /// - [`CoreError::Encoding`] if the query value cannot be encoded
    /// - [`CoreError::Serialization`] if a matched value cannot be decoded;
    ///   no partial results are returned
    /// - [`CoreError::Storage`] if the scan fails
    pub fn query(&self, query: &Query) -> CoreResult<Vec<T>> {
        let plan = self.planner().plan(query)?;
        debug!(
            prefix = %plan.prefix.escape_ascii(),
            offset = plan.offset,
            limit = plan.limit,
            "scan"
        );

        self.store
            .scan_prefix(&plan.prefix)?
            .into_iter()
            .skip(plan.offset)
            .take(plan.limit)
            .map(|(_, bytes)| decode_record(&bytes))
            .collect()
    }

    /// Returns the number of entries a query matches, ignoring its window.
    ///
    /// # Errors
    ///
    /// Same as [`IndexedCollection::query`], minus decoding.
    pub fn count(&self, query: &Query) -> CoreResult<usize> {
        let plan = self.planner().plan(query)?;
        Ok(self.store.scan_prefix(&plan.prefix)?.len())
    }

    /// Deletes a record from every index.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if no record has this id
    /// - [`CoreError::Storage`] if the store fails, possibly after some
    ///   entries were removed; calling `delete` again finishes the job
    pub fn delete(&self, id: &str) -> CoreResult<()> {
        if self.config.journal && self.journal().resume(id)? {
            warn!(id, "completed an interrupted write before deleting");
        }

        let record = self.get(id)?.ok_or_else(|| CoreError::not_found(id))?;

        let mut deletes = Vec::with_capacity(self.catalog.len());
        for index in self.write_order() {
            if let Some((_, key)) = self.entry(index, &record)? {
                deletes.push(key);
            }
        }

        debug!(namespace = %self.config.namespace, id, entries = deletes.len(), "delete");
        self.execute(&Intent {
            id: id.to_string(),
            deletes,
            puts: Vec::new(),
            value: Vec::new(),
        })
    }

    /// Completes every interrupted journaled operation.
    ///
    /// Returns how many were completed.
    ///
    /// # Errors
    ///
    /// Returns the first store or decoding error. Intents not yet reached
    /// stay in place for the next call.
    pub fn repair(&self) -> CoreResult<usize> {
        let journal = self.journal();
        let pending = journal.pending()?;
        for intent in &pending {
            warn!(id = %intent.id, "completing interrupted write");
            intent.apply(&self.store)?;
            journal.complete(&intent.id)?;
        }
        Ok(pending.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexkv_codec::{FieldValue, SortOrder};
    use indexkv_storage::InMemoryStore;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        id: String,
        tag: String,
        created: i64,
        nickname: Option<String>,
    }

    impl Record for User {
        fn id(&self) -> &str {
            &self.id
        }

        fn field(&self, name: &str) -> Option<FieldValue> {
            match name {
                "tag" => Some(self.tag.as_str().into()),
                "created" => Some(self.created.into()),
                "nickname" => self.nickname.as_deref().map(FieldValue::from),
                _ => None,
            }
        }
    }

    fn user(id: &str, tag: &str, created: i64) -> User {
        User {
            id: id.into(),
            tag: tag.into(),
            created,
            nickname: None,
        }
    }

    fn collection(
        indexes: Vec<Index>,
    ) -> (Arc<InMemoryStore>, IndexedCollection<User, Arc<InMemoryStore>>) {
        let store = Arc::new(InMemoryStore::new());
        let users =
            IndexedCollection::new(Arc::clone(&store), CollectionConfig::new("users"), indexes)
                .unwrap();
        (store, users)
    }

    #[test]
    fn save_writes_one_entry_per_index() {
        let (store, users) = collection(vec![
            Index::by_equality("tag"),
            Index::by_equality("created").descending(),
        ]);
        users.save(&user("1", "a", 10)).unwrap();
        assert_eq!(store.len(), 3);

        // Unchanged resave is an idempotent overwrite.
        users.save(&user("1", "a", 10)).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn get_by_id() {
        let (_, users) = collection(vec![]);
        users.save(&user("1", "a", 10)).unwrap();
        assert_eq!(users.get("1").unwrap(), Some(user("1", "a", 10)));
        assert_eq!(users.get("2").unwrap(), None);
        assert_eq!(
            users.query(&Query::by_id("1")).unwrap(),
            vec![user("1", "a", 10)]
        );
    }

    #[test]
    fn empty_id_is_rejected() {
        let (store, users) = collection(vec![]);
        let err = users.save(&user("", "a", 1)).unwrap_err();
        assert!(matches!(err, CoreError::MissingId));
        assert!(store.is_empty());
    }

    #[test]
    fn stale_entries_are_removed() {
        let (store, users) = collection(vec![Index::by_equality("tag")]);
        users.save(&user("1", "hi-there", 1)).unwrap();
        users.save(&user("1", "hello-there", 1)).unwrap();

        assert_eq!(store.len(), 2);
        assert!(users
            .query(&Query::equals("tag", "hi-there"))
            .unwrap()
            .is_empty());
        assert_eq!(
            users.query(&Query::equals("tag", "hello-there")).unwrap().len(),
            1
        );
    }

    #[test]
    fn unique_violation_writes_nothing() {
        let (store, users) = collection(vec![Index::by_equality("tag").unique()]);
        users.save(&user("1", "hi-there", 1)).unwrap();
        users.save(&user("2", "hello-there", 2)).unwrap();
        let before = store.keys();

        let err = users.save(&user("3", "hi-there", 3)).unwrap_err();
        match err {
            CoreError::UniqueConstraintViolation { index, existing_id } => {
                assert_eq!(index, "asc:tag");
                assert_eq!(existing_id, "1");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(store.keys(), before);

        // Resaving the owner with the same value is fine.
        users.save(&user("1", "hi-there", 9)).unwrap();
    }

    #[test]
    fn absent_field_has_no_entry() {
        let (store, users) = collection(vec![Index::by_equality("nickname").unique()]);
        let nickname = |name: Option<&str>| User {
            nickname: name.map(String::from),
            ..user("1", "a", 1)
        };
        let named = |name: &str| users.query(&Query::equals("nickname", name)).unwrap();

        users.save(&nickname(None)).unwrap();
        assert_eq!(store.len(), 1);
        assert!(users.query(&Query::all("nickname")).unwrap().is_empty());

        users.save(&nickname(Some("ace"))).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(named("ace"), vec![nickname(Some("ace"))]);

        // Losing the value removes the old entry.
        users.save(&nickname(None)).unwrap();
        assert_eq!(store.len(), 1);
        assert!(named("ace").is_empty());
        assert_eq!(users.get("1").unwrap(), Some(nickname(None)));

        // Records without a value never collide on a unique index.
        users.save(&user("2", "b", 2)).unwrap();
        assert_eq!(store.len(), 2);

        users.save(&nickname(Some("bee"))).unwrap();
        assert_eq!(named("bee").len(), 1);
        assert_eq!(store.len(), 3);

        users.delete("1").unwrap();
        users.delete("2").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn query_without_index_fails() {
        let (_, users) = collection(vec![Index::by_equality("tag")]);
        let err = users.query(&Query::all("tag").descending()).unwrap_err();
        assert!(matches!(
            err,
            CoreError::NoMatchingIndex {
                order: SortOrder::Descending,
                ..
            }
        ));
    }

    #[test]
    fn window_applies_offset_then_limit() {
        let (_, users) = collection(vec![Index::by_equality("created")]);
        for i in 0..30 {
            users.save(&user(&format!("u{i:02}"), "t", i)).unwrap();
        }

        let page = users
            .query(&Query::all("created").offset(5).limit(3))
            .unwrap();
        let created: Vec<i64> = page.iter().map(|u| u.created).collect();
        assert_eq!(created, vec![5, 6, 7]);

        let default_page = users.query(&Query::all("created")).unwrap();
        assert_eq!(default_page.len(), CollectionConfig::DEFAULT_LIMIT);
        assert_eq!(users.count(&Query::all("created")).unwrap(), 30);
    }

    #[test]
    fn malformed_value_fails_whole_query() {
        let (store, users) = collection(vec![Index::by_equality("tag")]);
        users.save(&user("1", "a", 1)).unwrap();
        users.save(&user("2", "b", 2)).unwrap();

        let prefix = compose_prefix_key("users", "asc:tag", None);
        let (key, _) = store.scan_prefix(&prefix).unwrap().remove(1);
        store.put(&key, b"\xff").unwrap();

        let err = users.query(&Query::all("tag")).unwrap_err();
        assert!(matches!(err, CoreError::Serialization { .. }));
    }

    #[test]
    fn delete_removes_every_entry() {
        let (store, users) = collection(vec![
            Index::by_equality("tag"),
            Index::by_equality("created").descending(),
        ]);
        users.save(&user("1", "a", 1)).unwrap();
        users.save(&user("2", "a", 2)).unwrap();

        users.delete("1").unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(users.get("1").unwrap(), None);
        assert_eq!(users.query(&Query::equals("tag", "a")).unwrap().len(), 1);

        let err = users.delete("1").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn journaled_writes_leave_no_intents() {
        let store = Arc::new(InMemoryStore::new());
        let users: IndexedCollection<User, _> = IndexedCollection::new(
            Arc::clone(&store),
            CollectionConfig::new("users").journal(true),
            vec![Index::by_equality("tag")],
        )
        .unwrap();

        users.save(&user("1", "a", 1)).unwrap();
        users.save(&user("1", "b", 1)).unwrap();
        assert_eq!(store.len(), 2);
        users.delete("1").unwrap();
        assert!(store.is_empty());
        assert_eq!(users.repair().unwrap(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result: CoreResult<IndexedCollection<User, _>> =
            IndexedCollection::new(InMemoryStore::new(), CollectionConfig::new(""), vec![]);
        assert!(matches!(result, Err(CoreError::InvalidConfig { .. })));
    }
}
