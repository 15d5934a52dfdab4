//! Sample records and collection helpers.

use indexkv_core::{CollectionConfig, FieldValue, Index, IndexedCollection, Record};
use indexkv_storage::InMemoryStore;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Once};
use tracing_subscriber::EnvFilter;

/// A record with one field of every indexable type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Identifier.
    pub id: String,
    /// Free-form tag.
    pub tag: String,
    /// Creation time.
    pub created: i64,
    /// Score.
    pub score: f64,
    /// Active flag.
    pub active: bool,
}

impl User {
    /// Creates a user with empty fields.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: String::new(),
            created: 0,
            score: 0.0,
            active: false,
        }
    }

    /// Sets the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the creation time.
    #[must_use]
    pub fn with_created(mut self, created: i64) -> Self {
        self.created = created;
        self
    }

    /// Sets the score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "tag" => Some(self.tag.as_str().into()),
            "created" => Some(self.created.into()),
            "score" => Some(self.score.into()),
            "active" => Some(self.active.into()),
            _ => None,
        }
    }
}

/// A blog post keyed by slug and creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Identifier.
    pub id: String,
    /// URL slug, unique per collection.
    pub slug: String,
    /// Title.
    pub title: String,
    /// Creation time.
    pub created: i64,
}

impl Record for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "slug" => Some(self.slug.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "created" => Some(self.created.into()),
            _ => None,
        }
    }
}

/// The indexes a blog uses: unique slugs and newest-first listing.
pub fn post_indexes() -> Vec<Index> {
    vec![
        Index::by_equality("slug").unique(),
        Index::by_equality("created").descending(),
    ]
}

/// Returns a fresh random namespace.
pub fn unique_namespace() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Returns a fresh random record id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creates a collection over a fresh in-memory store.
///
/// The store is returned too, for inspecting raw entries.
pub fn memory_collection<T: Record>(
    namespace: &str,
    indexes: Vec<Index>,
) -> (Arc<InMemoryStore>, IndexedCollection<T, Arc<InMemoryStore>>) {
    let store = Arc::new(InMemoryStore::new());
    let collection = IndexedCollection::new(
        Arc::clone(&store),
        CollectionConfig::new(namespace),
        indexes,
    )
    .expect("Failed to create collection");
    (store, collection)
}

static TRACING: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per process.
///
/// Filtering follows `RUST_LOG`, defaulting to `warn`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
