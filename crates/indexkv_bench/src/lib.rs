//! Benchmark utilities.

use indexkv_core::{FieldValue, Record};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A record shaped like a typical blog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Identifier.
    pub id: String,
    /// Category, shared by many entries.
    pub category: String,
    /// Creation time.
    pub created: i64,
    /// Body text, not indexed.
    pub body: String,
}

impl Record for Entry {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "category" => Some(self.category.as_str().into()),
            "created" => Some(self.created.into()),
            _ => None,
        }
    }
}

/// Generate a random alphanumeric string of the given length.
pub fn random_text(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate entries spread over `categories` categories.
pub fn generate_entries(count: usize, categories: usize, body_size: usize) -> Vec<Entry> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| Entry {
            id: uuid::Uuid::new_v4().to_string(),
            category: format!("category-{}", i % categories.max(1)),
            created: rng.gen(),
            body: random_text(body_size),
        })
        .collect()
}
