//! # indexkv Storage
//!
//! The ordered key-value store contract the indexing layer is written against,
//! plus an in-memory implementation.
//!
//! Stores are **opaque byte maps**. They do not interpret keys or values and
//! know nothing about indexes, records or key encodings.
//!
//! ## Design Principles
//!
//! - Single-key `get`, `put` and `delete`, each assumed atomic
//! - Prefix scans return entries in ascending raw-key byte order
//! - No multi-key transactions
//! - Must be `Send + Sync` for concurrent access
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral data
//!
//! ## Example
//!
//! ```rust
//! use indexkv_storage::{KvStore, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! store.put(b"users:b", b"2").unwrap();
//! store.put(b"users:a", b"1").unwrap();
//!
//! let entries = store.scan_prefix(b"users:").unwrap();
//! assert_eq!(entries[0].0, b"users:a");
//! assert_eq!(entries[1].0, b"users:b");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod memory;
mod store;

pub use error::{StorageError, StorageResult};
pub use memory::InMemoryStore;
pub use store::{KvPair, KvStore};
