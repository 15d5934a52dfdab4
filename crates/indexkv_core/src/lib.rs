//! # indexkv Core
//!
//! Secondary indexes over an ordered key-value store.
//!
//! This crate provides:
//! - [`Index`] definitions and the per-collection [`IndexCatalog`]
//! - [`QueryPlanner`] matching equality queries to indexes
//! - [`IndexedCollection`] keeping one physical entry per index per record
//!   consistent across save, query and delete
//! - An optional write-ahead intent [`journal`] with a repair pass
//!
//! The store only needs single-key get/put/delete and ordered prefix scans
//! (see [`indexkv_storage::KvStore`]). Ordering comes entirely from the key
//! encoding in [`indexkv_codec`].

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod collection;
mod config;
mod error;
pub mod index;
pub mod journal;
mod query;
mod record;

pub use collection::IndexedCollection;
pub use config::CollectionConfig;
pub use error::{CoreError, CoreResult, ErrorKind};
pub use index::{Index, IndexCatalog, IndexShape, QueryPlanner, ScanPlan, ID_FIELD};
pub use query::Query;
pub use record::Record;

pub use indexkv_codec::{FieldValue, SortOrder};
