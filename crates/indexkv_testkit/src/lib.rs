//! # indexkv Testkit
//!
//! Test utilities for indexkv.
//!
//! This crate provides:
//! - Sample records and collection helpers
//! - Property-based test generators using proptest
//! - A fault-injecting store for partial-write scenarios
//!
//! ## Usage
//!
//! ```rust
//! use indexkv_testkit::prelude::*;
//!
//! let (_store, users) = memory_collection::<User>("users", vec![Index::by_equality("tag")]);
//! users.save(&User::new("1").with_tag("rust")).unwrap();
//! assert_eq!(users.query(&Query::equals("tag", "rust")).unwrap().len(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use indexkv_core::{
        CollectionConfig, CoreError, ErrorKind, FieldValue, Index, IndexedCollection, Query,
        Record, SortOrder,
    };
    pub use indexkv_storage::{InMemoryStore, KvStore};
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
