//! Index definitions, the per-collection catalog, and query planning.
//!
//! Indexes are declared once when a collection is built and never change.
//! Every catalog contains the identity index on [`ID_FIELD`], which holds the
//! authoritative copy of each record.

mod catalog;
mod definition;
mod planner;

pub use catalog::IndexCatalog;
pub use definition::{Index, IndexShape, ID_FIELD};
pub use planner::{QueryPlanner, ScanPlan};
