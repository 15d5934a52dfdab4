//! Access path selection.

use crate::config::CollectionConfig;
use crate::error::{CoreError, CoreResult};
use crate::index::catalog::IndexCatalog;
use crate::index::definition::Index;
use crate::query::Query;
use indexkv_codec::{compose_prefix_key, encode_value};

/// A resolved query: which index to scan, where, and which window to keep.
#[derive(Debug, Clone)]
pub struct ScanPlan<'a> {
    /// The index serving the query.
    pub index: &'a Index,
    /// Key prefix to scan.
    pub prefix: Vec<u8>,
    /// Matches to skip.
    pub offset: usize,
    /// Maximum matches to return.
    pub limit: usize,
}

/// Matches queries to registered indexes.
///
/// Matching is exact on field and order. There is no fallback to a
/// similar index or to a full scan.
#[derive(Debug, Clone, Copy)]
pub struct QueryPlanner<'a> {
    catalog: &'a IndexCatalog,
    config: &'a CollectionConfig,
}

impl<'a> QueryPlanner<'a> {
    /// Creates a planner over a catalog.
    #[must_use]
    pub fn new(catalog: &'a IndexCatalog, config: &'a CollectionConfig) -> Self {
        Self { catalog, config }
    }

    /// Returns the index whose shape matches the query.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoMatchingIndex`] if none does.
    pub fn select(&self, query: &Query) -> CoreResult<&'a Index> {
        self.catalog
            .lookup(query.field(), query.sort_order())
            .ok_or_else(|| CoreError::NoMatchingIndex {
                field: query.field().to_string(),
                order: query.sort_order(),
            })
    }

    /// Resolves a query into a scan.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoMatchingIndex`] if no index matches, or an
    /// encoding error if the query value cannot be encoded for the index.
    pub fn plan(&self, query: &Query) -> CoreResult<ScanPlan<'a>> {
        let index = self.select(query)?;
        let label = index.label();
        let prefix = match query.value() {
            Some(value) => {
                let encoded = encode_value(value, &index.encode_options())?;
                compose_prefix_key(&self.config.namespace, &label, Some(&encoded))
            }
            None => compose_prefix_key(&self.config.namespace, &label, None),
        };

        Ok(ScanPlan {
            index,
            prefix,
            offset: query.skip(),
            limit: query.effective_limit(self.config.default_limit),
        })
    }
}
