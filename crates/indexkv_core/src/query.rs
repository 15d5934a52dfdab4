//! Equality queries.

use crate::index::ID_FIELD;
use indexkv_codec::{FieldValue, SortOrder};

/// An equality query against one registered index.
///
/// With a value, the query returns records whose field equals it. Without
/// one, it lists every record in the index's order. Results are windowed by
/// `offset` and `limit`.
///
/// # Example
///
/// ```rust
/// use indexkv_core::Query;
///
/// let newest = Query::all("created").descending().limit(10);
/// let tagged = Query::equals("tag", "rust").offset(20);
/// let by_id = Query::by_id("post-1");
/// assert_eq!(newest.field(), "created");
/// # let _ = (tagged, by_id);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    field: String,
    order: SortOrder,
    value: Option<FieldValue>,
    offset: usize,
    limit: Option<usize>,
}

impl Query {
    /// Matches records whose `field` equals `value`, against the ascending index.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
            value: Some(value.into()),
            offset: 0,
            limit: None,
        }
    }

    /// Lists all records of the ascending index on `field`.
    #[must_use]
    pub fn all(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
            value: None,
            offset: 0,
            limit: None,
        }
    }

    /// Looks up one record through the identity index.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::equals(ID_FIELD, FieldValue::Text(id.into())).unordered()
    }

    /// Selects the index with this order.
    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Selects the descending index.
    #[must_use]
    pub fn descending(self) -> Self {
        self.order(SortOrder::Descending)
    }

    /// Selects the unordered index.
    #[must_use]
    pub fn unordered(self) -> Self {
        self.order(SortOrder::Unordered)
    }

    /// Skips the first `offset` matches.
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Returns at most `limit` matches. Zero means the collection default.
    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the queried field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the requested order.
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.order
    }

    /// Returns the value to match, if any.
    #[must_use]
    pub fn value(&self) -> Option<&FieldValue> {
        self.value.as_ref()
    }

    /// Returns the number of matches to skip.
    #[must_use]
    pub fn skip(&self) -> usize {
        self.offset
    }

    /// Returns the effective limit, falling back to `default` when unset or zero.
    #[must_use]
    pub fn effective_limit(&self, default: usize) -> usize {
        match self.limit {
            Some(limit) if limit > 0 => limit,
            _ => default,
        }
    }
}
