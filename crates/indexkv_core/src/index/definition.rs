//! Index definitions.

use indexkv_codec::{EncodeOptions, SortOrder};
use std::fmt;

/// Name of the identifier field every record exposes.
pub const ID_FIELD: &str = "id";

/// The part of an index that queries match against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IndexShape {
    /// Indexed field.
    pub field: String,
    /// Key order.
    pub order: SortOrder,
}

impl fmt::Display for IndexShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.order, self.field)
    }
}

/// An equality index over one field.
///
/// Every index backs equality queries on its field. Ordered indexes also
/// list all records in ascending or descending field order.
///
/// # Example
///
/// ```rust
/// use indexkv_core::Index;
///
/// let created = Index::by_equality("created").descending();
/// let slug = Index::by_equality("slug").unique();
/// assert_eq!(created.label(), "desc:created");
/// assert!(slug.is_unique());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    field: String,
    order: SortOrder,
    string_pad_length: usize,
    unique: bool,
    base32: bool,
}

impl Index {
    /// Creates an ascending, non-unique index on `field`.
    #[must_use]
    pub fn by_equality(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Ascending,
            string_pad_length: EncodeOptions::DEFAULT_STRING_PAD_LENGTH,
            unique: false,
            base32: true,
        }
    }

    /// The implicit identity index: unordered and unique on [`ID_FIELD`].
    #[must_use]
    pub fn identity() -> Self {
        Self::by_equality(ID_FIELD).unordered().unique()
    }

    /// Sets the key order.
    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Orders keys descending.
    #[must_use]
    pub fn descending(self) -> Self {
        self.order(SortOrder::Descending)
    }

    /// Supports equality only and stores strings unpadded.
    #[must_use]
    pub fn unordered(self) -> Self {
        self.order(SortOrder::Unordered)
    }

    /// Sets the character count ordered strings are padded to.
    #[must_use]
    pub fn string_pad_length(mut self, length: usize) -> Self {
        self.string_pad_length = length;
        self
    }

    /// Allows at most one record per value.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets whether descending strings are base32hex encoded.
    #[must_use]
    pub fn base32(mut self, value: bool) -> Self {
        self.base32 = value;
        self
    }

    /// Returns the indexed field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the key order.
    #[must_use]
    pub fn sort_order(&self) -> SortOrder {
        self.order
    }

    /// Returns true if this index enforces uniqueness.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns true if this index has the identity index's shape.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.shape() == Self::identity().shape()
    }

    /// Returns the shape queries are matched against.
    #[must_use]
    pub fn shape(&self) -> IndexShape {
        IndexShape {
            field: self.field.clone(),
            order: self.order,
        }
    }

    /// Returns the key component naming this index.
    ///
    /// Distinct shapes always get distinct labels.
    #[must_use]
    pub fn label(&self) -> String {
        let prefix = match self.order {
            SortOrder::Unordered => "eq",
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        };
        format!("{prefix}:{}", self.field)
    }

    /// Returns the codec options for this index's value component.
    #[must_use]
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            order: self.order,
            string_pad_length: self.string_pad_length,
            base32: self.base32,
        }
    }
}
