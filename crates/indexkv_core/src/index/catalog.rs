//! The immutable set of indexes of one collection.

use crate::index::definition::{Index, IndexShape};
use indexkv_codec::SortOrder;
use tracing::warn;

/// The indexes registered on a collection.
///
/// The identity index is always first. Caller-supplied indexes with the
/// identity shape are dropped, and of several indexes sharing a shape only
/// the first is kept. A catalog never changes after construction.
#[derive(Debug, Clone)]
pub struct IndexCatalog {
    indexes: Vec<Index>,
}

impl IndexCatalog {
    /// Builds a catalog from caller-supplied indexes.
    pub fn new(indexes: impl IntoIterator<Item = Index>) -> Self {
        let mut catalog = vec![Index::identity()];

        for index in indexes {
            if index.is_identity() {
                warn!(label = %index.label(), "dropping index that duplicates the identity index");
                continue;
            }
            if catalog.iter().any(|existing| existing.shape() == index.shape()) {
                warn!(label = %index.label(), "dropping index with a duplicate shape");
                continue;
            }
            catalog.push(index);
        }

        Self { indexes: catalog }
    }

    /// Returns every index, identity first.
    #[must_use]
    pub fn indexes(&self) -> &[Index] {
        &self.indexes
    }

    /// Returns the identity index.
    #[must_use]
    pub fn identity(&self) -> &Index {
        &self.indexes[0]
    }

    /// Returns every index except the identity index.
    #[must_use]
    pub fn secondary(&self) -> &[Index] {
        &self.indexes[1..]
    }

    /// Looks up an index by shape.
    #[must_use]
    pub fn find(&self, shape: &IndexShape) -> Option<&Index> {
        self.lookup(&shape.field, shape.order)
    }

    /// Looks up an index by field and order.
    #[must_use]
    pub fn lookup(&self, field: &str, order: SortOrder) -> Option<&Index> {
        self.indexes
            .iter()
            .find(|index| index.field() == field && index.sort_order() == order)
    }

    /// Returns the number of indexes, identity included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Always false: the identity index is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }
}

impl Default for IndexCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identity_is_prepended() {
        let catalog = IndexCatalog::new(vec![Index::by_equality("tag")]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.identity().is_identity());
        assert_eq!(catalog.indexes()[0], Index::identity());
        assert_eq!(catalog.secondary()[0].field(), "tag");
    }

    #[test]
    fn empty_catalog_has_identity() {
        let catalog = IndexCatalog::default();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
        assert!(catalog.secondary().is_empty());
    }

    #[test]
    fn identity_shaped_indexes_are_dropped() {
        let catalog = IndexCatalog::new(vec![
            Index::by_equality("id").unordered(),
            Index::by_equality("id"),
        ]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.lookup("id", SortOrder::Unordered).unwrap().is_unique());
        assert!(catalog.lookup("id", SortOrder::Ascending).is_some());
    }

    #[test]
    fn duplicate_shapes_keep_first() {
        let catalog = IndexCatalog::new(vec![
            Index::by_equality("tag").unique(),
            Index::by_equality("tag").string_pad_length(4),
            Index::by_equality("tag").descending(),
        ]);
        assert_eq!(catalog.len(), 3);
        assert!(catalog.lookup("tag", SortOrder::Ascending).unwrap().is_unique());
    }

    #[test]
    fn find_by_shape() {
        let catalog = IndexCatalog::new(vec![Index::by_equality("created").descending()]);
        let shape = IndexShape {
            field: "created".into(),
            order: SortOrder::Descending,
        };
        assert_eq!(catalog.find(&shape).unwrap().label(), "desc:created");
        assert!(catalog.lookup("created", SortOrder::Ascending).is_none());
    }

    fn index_strategy() -> impl Strategy<Value = Index> {
        (
            prop::sample::select(vec!["id", "tag", "created"]),
            prop::sample::select(vec![
                SortOrder::Unordered,
                SortOrder::Ascending,
                SortOrder::Descending,
            ]),
            any::<bool>(),
        )
            .prop_map(|(field, order, unique)| {
                let index = Index::by_equality(field).order(order);
                if unique {
                    index.unique()
                } else {
                    index
                }
            })
    }

    proptest! {
        #[test]
        fn shapes_are_distinct(indexes in prop::collection::vec(index_strategy(), 0..12)) {
            let catalog = IndexCatalog::new(indexes);
            prop_assert!(catalog.identity().is_identity());
            prop_assert!(catalog.identity().is_unique());
            prop_assert!(catalog.secondary().iter().all(|index| !index.is_identity()));

            let shapes: Vec<IndexShape> = catalog.indexes().iter().map(Index::shape).collect();
            for (i, shape) in shapes.iter().enumerate() {
                prop_assert!(!shapes[i + 1..].contains(shape));
            }
        }
    }
}
