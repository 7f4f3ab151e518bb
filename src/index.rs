use crate::CompositeKey;
use std::collections::{btree_map, BTreeMap};

/// Is the ordered primary-key index of a table. It maps every distinct [`CompositeKey`]
/// to the position of a tuple in the table's tuple store.
///
/// The index is not a uniqueness constraint: inserting a second tuple under an existing
/// key replaces the mapping while the store keeps both tuples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Index {
    entries: BTreeMap<CompositeKey, usize>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `key` to `position` and returns the position it previously mapped to.
    pub(crate) fn insert(&mut self, key: CompositeKey, position: usize) -> Option<usize> {
        self.entries.insert(key, position)
    }

    /// Returns the store position of the tuple indexed under `key`.
    #[inline(always)]
    pub fn get(&self, key: &CompositeKey) -> Option<usize> {
        self.entries.get(key).copied()
    }

    #[inline(always)]
    pub fn contains(&self, key: &CompositeKey) -> bool {
        self.entries.contains_key(key)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries of the index in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }
}

/// Iterates over the entries of an [`Index`] in key order.
pub struct Iter<'a>(btree_map::Iter<'a, CompositeKey, usize>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a CompositeKey, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, position)| (key, *position))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key;

    #[test]
    fn test_index_insert() {
        {
            let index = Index::new();
            assert!(index.is_empty());
            assert_eq!(None, index.get(&key!["Fox"]));
        }
        {
            let mut index = Index::new();
            assert_eq!(None, index.insert(key!["Fox"], 0));
            assert_eq!(None, index.insert(key!["Universal"], 1));
            assert_eq!(2, index.len());
            assert_eq!(Some(0), index.get(&key!["Fox"]));
            assert!(index.contains(&key!["Universal"]));
            assert!(!index.contains(&key!["DreamWorks"]));
        }
    }

    #[test]
    fn test_index_last_write_wins() {
        let mut index = Index::new();
        index.insert(key!["Fox"], 0);
        assert_eq!(Some(0), index.insert(key!["Fox"], 3));
        assert_eq!(1, index.len());
        assert_eq!(Some(3), index.get(&key!["Fox"]));
    }

    #[test]
    fn test_index_iter_in_key_order() {
        let mut index = Index::new();
        index.insert(key!["Universal"], 0);
        index.insert(key!["DreamWorks"], 1);
        index.insert(key!["Fox"], 2);
        assert_eq!(
            vec![
                (&key!["DreamWorks"], 1),
                (&key!["Fox"], 2),
                (&key!["Universal"], 0),
            ],
            index.iter().collect::<Vec<_>>()
        );
    }
}
