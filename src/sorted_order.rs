//! Keeps keys in comparison order by leaning on [`BTreeSet`]. The tree does
//! all of the balancing; this is just the adapter that lets it stand in as an
//! [`OrderStructure`].

use std::collections::{btree_set, BTreeSet};

use crate::order::OrderStructure;

/// A set of keys which always iterates least to greatest.
///
/// There is no handle to hand out: a key's position is a function of its
/// value alone, so removal is by comparison.
#[derive(Clone, Debug)]
pub struct SortedOrder<K> {
    keys: BTreeSet<K>,
}

impl<K> SortedOrder<K>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self {
            keys: BTreeSet::new(),
        }
    }
}

impl<K> Default for SortedOrder<K>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> OrderStructure<K> for SortedOrder<K>
where
    K: Ord,
{
    type Handle = ();

    type Iter<'a> = btree_set::Iter<'a, K>
    where
        K: 'a;

    /// Trees don't preallocate, so the capacity is ignored.
    fn with_capacity(_capacity: usize) -> Self {
        Self::new()
    }

    fn insert(&mut self, k: K) {
        // a key that's already present keeps its one node; the set can't hold
        // duplicates anyhow
        self.keys.insert(k);
    }

    fn remove(&mut self, k: &K, _handle: ()) {
        self.keys.remove(k);
    }

    fn front(&self) -> Option<&K> {
        self.keys.first()
    }

    fn back(&self) -> Option<&K> {
        self.keys.last()
    }

    fn pop_front(&mut self) -> Option<K> {
        self.keys.pop_first()
    }

    fn pop_back(&mut self) -> Option<K> {
        self.keys.pop_last()
    }

    fn iter(&self) -> btree_set::Iter<'_, K> {
        self.keys.iter()
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn clear(&mut self) {
        self.keys.clear();
    }
}
