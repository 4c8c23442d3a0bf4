use parking_lot::RwLock;
use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
    sync::Arc,
};

use crate::order::OrderStructure;
use crate::ordered_map::OrderedMap;

/// Wrapper for an [`OrderedMap`] which is shareable across thread boundaries.
/// Every call takes the lock for exactly as long as the underlying map
/// operation runs.
pub struct SharedOrderedMap<K, V, O, S = RandomState>(Arc<RwLock<OrderedMap<K, V, O, S>>>)
where
    O: OrderStructure<K>;

impl<K, V, O, S> SharedOrderedMap<K, V, O, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    O: OrderStructure<K>,
    S: BuildHasher,
{
    /// Wraps a map into a shared accessor, making it safe to move across
    /// thread boundaries. Enforces an additional constraint of Clone on
    /// values.
    pub fn with_map(map: OrderedMap<K, V, O, S>) -> Self {
        Self(Arc::new(RwLock::new(map)))
    }

    /// Puts a value into the map. See [`OrderedMap::put`].
    pub fn put(&self, k: K, v: V) {
        self.0.write().put(k, v);
    }

    /// Puts a value into the map, returning the one it replaced.
    pub fn insert(&self, k: K, v: V) -> Option<V> {
        self.0.write().insert(k, v)
    }

    /// Get a value from the map. This clones it to minimize the lock time.
    pub fn get<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.read().get(k).cloned()
    }

    pub fn contains<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.read().contains(k)
    }

    pub fn delete<Q>(&self, k: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.write().delete(k);
    }

    /// Remove a value from the map, returning it if it existed.
    pub fn remove<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.write().remove(k)
    }

    pub fn head(&self) -> Option<V> {
        self.0.read().head().cloned()
    }

    pub fn tail(&self) -> Option<V> {
        self.0.read().tail().cloned()
    }

    pub fn pop(&self) -> Option<V> {
        self.0.write().pop()
    }

    pub fn pull(&self) -> Option<V> {
        self.0.write().pull()
    }

    pub fn keys(&self) -> Vec<K> {
        self.0.read().keys()
    }

    /// Clears the map.
    pub fn clear(&self) {
        self.0.write().clear()
    }

    /// The number of entries in the map at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

impl<K, V, O, S> Clone for SharedOrderedMap<K, V, O, S>
where
    O: OrderStructure<K>,
{
    fn clone(&self) -> Self {
        SharedOrderedMap(self.0.clone())
    }
}
