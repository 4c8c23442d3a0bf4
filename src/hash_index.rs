use std::{
    borrow::Borrow,
    collections::HashMap,
    hash::{BuildHasher, Hash},
};

/// Stores a value with the handle to its key's position in the order
/// structure.
#[derive(Clone)]
pub(crate) struct StorageNode<V, H> {
    /// The value being stored.
    pub(crate) value: V,

    /// A handle to this entry's position in the order structure.
    pub(crate) handle: H,
}

/// Key to value lookup, knowing nothing about order. The map that owns it is
/// responsible for keeping the order structure in step.
#[derive(Clone)]
pub(crate) struct HashIndex<K, V, H, S> {
    storage: HashMap<K, StorageNode<V, H>, S>,
}

impl<K, V, H, S> HashIndex<K, V, H, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub(crate) fn with_capacity_and_hash_builder(capacity: usize, hash_builder: S) -> Self {
        Self {
            storage: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Stores a node under `k`, handing back whatever node was there before.
    pub(crate) fn put(&mut self, k: K, node: StorageNode<V, H>) -> Option<StorageNode<V, H>> {
        self.storage.insert(k, node)
    }

    pub(crate) fn get<Q>(&self, k: &Q) -> Option<&StorageNode<V, H>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.get(k)
    }

    pub(crate) fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut StorageNode<V, H>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.get_mut(k)
    }

    /// Removes a key, returning the stored key alongside its node. Missing
    /// keys are not an error.
    pub(crate) fn delete<Q>(&mut self, k: &Q) -> Option<(K, StorageNode<V, H>)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.remove_entry(k)
    }

    pub(crate) fn contains<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.storage.contains_key(k)
    }

    pub(crate) fn len(&self) -> usize {
        self.storage.len()
    }

    /// Drops every entry, keeping the table's allocation.
    pub(crate) fn clear(&mut self) {
        self.storage.clear();
    }

    pub(crate) fn hasher(&self) -> &S {
        self.storage.hasher()
    }
}
