use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    fmt,
    hash::{BuildHasher, Hash},
    mem,
};

use crate::hash_index::{HashIndex, StorageNode};
use crate::order::OrderStructure;

/// A key and its value, as handed out by [`OrderedMap::entries`]. It's a
/// snapshot; changing it does nothing to the map.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<Entry<K, V>> for (K, V) {
    fn from(entry: Entry<K, V>) -> Self {
        (entry.key, entry.value)
    }
}

impl<K, V> fmt::Display for Entry<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// A [`HashMap`](std::collections::HashMap) that remembers an order for its
/// keys. Lookups go through the hash index; the order structure `O` decides
/// what "first" and "last" mean and how iteration runs.
///
/// Every mutation touches both halves before it returns, so the set of keys in
/// the index and the set of keys in the order structure are always the same.
///
/// Not synchronized. Wrap it in a lock (or use
/// [`SharedOrderedMap`](crate::SharedOrderedMap)) to share it between threads.
pub struct OrderedMap<K, V, O, S = RandomState>
where
    O: OrderStructure<K>,
{
    index: HashIndex<K, V, O::Handle, S>,
    order: O,
}

impl<K, V, O> OrderedMap<K, V, O, RandomState>
where
    K: Eq + Hash + Clone,
    O: OrderStructure<K>,
{
    /// Makes a new, empty map.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Makes a new map with room for `capacity` entries before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hash_builder(capacity, Default::default())
    }
}

impl<K, V, O, S> OrderedMap<K, V, O, S>
where
    K: Eq + Hash + Clone,
    O: OrderStructure<K>,
    S: BuildHasher,
{
    /// Makes a new, empty map which hashes its keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hash_builder(0, hash_builder)
    }

    /// Makes a new map with a specified capacity and hasher.
    pub fn with_capacity_and_hash_builder(capacity: usize, hash_builder: S) -> Self {
        Self {
            index: HashIndex::with_capacity_and_hash_builder(capacity, hash_builder),
            order: O::with_capacity(capacity),
        }
    }

    /// Empties the map so it can be used again from scratch. Allocations are
    /// kept where the backing structures have any.
    pub fn init(&mut self) -> &mut Self {
        self.clear();
        self
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();

        #[cfg(test)]
        self.consistency_test();
    }

    /// Stores `v` under `k`. A fresh key takes its place in the order; a key
    /// that's already present keeps its place and only has its value
    /// replaced. Returns the map so calls can be chained.
    pub fn put(&mut self, k: K, v: V) -> &mut Self {
        self.insert(k, v);
        self
    }

    /// Same as [`put`](Self::put), but returns the value previously stored
    /// under `k`, if there was one.
    pub fn insert(&mut self, k: K, v: V) -> Option<V> {
        #[cfg(test)]
        let original_len = self.len();

        let previous = if let Some(node) = self.index.get_mut(&k) {
            Some(mem::replace(&mut node.value, v))
        } else {
            let handle = self.order.insert(k.clone());
            self.index.put(k, StorageNode { value: v, handle });
            None
        };

        #[cfg(test)]
        {
            let expected_len = original_len + usize::from(previous.is_none());
            assert_eq!(expected_len, self.len());
            self.consistency_test();
        }

        previous
    }

    /// Puts each pair in turn. When a key shows up more than once, the last
    /// value wins but the first occurrence fixed its position.
    pub fn put_all<I>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in pairs {
            self.insert(k, v);
        }
        self
    }

    /// [`put_all`](Self::put_all) for [`Entry`] values.
    pub fn put_entries<I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = Entry<K, V>>,
    {
        self.put_all(entries.into_iter().map(|e| (e.key, e.value)))
    }

    /// Removes `k` if it's there. Deleting a missing key does nothing.
    pub fn delete<Q>(&mut self, k: &Q) -> &mut Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(k);
        self
    }

    /// Deletes every key given.
    pub fn delete_all<'q, Q, I>(&mut self, keys: I) -> &mut Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        for k in keys {
            self.remove(k);
        }
        self
    }

    /// Removes `k`, returning its value if it was present.
    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let (key, node) = self.index.delete(k)?;
        self.order.remove(&key, node.handle);

        #[cfg(test)]
        self.consistency_test();

        Some(node.value)
    }

    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(k).map(|node| &node.value)
    }

    /// Gets a mutable reference to a value. The key's position is untouched.
    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get_mut(k).map(|node| &mut node.value)
    }

    pub fn contains<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(k)
    }

    /// True when every key given is present, including when none are given.
    pub fn contains_all<'q, Q, I>(&self, keys: I) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        keys.into_iter().all(|k| self.contains(k))
    }

    /// True when at least one key given is present. False for no keys.
    pub fn contains_any<'q, Q, I>(&self, keys: I) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        keys.into_iter().any(|k| self.contains(k))
    }

    /// The keys, in map order.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().cloned().collect()
    }

    /// The values, lined up with [`keys`](Self::keys).
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Key and value pairs, in map order.
    pub fn entries(&self) -> Vec<Entry<K, V>>
    where
        V: Clone,
    {
        self.iter()
            .map(|(k, v)| Entry::new(k.clone(), v.clone()))
            .collect()
    }

    /// Borrows each key and value in map order.
    pub fn iter(&self) -> Iter<'_, K, V, O, S> {
        Iter {
            keys: self.order.iter(),
            index: &self.index,
        }
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// The value of the first key, without removing it.
    pub fn head(&self) -> Option<&V> {
        self.head_entry().map(|(_, v)| v)
    }

    /// The value of the last key, without removing it.
    pub fn tail(&self) -> Option<&V> {
        self.tail_entry().map(|(_, v)| v)
    }

    pub fn head_entry(&self) -> Option<(&K, &V)> {
        let k = self.order.front()?;
        self.index.get(k).map(|node| (k, &node.value))
    }

    pub fn tail_entry(&self) -> Option<(&K, &V)> {
        let k = self.order.back()?;
        self.index.get(k).map(|node| (k, &node.value))
    }

    /// Removes the last key and returns its value.
    pub fn pop(&mut self) -> Option<V> {
        self.pop_entry().map(|(_, v)| v)
    }

    /// Removes the first key and returns its value.
    pub fn pull(&mut self) -> Option<V> {
        self.pull_entry().map(|(_, v)| v)
    }

    /// Removes the last key, returning it with its value.
    pub fn pop_entry(&mut self) -> Option<(K, V)> {
        let k = self.order.pop_back()?;
        self.take_from_index(&k)
    }

    /// Removes the first key, returning it with its value.
    pub fn pull_entry(&mut self) -> Option<(K, V)> {
        let k = self.order.pop_front()?;
        self.take_from_index(&k)
    }

    /// The hasher the index was built with.
    pub fn hasher(&self) -> &S {
        self.index.hasher()
    }

    /// Finishes a pop or pull: the key has already left the order structure.
    fn take_from_index(&mut self, k: &K) -> Option<(K, V)> {
        let removed = self.index.delete(k);
        debug_assert!(removed.is_some(), "ordered key missing from the index");

        #[cfg(test)]
        self.consistency_test();

        removed.map(|(k, node)| (k, node.value))
    }

    #[cfg(test)]
    fn consistency_test(&self) {
        assert_eq!(self.index.len(), self.order.len());

        let mut count = 0;
        for k in self.order.iter() {
            count += 1;
            assert!(count <= self.order.len());
            assert!(self.index.contains(k));
        }

        assert_eq!(self.order.len(), count);
    }
}

/// Walks an [`OrderedMap`] in map order.
pub struct Iter<'a, K, V, O, S>
where
    O: OrderStructure<K> + 'a,
    K: 'a,
{
    keys: O::Iter<'a>,
    index: &'a HashIndex<K, V, O::Handle, S>,
}

impl<'a, K, V, O, S> Iterator for Iter<'a, K, V, O, S>
where
    K: Eq + Hash,
    O: OrderStructure<K> + 'a,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.keys.next()?;
        let node = self
            .index
            .get(k)
            .expect("ordered key missing from the index");
        Some((k, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

impl<'a, K, V, O, S> DoubleEndedIterator for Iter<'a, K, V, O, S>
where
    K: Eq + Hash,
    O: OrderStructure<K> + 'a,
    O::Iter<'a>: DoubleEndedIterator,
    S: BuildHasher,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let k = self.keys.next_back()?;
        let node = self
            .index
            .get(k)
            .expect("ordered key missing from the index");
        Some((k, &node.value))
    }
}

impl<'a, K, V, O, S> ExactSizeIterator for Iter<'a, K, V, O, S>
where
    K: Eq + Hash,
    O: OrderStructure<K> + 'a,
    O::Iter<'a>: ExactSizeIterator,
    S: BuildHasher,
{
}

impl<'a, K, V, O, S> IntoIterator for &'a OrderedMap<K, V, O, S>
where
    K: Eq + Hash + Clone,
    O: OrderStructure<K>,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, O, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, O, S> Default for OrderedMap<K, V, O, S>
where
    K: Eq + Hash + Clone,
    O: OrderStructure<K>,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_capacity_and_hash_builder(0, S::default())
    }
}

impl<K, V, O, S> Clone for OrderedMap<K, V, O, S>
where
    K: Clone,
    V: Clone,
    O: OrderStructure<K> + Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            index: self.index.clone(),
            order: self.order.clone(),
        }
    }
}

impl<K, V, O, S> PartialEq for OrderedMap<K, V, O, S>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
    O: OrderStructure<K>,
    S: BuildHasher,
{
    /// Maps are equal when they hold the same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, O, S> Extend<(K, V)> for OrderedMap<K, V, O, S>
where
    K: Eq + Hash + Clone,
    O: OrderStructure<K>,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<K, V, O, S> FromIterator<(K, V)> for OrderedMap<K, V, O, S>
where
    K: Eq + Hash + Clone,
    O: OrderStructure<K>,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.put_all(iter);
        map
    }
}

impl<K, V, O, S> fmt::Debug for OrderedMap<K, V, O, S>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
    O: OrderStructure<K>,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Renders as `[k1: v1, k2: v2]` in map order.
impl<K, V, O, S> fmt::Display for OrderedMap<K, V, O, S>
where
    K: Eq + Hash + Clone + fmt::Display,
    V: fmt::Display,
    O: OrderStructure<K>,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", k, v)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::Entry;
    use crate::{BuildIdentityHasher, ListMap, TreeMap};
    use pretty_assertions::assert_eq;

    fn scenario_entries() -> Vec<Entry<i32, &'static str>> {
        vec![Entry::new(55, "a"), Entry::new(44, "b")]
    }

    #[test]
    fn test_put_keeps_position() {
        let mut map: ListMap<i32, &str> = ListMap::new();

        map.put(35, "Ross").put(1, "Test");
        assert_eq!(2, map.len());

        map.put_entries(scenario_entries());
        assert_eq!(4, map.len());

        map.put_entries(vec![Entry::new(35, "Oreto"), Entry::new(1, "Michael")]);
        assert_eq!(4, map.len());
        assert_eq!(vec![35, 1, 55, 44], map.keys());
        assert_eq!(vec!["Oreto", "Michael", "a", "b"], map.values());
    }

    #[test]
    fn test_tree_put_is_sorted() {
        let mut map: TreeMap<i32, &str> = TreeMap::new();

        map.put(35, "Ross").put(1, "Test");
        map.put_entries(scenario_entries());
        map.put(35, "Oreto").put(1, "Michael");

        assert_eq!(4, map.len());
        assert_eq!(vec![1, 35, 44, 55], map.keys());
        assert_eq!(Some(&"Michael"), map.head());
        assert_eq!(Some(&"a"), map.tail());
    }

    #[test]
    fn test_insert_returns_previous() {
        let mut map: ListMap<&str, u32> = ListMap::new();

        assert_eq!(None, map.insert("a", 1));
        assert_eq!(None, map.insert("b", 2));
        assert_eq!(Some(1), map.insert("a", 3));
        assert_eq!(vec!["a", "b"], map.keys());
        assert_eq!(Some(&3), map.get("a"));
    }

    #[test]
    fn test_duplicate_keys_in_bulk_put() {
        let mut map: ListMap<&str, u32> = ListMap::new();
        map.put_all(vec![("x", 1), ("y", 2), ("x", 3)]);

        assert_eq!(vec!["x", "y"], map.keys());
        assert_eq!(vec![3, 2], map.values());
    }

    #[test]
    fn test_pull_is_fifo() {
        let mut map: ListMap<&str, u32> = ListMap::new();
        map.put("k1", 1).put("k2", 2).put("k3", 3);

        assert_eq!(Some(1), map.pull());
        assert_eq!(Some(2), map.pull());
        assert_eq!(vec!["k3"], map.keys());
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut map: ListMap<&str, u32> = ListMap::new();
        map.put("k1", 1).put("k2", 2).put("k3", 3);

        assert_eq!(Some(3), map.pop());
        assert_eq!(Some(2), map.pop());
        assert_eq!(vec!["k1"], map.keys());
        assert!(!map.contains("k3"));
    }

    #[test]
    fn test_drain_empties_both_variants() {
        let mut list: ListMap<u32, u32> = ListMap::new();
        let mut tree: TreeMap<u32, u32> = TreeMap::new();
        for k in [3, 1, 2] {
            list.put(k, k * 10);
            tree.put(k, k * 10);
        }

        let list_drained: Vec<_> = std::iter::from_fn(|| list.pull()).collect();
        let tree_drained: Vec<_> = std::iter::from_fn(|| tree.pull()).collect();

        assert_eq!(vec![30, 10, 20], list_drained);
        assert_eq!(vec![10, 20, 30], tree_drained);
        assert!(list.is_empty());
        assert!(tree.is_empty());
        assert_eq!(None, list.pop());
        assert_eq!(None, tree.pop());
        assert_eq!(None, list.head());
        assert_eq!(None, tree.tail());
    }

    #[test]
    fn test_pop_mixed_until_empty() {
        let mut map: ListMap<u32, u32> = ListMap::new();
        map.put_all((0..3).map(|k| (k, k)));

        map.pop();
        map.pop();
        map.pull();

        assert_eq!(None, map.pull());
        assert!(!map.not_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut map: ListMap<u32, &str> = ListMap::new();
        map.put(1, "one").put(2, "two");

        map.delete(&3);
        assert_eq!(2, map.len());
        assert_eq!(vec![1, 2], map.keys());

        map.delete(&1).delete(&1);
        assert_eq!(vec![2], map.keys());
        assert_eq!(None, map.get(&1));
    }

    #[test]
    fn test_tree_delete_really_removes() {
        let mut map: TreeMap<u32, &str> = TreeMap::new();
        map.put(1, "one").put(2, "two");

        map.delete(&1);

        assert!(!map.contains(&1));
        assert_eq!(None, map.get(&1));
        assert_eq!(1, map.len());
        assert_eq!(vec![2], map.keys());
    }

    #[test]
    fn test_delete_all() {
        let mut map: TreeMap<String, u32> = TreeMap::new();
        map.put("a".to_owned(), 1)
            .put("b".to_owned(), 2)
            .put("c".to_owned(), 3);

        map.delete_all(["a", "c", "zzz"]);

        assert_eq!(vec!["b".to_owned()], map.keys());
    }

    #[test]
    fn test_containment_laws() {
        let mut map: ListMap<u32, u32> = ListMap::new();
        let none: [u32; 0] = [];

        assert!(map.contains_all(&none));
        assert!(!map.contains_any(&none));

        map.put_all((0..10).map(|k| (k, k)));

        assert!(map.contains_all(&map.keys()));
        assert!(map.contains_any(&[100u32, 5]));
        assert!(!map.contains_all(&[100u32, 5]));
        assert!(!map.contains_any(&[100u32, 200]));
    }

    #[test]
    fn test_entries_round_trip() {
        let input = vec![
            Entry::new(0, "1"),
            Entry::new(1, "2"),
            Entry::new(2, "3"),
        ];

        let mut map: ListMap<i32, &str> = ListMap::new();
        map.put_entries(input.clone());

        assert_eq!(input, map.entries());
        assert_eq!(vec![0, 1, 2], map.keys());
        assert_eq!(vec!["1", "2", "3"], map.values());
        assert_eq!(Some(&"1"), map.head());
        assert_eq!(Some(&"3"), map.tail());
    }

    #[test]
    fn test_stored_none_is_not_absent() {
        let mut map: ListMap<u32, Option<u32>> = ListMap::new();
        map.put(1, None);

        assert_eq!(Some(&None), map.get(&1));
        assert_eq!(None, map.get(&2));
        assert_eq!(Some(None), map.pop());
        assert_eq!(None, map.pop());
    }

    #[test]
    fn test_init_resets() {
        let mut map: ListMap<u32, u32> = ListMap::with_capacity(4);
        map.put_all((0..4).map(|k| (k, k)));

        map.init().put(9, 9);

        assert_eq!(vec![9], map.keys());
        assert_eq!(None, map.get(&0));
    }

    #[test]
    fn test_entry_accessors() {
        let mut map: ListMap<&str, u32> = ListMap::new();
        map.put("first", 1).put("last", 2);

        assert_eq!(Some((&"first", &1)), map.head_entry());
        assert_eq!(Some((&"last", &2)), map.tail_entry());
        assert_eq!(Some(("last", 2)), map.pop_entry());
        assert_eq!(Some(("first", 1)), map.pull_entry());
        assert_eq!(None, map.pull_entry());
    }

    #[test]
    fn test_get_mut_keeps_position() {
        let mut map: ListMap<&str, u32> = ListMap::new();
        map.put("a", 1).put("b", 2);

        if let Some(v) = map.get_mut("a") {
            *v += 10;
        }

        assert_eq!(vec![11, 2], map.values());
    }

    #[test]
    fn test_rendering() {
        let mut map: ListMap<u32, &str> = ListMap::new();
        assert_eq!("[]", map.to_string());

        map.put(35, "Ross").put(1, "Test");

        assert_eq!("[35: Ross, 1: Test]", map.to_string());
        assert_eq!(r#"{35: "Ross", 1: "Test"}"#, format!("{:?}", map));
        assert_eq!("35: Ross", Entry::new(35, "Ross").to_string());
    }

    #[test]
    fn test_iter_both_ways() {
        let map: TreeMap<u32, u32> = vec![(2, 20), (1, 10), (3, 30)].into_iter().collect();

        let forward: Vec<_> = map.iter().map(|(k, _)| *k).collect();
        let backward: Vec<_> = map.iter().rev().map(|(_, v)| *v).collect();

        assert_eq!(vec![1, 2, 3], forward);
        assert_eq!(vec![30, 20, 10], backward);
        assert_eq!(3, map.iter().len());
    }

    #[test]
    fn test_equality_respects_order() {
        let a: ListMap<u32, u32> = vec![(1, 1), (2, 2)].into_iter().collect();
        let b: ListMap<u32, u32> = vec![(2, 2), (1, 1)].into_iter().collect();
        let c = a.clone();

        assert!(a != b);
        assert!(a == c);
    }

    #[test]
    fn test_identity_hasher() {
        let mut map: ListMap<u64, u64, BuildIdentityHasher> =
            ListMap::with_capacity_and_hash_builder(5, BuildIdentityHasher);

        map.extend((0..5).map(|k| (k, k * k)));
        map.delete(&2);

        assert_eq!(vec![0, 1, 3, 4], map.keys());
        assert_eq!(Some(&9), map.get(&3));
    }
}
