/// Describes what keeps the order of an ordered map's keys.
///
/// An implementation only ever tracks keys; the values live in the map's hash
/// index. The map calls [`insert`](OrderStructure::insert) exactly once per
/// fresh key and hands back the returned handle when the key goes away, so an
/// implementation never sees the same key twice.
pub trait OrderStructure<K> {
    /// A token naming a key's position. Sequence-style structures use it to
    /// unlink a key without searching for it; comparison-ordered structures
    /// have no use for it and set it to `()`.
    type Handle: Copy;

    /// Iterator over the keys, first to last.
    type Iter<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a;

    /// Makes an empty structure with room for `capacity` keys, where the
    /// structure has any notion of capacity.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// Places a key which isn't already tracked, returning its handle.
    fn insert(&mut self, k: K) -> Self::Handle;

    /// Forgets a key. `handle` is whatever `insert` returned for it.
    fn remove(&mut self, k: &K, handle: Self::Handle);

    /// The first key in order.
    fn front(&self) -> Option<&K>;

    /// The last key in order.
    fn back(&self) -> Option<&K>;

    /// Removes and returns the first key.
    fn pop_front(&mut self) -> Option<K>;

    /// Removes and returns the last key.
    fn pop_back(&mut self) -> Option<K>;

    fn iter(&self) -> Self::Iter<'_>;

    /// The number of keys tracked right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets every key. Implementations keep their buffers where they have
    /// any.
    fn clear(&mut self);
}
