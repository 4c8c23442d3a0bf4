//! A linked list that flattens all its nodes onto a Vec for storage, gaining
//! data locality and O(1) removal by handle at the expense of never giving
//! memory back until it's cleared or dropped.

use std::iter::FusedIterator;

use crate::order::OrderStructure;

/// The index of a node in the linked list's storage vec. A handle stays valid
/// until the node it names is removed; after that the slot may be reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NodeHandle(usize);

/// A node that lives in a linked list.
#[derive(Clone)]
struct Node<T> {
    /// The value being stored.
    value: T,

    /// The index of the node previous to this one.
    prev: NodeHandle,

    /// The index of the next node in the list.
    next: NodeHandle,
}

/// A circular doubly linked list living in a single contiguous Vec of nodes,
/// which are addressed by their position in the Vec. Removed slots go on a
/// freelist and get reused by later pushes. There is no compaction.
///
/// The list is circular: the head's `prev` is the tail, so both ends are one
/// hop away and only the head needs to be remembered.
///
/// Leaking a [`NodeHandle`] out of the list is the point: the map keeps the
/// handle next to the value and can unlink any key without walking the list.
#[derive(Clone)]
pub struct LinkedList<T> {
    /// The nodes in the list. `None` marks a slot sitting on the freelist.
    store: Vec<Option<Node<T>>>,

    /// Entries in the list which aren't in use anymore. These will be reused.
    free: Vec<NodeHandle>,

    /// The first node in the list.
    head: Option<NodeHandle>,
}

impl<T> LinkedList<T> {
    /// Creates a new linked list with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            store: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            head: None,
        }
    }

    /// The length of this linked list.
    pub fn len(&self) -> usize {
        self.store.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Gets an element from the list, if the handle still names a live node.
    pub fn get(&self, node: NodeHandle) -> Option<&T> {
        self.store
            .get(node.0)
            .and_then(|slot| slot.as_ref())
            .map(|node| &node.value)
    }

    /// Pushes t onto the back of the list and returns a handle to the node.
    pub fn push_back(&mut self, t: T) -> NodeHandle {
        // use the first available location in the storage vec, or infer what
        // the next location will be on push.
        let idx = self
            .free
            .pop()
            .unwrap_or_else(|| NodeHandle(self.store.len()));

        let mut n = Node {
            value: t,
            prev: idx,
            next: idx,
        };

        if let Some(head) = self.head {
            // link this node in between the tail and the head
            n.prev = self.node(head).prev;
            n.next = head;

            self.node_mut(n.prev).next = idx;
            self.node_mut(head).prev = idx;
        } else {
            self.head = Some(idx);
        }

        if self.store.len() <= idx.0 {
            self.store.push(Some(n));
        } else {
            self.store[idx.0] = Some(n);
        }

        idx
    }

    /// Remove an arbitrary node from the list, returning its value. A handle
    /// to a node that was already removed yields `None`.
    pub fn remove_node(&mut self, node: NodeHandle) -> Option<T> {
        let removed = self.store.get_mut(node.0)?.take()?;

        if removed.next == node {
            // it was the only node
            self.head = None;
        } else {
            if self.head == Some(node) {
                self.head = Some(removed.next);
            }

            self.node_mut(removed.prev).next = removed.next;
            self.node_mut(removed.next).prev = removed.prev;
        }

        self.free.push(node);

        Some(removed.value)
    }

    /// The head of this linked list.
    pub fn front(&self) -> Option<&T> {
        self.head.map(|head| &self.node(head).value)
    }

    /// The tail of this linked list.
    pub fn back(&self) -> Option<&T> {
        self.tail_handle().map(|tail| &self.node(tail).value)
    }

    /// Pops the front node off the list if it exists.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.remove_node(head)
    }

    /// Pops the back node off the list if it exists.
    pub fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail_handle()?;
        self.remove_node(tail)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail_handle(),
            remaining: self.len(),
        }
    }

    /// Clears this linked list. Does not free the underlying buffers.
    pub fn clear(&mut self) {
        self.store.clear();
        self.free.clear();
        self.head = None;
    }

    fn tail_handle(&self) -> Option<NodeHandle> {
        self.head.map(|head| self.node(head).prev)
    }

    fn node(&self, handle: NodeHandle) -> &Node<T> {
        self.store[handle.0]
            .as_ref()
            .expect("linked list handle points at a free slot")
    }

    fn node_mut(&mut self, handle: NodeHandle) -> &mut Node<T> {
        self.store[handle.0]
            .as_mut()
            .expect("linked list handle points at a free slot")
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

/// Walks a [`LinkedList`] from either end.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    front: Option<NodeHandle>,
    back: Option<NodeHandle>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.list.node(self.front?);
        self.front = Some(node.next);
        self.remaining -= 1;

        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.list.node(self.back?);
        self.back = Some(node.prev);
        self.remaining -= 1;

        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<K> OrderStructure<K> for LinkedList<K> {
    type Handle = NodeHandle;

    type Iter<'a> = Iter<'a, K>
    where
        K: 'a;

    fn with_capacity(capacity: usize) -> Self {
        LinkedList::with_capacity(capacity)
    }

    fn insert(&mut self, k: K) -> NodeHandle {
        self.push_back(k)
    }

    fn remove(&mut self, _k: &K, handle: NodeHandle) {
        self.remove_node(handle);
    }

    fn front(&self) -> Option<&K> {
        LinkedList::front(self)
    }

    fn back(&self) -> Option<&K> {
        LinkedList::back(self)
    }

    fn pop_front(&mut self) -> Option<K> {
        LinkedList::pop_front(self)
    }

    fn pop_back(&mut self) -> Option<K> {
        LinkedList::pop_back(self)
    }

    fn iter(&self) -> Iter<'_, K> {
        LinkedList::iter(self)
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }

    fn clear(&mut self) {
        LinkedList::clear(self)
    }
}
