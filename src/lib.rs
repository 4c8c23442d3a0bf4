//! Hash maps that remember an order for their keys.
//!
//! An [`OrderedMap`] pairs a hash index, for O(1) lookups, with an
//! [`OrderStructure`] that decides iteration order and which entries sit at the
//! front and back. Two orders come in the box:
//!
//! * [`ListMap`] iterates in insertion order. Putting a key that's already
//!   present replaces its value but doesn't move it.
//! * [`TreeMap`] iterates in ascending key order.
//!
//! Both can be used as deques: [`pull`](OrderedMap::pull) takes from the front
//! and [`pop`](OrderedMap::pop) takes from the back.
//!
//! ```
//! use ordered_map::ListMap;
//!
//! let mut map: ListMap<u32, &str> = ListMap::new();
//! map.put(35, "Ross").put(1, "Test").put(35, "Oreto");
//!
//! assert_eq!(vec![35, 1], map.keys());
//! assert_eq!(Some("Test"), map.pop());
//! assert_eq!("[35: Oreto]", map.to_string());
//! ```

use std::collections::hash_map::RandomState;

mod hash_index;
mod identity_hasher;
mod linked_list;
mod order;
mod ordered_map;
#[cfg(feature = "shared_map")]
mod shared_map;
mod sorted_order;

pub use identity_hasher::{BuildIdentityHasher, IdentityHasher};
pub use linked_list::{LinkedList, NodeHandle};
pub use order::OrderStructure;
pub use ordered_map::{Entry, Iter, OrderedMap};
#[cfg(feature = "shared_map")]
pub use shared_map::SharedOrderedMap;
pub use sorted_order::SortedOrder;

/// A map which iterates in the order keys were first put.
pub type ListMap<K, V, S = RandomState> = OrderedMap<K, V, LinkedList<K>, S>;

/// A map which iterates in ascending key order.
pub type TreeMap<K, V, S = RandomState> = OrderedMap<K, V, SortedOrder<K>, S>;
