// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A hash map that remembers insertion order.
//!
//! # Motivation
//!
//! A plain hash map forgets the order in which keys arrived. Configuration
//! sections, HTTP headers, playlists and undo stacks all want keyed lookup
//! *and* a stable, user-visible order:
//!
//! ```
//! # #[cfg(feature = "default-hasher")] {
//! use ordhash::OrderedHashMap;
//!
//! let mut map = OrderedHashMap::new();
//! map.insert("zeta", 1);
//! map.insert("alpha", 2);
//! map.insert("mu", 3);
//!
//! // Overwriting a value does not move the key.
//! map.insert("zeta", 10);
//!
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, ["zeta", "alpha", "mu"]);
//! assert_eq!(map.get("zeta"), Some(&10));
//! # }
//! ```
//!
//! [`OrderedHashMap`] keeps a hash index and a doubly-linked insertion-order
//! list in lockstep. Every keyed operation is O(1) on average, and the
//! sequence operations (`first`, `last`, `pop_front`, `pop_back`,
//! `push_front`) are O(1) as well.
//!
//! # Positions
//!
//! Besides the usual iterators, the map hands out [`Position`] handles: small
//! `Copy` values that name one entry (or the end of the map) and stay valid
//! while *other* entries are inserted or removed. Positions are checked
//! against the map that issued them and against the entry's generation, so a
//! position from another map, from a clone, or for an entry that has since
//! been removed is rejected instead of silently resolving to something else.
//!
//! ```
//! # #[cfg(feature = "default-hasher")] {
//! use ordhash::OrderedHashMap;
//!
//! let mut map = OrderedHashMap::from([(1, "one"), (2, "two"), (3, "three")]);
//! let two = map.find(&2);
//! let three = map.find(&3);
//!
//! // Erasing returns the position of the following entry.
//! assert_eq!(map.erase(two), three);
//! assert!(!map.is_valid(two));
//! assert_eq!(map.key_at(three), &3);
//! # }
//! ```
//!
//! [`Cursor`] and [`CursorMut`] pair a position with a borrow of the map for
//! step-by-step traversal and in-place removal.
//!
//! # Features
//!
//! * `default-hasher` (default): use [foldhash] as [`DefaultHashBuilder`].
//! * `allocator-api2` (default): accept custom allocators implementing
//!   `allocator_api2::alloc::Allocator`.
//! * `std` (default): conversions into `std::collections::HashMap`.
//! * `proptest`: an [`Arbitrary`] implementation for [`OrderedHashMap`].
//!
//! [foldhash]: https://docs.rs/foldhash
//! [`Arbitrary`]: https://docs.rs/proptest/latest/proptest/arbitrary/trait.Arbitrary.html

#![no_std]
#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod errors;
#[doc(hidden)]
pub mod internal;
mod macros;
pub mod ordered_hash_map;
mod support;

pub use ordered_hash_map::{Cursor, CursorMut, OrderedHashMap, Position};
pub use support::{alloc::Global, hash_builder::DefaultHashBuilder};
