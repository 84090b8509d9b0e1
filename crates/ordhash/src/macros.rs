// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Macros for this crate.

/// Creates an [`OrderedHashMap`](crate::OrderedHashMap) from a list of
/// key-value pairs, inserted in the order written.
///
/// A key written more than once keeps its first position and takes its last
/// value, as with repeated [`insert`](crate::OrderedHashMap::insert).
///
/// An optional leading `hasher = Type;` picks the hasher, which is built
/// with `Default::default()`. Without it, the map uses the default hasher (and
/// requires the `default-hasher` feature).
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use ordhash::ordered_hash_map;
///
/// let map = ordered_hash_map! {
///     "b" => 2,
///     "a" => 1,
///     "b" => 3,
/// };
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["b", "a"]);
/// assert_eq!(map.get("b"), Some(&3));
/// # }
/// ```
///
/// With an explicit hasher:
///
/// ```
/// use ordhash::ordered_hash_map;
/// use std::hash::RandomState;
///
/// let map = ordered_hash_map! {
///     hasher = RandomState;
///     1 => "one",
///     2 => "two",
/// };
/// assert_eq!(map.first(), &"one");
/// ```
#[macro_export]
macro_rules! ordered_hash_map {
    (hasher = $hasher:ty; $($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::OrderedHashMap::<_, _, $hasher>::with_hasher(
            <$hasher>::default(),
        );
        $(
            map.insert($key, $value);
        )*
        map
    }};
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::OrderedHashMap::new();
        $(
            map.insert($key, $value);
        )*
        map
    }};
}
