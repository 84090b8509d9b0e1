use crate::naive_map::NaiveMap;
use ordhash::OrderedHashMap;
use std::{fmt, hash::Hash};

#[cfg(feature = "default-hasher")]
pub type HashBuilder = ordhash::DefaultHashBuilder;

#[cfg(not(feature = "default-hasher"))]
pub type HashBuilder = std::hash::RandomState;

#[cfg(feature = "allocator-api2")]
// Use hugealloc for allocation if this feature is enabled.
pub type Alloc = hugealloc::HugeAlloc;

#[cfg(not(feature = "allocator-api2"))]
pub type Alloc = ordhash::Global;

/// The map type used by most tests.
pub type TestMap<K = u8, V = String> = OrderedHashMap<K, V, HashBuilder, Alloc>;

/// Creates an empty map with the test hasher and allocator.
pub fn test_map<K, V>() -> TestMap<K, V> {
    OrderedHashMap::with_hasher_in(HashBuilder::default(), Alloc::default())
}

/// Creates a map with the test hasher and allocator from pairs, inserted in
/// order.
pub fn test_map_from<K: Hash + Eq, V>(
    pairs: impl IntoIterator<Item = (K, V)>,
) -> TestMap<K, V> {
    let mut map = test_map();
    map.extend(pairs);
    map
}

/// Checks that `map` holds exactly the entries of `naive`, in the same order,
/// and that its internal invariants hold.
#[track_caller]
pub fn assert_matches_naive<K, V>(map: &TestMap<K, V>, naive: &NaiveMap<K, V>)
where
    K: Hash + Eq + fmt::Debug,
    V: PartialEq + fmt::Debug,
{
    map.validate().expect("map is valid");

    assert_eq!(map.len(), naive.len(), "lengths match");
    assert_eq!(map.is_empty(), naive.is_empty(), "emptiness matches");
    assert!(
        map.iter().eq(naive.iter()),
        "entries match in order:\n  map: {map:?}\nnaive: {naive:?}",
    );
    assert!(
        map.iter().rev().eq(naive.iter().rev()),
        "entries match in reverse order",
    );
    assert_eq!(map.front(), naive.first(), "front matches");
    assert_eq!(map.back(), naive.last(), "back matches");

    for (key, value) in naive.iter() {
        assert_eq!(map.get(key), Some(value), "value for {key:?} matches");
        assert_eq!(map.key_at(map.find(key)), key, "position of {key:?}");
    }
}
