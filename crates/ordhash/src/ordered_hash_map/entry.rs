use super::{OrderedHashMap, Position};
use crate::{
    DefaultHashBuilder,
    support::alloc::{Allocator, Global},
};
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    mem,
};

/// An implementation of the Entry API for [`OrderedHashMap`]. Created by
/// [`OrderedHashMap::entry`].
///
/// Inserting through a vacant entry appends at the back, like
/// [`OrderedHashMap::insert`].
pub enum Entry<'a, K, V, S = DefaultHashBuilder, A: Allocator = Global> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, S, A>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, S, A>),
}

impl<K: fmt::Debug, V: fmt::Debug, S, A: Allocator> fmt::Debug
    for Entry<'_, K, V, S, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Vacant(entry) => {
                f.debug_tuple("Vacant").field(entry).finish()
            }
            Entry::Occupied(entry) => {
                f.debug_tuple("Occupied").field(entry).finish()
            }
        }
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher, A: Allocator> Entry<'a, K, V, S, A> {
    /// Returns the key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Vacant(entry) => entry.key(),
            Entry::Occupied(entry) => entry.key(),
        }
    }

    /// Ensures a value is in the entry by inserting `default` if empty, and
    /// returns a mutable reference to the value in the entry.
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Vacant(entry) => entry.insert(default),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Ensures a value is in the entry by inserting the result of `default`
    /// if empty, and returns a mutable reference to the value in the entry.
    #[inline]
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Vacant(entry) => entry.insert(default()),
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Like [`or_insert_with`](Self::or_insert_with), but the function is
    /// passed the key.
    #[inline]
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(
        self,
        default: F,
    ) -> &'a mut V {
        match self {
            Entry::Vacant(entry) => {
                let value = default(entry.key());
                entry.insert(value)
            }
            Entry::Occupied(entry) => entry.into_mut(),
        }
    }

    /// Ensures a value is in the entry by inserting `V::default()` if empty,
    /// and returns a mutable reference to the value in the entry.
    #[inline]
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    #[inline]
    pub fn and_modify<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        if let Entry::Occupied(entry) = &mut self {
            f(entry.get_mut());
        }
        self
    }
}

/// A view into a vacant entry in an [`OrderedHashMap`]. Part of the
/// [`Entry`] enum.
pub struct VacantEntry<'a, K, V, S = DefaultHashBuilder, A: Allocator = Global>
{
    map: &'a mut OrderedHashMap<K, V, S, A>,
    key: K,
    // The hash of `key`, computed once by `OrderedHashMap::entry`.
    hash: u64,
}

impl<K: fmt::Debug, V, S, A: Allocator> fmt::Debug
    for VacantEntry<'_, K, V, S, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VacantEntry")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher, A: Allocator>
    VacantEntry<'a, K, V, S, A>
{
    pub(super) fn new(
        map: &'a mut OrderedHashMap<K, V, S, A>,
        key: K,
        hash: u64,
    ) -> Self {
        VacantEntry { map, key, hash }
    }

    /// Returns the key that would be inserted.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Takes back ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Appends the entry at the back of the map, returning a mutable
    /// reference to the value.
    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { map, key, hash } = self;
        let index = map.insert_vacant(key, value, hash);
        &mut map.entries.node_mut(index).value
    }

    /// Appends the entry at the back of the map, returning an
    /// `OccupiedEntry` for it.
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, S, A> {
        let VacantEntry { map, key, hash } = self;
        let index = map.insert_vacant(key, value, hash);
        OccupiedEntry::new(map, index)
    }
}

/// A view into an occupied entry in an [`OrderedHashMap`]. Part of the
/// [`Entry`] enum.
pub struct OccupiedEntry<
    'a,
    K,
    V,
    S = DefaultHashBuilder,
    A: Allocator = Global,
> {
    map: &'a mut OrderedHashMap<K, V, S, A>,
    // index is a live slot of the map's order list.
    index: usize,
}

impl<K: fmt::Debug, V: fmt::Debug, S, A: Allocator> fmt::Debug
    for OccupiedEntry<'_, K, V, S, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.map.entries.node(self.index);
        f.debug_struct("OccupiedEntry")
            .field("key", &node.key)
            .field("value", &node.value)
            .finish_non_exhaustive()
    }
}

impl<'a, K, V, S, A: Allocator> OccupiedEntry<'a, K, V, S, A> {
    pub(super) fn new(
        map: &'a mut OrderedHashMap<K, V, S, A>,
        index: usize,
    ) -> Self {
        OccupiedEntry { map, index }
    }

    /// Returns the key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        &self.map.entries.node(self.index).key
    }

    /// Gets a reference to the value.
    #[inline]
    pub fn get(&self) -> &V {
        &self.map.entries.node(self.index).value
    }

    /// Gets a mutable reference to the value.
    ///
    /// If you need a reference that may outlive the destruction of the
    /// `Entry` value, see [`into_mut`](Self::into_mut).
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.map.entries.node_mut(self.index).value
    }

    /// Converts self into a mutable reference to the value.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        &mut self.map.entries.node_mut(self.index).value
    }

    /// Replaces the value, returning the old one. The entry keeps its place.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Returns the position of this entry.
    #[inline]
    pub fn position(&self) -> Position {
        self.map.position_for(Some(self.index))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher, A: Allocator>
    OccupiedEntry<'_, K, V, S, A>
{
    /// Removes the entry from the map, returning the value.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Removes the entry from the map, returning the stored key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.map.remove_slot(self.index)
    }
}
