// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{
    Cursor, CursorMut, Drain, Entry, IntoIter, IntoKeys, IntoValues, Iter,
    IterMut, Keys, KeysOf, OccupiedEntry, Position, VacantEntry, Values,
    ValuesMut, tables::OrderedHashMapTables,
};
use crate::{
    DefaultHashBuilder,
    errors::PositionError,
    internal::ValidationError,
    support::{
        alloc::{Allocator, Global, global_alloc},
        map_id::MapId,
        order_list::{OrderList, StaleSlot},
    },
};
use alloc::format;
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    mem,
    ops::Index,
};
use equivalent::Equivalent;
use hashbrown::hash_table;

/// A hash map that remembers the order in which keys were inserted.
///
/// Lookups, insertions and removals by key are O(1) on average, like a
/// [`HashMap`]. In addition, entries form a sequence in insertion order:
/// iteration follows that order, and the first and last entries can be read
/// or removed in O(1).
///
/// Overwriting the value of an existing key does *not* move it: the key keeps
/// its original place in the sequence.
///
/// Entries can be addressed by [`Position`], a detached handle that stays
/// valid while other entries are inserted or removed. [`erase`] removes the
/// entry at a position and returns the position of the entry after it, which
/// makes removal during a walk cheap.
///
/// Two maps are equal only if they hold equal entries *in the same order*.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use ordhash::OrderedHashMap;
///
/// let mut map = OrderedHashMap::new();
/// map.insert("one", 1);
/// map.insert("two", 2);
/// map.insert("three", 3);
///
/// // Keys come back in insertion order.
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["one", "two", "three"]);
///
/// // Overwriting keeps the key where it was.
/// map.insert("one", 100);
/// assert_eq!(map.first_key(), &"one");
/// assert_eq!(map.first(), &100);
///
/// // Either end can be taken.
/// assert_eq!(map.take_last(), ("three", 3));
/// assert_eq!(map.len(), 2);
///
/// // Missing keys are not an error.
/// assert!(!map.remove("four"));
/// assert_eq!(map.take("four"), None);
/// assert_eq!(map.value("four"), 0);
/// # }
/// ```
///
/// [`HashMap`]: std::collections::HashMap
/// [`erase`]: Self::erase
pub struct OrderedHashMap<K, V, S = DefaultHashBuilder, A: Allocator = Global>
{
    pub(super) entries: OrderList<K, V, A>,
    // Invariant: the values (usize) in this table are exactly the occupied
    // slot indexes of `entries`, each stored under the hash of its node's key.
    pub(super) tables: OrderedHashMapTables<S, A>,
    pub(super) id: MapId,
}

impl<K, V, S: Default, A: Allocator + Default> Default
    for OrderedHashMap<K, V, S, A>
{
    fn default() -> Self {
        Self {
            entries: OrderList::default(),
            tables: OrderedHashMapTables::default(),
            id: MapId::next(),
        }
    }
}

#[cfg(feature = "default-hasher")]
impl<K, V> OrderedHashMap<K, V> {
    /// Creates a new, empty `OrderedHashMap`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `OrderedHashMap` with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher_in(
            capacity,
            DefaultHashBuilder::default(),
            global_alloc(),
        )
    }
}

impl<K, V, S: BuildHasher> OrderedHashMap<K, V, S> {
    /// Creates a new, empty `OrderedHashMap` with the given hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher_in(0, hasher, global_alloc())
    }

    /// Creates a new `OrderedHashMap` with the given capacity and hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::with_capacity_and_hasher_in(capacity, hasher, global_alloc())
    }
}

#[cfg(feature = "default-hasher")]
impl<K, V, A: Clone + Allocator> OrderedHashMap<K, V, DefaultHashBuilder, A> {
    /// Creates a new, empty `OrderedHashMap` using the given allocator.
    pub fn new_in(alloc: A) -> Self {
        Self::with_capacity_and_hasher_in(
            0,
            DefaultHashBuilder::default(),
            alloc,
        )
    }

    /// Creates an empty `OrderedHashMap` with the specified capacity using
    /// the given allocator.
    pub fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self::with_capacity_and_hasher_in(
            capacity,
            DefaultHashBuilder::default(),
            alloc,
        )
    }
}

impl<K, V, S: BuildHasher, A: Clone + Allocator> OrderedHashMap<K, V, S, A> {
    /// Creates a new, empty `OrderedHashMap` with the given hasher and
    /// allocator.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "allocator-api2")] {
    /// use ordhash::OrderedHashMap;
    /// # use ordhash_test_utils::bumpalo;
    /// use std::hash::RandomState;
    ///
    /// // The map can't outlive the arena it allocates from.
    /// let bump = bumpalo::Bump::new();
    /// let mut map = OrderedHashMap::with_hasher_in(RandomState::new(), &bump);
    /// map.insert("a", 1);
    /// map.insert("b", 2);
    /// assert_eq!(map.last_key(), &"b");
    /// # }
    /// ```
    pub fn with_hasher_in(hasher: S, alloc: A) -> Self {
        Self::with_capacity_and_hasher_in(0, hasher, alloc)
    }

    /// Creates a new, empty `OrderedHashMap` with the given capacity, hasher,
    /// and allocator.
    pub fn with_capacity_and_hasher_in(
        capacity: usize,
        hasher: S,
        alloc: A,
    ) -> Self {
        Self {
            entries: OrderList::with_capacity_in(capacity, alloc.clone()),
            tables: OrderedHashMapTables::with_capacity_and_hasher_in(
                capacity, hasher, alloc,
            ),
            id: MapId::next(),
        }
    }
}

impl<K, V, S, A: Allocator> OrderedHashMap<K, V, S, A> {
    /// Returns the hasher.
    #[inline]
    pub fn hasher(&self) -> &S {
        self.tables.key_to_slot.state()
    }

    /// Returns the allocator.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.entries.allocator()
    }

    /// Returns the number of entries the map can hold without reallocating
    /// its entry storage.
    pub fn capacity(&self) -> usize {
        // The entry storage and the table might theoretically diverge: use
        // the entry storage.
        self.entries.capacity()
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes all entries, keeping the allocated memory for reuse.
    ///
    /// Every position previously issued by this map becomes stale.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.tables.key_to_slot.clear();
    }

    /// Iterates over the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.entries)
    }

    /// Iterates over the entries in insertion order, with mutable access to
    /// the values.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.entries)
    }

    /// Iterates over the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Iterates over the values in insertion order.
    #[inline]
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// Iterates over mutable references to the values in insertion order.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut::new(self.iter_mut())
    }

    /// Consumes the map, returning its keys in insertion order.
    #[inline]
    pub fn into_keys(self) -> IntoKeys<K, V, A> {
        IntoKeys::new(self.into_iter())
    }

    /// Consumes the map, returning its values in insertion order.
    #[inline]
    pub fn into_values(self) -> IntoValues<K, V, A> {
        IntoValues::new(self.into_iter())
    }

    /// Returns the first key whose value equals `value`, scanning in
    /// insertion order.
    ///
    /// This is a linear search.
    pub fn key_of(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.iter().find(|(_, v)| *v == value).map(|(k, _)| k)
    }

    /// Like [`key_of`](Self::key_of), but returns `default` if no value
    /// matches.
    pub fn key_of_or<'a>(&'a self, value: &V, default: &'a K) -> &'a K
    where
        V: PartialEq,
    {
        self.key_of(value).unwrap_or(default)
    }

    /// Iterates, in insertion order, over every key whose value equals
    /// `value`.
    #[inline]
    pub fn keys_of<'a>(&'a self, value: &'a V) -> KeysOf<'a, K, V>
    where
        V: PartialEq,
    {
        KeysOf::new(self.iter(), value)
    }

    /// Returns the first entry, or `None` if the map is empty.
    #[inline]
    pub fn front(&self) -> Option<(&K, &V)> {
        let node = self.entries.node(self.entries.head()?);
        Some((&node.key, &node.value))
    }

    /// Returns the last entry, or `None` if the map is empty.
    #[inline]
    pub fn back(&self) -> Option<(&K, &V)> {
        let node = self.entries.node(self.entries.tail()?);
        Some((&node.key, &node.value))
    }

    /// Returns the first key.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn first_key(&self) -> &K {
        match self.front() {
            Some((key, _)) => key,
            None => empty_map_panic("first_key"),
        }
    }

    /// Returns the last key.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn last_key(&self) -> &K {
        match self.back() {
            Some((key, _)) => key,
            None => empty_map_panic("last_key"),
        }
    }

    /// Returns the first value.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn first(&self) -> &V {
        match self.front() {
            Some((_, value)) => value,
            None => empty_map_panic("first"),
        }
    }

    /// Returns the last value.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn last(&self) -> &V {
        match self.back() {
            Some((_, value)) => value,
            None => empty_map_panic("last"),
        }
    }

    /// Returns a mutable reference to the first value.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn first_mut(&mut self) -> &mut V {
        match self.entries.head() {
            Some(head) => &mut self.entries.node_mut(head).value,
            None => empty_map_panic("first_mut"),
        }
    }

    /// Returns a mutable reference to the last value.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn last_mut(&mut self) -> &mut V {
        match self.entries.tail() {
            Some(tail) => &mut self.entries.node_mut(tail).value,
            None => empty_map_panic("last_mut"),
        }
    }

    /// Returns the position of the first entry, or [`end`](Self::end) if the
    /// map is empty.
    #[inline]
    pub fn begin(&self) -> Position {
        self.position_for(self.entries.head())
    }

    /// Returns the end position of this map: one past the last entry.
    #[inline]
    pub fn end(&self) -> Position {
        Position::new(self.id, None)
    }

    /// Returns the position after `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end, is stale, or belongs to another map.
    #[track_caller]
    pub fn next_position(&self, position: Position) -> Position {
        let index = self.resolve_step("next_position", position);
        self.position_for(self.step_next(index))
    }

    /// Returns the position before `position`. The position before the end
    /// is the last entry.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the first entry, is the end of an empty map,
    /// is stale, or belongs to another map.
    #[track_caller]
    pub fn prev_position(&self, position: Position) -> Position {
        let index = self.resolve_step("prev_position", position);
        self.position_for(self.step_prev(index))
    }

    /// Moves `position` by `n` entries: forwards if `n` is positive,
    /// backwards if negative.
    ///
    /// # Panics
    ///
    /// Panics if the walk would step past the end or before the first entry,
    /// or if `position` is stale or belongs to another map.
    #[track_caller]
    pub fn advance(&self, position: Position, n: isize) -> Position {
        let index = self.resolve_step("advance", position);
        self.position_for(self.step_by(index, n))
    }

    /// Returns true if `position` addresses a live entry of this map.
    ///
    /// The end position is not valid in this sense, since it addresses no
    /// entry.
    #[inline]
    pub fn is_valid(&self, position: Position) -> bool {
        self.resolve(position).is_ok()
    }

    /// Returns the entry at `position`, or an error describing why it can't
    /// be resolved.
    pub fn try_entry_at(
        &self,
        position: Position,
    ) -> Result<(&K, &V), PositionError> {
        let node = self.entries.node(self.resolve(position)?);
        Ok((&node.key, &node.value))
    }

    /// Returns the entry at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end, is stale, or belongs to another map.
    #[track_caller]
    pub fn entry_at(&self, position: Position) -> (&K, &V) {
        let index = self.resolve_or_panic("entry_at", position);
        let node = self.entries.node(index);
        (&node.key, &node.value)
    }

    /// Returns the key at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end, is stale, or belongs to another map.
    #[track_caller]
    pub fn key_at(&self, position: Position) -> &K {
        &self.entries.node(self.resolve_or_panic("key_at", position)).key
    }

    /// Returns the value at `position`.
    ///
    /// The value is read at the time of the call, so an overwrite through
    /// [`insert`](Self::insert) after the position was taken is observed.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end, is stale, or belongs to another map.
    #[track_caller]
    pub fn value_at(&self, position: Position) -> &V {
        &self.entries.node(self.resolve_or_panic("value_at", position)).value
    }

    /// Returns a mutable reference to the value at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is the end, is stale, or belongs to another map.
    #[track_caller]
    pub fn value_at_mut(&mut self, position: Position) -> &mut V {
        let index = self.resolve_or_panic("value_at_mut", position);
        &mut self.entries.node_mut(index).value
    }

    /// Returns a cursor at the first entry, or at the end if the map is
    /// empty.
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, K, V, S, A> {
        Cursor::new(self, self.entries.head())
    }

    /// Returns a cursor at the last entry, or at the end if the map is empty.
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, K, V, S, A> {
        Cursor::new(self, self.entries.tail())
    }

    /// Returns a cursor at `position`, which may be the end.
    ///
    /// # Panics
    ///
    /// Panics if `position` is stale or belongs to another map.
    #[track_caller]
    pub fn cursor_at(&self, position: Position) -> Cursor<'_, K, V, S, A> {
        let index = self.resolve_step("cursor_at", position);
        Cursor::new(self, index)
    }

    /// Returns a mutable cursor at the first entry, or at the end if the map
    /// is empty.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V, S, A> {
        let head = self.entries.head();
        CursorMut::new(self, head)
    }

    /// Returns a mutable cursor at the last entry, or at the end if the map
    /// is empty.
    #[inline]
    pub fn cursor_back_mut(&mut self) -> CursorMut<'_, K, V, S, A> {
        let tail = self.entries.tail();
        CursorMut::new(self, tail)
    }

    /// Returns a mutable cursor at `position`, which may be the end.
    ///
    /// # Panics
    ///
    /// Panics if `position` is stale or belongs to another map.
    #[track_caller]
    pub fn cursor_at_mut(
        &mut self,
        position: Position,
    ) -> CursorMut<'_, K, V, S, A> {
        let index = self.resolve_step("cursor_at_mut", position);
        CursorMut::new(self, index)
    }

    pub(super) fn position_for(&self, index: Option<usize>) -> Position {
        Position::new(self.id, index.map(|ix| self.entries.slot_ref(ix)))
    }

    /// Resolves a position to the slot index of a live entry.
    pub(super) fn resolve(
        &self,
        position: Position,
    ) -> Result<usize, PositionError> {
        if position.map != self.id {
            return Err(PositionError::ForeignMap);
        }
        let Some(slot) = position.slot else {
            return Err(PositionError::End);
        };
        self.entries.resolve(slot).map_err(|StaleSlot| PositionError::Stale)
    }

    #[track_caller]
    fn resolve_or_panic(&self, op: &str, position: Position) -> usize {
        match self.resolve(position) {
            Ok(index) => index,
            Err(error) => {
                panic!("OrderedHashMap::{op}: {error} ({position:?})")
            }
        }
    }

    /// Like `resolve_or_panic`, but accepts the end position, returning
    /// `None` for it.
    #[track_caller]
    fn resolve_step(&self, op: &str, position: Position) -> Option<usize> {
        match self.resolve(position) {
            Ok(index) => Some(index),
            Err(PositionError::End) => None,
            Err(error) => {
                panic!("OrderedHashMap::{op}: {error} ({position:?})")
            }
        }
    }

    // Stepping is shared by positions and cursors. `None` is the end.

    #[track_caller]
    pub(super) fn step_next(&self, index: Option<usize>) -> Option<usize> {
        match index {
            Some(index) => self.entries.next(index),
            None => panic!("cannot move past the end of an OrderedHashMap"),
        }
    }

    #[track_caller]
    pub(super) fn step_prev(&self, index: Option<usize>) -> Option<usize> {
        let prev = match index {
            Some(index) => self.entries.prev(index),
            None => self.entries.tail(),
        };
        if prev.is_none() {
            panic!("cannot move before the first entry of an OrderedHashMap");
        }
        prev
    }

    #[track_caller]
    pub(super) fn step_by(
        &self,
        mut index: Option<usize>,
        n: isize,
    ) -> Option<usize> {
        if n >= 0 {
            for _ in 0..n {
                index = self.step_next(index);
            }
        } else {
            for _ in 0..n.unsigned_abs() {
                index = self.step_prev(index);
            }
        }
        index
    }
}

impl<K: Hash + Eq, V, S: BuildHasher, A: Allocator> OrderedHashMap<K, V, S, A> {
    /// Reserves capacity for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
        let entries = &self.entries;
        self.tables
            .key_to_slot
            .reserve(additional, |index| &entries.node(index).key);
    }

    /// Shrinks the capacity of the map as much as possible.
    ///
    /// Slots freed by removals stay allocated, since live entries never
    /// move.
    pub fn shrink_to_fit(&mut self) {
        self.entries.shrink_to_fit();
        let entries = &self.entries;
        self.tables
            .key_to_slot
            .shrink_to_fit(|index| &entries.node(index).key);
    }

    /// Checks general invariants of the map.
    ///
    /// The code below always upholds these invariants, but it's useful to have
    /// an explicit check for tests.
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ValidationError>
    where
        K: fmt::Debug,
    {
        self.entries.validate().map_err(|error| ValidationError::Table {
            name: "entries",
            error,
        })?;
        self.tables.validate(self.len())?;

        // Check that every entry is indexed, and indexed to itself.
        for (ix, node) in self.entries.nodes() {
            let Some(ix1) = self.find_index(&node.key) else {
                return Err(ValidationError::general(format!(
                    "entry at slot {ix} (key {:?}) has no index",
                    node.key
                )));
            };

            if ix1 != ix {
                return Err(ValidationError::general(format!(
                    "entry at slot {ix} (key {:?}) is indexed to slot {ix1}",
                    node.key
                )));
            }
        }

        // With equal lengths and the check above, this makes the table a
        // bijection onto the live entries.
        for ix in self.tables.key_to_slot.indexes() {
            if !self.entries.contains_index(ix) {
                return Err(ValidationError::general(format!(
                    "index points at vacant slot {ix}"
                )));
            }
        }

        Ok(())
    }

    /// Inserts a key-value pair, returning the position of the entry.
    ///
    /// If the key is absent, the entry is appended at the back. If it is
    /// present, only the value is replaced: the entry keeps its place in the
    /// order, and the returned position is the one it already had.
    #[doc(alias = "push_back")]
    pub fn insert(&mut self, key: K, value: V) -> Position {
        self.insert_full(key, value).0
    }

    /// Like [`insert`](Self::insert), but also returns the value that was
    /// replaced, if any.
    pub fn insert_full(&mut self, key: K, value: V) -> (Position, Option<V>) {
        let (index, old) = self.insert_impl(key, value, InsertAt::Back);
        (self.position_for(Some(index)), old)
    }

    /// Alias for [`insert`](Self::insert).
    #[inline]
    pub fn push_back(&mut self, key: K, value: V) -> Position {
        self.insert(key, value)
    }

    /// Inserts a key-value pair at the front if the key is absent, or
    /// replaces the value in place if it is present.
    pub fn push_front(&mut self, key: K, value: V) -> Position {
        let (index, _) = self.insert_impl(key, value, InsertAt::Front);
        self.position_for(Some(index))
    }

    /// Returns true if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.find_index(key).is_some()
    }

    /// Gets a reference to the value associated with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.find_index(key).map(|ix| &self.entries.node(ix).value)
    }

    /// Gets a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let index = self.find_index(key)?;
        Some(&mut self.entries.node_mut(index).value)
    }

    /// Gets the stored key and the value associated with `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let node = self.entries.node(self.find_index(key)?);
        Some((&node.key, &node.value))
    }

    /// Returns a clone of the value associated with `key`, or `V::default()`
    /// if the key is absent.
    pub fn value<Q>(&self, key: &Q) -> V
    where
        Q: ?Sized + Hash + Equivalent<K>,
        V: Clone + Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Returns a clone of the value associated with `key`, or `default` if
    /// the key is absent.
    pub fn value_or<Q>(&self, key: &Q, default: V) -> V
    where
        Q: ?Sized + Hash + Equivalent<K>,
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Returns a mutable reference to the value for `key`, first appending
    /// `V::default()` if the key is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.entry(key).or_default()
    }

    /// Returns a mutable reference to the value for `key`, first appending
    /// the result of `f` if the key is absent.
    pub fn get_or_insert_with<F: FnOnce() -> V>(
        &mut self,
        key: K,
        f: F,
    ) -> &mut V {
        self.entry(key).or_insert_with(f)
    }

    /// Returns the position of `key`, or [`end`](Self::end) if it is absent.
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.position_for(self.find_index(key))
    }

    /// Returns a cursor at `key`, or at the end if it is absent.
    pub fn cursor<Q>(&self, key: &Q) -> Cursor<'_, K, V, S, A>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        Cursor::new(self, self.find_index(key))
    }

    /// Returns a mutable cursor at `key`, or at the end if it is absent.
    pub fn cursor_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, S, A>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let index = self.find_index(key);
        CursorMut::new(self, index)
    }

    /// Removes `key` from the map. Returns false, leaving the map unchanged,
    /// if the key was absent.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.remove_entry(key).is_some()
    }

    /// Removes `key` from the map, returning its value, or `None` if the key
    /// was absent.
    pub fn take<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key` from the map, returning the stored key and its value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let hash = self.tables.make_key_hash(key);
        let index = self.find_index_with_hash(hash, key)?;
        Some(self.remove_slot_with_hash(index, hash))
    }

    /// Removes the entry at `position`, returning the position of the entry
    /// that followed it (or the end).
    ///
    /// Erasing the end position does nothing and returns the end. All other
    /// positions into this map stay valid.
    ///
    /// # Panics
    ///
    /// Panics if `position` is stale or belongs to another map.
    #[track_caller]
    pub fn erase(&mut self, position: Position) -> Position {
        let Some(index) = self.resolve_step("erase", position) else {
            return position;
        };
        let next = self.entries.next(index);
        self.remove_slot(index);
        self.position_for(next)
    }

    /// Removes and returns the first entry, or `None` if the map is empty.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let head = self.entries.head()?;
        Some(self.remove_slot(head))
    }

    /// Removes and returns the last entry, or `None` if the map is empty.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let tail = self.entries.tail()?;
        Some(self.remove_slot(tail))
    }

    /// Removes and returns the first entry.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn take_first(&mut self) -> (K, V) {
        match self.pop_front() {
            Some(entry) => entry,
            None => empty_map_panic("take_first"),
        }
    }

    /// Removes and returns the last entry.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn take_last(&mut self) -> (K, V) {
        match self.pop_back() {
            Some(entry) => entry,
            None => empty_map_panic("take_last"),
        }
    }

    /// Removes the first entry.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn remove_first(&mut self) {
        if self.pop_front().is_none() {
            empty_map_panic("remove_first");
        }
    }

    /// Removes the last entry.
    ///
    /// # Panics
    ///
    /// Panics if the map is empty.
    #[track_caller]
    pub fn remove_last(&mut self) {
        if self.pop_back().is_none() {
            empty_map_panic("remove_last");
        }
    }

    /// Retains only the entries for which `f` returns true, visiting them in
    /// insertion order.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut next = self.entries.head();
        while let Some(index) = next {
            next = self.entries.next(index);
            let node = self.entries.node_mut(index);
            if !f(&node.key, &mut node.value) {
                self.remove_slot(index);
            }
        }
    }

    /// Removes all entries in insertion order, returning them as an
    /// iterator. Entries not consumed by the iterator are dropped.
    #[inline]
    pub fn drain(&mut self) -> Drain<'_, K, V, S, A> {
        Drain::new(self)
    }

    /// Gets the entry for `key` for in-place manipulation.
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, S, A> {
        let hash = self.tables.make_key_hash(&key);
        match self.find_index_with_hash(hash, &key) {
            Some(index) => Entry::Occupied(OccupiedEntry::new(self, index)),
            None => Entry::Vacant(VacantEntry::new(self, key, hash)),
        }
    }

    /// Copies the entries into an unordered [`hashbrown::HashMap`] that uses
    /// a clone of this map's hasher.
    pub fn to_hash_map(&self) -> hashbrown::HashMap<K, V, S>
    where
        K: Clone,
        V: Clone,
        S: Clone,
    {
        let mut map = hashbrown::HashMap::with_capacity_and_hasher(
            self.len(),
            self.hasher().clone(),
        );
        map.extend(self.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }

    /// Converts the map into an unordered [`hashbrown::HashMap`], reusing
    /// its hasher.
    pub fn into_hash_map(self) -> hashbrown::HashMap<K, V, S> {
        let OrderedHashMap { entries, tables, .. } = self;
        let mut map = hashbrown::HashMap::with_capacity_and_hasher(
            entries.len(),
            tables.key_to_slot.into_state(),
        );
        map.extend(IntoIter::new(entries));
        map
    }

    pub(super) fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.tables
            .key_to_slot
            .find_index(key, |index| &self.entries.node(index).key)
    }

    fn find_index_with_hash<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        Q: ?Sized + Equivalent<K>,
    {
        self.tables.key_to_slot.find_index_with_hash(hash, key, |index| {
            &self.entries.node(index).key
        })
    }

    fn insert_impl(
        &mut self,
        key: K,
        value: V,
        at: InsertAt,
    ) -> (usize, Option<V>) {
        let hash = self.tables.make_key_hash(&key);
        let entries = &self.entries;
        match self
            .tables
            .key_to_slot
            .entry(hash, &key, |index| &entries.node(index).key)
        {
            hash_table::Entry::Occupied(slot) => {
                let index = *slot.get();
                let node = self.entries.node_mut(index);
                (index, Some(mem::replace(&mut node.value, value)))
            }
            hash_table::Entry::Vacant(slot) => {
                // The table reserved room for this insert while producing the
                // vacant entry, so it won't rehash (and look up keys) below.
                let index = match at {
                    InsertAt::Back => self.entries.push_back(key, value),
                    InsertAt::Front => self.entries.push_front(key, value),
                };
                slot.insert(index);
                (index, None)
            }
        }
    }

    /// Appends a node for a key known to be absent, given its hash.
    pub(super) fn insert_vacant(
        &mut self,
        key: K,
        value: V,
        hash: u64,
    ) -> usize {
        let index = self.entries.push_back(key, value);
        let entries = &self.entries;
        self.tables
            .key_to_slot
            .insert_unique(hash, index, |ix| &entries.node(ix).key);
        index
    }

    /// Removes the entry at a live slot from both structures.
    pub(super) fn remove_slot(&mut self, index: usize) -> (K, V) {
        let hash = self.tables.make_key_hash(&self.entries.node(index).key);
        self.remove_slot_with_hash(index, hash)
    }

    fn remove_slot_with_hash(&mut self, index: usize, hash: u64) -> (K, V) {
        if !self.tables.key_to_slot.remove(hash, index) {
            // The index came from the table or the list, and the two are
            // kept in sync.
            panic!("slot {index} is live but missing from the index");
        }
        self.entries.remove(index)
    }
}

#[derive(Clone, Copy, Debug)]
enum InsertAt {
    Back,
    Front,
}

#[cold]
#[track_caller]
fn empty_map_panic(op: &str) -> ! {
    panic!("called `{op}` on an empty OrderedHashMap")
}

impl<K: Clone, V: Clone, S: Clone, A: Clone + Allocator> Clone
    for OrderedHashMap<K, V, S, A>
{
    fn clone(&self) -> Self {
        // Slot indexes are relative to the arena, so a copied table indexes
        // the copied arena correctly. The copy gets its own identity, which
        // is what makes positions into `self` unusable with it.
        Self {
            entries: self.entries.clone(),
            tables: self.tables.clone(),
            id: MapId::next(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S, A: Allocator> fmt::Debug
    for OrderedHashMap<K, V, S, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, S, A: Allocator> PartialEq
    for OrderedHashMap<K, V, S, A>
{
    fn eq(&self, other: &Self) -> bool {
        // Order is part of the value: walk both maps in step.
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, S, A: Allocator> Eq for OrderedHashMap<K, V, S, A> {}

impl<K, Q, V, S, A> Index<&Q> for OrderedHashMap<K, V, S, A>
where
    K: Hash + Eq,
    Q: ?Sized + Hash + Equivalent<K>,
    S: BuildHasher,
    A: Allocator,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is absent.
    #[track_caller]
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found in OrderedHashMap"),
        }
    }
}

/// Inserts all pairs in order, as if by repeated [`insert`]: a key that is
/// already present keeps its position and takes the new value.
///
/// [`insert`]: OrderedHashMap::insert
impl<K: Hash + Eq, V, S: BuildHasher, A: Allocator> Extend<(K, V)>
    for OrderedHashMap<K, V, S, A>
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        // Keys may repeat, so this is only a lower bound on growth.
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V, S, A> Extend<(&'a K, &'a V)> for OrderedHashMap<K, V, S, A>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
    A: Allocator,
{
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K, V, S, A> FromIterator<(K, V)> for OrderedHashMap<K, V, S, A>
where
    K: Hash + Eq,
    S: Default + BuildHasher,
    A: Default + Allocator,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

#[cfg(feature = "default-hasher")]
impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]>
    for OrderedHashMap<K, V>
{
    /// Builds a map from an array of pairs, in array order.
    ///
    /// ```
    /// use ordhash::OrderedHashMap;
    ///
    /// let map = OrderedHashMap::from([("b", 2), ("a", 1)]);
    /// assert_eq!(map.first_key(), &"b");
    /// ```
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(feature = "std")]
impl<K, V, S, A> From<OrderedHashMap<K, V, S, A>>
    for std::collections::HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
    A: Allocator,
{
    fn from(map: OrderedHashMap<K, V, S, A>) -> Self {
        let OrderedHashMap { entries, tables, .. } = map;
        let mut out = std::collections::HashMap::with_capacity_and_hasher(
            entries.len(),
            tables.key_to_slot.into_state(),
        );
        out.extend(IntoIter::new(entries));
        out
    }
}

impl<'a, K, V, S, A: Allocator> IntoIterator
    for &'a OrderedHashMap<K, V, S, A>
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S, A: Allocator> IntoIterator
    for &'a mut OrderedHashMap<K, V, S, A>
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S, A: Allocator> IntoIterator for OrderedHashMap<K, V, S, A> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, A>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.entries)
    }
}
