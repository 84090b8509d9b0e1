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

/// A cursor over an [`OrderedHashMap`], pointing at an entry or at the end.
///
/// A cursor borrows the map, so unlike a [`Position`] it can't be stale. Use
/// [`position`](Self::position) to detach it.
///
/// Moving forward from the last entry reaches the end; moving backward from
/// the end reaches the last entry. Moving past the end or before the first
/// entry panics.
///
/// Created by [`OrderedHashMap::cursor_front`], [`cursor_back`],
/// [`cursor_at`] and [`cursor`].
///
/// [`cursor_back`]: OrderedHashMap::cursor_back
/// [`cursor_at`]: OrderedHashMap::cursor_at
/// [`cursor`]: OrderedHashMap::cursor
pub struct Cursor<'a, K, V, S = DefaultHashBuilder, A: Allocator = Global> {
    map: &'a OrderedHashMap<K, V, S, A>,
    // None is the end.
    index: Option<usize>,
}

impl<'a, K, V, S, A: Allocator> Cursor<'a, K, V, S, A> {
    pub(super) fn new(
        map: &'a OrderedHashMap<K, V, S, A>,
        index: Option<usize>,
    ) -> Self {
        Self { map, index }
    }

    /// Returns the entry under the cursor, or `None` at the end.
    #[inline]
    pub fn current(&self) -> Option<(&'a K, &'a V)> {
        let node = self.map.entries.node(self.index?);
        Some((&node.key, &node.value))
    }

    /// Returns the key under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[track_caller]
    pub fn key(&self) -> &'a K {
        match self.current() {
            Some((key, _)) => key,
            None => panic!("Cursor::key called at the end of the map"),
        }
    }

    /// Returns the value under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[track_caller]
    pub fn value(&self) -> &'a V {
        match self.current() {
            Some((_, value)) => value,
            None => panic!("Cursor::value called at the end of the map"),
        }
    }

    /// Returns true if the cursor is at the end.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index.is_none()
    }

    /// Returns the detached position of the cursor.
    #[inline]
    pub fn position(&self) -> Position {
        self.map.position_for(self.index)
    }

    /// Moves to the next entry, or to the end from the last entry.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[track_caller]
    pub fn move_next(&mut self) {
        self.index = self.map.step_next(self.index);
    }

    /// Moves to the previous entry, or to the last entry from the end.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the first entry, or at the end of an empty
    /// map.
    #[track_caller]
    pub fn move_prev(&mut self) {
        self.index = self.map.step_prev(self.index);
    }

    /// Moves by `n` entries: forwards if `n` is positive, backwards if
    /// negative.
    ///
    /// # Panics
    ///
    /// Panics if the walk would step past the end or before the first entry.
    #[track_caller]
    pub fn advance(&mut self, n: isize) {
        self.index = self.map.step_by(self.index, n);
    }
}

impl<K, V, S, A: Allocator> Clone for Cursor<'_, K, V, S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S, A: Allocator> Copy for Cursor<'_, K, V, S, A> {}

impl<K, V, S, A: Allocator> PartialEq for Cursor<'_, K, V, S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.map.id == other.map.id && self.index == other.index
    }
}

impl<K, V, S, A: Allocator> Eq for Cursor<'_, K, V, S, A> {}

impl<K: fmt::Debug, V: fmt::Debug, S, A: Allocator> fmt::Debug
    for Cursor<'_, K, V, S, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position())
            .field("current", &self.current())
            .finish()
    }
}

/// A cursor over an [`OrderedHashMap`] that can modify the values and remove
/// entries.
///
/// Created by [`OrderedHashMap::cursor_front_mut`], [`cursor_back_mut`],
/// [`cursor_at_mut`] and [`cursor_mut`].
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use ordhash::OrderedHashMap;
///
/// let mut map = OrderedHashMap::from([("a", 1), ("b", 2), ("c", 3)]);
///
/// let mut cursor = map.cursor_front_mut();
/// while !cursor.is_end() {
///     if cursor.value() % 2 == 0 {
///         // Removing moves the cursor to the next entry.
///         cursor.remove_current();
///     } else {
///         *cursor.value_mut() *= 10;
///         cursor.move_next();
///     }
/// }
///
/// assert_eq!(map, OrderedHashMap::from([("a", 10), ("c", 30)]));
/// # }
/// ```
///
/// [`cursor_back_mut`]: OrderedHashMap::cursor_back_mut
/// [`cursor_at_mut`]: OrderedHashMap::cursor_at_mut
/// [`cursor_mut`]: OrderedHashMap::cursor_mut
pub struct CursorMut<'a, K, V, S = DefaultHashBuilder, A: Allocator = Global>
{
    map: &'a mut OrderedHashMap<K, V, S, A>,
    index: Option<usize>,
}

impl<'a, K, V, S, A: Allocator> CursorMut<'a, K, V, S, A> {
    pub(super) fn new(
        map: &'a mut OrderedHashMap<K, V, S, A>,
        index: Option<usize>,
    ) -> Self {
        Self { map, index }
    }

    /// Returns a read-only cursor at the same entry.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, S, A> {
        Cursor::new(self.map, self.index)
    }

    /// Returns the entry under the cursor, or `None` at the end.
    #[inline]
    pub fn current(&self) -> Option<(&K, &V)> {
        let node = self.map.entries.node(self.index?);
        Some((&node.key, &node.value))
    }

    /// Returns the entry under the cursor with a mutable value, or `None` at
    /// the end.
    #[inline]
    pub fn current_mut(&mut self) -> Option<(&K, &mut V)> {
        let node = self.map.entries.node_mut(self.index?);
        Some((&node.key, &mut node.value))
    }

    /// Returns the key under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[track_caller]
    pub fn key(&self) -> &K {
        match self.current() {
            Some((key, _)) => key,
            None => panic!("CursorMut::key called at the end of the map"),
        }
    }

    /// Returns the value under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[track_caller]
    pub fn value(&self) -> &V {
        match self.current() {
            Some((_, value)) => value,
            None => panic!("CursorMut::value called at the end of the map"),
        }
    }

    /// Returns a mutable reference to the value under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[track_caller]
    pub fn value_mut(&mut self) -> &mut V {
        match self.current_mut() {
            Some((_, value)) => value,
            None => panic!("CursorMut::value_mut called at the end of the map"),
        }
    }

    /// Replaces the value under the cursor, returning the old value. The
    /// entry keeps its place.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[track_caller]
    pub fn insert_value(&mut self, value: V) -> V {
        match self.current_mut() {
            Some((_, slot)) => mem::replace(slot, value),
            None => {
                panic!("CursorMut::insert_value called at the end of the map")
            }
        }
    }

    /// Returns true if the cursor is at the end.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.index.is_none()
    }

    /// Returns the detached position of the cursor.
    #[inline]
    pub fn position(&self) -> Position {
        self.map.position_for(self.index)
    }

    /// Moves to the next entry, or to the end from the last entry.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end.
    #[track_caller]
    pub fn move_next(&mut self) {
        self.index = self.map.step_next(self.index);
    }

    /// Moves to the previous entry, or to the last entry from the end.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the first entry, or at the end of an empty
    /// map.
    #[track_caller]
    pub fn move_prev(&mut self) {
        self.index = self.map.step_prev(self.index);
    }

    /// Moves by `n` entries: forwards if `n` is positive, backwards if
    /// negative.
    ///
    /// # Panics
    ///
    /// Panics if the walk would step past the end or before the first entry.
    #[track_caller]
    pub fn advance(&mut self, n: isize) {
        self.index = self.map.step_by(self.index, n);
    }
}

impl<K: Hash + Eq, V, S: BuildHasher, A: Allocator> CursorMut<'_, K, V, S, A> {
    /// Removes the entry under the cursor and moves to the entry that
    /// followed it. Returns `None`, doing nothing, at the end.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let index = self.index?;
        self.index = self.map.entries.next(index);
        Some(self.map.remove_slot(index))
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S, A: Allocator> fmt::Debug
    for CursorMut<'_, K, V, S, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.position())
            .field("current", &self.current())
            .finish()
    }
}
