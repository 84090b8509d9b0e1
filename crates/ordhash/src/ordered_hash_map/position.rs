use crate::support::{
    fmt_utils::StrDisplayAsDebug, map_id::MapId, order_list::SlotRef,
};
use core::fmt;

/// A handle to one entry of an [`OrderedHashMap`], or to its end.
///
/// Positions are the detached counterpart of a [`Cursor`]: they are `Copy`,
/// borrow nothing, and may be held while the map is mutated. A position keeps
/// addressing its entry across insertions and removals of *other* entries.
///
/// Every position records which map issued it and which generation of the
/// entry's slot it saw. The map checks both before resolving a position, so
/// a position is rejected (see [`PositionError`]) when:
///
/// * its entry has been removed, even if the slot has since been reused;
/// * it was issued by a different map, including the map this one was
///   cloned from.
///
/// Two positions are equal if they address the same entry of the same map,
/// or are both the end of the same map.
///
/// # Examples
///
/// ```
/// # #[cfg(feature = "default-hasher")] {
/// use ordhash::OrderedHashMap;
///
/// let mut map = OrderedHashMap::new();
/// let a = map.insert("a", 1);
/// let b = map.insert("b", 2);
///
/// assert_eq!(map.begin(), a);
/// assert_eq!(map.next_position(a), b);
/// assert_eq!(map.next_position(b), map.end());
///
/// // Overwriting a value keeps the position; removing the entry stales it.
/// assert_eq!(map.insert("a", 10), a);
/// assert_eq!(map.value_at(a), &10);
/// map.remove("a");
/// assert!(!map.is_valid(a));
/// # }
/// ```
///
/// [`OrderedHashMap`]: crate::OrderedHashMap
/// [`Cursor`]: crate::Cursor
/// [`PositionError`]: crate::errors::PositionError
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Position {
    pub(super) map: MapId,
    // None is the end sentinel.
    pub(super) slot: Option<SlotRef>,
}

impl Position {
    #[inline]
    pub(super) fn new(map: MapId, slot: Option<SlotRef>) -> Self {
        Self { map, slot }
    }

    /// Returns true if this is the end position of its map.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.slot.is_none()
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Position");
        s.field("map", &self.map);
        match self.slot {
            Some(slot) => s
                .field("slot", &slot.index)
                .field("generation", &slot.generation),
            None => s.field("slot", &StrDisplayAsDebug("end")),
        };
        s.finish()
    }
}
