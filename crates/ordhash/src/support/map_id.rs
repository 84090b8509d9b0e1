use core::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};

// Zero is never handed out, so a zeroed id can't collide with a live map.
static NEXT_MAP_ID: AtomicUsize = AtomicUsize::new(1);

/// Identity of one map instance.
///
/// Every constructor and every clone draws a fresh id, and ids are never
/// reused. Positions carry the id of the map that issued them.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub(crate) struct MapId(usize);

impl MapId {
    pub(crate) fn next() -> Self {
        let id = NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed);
        // Wrapping around would require usize::MAX live-or-dead maps.
        assert_ne!(id, 0, "map identities exhausted");
        Self(id)
    }
}

impl fmt::Debug for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
