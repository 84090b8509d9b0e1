//! A hash map that preserves insertion order, with stable positions.
//!
//! See [`OrderedHashMap`] for details.

mod cursor;
mod entry;
pub(crate) mod imp;
mod iter;
mod position;
#[cfg(feature = "proptest")]
mod proptest_impls;
mod tables;

pub use cursor::{Cursor, CursorMut};
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use imp::OrderedHashMap;
pub use iter::{
    Drain, IntoIter, IntoKeys, IntoValues, Iter, IterMut, Keys, KeysOf,
    Values, ValuesMut,
};
pub use position::Position;
