//! Error types for this crate.
//!
//! Missing keys are never errors: lookups return `Option`, and removals
//! report whether anything was removed. The errors here describe misuse of a
//! [`Position`](crate::Position).

use core::fmt;

/// A [`Position`](crate::Position) could not be resolved to an entry.
///
/// Returned by [`OrderedHashMap::try_entry_at`]. The panicking accessors
/// (`key_at`, `value_at`, `erase`, ...) panic with this error's message.
///
/// [`OrderedHashMap::try_entry_at`]: crate::OrderedHashMap::try_entry_at
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PositionError {
    /// The position is the end sentinel, which addresses no entry.
    End,
    /// The entry this position addressed has since been removed.
    Stale,
    /// The position was issued by a different map, or by this map before it
    /// was cloned from another.
    ForeignMap,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::End => {
                write!(f, "position is the end of the map")
            }
            PositionError::Stale => {
                write!(f, "position refers to an entry that was removed")
            }
            PositionError::ForeignMap => {
                write!(f, "position belongs to a different map")
            }
        }
    }
}

impl core::error::Error for PositionError {}
