pub mod eq_props;
pub mod naive_map;
pub mod test_map;
pub mod unwind;

/// Re-exports the `bumpalo` crate if the `allocator-api2` feature is enabled --
/// used by doctests.
#[cfg(feature = "allocator-api2")]
pub use bumpalo;
