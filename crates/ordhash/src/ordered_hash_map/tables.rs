// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::{
    internal::ValidationError,
    support::{alloc::Allocator, hash_table::MapHashTable},
};
use core::hash::{BuildHasher, Hash};

#[derive(Clone, Default)]
pub(super) struct OrderedHashMapTables<S, A: Allocator> {
    pub(super) key_to_slot: MapHashTable<S, A>,
}

impl<S: BuildHasher, A: Allocator> OrderedHashMapTables<S, A> {
    pub(super) fn with_capacity_and_hasher_in(
        capacity: usize,
        hasher: S,
        alloc: A,
    ) -> Self {
        Self {
            key_to_slot: MapHashTable::with_capacity_and_hasher_in(
                capacity, hasher, alloc,
            ),
        }
    }

    pub(super) fn validate(
        &self,
        expected_len: usize,
    ) -> Result<(), ValidationError> {
        self.key_to_slot.validate(expected_len).map_err(|error| {
            ValidationError::Table { name: "key_to_slot", error }
        })?;

        Ok(())
    }

    pub(super) fn make_key_hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        self.key_to_slot.compute_hash(key)
    }
}
