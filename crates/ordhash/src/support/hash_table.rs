//! The position index: a hash table of slot indexes with an external key
//! lookup.
//!
//! The table stores only `usize` slot indexes. Keys live in the order list;
//! every operation that needs to hash or compare a key takes a `lookup`
//! closure that resolves a slot index to its key.

use super::alloc::{AllocWrapper, Allocator};
use crate::internal::TableValidationError;
use alloc::{format, vec::Vec};
use core::hash::{BuildHasher, Hash};
use equivalent::Equivalent;
use hashbrown::{HashTable, hash_table::Entry};

#[derive(Clone, Default)]
pub(crate) struct MapHashTable<S, A: Allocator> {
    state: S,
    items: HashTable<usize, AllocWrapper<A>>,
}

impl<S, A: Allocator> MapHashTable<S, A> {
    #[inline]
    pub(crate) fn state(&self) -> &S {
        &self.state
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn into_state(self) -> S {
        self.state
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub(crate) fn indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.items.iter().copied()
    }
}

impl<S: BuildHasher, A: Allocator> MapHashTable<S, A> {
    pub(crate) fn with_capacity_and_hasher_in(
        capacity: usize,
        state: S,
        alloc: A,
    ) -> Self {
        Self {
            state,
            items: HashTable::with_capacity_in(capacity, AllocWrapper(alloc)),
        }
    }

    #[inline]
    pub(crate) fn compute_hash<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        self.state.hash_one(key)
    }

    pub(crate) fn find_index<'a, K, Q, F>(
        &self,
        key: &Q,
        lookup: F,
    ) -> Option<usize>
    where
        K: 'a,
        Q: ?Sized + Hash + Equivalent<K>,
        F: Fn(usize) -> &'a K,
    {
        let hash = self.compute_hash(key);
        self.find_index_with_hash(hash, key, lookup)
    }

    pub(crate) fn find_index_with_hash<'a, K, Q, F>(
        &self,
        hash: u64,
        key: &Q,
        lookup: F,
    ) -> Option<usize>
    where
        K: 'a,
        Q: ?Sized + Equivalent<K>,
        F: Fn(usize) -> &'a K,
    {
        self.items.find(hash, |&index| key.equivalent(lookup(index))).copied()
    }

    /// Inserts `index`, which must not already be present and whose key must
    /// not match any other entry. `lookup` must already resolve `index`.
    pub(crate) fn insert_unique<'a, K, F>(
        &mut self,
        hash: u64,
        index: usize,
        lookup: F,
    ) where
        K: 'a + Hash,
        F: Fn(usize) -> &'a K,
    {
        let state = &self.state;
        self.items.insert_unique(hash, index, |&ix| state.hash_one(lookup(ix)));
    }

    /// Looks up the slot for `key`, whose hash has already been computed.
    ///
    /// On a vacant entry, the caller must insert the slot index of a node
    /// holding `key` before touching the table again.
    pub(crate) fn entry<'a, K, Q, F>(
        &mut self,
        hash: u64,
        key: &Q,
        lookup: F,
    ) -> Entry<'_, usize, AllocWrapper<A>>
    where
        K: 'a + Hash,
        Q: ?Sized + Equivalent<K>,
        F: Fn(usize) -> &'a K,
    {
        let state = &self.state;
        self.items.entry(
            hash,
            |&index| key.equivalent(lookup(index)),
            |&index| state.hash_one(lookup(index)),
        )
    }

    /// Removes the table entry pointing at `index`, given the hash of the
    /// key stored there. Returns false if no such entry exists.
    pub(crate) fn remove(&mut self, hash: u64, index: usize) -> bool {
        match self.items.find_entry(hash, |&ix| ix == index) {
            Ok(entry) => {
                entry.remove();
                true
            }
            Err(_) => false,
        }
    }

    pub(crate) fn reserve<'a, K, F>(&mut self, additional: usize, lookup: F)
    where
        K: 'a + Hash,
        F: Fn(usize) -> &'a K,
    {
        let state = &self.state;
        self.items.reserve(additional, |&index| state.hash_one(lookup(index)));
    }

    pub(crate) fn shrink_to_fit<'a, K, F>(&mut self, lookup: F)
    where
        K: 'a + Hash,
        F: Fn(usize) -> &'a K,
    {
        let state = &self.state;
        self.items.shrink_to_fit(|&index| state.hash_one(lookup(index)));
    }

    pub(crate) fn validate(
        &self,
        expected_len: usize,
    ) -> Result<(), TableValidationError> {
        if self.len() != expected_len {
            return Err(TableValidationError::new(format!(
                "expected length {expected_len}, was {}",
                self.len()
            )));
        }

        let mut values: Vec<_> = self.indexes().collect();
        values.sort_unstable();
        if let Some(dup) = values.windows(2).find(|w| w[0] == w[1]) {
            return Err(TableValidationError::new(format!(
                "slot index {} appears more than once",
                dup[0]
            )));
        }

        Ok(())
    }
}
