//! The insertion-order sequence: a doubly-linked list stored in a slot arena.
//!
//! Nodes never move once placed, so a slot index is a stable handle for the
//! lifetime of its node. Each slot carries a generation that is bumped when
//! its node is removed; a [`SlotRef`] (index + generation) therefore goes
//! stale instead of silently pointing at whatever node reuses the slot.

use super::alloc::{AllocWrapper, Allocator};
use crate::internal::TableValidationError;
use alloc::format;
use allocator_api2::vec::Vec;
use core::{iter::FusedIterator, marker::PhantomData, mem};

/// A generation-checked reference to one slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct SlotRef {
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

/// Why a [`SlotRef`] failed to resolve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct StaleSlot;

#[derive(Clone, Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Debug)]
enum SlotState<K, V> {
    Occupied(Node<K, V>),
    Vacant { next_free: Option<usize> },
}

#[derive(Clone, Debug)]
pub(crate) struct Slot<K, V> {
    generation: u64,
    state: SlotState<K, V>,
}

impl<K, V> Slot<K, V> {
    #[inline]
    fn node(&self) -> Option<&Node<K, V>> {
        match &self.state {
            SlotState::Occupied(node) => Some(node),
            SlotState::Vacant { .. } => None,
        }
    }

    #[inline]
    fn node_mut(&mut self) -> Option<&mut Node<K, V>> {
        match &mut self.state {
            SlotState::Occupied(node) => Some(node),
            SlotState::Vacant { .. } => None,
        }
    }
}

#[derive(Clone)]
pub(crate) struct OrderList<K, V, A: Allocator> {
    slots: Vec<Slot<K, V>, AllocWrapper<A>>,
    head: Option<usize>,
    tail: Option<usize>,
    // Vacant slots form a singly-linked free list threaded through the arena.
    free_head: Option<usize>,
    len: usize,
    // Generation given to freshly pushed slots. `clear` raises it past every
    // generation handed out so far, since clearing forgets the old slots.
    generation_floor: u64,
}

impl<K, V, A: Allocator + Default> Default for OrderList<K, V, A> {
    fn default() -> Self {
        Self::with_capacity_in(0, A::default())
    }
}

impl<K, V, A: Allocator> OrderList<K, V, A> {
    pub(crate) fn with_capacity_in(capacity: usize, alloc: A) -> Self {
        Self {
            slots: Vec::with_capacity_in(capacity, AllocWrapper(alloc)),
            head: None,
            tail: None,
            free_head: None,
            len: 0,
            generation_floor: 0,
        }
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.slots.allocator().0
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        // Vacant slots are reusable, so every allocated slot counts.
        self.slots.capacity()
    }

    #[inline]
    fn vacant_len(&self) -> usize {
        self.slots.len() - self.len
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        let needed = additional.saturating_sub(self.vacant_len());
        self.slots.reserve(needed);
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        // Vacant slots can't be dropped without renumbering live ones, which
        // would invalidate outstanding positions. Only trim spare capacity.
        self.slots.shrink_to_fit();
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    #[inline]
    pub(crate) fn tail(&self) -> Option<usize> {
        self.tail
    }

    /// Returns the node at `index`.
    ///
    /// Panics if the slot is vacant: indexes come from the position table or
    /// from the list's own links, both of which only ever name live nodes.
    #[inline]
    pub(crate) fn node(&self, index: usize) -> &Node<K, V> {
        self.slots
            .get(index)
            .and_then(Slot::node)
            .unwrap_or_else(|| panic!("OrderList slot {index} is not occupied"))
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node<K, V> {
        self.slots
            .get_mut(index)
            .and_then(Slot::node_mut)
            .unwrap_or_else(|| panic!("OrderList slot {index} is not occupied"))
    }

    #[inline]
    pub(crate) fn next(&self, index: usize) -> Option<usize> {
        self.node(index).next
    }

    #[inline]
    pub(crate) fn prev(&self, index: usize) -> Option<usize> {
        self.node(index).prev
    }

    #[inline]
    pub(crate) fn slot_ref(&self, index: usize) -> SlotRef {
        SlotRef { index, generation: self.slots[index].generation }
    }

    /// Resolves a slot reference to the index of a live node.
    pub(crate) fn resolve(&self, slot: SlotRef) -> Result<usize, StaleSlot> {
        match self.slots.get(slot.index) {
            Some(s)
                if s.generation == slot.generation && s.node().is_some() =>
            {
                Ok(slot.index)
            }
            _ => Err(StaleSlot),
        }
    }

    #[inline]
    pub(crate) fn contains_index(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|s| s.node().is_some())
    }

    pub(crate) fn push_back(&mut self, key: K, value: V) -> usize {
        let index =
            self.alloc_slot(Node { key, value, prev: self.tail, next: None });
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        index
    }

    pub(crate) fn push_front(&mut self, key: K, value: V) -> usize {
        let index =
            self.alloc_slot(Node { key, value, prev: None, next: self.head });
        match self.head {
            Some(head) => self.node_mut(head).prev = Some(index),
            None => self.tail = Some(index),
        }
        self.head = Some(index);
        self.len += 1;
        index
    }

    /// Unlinks and frees the node at `index`, returning its contents.
    pub(crate) fn remove(&mut self, index: usize) -> (K, V) {
        let free_head = self.free_head;
        let slot = &mut self.slots[index];
        let SlotState::Occupied(_) = slot.state else {
            panic!("OrderList slot {index} is not occupied");
        };
        let SlotState::Occupied(node) = mem::replace(
            &mut slot.state,
            SlotState::Vacant { next_free: free_head },
        ) else {
            unreachable!("slot was just checked to be occupied");
        };
        slot.generation += 1;
        self.free_head = Some(index);
        self.len -= 1;

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        (node.key, node.value)
    }

    #[inline]
    pub(crate) fn pop_front(&mut self) -> Option<(K, V)> {
        let head = self.head?;
        Some(self.remove(head))
    }

    #[inline]
    pub(crate) fn pop_back(&mut self) -> Option<(K, V)> {
        let tail = self.tail?;
        Some(self.remove(tail))
    }

    pub(crate) fn clear(&mut self) {
        if let Some(max) = self.slots.iter().map(|s| s.generation).max() {
            self.generation_floor = self.generation_floor.max(max + 1);
        }
        self.slots.clear();
        self.head = None;
        self.tail = None;
        self.free_head = None;
        self.len = 0;
    }

    #[inline]
    pub(crate) fn nodes(&self) -> Nodes<'_, K, V> {
        Nodes {
            slots: &self.slots,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    #[inline]
    pub(crate) fn nodes_mut(&mut self) -> NodesMut<'_, K, V> {
        NodesMut {
            base: self.slots.as_mut_ptr(),
            front: self.head,
            back: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    fn alloc_slot(&mut self, node: Node<K, V>) -> usize {
        let Some(index) = self.free_head else {
            let index = self.slots.len();
            self.slots.push(Slot {
                generation: self.generation_floor,
                state: SlotState::Occupied(node),
            });
            return index;
        };

        let slot = &mut self.slots[index];
        let SlotState::Vacant { next_free } = slot.state else {
            panic!("free list points at occupied slot {index}");
        };
        self.free_head = next_free;
        slot.state = SlotState::Occupied(node);
        index
    }

    pub(crate) fn validate(&self) -> Result<(), TableValidationError> {
        let occupied = self.slots.iter().filter(|s| s.node().is_some()).count();
        if occupied != self.len {
            return Err(TableValidationError::new(format!(
                "expected {} occupied slots, found {occupied}",
                self.len
            )));
        }

        // Walk forwards, checking that every back link mirrors a forward link.
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let Some(node) = self.slots.get(index).and_then(Slot::node) else {
                return Err(TableValidationError::new(format!(
                    "link from {prev:?} points at vacant slot {index}"
                )));
            };
            if node.prev != prev {
                return Err(TableValidationError::new(format!(
                    "slot {index} has prev {:?}, expected {prev:?}",
                    node.prev
                )));
            }
            count += 1;
            if count > self.len {
                return Err(TableValidationError::new(format!(
                    "forward walk exceeded length {} (cycle?)",
                    self.len
                )));
            }
            prev = Some(index);
            cursor = node.next;
        }
        if count != self.len {
            return Err(TableValidationError::new(format!(
                "forward walk reached {count} nodes, expected {}",
                self.len
            )));
        }
        if prev != self.tail {
            return Err(TableValidationError::new(format!(
                "forward walk ended at {prev:?}, but tail is {:?}",
                self.tail
            )));
        }

        let mut free = 0;
        let mut cursor = self.free_head;
        while let Some(index) = cursor {
            match self.slots.get(index).map(|s| &s.state) {
                Some(SlotState::Vacant { next_free }) => {
                    free += 1;
                    if free > self.vacant_len() {
                        return Err(TableValidationError::new(
                            "free list is longer than the vacant slot count",
                        ));
                    }
                    cursor = *next_free;
                }
                _ => {
                    return Err(TableValidationError::new(format!(
                        "free list points at non-vacant slot {index}"
                    )));
                }
            }
        }
        if free != self.vacant_len() {
            return Err(TableValidationError::new(format!(
                "free list has {free} slots, expected {}",
                self.vacant_len()
            )));
        }

        Ok(())
    }
}

/// Walks live nodes in list order, yielding each node with its slot index.
pub(crate) struct Nodes<'a, K, V> {
    slots: &'a [Slot<K, V>],
    front: Option<usize>,
    back: Option<usize>,
    // Guards against the two ends crossing.
    remaining: usize,
}

impl<K, V> Clone for Nodes<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K, V> Default for Nodes<'_, K, V> {
    fn default() -> Self {
        Self { slots: &[], front: None, back: None, remaining: 0 }
    }
}

impl<'a, K, V> Iterator for Nodes<'a, K, V> {
    type Item = (usize, &'a Node<K, V>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front?;
        let node = self.slots[index].node()?;
        self.front = node.next;
        self.remaining -= 1;
        Some((index, node))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Nodes<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back?;
        let node = self.slots[index].node()?;
        self.back = node.prev;
        self.remaining -= 1;
        Some((index, node))
    }
}

impl<K, V> ExactSizeIterator for Nodes<'_, K, V> {}

impl<K, V> FusedIterator for Nodes<'_, K, V> {}

/// Walks live nodes in list order, yielding shared keys and mutable values.
pub(crate) struct NodesMut<'a, K, V> {
    base: *mut Slot<K, V>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
    _marker: PhantomData<&'a mut [Slot<K, V>]>,
}

// SAFETY: NodesMut behaves like `&'a mut [Slot<K, V>]`, which is Send when
// the slots are Send.
unsafe impl<K: Send, V: Send> Send for NodesMut<'_, K, V> {}
// SAFETY: as above; shared access only hands out `&K`/`&V` through `&self`
// (and in practice nothing does).
unsafe impl<K: Sync, V: Sync> Sync for NodesMut<'_, K, V> {}

impl<'a, K, V> NodesMut<'a, K, V> {
    /// Splits the slot at `index` into its parts.
    ///
    /// # Safety
    ///
    /// `index` must name a live node that has not been yielded before.
    #[inline]
    unsafe fn take_node(
        &mut self,
        index: usize,
    ) -> (&'a K, &'a mut V, Option<usize>, Option<usize>) {
        // SAFETY: `base` came from the exclusively borrowed slot vector,
        // `index` is in bounds because it came from the list's links, and the
        // caller guarantees that no other reference to this slot is live.
        let slot = unsafe { &mut *self.base.add(index) };
        let Some(node) = slot.node_mut() else {
            panic!("OrderList slot {index} is not occupied");
        };
        (&node.key, &mut node.value, node.prev, node.next)
    }
}

impl<'a, K, V> Iterator for NodesMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.front?;
        // SAFETY: the list has no duplicate nodes, and `remaining` stops both
        // ends before they can meet, so each index is visited at most once.
        let (key, value, _, next) = unsafe { self.take_node(index) };
        self.front = next;
        self.remaining -= 1;
        Some((key, value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for NodesMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.back?;
        // SAFETY: see `next`.
        let (key, value, prev, _) = unsafe { self.take_node(index) };
        self.back = prev;
        self.remaining -= 1;
        Some((key, value))
    }
}

impl<K, V> ExactSizeIterator for NodesMut<'_, K, V> {}

impl<K, V> FusedIterator for NodesMut<'_, K, V> {}
