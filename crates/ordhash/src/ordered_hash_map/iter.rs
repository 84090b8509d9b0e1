use super::OrderedHashMap;
use crate::{
    DefaultHashBuilder,
    support::{
        alloc::{Allocator, Global},
        order_list::{Nodes, NodesMut, OrderList},
    },
};
use core::{
    fmt,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
};

/// An iterator over the entries of an [`OrderedHashMap`] by shared
/// reference, in insertion order. Created by [`OrderedHashMap::iter`].
pub struct Iter<'a, K, V> {
    inner: Nodes<'a, K, V>,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(super) fn new<A: Allocator>(entries: &'a OrderList<K, V, A>) -> Self {
        Self { inner: entries.nodes() }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    fn default() -> Self {
        Self { inner: Nodes::default() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, node)| (&node.key, &node.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, node)| (&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// An iterator over the entries of an [`OrderedHashMap`], with mutable
/// access to the values, in insertion order. Created by
/// [`OrderedHashMap::iter_mut`].
pub struct IterMut<'a, K, V> {
    inner: NodesMut<'a, K, V>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(super) fn new<A: Allocator>(
        entries: &'a mut OrderList<K, V, A>,
    ) -> Self {
        Self { inner: entries.nodes_mut() }
    }
}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.inner.len())
            .finish_non_exhaustive()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of an [`OrderedHashMap`], in
/// insertion order. Created by [`OrderedHashMap::into_iter`].
///
/// [`OrderedHashMap::into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V, A: Allocator = Global> {
    entries: OrderList<K, V, A>,
}

impl<K, V, A: Allocator> IntoIter<K, V, A> {
    pub(super) fn new(entries: OrderList<K, V, A>) -> Self {
        Self { entries }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, A: Allocator> fmt::Debug
    for IntoIter<K, V, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries =
            self.entries.nodes().map(|(_, node)| (&node.key, &node.value));
        f.debug_list().entries(entries).finish()
    }
}

impl<K, V, A: Allocator> Iterator for IntoIter<K, V, A> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.entries.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.entries.len(), Some(self.entries.len()))
    }
}

impl<K, V, A: Allocator> DoubleEndedIterator for IntoIter<K, V, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.pop_back()
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IntoIter<K, V, A> {}

impl<K, V, A: Allocator> FusedIterator for IntoIter<K, V, A> {}

/// An iterator over the keys of an [`OrderedHashMap`], in insertion order.
/// Created by [`OrderedHashMap::keys`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the keys of an [`OrderedHashMap`] whose values equal a
/// given value, in insertion order. Created by [`OrderedHashMap::keys_of`].
pub struct KeysOf<'a, K, V> {
    inner: Iter<'a, K, V>,
    value: &'a V,
}

impl<'a, K, V> KeysOf<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>, value: &'a V) -> Self {
        Self { inner, value }
    }
}

impl<K, V> Clone for KeysOf<'_, K, V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), value: self.value }
    }
}

impl<K: fmt::Debug, V: fmt::Debug + PartialEq> fmt::Debug for KeysOf<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeysOf")
            .field("value", self.value)
            .field("keys", &self.clone().collect::<alloc::vec::Vec<_>>())
            .finish()
    }
}

impl<'a, K, V: PartialEq> Iterator for KeysOf<'a, K, V> {
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.value;
        self.inner.find(|(_, v)| *v == value).map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

impl<K, V: PartialEq> DoubleEndedIterator for KeysOf<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let value = self.value;
        self.inner.rfind(|(_, v)| *v == value).map(|(key, _)| key)
    }
}

impl<K, V: PartialEq> FusedIterator for KeysOf<'_, K, V> {}

/// An iterator over the values of an [`OrderedHashMap`], in insertion order.
/// Created by [`OrderedHashMap::values`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    pub(super) fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// An iterator over mutable references to the values of an
/// [`OrderedHashMap`], in insertion order. Created by
/// [`OrderedHashMap::values_mut`].
#[derive(Debug)]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    pub(super) fn new(inner: IterMut<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the keys of an [`OrderedHashMap`], in insertion
/// order. Created by [`OrderedHashMap::into_keys`].
#[derive(Debug)]
pub struct IntoKeys<K, V, A: Allocator = Global> {
    inner: IntoIter<K, V, A>,
}

impl<K, V, A: Allocator> IntoKeys<K, V, A> {
    pub(super) fn new(inner: IntoIter<K, V, A>) -> Self {
        Self { inner }
    }
}

impl<K, V, A: Allocator> Iterator for IntoKeys<K, V, A> {
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, A: Allocator> DoubleEndedIterator for IntoKeys<K, V, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IntoKeys<K, V, A> {}

impl<K, V, A: Allocator> FusedIterator for IntoKeys<K, V, A> {}

/// An owning iterator over the values of an [`OrderedHashMap`], in insertion
/// order. Created by [`OrderedHashMap::into_values`].
#[derive(Debug)]
pub struct IntoValues<K, V, A: Allocator = Global> {
    inner: IntoIter<K, V, A>,
}

impl<K, V, A: Allocator> IntoValues<K, V, A> {
    pub(super) fn new(inner: IntoIter<K, V, A>) -> Self {
        Self { inner }
    }
}

impl<K, V, A: Allocator> Iterator for IntoValues<K, V, A> {
    type Item = V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, A: Allocator> DoubleEndedIterator for IntoValues<K, V, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V, A: Allocator> ExactSizeIterator for IntoValues<K, V, A> {}

impl<K, V, A: Allocator> FusedIterator for IntoValues<K, V, A> {}

/// A draining iterator over the entries of an [`OrderedHashMap`], in
/// insertion order. Created by [`OrderedHashMap::drain`].
///
/// When dropped, removes any entries that were not yielded. Each yielded
/// entry is removed from the map as it is returned, so leaking the iterator
/// leaves the map holding the remaining entries.
pub struct Drain<'a, K, V, S = DefaultHashBuilder, A: Allocator = Global> {
    map: &'a mut OrderedHashMap<K, V, S, A>,
}

impl<'a, K, V, S, A: Allocator> Drain<'a, K, V, S, A> {
    pub(super) fn new(map: &'a mut OrderedHashMap<K, V, S, A>) -> Self {
        Self { map }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S, A: Allocator> fmt::Debug
    for Drain<'_, K, V, S, A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.map.iter()).finish()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher, A: Allocator> Iterator
    for Drain<'_, K, V, S, A>
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.map.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.map.len(), Some(self.map.len()))
    }
}

impl<K: Hash + Eq, V, S: BuildHasher, A: Allocator> DoubleEndedIterator
    for Drain<'_, K, V, S, A>
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.map.pop_back()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher, A: Allocator> ExactSizeIterator
    for Drain<'_, K, V, S, A>
{
}

impl<K: Hash + Eq, V, S: BuildHasher, A: Allocator> FusedIterator
    for Drain<'_, K, V, S, A>
{
}

impl<K, V, S, A: Allocator> Drop for Drain<'_, K, V, S, A> {
    fn drop(&mut self) {
        self.map.clear();
    }
}
