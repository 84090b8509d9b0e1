use super::OrderedHashMap;
use crate::support::alloc::Allocator;
use core::hash::{BuildHasher, Hash};
use proptest::{
    arbitrary::{Arbitrary, any_with},
    collection::{SizeRange, vec},
    strategy::{BoxedStrategy, Strategy},
};

/// Generates maps by collecting a vector of arbitrary pairs, so repeated
/// keys collapse the way [`FromIterator`] collapses them.
///
/// The size range bounds the number of pairs generated, which is an upper
/// bound on the length of the map.
impl<K, V, S, A> Arbitrary for OrderedHashMap<K, V, S, A>
where
    K: Arbitrary + Hash + Eq + 'static,
    V: Arbitrary + 'static,
    S: Default + BuildHasher + 'static,
    A: Default + Allocator + 'static,
    K::Strategy: 'static,
    V::Strategy: 'static,
{
    type Parameters = (SizeRange, K::Parameters, V::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(
        (size, key_args, value_args): Self::Parameters,
    ) -> Self::Strategy {
        vec((any_with::<K>(key_args), any_with::<V>(value_args)), size)
            .prop_map(|pairs| pairs.into_iter().collect())
            .boxed()
    }
}
