/// A naive, inefficient ordered map that acts as an oracle for property-based
/// tests.
///
/// This map is stored as a vector of pairs in order, and performs linear
/// scans.
#[derive(Clone, Debug)]
pub struct NaiveMap<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Default for NaiveMap<K, V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: PartialEq, V> NaiveMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn index_of(&self, key: &K) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Appends, or overwrites the value in place if the key is present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index_of(&key) {
            Some(index) => {
                Some(std::mem::replace(&mut self.entries[index].1, value))
            }
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Prepends, or overwrites the value in place if the key is present.
    pub fn push_front(&mut self, key: K, value: V) -> Option<V> {
        match self.index_of(&key) {
            Some(index) => {
                Some(std::mem::replace(&mut self.entries[index].1, value))
            }
            None => {
                self.entries.insert(0, (key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.index_of(key)?;
        Some(self.entries.remove(index))
    }

    /// Removes the entry at `index` in order.
    pub fn remove_at(&mut self, index: usize) -> (K, V) {
        self.entries.remove(index)
    }

    pub fn pop_front(&mut self) -> Option<(K, V)> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries.remove(0))
    }

    pub fn pop_back(&mut self) -> Option<(K, V)> {
        self.entries.pop()
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.entries.first().map(|(k, v)| (k, v))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.entries.last().map(|(k, v)| (k, v))
    }

    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get(index).map(|(k, v)| (k, v))
    }

    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        self.entries.retain_mut(|(k, v)| f(k, v));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(
        &self,
    ) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys_of<'a>(&'a self, value: &'a V) -> impl Iterator<Item = &'a K>
    where
        V: PartialEq,
    {
        self.entries.iter().filter(move |(_, v)| v == value).map(|(k, _)| k)
    }
}
