//! Map with a reverse index from values to keys

use std::collections::BTreeMap;

/// A map `K -> V` that also indexes each value to the keys holding it
///
/// Keys sharing a value are kept in insertion order. The map is meant to be
/// rebuilt wholesale; there is no removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedMap<K, V> {
    forward: BTreeMap<K, V>,
    reverse: BTreeMap<V, Vec<K>>,
}

impl<K: Ord + Clone, V: Ord + Clone> IndexedMap<K, V> {
    /// Creates an empty map
    pub fn new() -> Self {
        Self {
            forward: BTreeMap::new(),
            reverse: BTreeMap::new(),
        }
    }

    /// Sets the value for a key, returning the previous value
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let old = self.forward.insert(key.clone(), value.clone());
        if let Some(old_value) = &old {
            if let Some(keys) = self.reverse.get_mut(old_value) {
                keys.retain(|k| *k != key);
                if keys.is_empty() {
                    self.reverse.remove(old_value);
                }
            }
        }
        self.reverse.entry(value).or_default().push(key);
        old
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    /// First key holding `value`, in insertion order
    pub fn first_key(&self, value: &V) -> Option<&K> {
        self.keys_for(value).first()
    }

    /// All keys holding `value`, in insertion order
    pub fn keys_for(&self, value: &V) -> &[K] {
        self.reverse.get(value).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.forward.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterates over key-value pairs, ordered by key
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.forward.iter()
    }

    /// Iterates over values with the keys holding them, ordered by value
    pub fn iter_reverse(&self) -> impl Iterator<Item = (&V, &[K])> {
        self.reverse.iter().map(|(v, keys)| (v, keys.as_slice()))
    }
}

impl<K: Ord + Clone, V: Ord + Clone> Default for IndexedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V: Ord + Clone> FromIterator<(K, V)> for IndexedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_index_keeps_insertion_order() {
        let map: IndexedMap<u32, &str> = [(3, "a"), (1, "b"), (2, "a")].into_iter().collect();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&3), Some(&"a"));
        assert_eq!(map.keys_for(&"a"), &[3, 2]);
        assert_eq!(map.first_key(&"a"), Some(&3));
        assert_eq!(map.keys_for(&"c"), &[] as &[u32]);
        assert_eq!(map.first_key(&"c"), None);
    }

    #[test]
    fn test_overwrite_moves_key() {
        let mut map = IndexedMap::new();
        map.insert(1, "a");
        map.insert(2, "a");
        assert_eq!(map.insert(1, "b"), Some("a"));

        assert_eq!(map.keys_for(&"a"), &[2]);
        assert_eq!(map.keys_for(&"b"), &[1]);

        map.insert(2, "b");
        assert_eq!(map.iter_reverse().count(), 1);
    }

    #[test]
    fn test_every_forward_entry_is_reverse_indexed() {
        let pairs = [(1, "x"), (2, "y"), (3, "x"), (1, "y"), (4, "z")];
        let map: IndexedMap<u32, &str> = pairs.into_iter().collect();
        for (k, v) in map.iter() {
            assert!(map.keys_for(v).contains(k));
        }
        let total: usize = map.iter_reverse().map(|(_, keys)| keys.len()).sum();
        assert_eq!(total, map.len());
    }
}
