//! Insertion-ordered associative container.
//!
//! Entries live in a growable vector; a hash index maps each key to its slot.
//! Deleting a key leaves a tombstone in the vector so the relative order of
//! the remaining entries never moves. Tombstones are compacted away once they
//! outnumber the live entries, which keeps `delete` O(1) amortized.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::ser::{Serialize, SerializeMap, Serializer};

const COMPACT_MIN_TOMBSTONES: usize = 8;

/// A map that remembers the order in which keys were first set.
///
/// Overwriting an existing key replaces its value in place: the key keeps its
/// original position. `Clone` copies every entry, so a clone never shares
/// state with the map it came from.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<Option<(K, V)>>,
    index: HashMap<K, usize>,
    tombstones: usize,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            tombstones: 0,
        }
    }
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len() - self.tombstones
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(key, value)` pairs in insertion order.
    ///
    /// Each call starts a fresh pass over the map.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries.iter(),
            remaining: self.len(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.iter().next()
    }
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.entries[slot].as_ref().map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.entries[slot].as_mut().map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Set `key` to `value` and return a reference to the stored value.
    ///
    /// A new key is appended; an existing key keeps its position.
    pub fn set(&mut self, key: K, value: V) -> &mut V {
        let slot = match self.index.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(key.clone(), slot);
                self.entries.push(None);
                slot
            }
        };
        &mut self.entries[slot].insert((key, value)).1
    }

    /// Remove `key`, returning its value if it was present.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.index.remove(key)?;
        let (_, value) = self.entries[slot].take()?;
        self.tombstones += 1;
        if self.tombstones >= COMPACT_MIN_TOMBSTONES && self.tombstones > self.len() {
            self.compact();
        }
        Some(value)
    }

    fn compact(&mut self) {
        self.entries.retain(Option::is_some);
        self.tombstones = 0;
        for (slot, entry) in self.entries.iter().enumerate() {
            if let Some((k, _)) = entry {
                if let Some(indexed) = self.index.get_mut(k) {
                    *indexed = slot;
                }
            }
        }
    }

    /// Return a new map with `other`'s entries applied on top of `self`'s.
    ///
    /// Keys already present keep their position and take `other`'s value.
    pub fn merge(&self, other: &Self) -> Self
    where
        V: Clone,
    {
        let mut merged = self.clone();
        for (k, v) in other.iter() {
            merged.set(k.clone(), v.clone());
        }
        merged
    }

    /// Group values by `key_fn`, keeping first-occurrence order of the group
    /// keys and the original order of the values inside each group.
    pub fn group_by<G, F>(&self, mut key_fn: F) -> OrderedMap<G, Vec<V>>
    where
        G: Hash + Eq + Clone,
        V: Clone,
        F: FnMut(&V) -> G,
    {
        let mut groups: OrderedMap<G, Vec<V>> = OrderedMap::new();
        for value in self.values() {
            let group = key_fn(value);
            match groups.get_mut(&group) {
                Some(members) => members.push(value.clone()),
                None => {
                    groups.set(group, vec![value.clone()]);
                }
            }
        }
        groups
    }
}

pub struct Iter<'a, K, V> {
    inner: std::slice::Iter<'a, Option<(K, V)>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.inner.by_ref() {
            if let Some((k, v)) = entry {
                self.remaining -= 1;
                return Some((k, v));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Option<(K, V)>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter().flatten()
    }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq + Clone, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

/// Two maps are equal when they hold the same keys with equal values,
/// regardless of order.
impl<K: Hash + Eq + Clone, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Serialize, V: Serialize> Serialize for OrderedMap<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
