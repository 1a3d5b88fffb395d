//! Ordered map type for Quill mappings.
//!
//! This module provides [`Map`], a wrapper around [`IndexMap`] that maintains
//! insertion order for keys, and the dot-path merge that every `key: value`
//! line of a document goes through.
//!
//! ## Dot-path keys
//!
//! `a.b.c: x` addresses nested mappings. Intermediate mappings are created on
//! demand, and a mapping written at a key that already holds a mapping is
//! merged into it rather than replacing it:
//!
//! ```rust
//! use serde_quill::{Map, Value};
//!
//! let mut map = Map::new();
//! map.merge_path("a.b", Value::from("x"));
//! map.merge_path("a.c", Value::from("y"));
//!
//! let a = map.get("a").and_then(|v| v.as_map()).unwrap();
//! assert_eq!(a.get("b").and_then(|v| v.as_str()), Some("x"));
//! assert_eq!(a.get("c").and_then(|v| v.as_str()), Some("y"));
//! ```

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Value;

/// An ordered map of string keys to Quill values.
///
/// Iteration follows insertion order, which is also the order keys are
/// written back out by the serializer.
///
/// # Examples
///
/// ```rust
/// use serde_quill::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("first".to_string(), Value::from(1.0));
/// map.insert("second".to_string(), Value::from(2.0));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Map(IndexMap<String, Value>);

impl Map {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    /// Inserts a key-value pair into the map.
    ///
    /// An existing key keeps its position; the old value is returned.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if the map holds the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Writes `value` at a dot-separated `path`.
    ///
    /// Every segment but the last must name a mapping; anything else found
    /// there (scalars, lists, content blocks) is replaced by an empty mapping.
    /// At the last segment a mapping is merged key by key into an existing
    /// mapping; any other combination replaces the old value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_quill::{Map, Value};
    ///
    /// let mut map = Map::new();
    /// map.merge_path("a", Value::from("scalar"));
    /// map.merge_path("a.b", Value::from(true));
    ///
    /// let a = map.get("a").and_then(|v| v.as_map()).unwrap();
    /// assert_eq!(a.get("b"), Some(&Value::Bool(true)));
    /// ```
    pub fn merge_path(&mut self, path: &str, value: Value) {
        let mut segments = path.split('.');
        // `split` always yields at least one segment.
        let mut last = segments.next().unwrap_or_default();
        let mut target = self;

        for segment in segments {
            let slot = target
                .0
                .entry(last.to_string())
                .or_insert_with(|| Value::Map(Map::new()));
            if !slot.is_map() {
                *slot = Value::Map(Map::new());
            }
            target = match slot {
                Value::Map(next) => next,
                _ => return,
            };
            last = segment;
        }

        target.merge_entry(last, value);
    }

    fn merge_entry(&mut self, key: &str, value: Value) {
        match self.0.entry(key.to_string()) {
            Entry::Occupied(mut slot) => match (slot.get_mut(), value) {
                (Value::Map(existing), Value::Map(incoming)) => existing.extend(incoming),
                (current, value) => *current = value,
            },
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
        }
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, Value)> for Map {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_at<'a>(map: &'a Map, key: &str) -> &'a Map {
        map.get(key).and_then(Value::as_map).unwrap()
    }

    #[test]
    fn test_merge_path_creates_intermediate_maps() {
        let mut map = Map::new();
        map.merge_path("a.b.c", Value::from("x"));

        let c = map_at(map_at(&map, "a"), "b").get("c");
        assert_eq!(c, Some(&Value::from("x")));
    }

    #[test]
    fn test_merge_path_replaces_non_map_intermediate() {
        let mut map = Map::new();
        map.merge_path("a", Value::List(vec![Value::from(1.0)]));
        map.merge_path("a.b", Value::from(2.0));

        assert_eq!(map_at(&map, "a").get("b"), Some(&Value::from(2.0)));
        assert_eq!(map_at(&map, "a").len(), 1);
    }

    #[test]
    fn test_merge_path_merges_maps_at_terminal_key() {
        let mut map = Map::new();
        let first: Map = vec![
            ("b".to_string(), Value::from(1.0)),
            ("c".to_string(), Value::from(2.0)),
        ]
        .into_iter()
        .collect();
        let second: Map = vec![
            ("d".to_string(), Value::from(3.0)),
            ("b".to_string(), Value::from(4.0)),
        ]
        .into_iter()
        .collect();

        map.merge_path("a", Value::Map(first));
        map.merge_path("a", Value::Map(second));

        let a = map_at(&map, "a");
        let keys: Vec<_> = a.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "c", "d"]);
        assert_eq!(a.get("b"), Some(&Value::from(4.0)));
    }

    #[test]
    fn test_merge_path_replaces_map_with_scalar() {
        let mut map = Map::new();
        map.merge_path("a.b", Value::from("x"));
        map.merge_path("a", Value::from("flat"));

        assert_eq!(map.get("a"), Some(&Value::from("flat")));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: Map = ["x", "y", "z"]
            .iter()
            .map(|k| (k.to_string(), Value::from(*k)))
            .collect();
        map.remove("y");

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["x", "z"]);
    }
}
