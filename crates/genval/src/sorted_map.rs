//! Persistent key-sorted map.

use std::collections::HashMap;
use std::sync::Arc;

use genval_pack::Packer;

use crate::json;
use crate::list::List;
use crate::number::Number;
use crate::string::Str;
use crate::traversal::Traversal;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    key: String,
    value: Value,
}

impl MapEntry {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.key, self.value)
    }
}

/// Entries kept in non-decreasing key order.
///
/// Lookups binary-search. [`SortedMap::insert`] keeps duplicate keys;
/// [`SortedMap::put`] replaces an exact match. Every mutator returns a new
/// map.
///
/// ```
/// use genval::{SortedMap, Value};
///
/// let map = SortedMap::default()
///     .put("b", Value::long(2))
///     .put("a", Value::long(1));
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
/// assert_eq!(map.to_json(), r#"{"a": 1,"b": 2}"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SortedMap {
    entries: Arc<Vec<MapEntry>>,
}

impl SortedMap {
    /// Builds a map from `entries`, sorting them (stably) unless the caller
    /// states they are already sorted.
    pub fn new(mut entries: Vec<MapEntry>, sorted: bool) -> Self {
        if !sorted {
            entries.sort_by(|a, b| a.key.cmp(&b.key));
        }
        Self::from_sorted(entries)
    }

    fn from_sorted(entries: Vec<MapEntry>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.entries) as *const () as usize
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.iter().map(|e| &e.value)
    }

    /// Unordered copy. The last of several duplicate keys wins.
    pub fn hash_map(&self) -> HashMap<String, Value> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    fn lower_bound(&self, key: &str) -> usize {
        self.entries.partition_point(|e| e.key.as_str() < key)
    }

    /// First entry with `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let i = self.lower_bound(key);
        self.entries
            .get(i)
            .filter(|e| e.key == key)
            .map(|e| &e.value)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.coerce_bool()
    }

    pub fn get_number(&self, key: &str) -> Option<Number> {
        self.get(key)?.coerce_number()
    }

    pub fn get_string(&self, key: &str) -> Option<Str> {
        self.get(key)?.coerce_string()
    }

    pub fn get_list(&self, key: &str) -> Option<List> {
        self.get(key)?.coerce_list()
    }

    pub fn get_map(&self, key: &str) -> Option<SortedMap> {
        self.get(key)?.coerce_map()
    }

    /// Adds an entry after any entries with the same key.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> SortedMap {
        let entry = MapEntry::new(key, value);
        let i = self.entries.partition_point(|e| e.key <= entry.key);
        self.with(|entries| entries.insert(i, entry))
    }

    /// Replaces the first entry with the same key, or inserts.
    pub fn put(&self, key: impl Into<String>, value: Value) -> SortedMap {
        let entry = MapEntry::new(key, value);
        let i = self.lower_bound(&entry.key);
        match self.entries.get(i) {
            Some(e) if e.key == entry.key => self.with(|entries| entries[i] = entry),
            _ => self.with(|entries| entries.insert(i, entry)),
        }
    }

    /// Removes the first entry with `key`; a missing key is a no-op.
    pub fn remove(&self, key: &str) -> SortedMap {
        let i = self.lower_bound(key);
        match self.entries.get(i) {
            Some(e) if e.key == key => self.with(|entries| {
                entries.remove(i);
            }),
            _ => self.clone(),
        }
    }

    fn with(&self, edit: impl FnOnce(&mut Vec<MapEntry>)) -> SortedMap {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        edit(&mut entries);
        Self::from_sorted(entries)
    }

    pub fn to_json(&self) -> String {
        let mut out = String::new();
        self.print_json_with(&mut out, &mut Traversal::new());
        out
    }

    pub(crate) fn pack_with<P: Packer + ?Sized>(&self, p: &mut P, tr: &mut Traversal) {
        p.pack_map(self.entries.len());
        for e in self.entries.iter() {
            p.pack_str(&e.key);
            e.value.pack_with(p, tr);
        }
    }

    pub(crate) fn print_json_with(&self, out: &mut String, tr: &mut Traversal) {
        out.push('{');
        for (i, e) in self.entries.iter().enumerate() {
            json::write_separator(out, i);
            json::write_key(out, &e.key);
            e.value.print_json_with(out, tr);
        }
        out.push('}');
    }

    /// Pairwise in stored order.
    pub(crate) fn equal_with(&self, other: &SortedMap, tr: &mut Traversal) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a.key == b.key && a.value.equal_with(&b.value, tr))
    }
}

impl PartialEq for SortedMap {
    fn eq(&self, other: &Self) -> bool {
        self.equal_with(other, &mut Traversal::new())
    }
}

impl FromIterator<MapEntry> for SortedMap {
    fn from_iter<I: IntoIterator<Item = MapEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SortedMap {
        SortedMap::new(
            vec![
                MapEntry::new("c", Value::long(3)),
                MapEntry::new("a", Value::long(1)),
                MapEntry::new("b", Value::long(2)),
            ],
            false,
        )
    }

    #[test]
    fn test_new_sorts_unless_told_otherwise() {
        assert_eq!(sample().keys().collect::<Vec<_>>(), ["a", "b", "c"]);
        let unsorted = SortedMap::new(vec![MapEntry::new("z", Value::Nil), MapEntry::new("a", Value::Nil)], true);
        assert_eq!(unsorted.keys().collect::<Vec<_>>(), ["z", "a"]);
    }

    #[test]
    fn test_insert_keeps_duplicates() {
        let map = sample()
            .insert("b", Value::long(20))
            .insert("b", Value::long(200));
        assert_eq!(map.len(), 5);
        assert_eq!(map.get("b"), Some(&Value::long(2)));
        let bs: Vec<_> = map
            .entries()
            .iter()
            .filter(|e| e.key() == "b")
            .map(|e| e.value().clone())
            .collect();
        assert_eq!(bs, [Value::long(2), Value::long(20), Value::long(200)]);
    }

    #[test]
    fn test_put_replaces_in_place() {
        let original = sample();
        let map = original.put("b", Value::utf8("two"));
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("b"), Some(&Value::utf8("two")));
        assert_eq!(original.get("b"), Some(&Value::long(2)));
        assert_eq!(map.put("d", Value::long(4)).keys().last(), Some("d"));
    }

    #[test]
    fn test_remove() {
        let map = sample().remove("a");
        assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "c"]);
        assert_eq!(map.remove("zz"), map);
        assert!(SortedMap::default().remove("a").is_empty());
    }

    #[test]
    fn test_equality_uses_stored_order() {
        let sorted = sample();
        let unsorted = SortedMap::new(sorted.entries().iter().rev().cloned().collect(), true);
        assert_ne!(sorted, unsorted);
        assert_eq!(sorted, sample());
    }

    #[test]
    fn test_json_and_typed_getters() {
        let map = sample().put("s", Value::utf8("1.5")).put("n", Value::Nil);
        assert_eq!(
            map.to_json(),
            r#"{"a": 1,"b": 2,"c": 3,"n": null,"s": "1.5"}"#
        );
        assert_eq!(map.get_number("s"), Some(Number::Double(1.5)));
        assert_eq!(map.get_bool("n"), None);
        assert_eq!(map.get_string("a"), Some(Str::from("1")));
        assert_eq!(map.hash_map().len(), 5);
    }
}
