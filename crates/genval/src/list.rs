//! Persistent ordered list of values.

use std::sync::Arc;

use genval_pack::Packer;

use crate::constants::MAX_LIST_GAP;
use crate::json;
use crate::number::Number;
use crate::sorted_map::{MapEntry, SortedMap};
use crate::string::Str;
use crate::traversal::Traversal;
use crate::value::Value;

/// An ordered, zero-indexed sequence of values. Nil elements are allowed
/// and render `null`.
///
/// Mutators leave `self` untouched and return a new list. [`List::push`]
/// takes the list by value and appends in place when no other list shares
/// the buffer.
///
/// ```
/// use genval::{List, Value};
///
/// let list = List::new().append(Value::long(1));
/// let longer = list.append(Value::long(2));
/// assert_eq!(list.len(), 1);
/// assert_eq!(longer.to_json(), "[1,2]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct List {
    items: Arc<Vec<Value>>,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.items) as *const () as usize
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.items
    }

    /// Position and value of every element.
    pub fn items(&self) -> impl Iterator<Item = (usize, &Value)> + '_ {
        self.items.iter().enumerate()
    }

    /// Elements keyed by their position as a decimal string.
    pub fn entries(&self) -> Vec<MapEntry> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, value)| MapEntry::new(i.to_string(), value.clone()))
            .collect()
    }

    pub fn get_at(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn get_bool_at(&self, index: usize) -> Option<bool> {
        self.get_at(index)?.coerce_bool()
    }

    pub fn get_number_at(&self, index: usize) -> Option<Number> {
        self.get_at(index)?.coerce_number()
    }

    pub fn get_string_at(&self, index: usize) -> Option<Str> {
        self.get_at(index)?.coerce_string()
    }

    pub fn get_list_at(&self, index: usize) -> Option<List> {
        self.get_at(index)?.coerce_list()
    }

    pub fn get_map_at(&self, index: usize) -> Option<SortedMap> {
        self.get_at(index)?.coerce_map()
    }

    /// Returns a copy with `value` appended.
    pub fn append(&self, value: Value) -> List {
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items);
        items.push(value);
        Self::from(items)
    }

    /// Appends in place when the buffer is unshared, otherwise copies first.
    pub fn push(mut self, value: Value) -> List {
        Arc::make_mut(&mut self.items).push(value);
        self
    }

    /// Replaces the element at `index`. Writing past the end pads the gap
    /// with nil; an index more than [`MAX_LIST_GAP`] past the end appends.
    pub fn put_at(&self, index: usize, value: Value) -> List {
        let len = self.items.len();
        if index >= len && index - len > MAX_LIST_GAP {
            tracing::debug!(index, len, "put_at index too far past the end, appending");
            return self.append(value);
        }
        if index == len {
            return self.append(value);
        }
        let mut items = Vec::with_capacity(self.items.len().max(index + 1));
        items.extend_from_slice(&self.items);
        if index >= items.len() {
            items.resize(index + 1, Value::Nil);
        }
        items[index] = value;
        Self::from(items)
    }

    /// Inserts at `index`, shifting later elements right. Past the end this
    /// appends.
    pub fn insert_at(&self, index: usize, value: Value) -> List {
        if index >= self.items.len() {
            return self.append(value);
        }
        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items[..index]);
        items.push(value);
        items.extend_from_slice(&self.items[index..]);
        Self::from(items)
    }

    /// Removes the element at `index`, shifting later elements left. Out of
    /// range is a no-op.
    pub fn remove_at(&self, index: usize) -> List {
        if index >= self.items.len() {
            return self.clone();
        }
        let mut items = Vec::with_capacity(self.items.len() - 1);
        items.extend_from_slice(&self.items[..index]);
        items.extend_from_slice(&self.items[index + 1..]);
        Self::from(items)
    }

    pub fn to_json(&self) -> String {
        let mut out = String::new();
        self.print_json_with(&mut out, &mut Traversal::new());
        out
    }

    pub(crate) fn pack_with<P: Packer + ?Sized>(&self, p: &mut P, tr: &mut Traversal) {
        p.pack_list(self.items.len());
        for value in self.items.iter() {
            value.pack_with(p, tr);
        }
    }

    pub(crate) fn print_json_with(&self, out: &mut String, tr: &mut Traversal) {
        out.push('[');
        for (i, value) in self.items.iter().enumerate() {
            json::write_separator(out, i);
            value.print_json_with(out, tr);
        }
        out.push(']');
    }

    pub(crate) fn equal_with(&self, other: &List, tr: &mut Traversal) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(other.items.iter())
                .all(|(a, b)| a.equal_with(b, tr))
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.equal_with(other, &mut Traversal::new())
    }
}
