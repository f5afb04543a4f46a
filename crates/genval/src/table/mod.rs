//! Hybrid list/map table backed by an append-only log.
//!
//! Every mutation appends `(key, revision, op, value)` to the log. Reads sort
//! the log on demand (keys ascending, latest revision first) and see the
//! newest entry of each key; packing and rendering also compact it, keeping
//! one live entry per key.
//!
//! A table keyed only by indexes `1..=n` is a list; any string key makes it
//! a map. Digit-only string keys are treated as indexes.
//!
//! ```
//! use genval::{Table, TableType, Value};
//!
//! let t = Table::list();
//! t.insert("a");
//! t.insert("b");
//! assert_eq!(t.table_type(), TableType::List);
//! assert_eq!(t.to_string(), r#"["a","b"]"#);
//!
//! t.put("name", "x");
//! assert_eq!(t.table_type(), TableType::Map);
//! assert_eq!(t.get("2"), Some(Value::utf8("b")));
//! ```

mod entry;
mod log;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use genval_pack::Packer;
use parking_lot::Mutex;

use crate::constants::FIRST_INDEX;
use crate::expression::Expression;
use crate::json;
use crate::list::List;
use crate::number::Number;
use crate::sorted_map::SortedMap;
use crate::string::Str;
use crate::traversal::Traversal;
use crate::value::Value;

pub use entry::{TableKey, TableType};
use log::{LogState, TableLog};

/// Shared handle onto one table log.
///
/// Cloning the handle shares the log; mutation goes through `&self`. Each
/// call holds the log lock for its own duration only, and nested tables are
/// visited after the lock is released, so a table may contain itself.
#[derive(Clone)]
pub struct Table {
    log: Arc<Mutex<TableLog>>,
}

/// Digit-only keys that fit an index address the index slot.
fn parse_index(key: &str) -> Option<i64> {
    if key.bytes().all(|b| b.is_ascii_digit()) {
        key.parse().ok()
    } else {
        None
    }
}

impl Table {
    pub fn list() -> Self {
        Self::with_type(TableType::List)
    }

    pub fn map() -> Self {
        Self::with_type(TableType::Map)
    }

    fn with_type(typ: TableType) -> Self {
        Self {
            log: Arc::new(Mutex::new(TableLog::new(typ))),
        }
    }

    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.log) as *const () as usize
    }

    /// Whether both handles point at the same log.
    pub fn ptr_eq(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.log, &other.log)
    }

    /// List only while the compacted indexes run contiguously from 1.
    pub fn table_type(&self) -> TableType {
        self.log.lock().table_type()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(index) = parse_index(key) {
            return self.get_at(index);
        }
        self.log.lock().get(&TableKey::Key(key.to_string()))
    }

    pub fn get_at(&self, index: i64) -> Option<Value> {
        self.log.lock().get(&TableKey::Index(index))
    }

    pub fn get_exp(&self, exp: &Expression) -> Option<Value> {
        let (table, key) = self.resolve(exp)?;
        table.get(key)
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

    pub fn get_table(&self, key: &str) -> Option<Table> {
        into_table(self.get(key)?)
    }

    pub fn get_bool_at(&self, index: i64) -> Option<bool> {
        self.get_at(index)?.coerce_bool()
    }

    pub fn get_number_at(&self, index: i64) -> Option<Number> {
        self.get_at(index)?.coerce_number()
    }

    pub fn get_string_at(&self, index: i64) -> Option<Str> {
        self.get_at(index)?.coerce_string()
    }

    pub fn get_table_at(&self, index: i64) -> Option<Table> {
        into_table(self.get_at(index)?)
    }

    pub fn get_bool_exp(&self, exp: &Expression) -> Option<bool> {
        self.get_exp(exp)?.coerce_bool()
    }

    pub fn get_number_exp(&self, exp: &Expression) -> Option<Number> {
        self.get_exp(exp)?.coerce_number()
    }

    pub fn get_string_exp(&self, exp: &Expression) -> Option<Str> {
        self.get_exp(exp)?.coerce_string()
    }

    pub fn get_table_exp(&self, exp: &Expression) -> Option<Table> {
        into_table(self.get_exp(exp)?)
    }

    /// Puts under a string key, turning the table into a map. Putting nil
    /// removes.
    pub fn put(&self, key: &str, value: impl Into<Value>) {
        let value = value.into();
        if let Some(index) = parse_index(key) {
            self.log.lock().put_index(index, value);
            return;
        }
        self.log.lock().put_key(key.to_string(), value);
    }

    /// Puts at an index. The table keeps its current type.
    pub fn put_at(&self, index: i64, value: impl Into<Value>) {
        self.log.lock().put_index(index, value.into());
    }

    /// Puts at the path, creating missing intermediate tables.
    pub fn put_exp(&self, exp: &Expression, value: impl Into<Value>) {
        self.put_exp_with(exp, value, true);
    }

    /// Puts at the path. Without `create`, a missing or non-table
    /// intermediate makes this a no-op.
    pub fn put_exp_with(&self, exp: &Expression, value: impl Into<Value>, create: bool) {
        let Some((last, parents)) = exp.path().split_last() else {
            return;
        };
        let mut current = self.clone();
        for key in parents {
            current = match current.get_table(key) {
                Some(table) => table,
                None if create => {
                    let table = Table::list();
                    current.put(key, table.clone());
                    table
                }
                None => return,
            };
        }
        current.put(last, value);
    }

    /// Appends after the highest index ever used. Once `i64::MAX` has been
    /// used there is no next index and the value is dropped.
    pub fn insert(&self, value: impl Into<Value>) {
        let mut log = self.log.lock();
        let Some(index) = log.max_index.checked_add(1) else {
            tracing::debug!(max_index = log.max_index, "no index left to insert at, dropping value");
            return;
        };
        log.put_index(index, value.into());
    }

    pub fn remove(&self, key: &str) {
        if let Some(index) = parse_index(key) {
            self.remove_at(index);
            return;
        }
        self.log.lock().remove_key(key.to_string());
    }

    pub fn remove_at(&self, index: i64) {
        self.log.lock().remove_index(index);
    }

    /// Removes at the path; a missing intermediate is a no-op.
    pub fn remove_exp(&self, exp: &Expression) {
        if let Some((table, key)) = self.resolve(exp) {
            table.remove(key);
        }
    }

    fn resolve<'e>(&self, exp: &'e Expression) -> Option<(Table, &'e str)> {
        let (last, parents) = exp.path().split_last()?;
        let mut current = self.clone();
        for key in parents {
            current = current.get_table(key)?;
        }
        Some((current, last.as_str()))
    }

    /// Visible keys in order: indexes first, then string keys.
    pub fn keys(&self) -> Vec<String> {
        self.log.lock().visible().map(|e| e.key.to_string()).collect()
    }

    pub fn indexes(&self) -> Vec<i64> {
        self.log
            .lock()
            .visible()
            .filter_map(|e| match e.key {
                TableKey::Index(index) => Some(index),
                TableKey::Key(_) => None,
            })
            .collect()
    }

    pub fn values(&self) -> Vec<Value> {
        self.log.lock().visible().map(|e| e.value.clone()).collect()
    }

    pub fn entries(&self) -> Vec<(TableKey, Value)> {
        self.log
            .lock()
            .visible()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    pub fn to_map(&self) -> HashMap<String, Value> {
        self.log
            .lock()
            .visible()
            .map(|e| (e.key.to_string(), e.value.clone()))
            .collect()
    }

    /// Number of visible entries.
    pub fn size(&self) -> usize {
        self.log.lock().size()
    }

    /// Raw log length, including shadowed entries and removals.
    pub fn log_len(&self) -> usize {
        self.log.lock().entries.len()
    }

    pub fn max_index(&self) -> i64 {
        self.log.lock().max_index
    }

    pub fn version(&self) -> u64 {
        self.log.lock().version
    }

    pub fn set_version(&self, version: u64) {
        self.log.lock().version = version;
    }

    pub fn clear(&self) {
        self.log.lock().clear();
    }

    pub fn sort(&self) {
        self.log.lock().sort();
    }

    pub fn compact(&self) {
        self.log.lock().compact();
    }

    pub fn is_sorted(&self) -> bool {
        self.log.lock().state >= LogState::Sorted
    }

    pub fn is_compacted(&self) -> bool {
        self.log.lock().state == LogState::Compacted
    }

    /// Dumps the raw log, one line per entry.
    pub fn describe(&self) -> String {
        let (mut out, entries) = {
            let log = self.log.lock();
            (log.describe_header(), log.entries.clone())
        };
        for (i, e) in entries.iter().enumerate() {
            out.push_str(&format!(
                "\n    entry[{i}]=rev={}, op={}, key={}, value={}",
                e.rev,
                e.op,
                e.key.describe(),
                e.value
            ));
        }
        out.push_str("\n}\n");
        out
    }

    /// Compacts, then copies out the shape and the live entries.
    pub(crate) fn snapshot(&self) -> (bool, Vec<(TableKey, Value)>) {
        let mut log = self.log.lock();
        let sequence = log.is_sequence_list();
        let entries = log
            .entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect();
        (sequence, entries)
    }

    pub(crate) fn pack_with<P: Packer + ?Sized>(&self, p: &mut P, tr: &mut Traversal) {
        if !tr.enter(self.id()) {
            tracing::trace!(table = self.id(), "table re-entered, packing nil");
            p.pack_nil();
            return;
        }
        let (sequence, entries) = self.snapshot();
        if sequence {
            p.pack_list(entries.len());
            for (_, value) in &entries {
                value.pack_with(p, tr);
            }
        } else {
            p.pack_map(entries.len());
            for (key, value) in &entries {
                key.pack(p);
                value.pack_with(p, tr);
            }
        }
        tr.leave();
    }

    pub(crate) fn print_json_with(&self, out: &mut String, tr: &mut Traversal) {
        if !tr.enter(self.id()) {
            json::write_null(out);
            return;
        }
        let (sequence, entries) = self.snapshot();
        if sequence {
            out.push('[');
            for (i, (_, value)) in entries.iter().enumerate() {
                json::write_separator(out, i);
                value.print_json_with(out, tr);
            }
            out.push(']');
        } else {
            out.push('{');
            for (i, (key, value)) in entries.iter().enumerate() {
                json::write_separator(out, i);
                json::write_key(out, &key.to_string());
                value.print_json_with(out, tr);
            }
            out.push('}');
        }
        tr.leave();
    }

    /// Compares visible entries key by key. A pair of tables already under
    /// comparison counts as equal.
    pub(crate) fn equal_with(&self, other: &Table, tr: &mut Traversal) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        if !tr.enter_pair(self.id(), other.id()) {
            return true;
        }
        let left = self.entries();
        let right = other.entries();
        let equal = left.len() == right.len()
            && left
                .iter()
                .zip(right.iter())
                .all(|((lk, lv), (rk, rv))| lk == rk && lv.equal_with(rv, tr));
        tr.leave_pair();
        equal
    }
}

impl Table {
    /// Equal to a list holding the visible values at indexes `1..=n` in
    /// order.
    pub(crate) fn equal_list(&self, list: &List, tr: &mut Traversal) -> bool {
        if !tr.enter_pair(self.id(), list.id()) {
            return true;
        }
        let entries = self.entries();
        let equal = entries.len() == list.len()
            && entries
                .iter()
                .zip(list.values())
                .zip(FIRST_INDEX..)
                .all(|(((key, value), item), index)| {
                    *key == TableKey::Index(index) && value.equal_with(item, tr)
                });
        tr.leave_pair();
        equal
    }

    /// Equal to a map holding the visible entries under their display keys.
    pub(crate) fn equal_map(&self, map: &SortedMap, tr: &mut Traversal) -> bool {
        if !tr.enter_pair(self.id(), map.id()) {
            return true;
        }
        let mut entries: Vec<_> = self
            .entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let equal = entries.len() == map.len()
            && entries
                .iter()
                .zip(map.entries())
                .all(|((key, value), e)| key == e.key() && value.equal_with(e.value(), tr));
        tr.leave_pair();
        equal
    }
}

fn into_table(value: Value) -> Option<Table> {
    match value {
        Value::Table(table) => Some(table),
        _ => None,
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.equal_with(other, &mut Traversal::new())
    }
}

/// Renders JSON.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.print_json_with(&mut out, &mut Traversal::new());
        f.write_str(&out)
    }
}

/// Summarizes the log without visiting nested values.
impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(log) = self.log.try_lock() else {
            return f.write_str("Table { <locked> }");
        };
        f.debug_struct("Table")
            .field("type", &log.typ)
            .field("log_len", &log.entries.len())
            .field("revision", &log.revision)
            .field("max_index", &log.max_index)
            .finish()
    }
}
