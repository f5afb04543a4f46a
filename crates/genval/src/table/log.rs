//! The append-only table log and its lazily maintained order.

use std::fmt::Write as _;

use crate::constants::{FIRST_INDEX, INIT_TABLE_SIZE};
use crate::value::Value;

use super::entry::{Op, TableEntry, TableKey, TableType};

/// How much of the log is known to be in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum LogState {
    Dirty,
    /// Sorted by key, latest revision first within each key.
    Sorted,
    /// Sorted, one entry per key, no removals.
    Compacted,
}

#[derive(Debug)]
pub(crate) struct TableLog {
    pub(crate) typ: TableType,
    pub(crate) entries: Vec<TableEntry>,
    pub(crate) revision: u64,
    pub(crate) max_index: i64,
    pub(crate) version: u64,
    pub(crate) state: LogState,
}

impl TableLog {
    pub(crate) fn new(typ: TableType) -> Self {
        Self {
            typ,
            entries: Vec::with_capacity(INIT_TABLE_SIZE),
            revision: 0,
            max_index: 0,
            version: 0,
            state: LogState::Compacted,
        }
    }

    fn append(&mut self, key: TableKey, value: Value) {
        self.revision += 1;
        let op = if value.is_nil() { Op::Remove } else { Op::Put };
        self.entries.push(TableEntry {
            key,
            rev: self.revision,
            op,
            value,
        });
        self.state = LogState::Dirty;
    }

    /// A string key turns the table into a map.
    pub(crate) fn put_key(&mut self, key: String, value: Value) {
        self.typ = TableType::Map;
        self.append(TableKey::Key(key), value);
    }

    pub(crate) fn put_index(&mut self, index: i64, value: Value) {
        self.max_index = self.max_index.max(index);
        self.append(TableKey::Index(index), value);
    }

    pub(crate) fn remove_key(&mut self, key: String) {
        self.append(TableKey::Key(key), Value::Nil);
    }

    pub(crate) fn remove_index(&mut self, index: i64) {
        self.append(TableKey::Index(index), Value::Nil);
    }

    /// Drops every entry. The revision counter keeps counting.
    pub(crate) fn clear(&mut self) {
        self.typ = TableType::List;
        self.entries = Vec::with_capacity(INIT_TABLE_SIZE);
        self.max_index = 0;
        self.state = LogState::Compacted;
    }

    pub(crate) fn sort(&mut self) {
        if self.state == LogState::Dirty {
            self.entries
                .sort_by(|a, b| a.key.cmp(&b.key).then(b.rev.cmp(&a.rev)));
            self.state = LogState::Sorted;
        }
    }

    /// Keeps the latest entry of every key and drops removals. An empty
    /// result turns the table back into an empty list.
    pub(crate) fn compact(&mut self) {
        if self.state == LogState::Compacted {
            return;
        }
        self.sort();
        let mut kept = Vec::with_capacity(self.entries.len());
        let mut last: Option<TableKey> = None;
        for entry in self.entries.drain(..) {
            if last.as_ref() == Some(&entry.key) {
                continue;
            }
            last = Some(entry.key.clone());
            if entry.op == Op::Put {
                kept.push(entry);
            }
        }
        if kept.is_empty() {
            self.typ = TableType::List;
            self.max_index = 0;
        }
        self.entries = kept;
        self.state = LogState::Compacted;
    }

    /// Latest live entry of every key, in key order.
    pub(crate) fn visible(&mut self) -> impl Iterator<Item = &TableEntry> + '_ {
        self.sort();
        let entries = &self.entries;
        entries
            .iter()
            .enumerate()
            .filter(move |(i, e)| e.op == Op::Put && (*i == 0 || entries[i - 1].key != e.key))
            .map(|(_, e)| e)
    }

    pub(crate) fn get(&mut self, key: &TableKey) -> Option<Value> {
        self.sort();
        let i = self.entries.partition_point(|e| e.key < *key);
        self.entries
            .get(i)
            .filter(|e| e.key == *key && e.op == Op::Put)
            .map(|e| e.value.clone())
    }

    pub(crate) fn size(&mut self) -> usize {
        if self.state == LogState::Compacted {
            return self.entries.len();
        }
        self.visible().count()
    }

    /// True when the compacted indexes run contiguously from the first index.
    pub(crate) fn is_sequence_list(&mut self) -> bool {
        self.compact();
        if self.typ != TableType::List {
            return false;
        }
        let n = self.entries.len();
        if n <= 1 {
            return true;
        }
        let last = FIRST_INDEX + n as i64 - 1;
        self.entries[0].key == TableKey::Index(FIRST_INDEX)
            && self.entries[n - 1].key == TableKey::Index(last)
    }

    pub(crate) fn table_type(&mut self) -> TableType {
        if self.is_sequence_list() {
            TableType::List
        } else {
            TableType::Map
        }
    }

    /// First line of a log dump. Entries are rendered by the caller once the
    /// lock is released.
    pub(crate) fn describe_header(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "table: {}, revision={}, maxIndex={}, sorted={}, compacted={} {{",
            self.typ,
            self.revision,
            self.max_index,
            self.state >= LogState::Sorted,
            self.state == LogState::Compacted,
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(ops: &[(i64, Option<i64>)]) -> TableLog {
        let mut log = TableLog::new(TableType::List);
        for &(index, value) in ops {
            log.put_index(index, value.map(Value::long).unwrap_or_default());
        }
        log
    }

    #[test]
    fn test_sort_puts_latest_revision_first() {
        let mut log = log_with(&[(2, Some(1)), (1, Some(2)), (2, Some(3))]);
        log.sort();
        let order: Vec<_> = log.entries.iter().map(|e| (e.key.clone(), e.rev)).collect();
        assert_eq!(
            order,
            [
                (TableKey::Index(1), 2),
                (TableKey::Index(2), 3),
                (TableKey::Index(2), 1),
            ]
        );
        assert_eq!(log.state, LogState::Sorted);
    }

    #[test]
    fn test_compact_drops_shadowed_and_removed() {
        let mut log = log_with(&[(1, Some(1)), (2, Some(2)), (1, Some(10)), (2, None)]);
        assert_eq!(log.size(), 1);
        assert_eq!(log.entries.len(), 4);
        log.compact();
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].value, Value::long(10));
        assert_eq!(log.max_index, 2);
    }

    #[test]
    fn test_compact_to_empty_resets_shape() {
        let mut log = TableLog::new(TableType::Map);
        log.put_key("a".into(), Value::long(1));
        log.put_index(4, Value::long(4));
        log.remove_key("a".into());
        log.remove_index(4);
        log.compact();
        assert!(log.entries.is_empty());
        assert_eq!(log.typ, TableType::List);
        assert_eq!(log.max_index, 0);
        assert_eq!(log.revision, 4);
    }

    #[test]
    fn test_sequence_detection() {
        assert!(log_with(&[(1, Some(1)), (2, Some(2))]).is_sequence_list());
        assert!(log_with(&[(5, Some(1))]).is_sequence_list());
        assert!(!log_with(&[(1, Some(1)), (3, Some(3))]).is_sequence_list());
        assert!(!log_with(&[(0, Some(0)), (1, Some(1))]).is_sequence_list());
    }

    #[test]
    fn test_get_reads_latest() {
        let mut log = log_with(&[(3, Some(1)), (3, Some(2))]);
        assert_eq!(log.get(&TableKey::Index(3)), Some(Value::long(2)));
        log.remove_index(3);
        assert_eq!(log.get(&TableKey::Index(3)), None);
        assert_eq!(log.get(&TableKey::Key("3".into())), None);
    }
}
