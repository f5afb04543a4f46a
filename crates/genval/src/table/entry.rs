use std::fmt;

use genval_pack::Packer;

use crate::value::Value;

/// Shape a table presents when packed or rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableType {
    List,
    Map,
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableType::List => f.write_str("LIST"),
            TableType::Map => f.write_str("MAP"),
        }
    }
}

/// A table slot. Index keys order before string keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableKey {
    Index(i64),
    Key(String),
}

impl TableKey {
    pub(crate) fn pack<P: Packer + ?Sized>(&self, p: &mut P) {
        match self {
            TableKey::Index(index) => p.pack_long(*index),
            TableKey::Key(key) => p.pack_str(key),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            TableKey::Index(index) => format!("INDEX:{index}"),
            TableKey::Key(key) => format!("KEY:{key}"),
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKey::Index(index) => write!(f, "{index}"),
            TableKey::Key(key) => f.write_str(key),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Put,
    Remove,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Put => f.write_str("PUT"),
            Op::Remove => f.write_str("REMOVE"),
        }
    }
}

/// One log record. Removals carry `Value::Nil`.
#[derive(Debug, Clone)]
pub(crate) struct TableEntry {
    pub(crate) key: TableKey,
    pub(crate) rev: u64,
    pub(crate) op: Op,
    pub(crate) value: Value,
}
