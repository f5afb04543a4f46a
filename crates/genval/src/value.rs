//! [`Value`], the generic self-describing value.

use std::fmt;

use genval_pack::Packer;

use crate::coerce::{parse_bool, parse_number, parse_string};
use crate::json;
use crate::list::List;
use crate::number::Number;
use crate::sorted_map::{MapEntry, SortedMap};
use crate::string::Str;
use crate::table::Table;
use crate::traversal::Traversal;
use crate::unknown::Unknown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Nil,
    Bool,
    Number,
    String,
    List,
    Map,
    Table,
    Unknown,
}

/// A generic value.
///
/// Scalars are immutable. [`List`] and [`SortedMap`] are persistent: their
/// mutators return new values. [`Table`] is a shared handle onto one
/// mutable log, so cloning a `Value::Table` does not copy the table.
///
/// Equality (`==`) is structural and nil-safe; see [`Number`] for the numeric
/// rules and [`Table`] for tables. Kinds never compare equal to each other,
/// except that a table equals the [`List`] or [`SortedMap`] it decodes from:
/// a list when its visible indexes run `1..=n` over the same values, a map
/// when its visible keys, rendered as strings, pair up with the map's.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(Number),
    String(Str),
    List(List),
    Map(SortedMap),
    Table(Table),
    Unknown(Unknown),
}

impl Value {
    pub fn long(val: i64) -> Self {
        Value::Number(Number::Long(val))
    }

    pub fn double(val: f64) -> Self {
        Value::Number(Number::Double(val))
    }

    pub fn nan() -> Self {
        Value::Number(Number::nan())
    }

    pub fn utf8(val: impl Into<String>) -> Self {
        Value::String(Str::Utf8(val.into()))
    }

    pub fn raw(val: Vec<u8>) -> Self {
        Value::String(Str::Raw(val))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::List(_) => Kind::List,
            Value::Map(_) => Kind::Map,
            Value::Table(_) => Kind::Table,
            Value::Unknown(_) => Kind::Unknown,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&Str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&SortedMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_unknown(&self) -> Option<&Unknown> {
        match self {
            Value::Unknown(u) => Some(u),
            _ => None,
        }
    }

    /// Reads the value as a bool, re-parsing the display string of other
    /// kinds. `None` for nil.
    pub fn coerce_bool(&self) -> Option<bool> {
        match self {
            Value::Nil => None,
            Value::Bool(b) => Some(*b),
            other => Some(parse_bool(&other.to_string())),
        }
    }

    pub fn coerce_number(&self) -> Option<Number> {
        match self {
            Value::Nil => None,
            Value::Number(n) => Some(*n),
            other => Some(parse_number(&other.to_string())),
        }
    }

    pub fn coerce_string(&self) -> Option<Str> {
        match self {
            Value::Nil => None,
            Value::String(s) => Some(s.clone()),
            other => Some(parse_string(&other.to_string())),
        }
    }

    /// Lists as-is, maps as their values, tables as their visible values.
    pub fn coerce_list(&self) -> Option<List> {
        match self {
            Value::List(l) => Some(l.clone()),
            Value::Map(m) => Some(m.values().cloned().collect()),
            Value::Table(t) => Some(t.values().into_iter().collect()),
            _ => None,
        }
    }

    /// Maps as-is, lists keyed by position, tables by their visible keys.
    pub fn coerce_map(&self) -> Option<SortedMap> {
        match self {
            Value::Map(m) => Some(m.clone()),
            Value::List(l) => Some(SortedMap::new(l.entries(), false)),
            Value::Table(t) => {
                let entries = t
                    .entries()
                    .into_iter()
                    .map(|(key, value)| MapEntry::new(key.to_string(), value))
                    .collect();
                Some(SortedMap::new(entries, false))
            }
            _ => None,
        }
    }

    /// Emits the value. A table that contains itself packs `nil` at the
    /// cyclic point.
    pub fn pack<P: Packer + ?Sized>(&self, p: &mut P) {
        self.pack_with(p, &mut Traversal::new());
    }

    pub(crate) fn pack_with<P: Packer + ?Sized>(&self, p: &mut P, tr: &mut Traversal) {
        match self {
            Value::Nil => p.pack_nil(),
            Value::Bool(b) => p.pack_bool(*b),
            Value::Number(n) => n.pack(p),
            Value::String(s) => s.pack(p),
            Value::List(l) => l.pack_with(p, tr),
            Value::Map(m) => m.pack_with(p, tr),
            Value::Table(t) => t.pack_with(p, tr),
            Value::Unknown(u) => u.pack(p),
        }
    }

    /// Appends the JSON rendering. A table that contains itself renders
    /// `null` at the cyclic point.
    pub fn print_json(&self, out: &mut String) {
        self.print_json_with(out, &mut Traversal::new());
    }

    pub(crate) fn print_json_with(&self, out: &mut String, tr: &mut Traversal) {
        match self {
            Value::Nil => json::write_null(out),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => n.print_json(out),
            Value::String(s) => s.print_json(out),
            Value::List(l) => l.print_json_with(out, tr),
            Value::Map(m) => m.print_json_with(out, tr),
            Value::Table(t) => t.print_json_with(out, tr),
            Value::Unknown(u) => u.print_json(out),
        }
    }

    pub fn to_json(&self) -> String {
        let mut out = String::new();
        self.print_json(&mut out);
        out
    }

    pub(crate) fn equal_with(&self, other: &Value, tr: &mut Traversal) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a.equal_with(b, tr),
            (Value::Map(a), Value::Map(b)) => a.equal_with(b, tr),
            (Value::Table(a), Value::Table(b)) => a.equal_with(b, tr),
            (Value::Table(t), Value::List(l)) | (Value::List(l), Value::Table(t)) => {
                t.equal_list(l, tr)
            }
            (Value::Table(t), Value::Map(m)) | (Value::Map(m), Value::Table(t)) => {
                t.equal_map(m, tr)
            }
            (Value::Unknown(a), Value::Unknown(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equal_with(other, &mut Traversal::new())
    }
}

/// Scalars print their plain text (`nil`, `true`, `12.5`, raw strings as
/// `base64,...`); collections print their JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s}"),
            Value::Unknown(u) => write!(f, "{u}"),
            Value::List(_) | Value::Map(_) | Value::Table(_) => f.write_str(&self.to_json()),
        }
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::long(val)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::long(val as i64)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::double(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::utf8(val)
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::utf8(val)
    }
}

impl From<Vec<u8>> for Value {
    fn from(val: Vec<u8>) -> Self {
        Value::raw(val)
    }
}

impl From<Number> for Value {
    fn from(val: Number) -> Self {
        Value::Number(val)
    }
}

impl From<Str> for Value {
    fn from(val: Str) -> Self {
        Value::String(val)
    }
}

impl From<List> for Value {
    fn from(val: List) -> Self {
        Value::List(val)
    }
}

impl From<SortedMap> for Value {
    fn from(val: SortedMap) -> Self {
        Value::Map(val)
    }
}

impl From<Table> for Value {
    fn from(val: Table) -> Self {
        Value::Table(val)
    }
}

impl From<Unknown> for Value {
    fn from(val: Unknown) -> Self {
        Value::Unknown(val)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(val: Option<T>) -> Self {
        val.map_or(Value::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::double(-12.34).to_string(), "-12.34");
        assert_eq!(Value::utf8("text").to_string(), "text");
        assert_eq!(Value::raw(vec![0, 1, 2]).to_string(), "base64,AAEC");
        assert_eq!(Value::Nil.to_json(), "null");
    }

    #[test]
    fn test_equality_is_kind_strict() {
        assert_eq!(Value::Nil, Value::Nil);
        assert_ne!(Value::Nil, Value::from(false));
        assert_ne!(Value::long(1), Value::utf8("1"));
        assert_ne!(Value::long(1), Value::double(1.0));
        assert_eq!(Value::nan(), Value::nan());
    }

    #[test]
    fn test_coercion() {
        assert_eq!(Value::utf8("true").coerce_bool(), Some(true));
        assert_eq!(Value::long(1).coerce_bool(), Some(true));
        assert_eq!(Value::utf8("12").coerce_number(), Some(Number::Long(12)));
        assert_eq!(Value::from(true).coerce_number().map(|n| n.is_nan()), Some(true));
        assert_eq!(Value::long(5).coerce_string(), Some(Str::from("5")));
        assert_eq!(
            Value::utf8("base64,AAEC").coerce_string(),
            Some(Str::Raw(vec![0, 1, 2]))
        );
        assert_eq!(Value::Nil.coerce_bool(), None);
        assert!(Value::long(1).coerce_list().is_none());
    }

    #[test]
    fn test_option_conversion() {
        assert!(Value::from(None::<i64>).is_nil());
        assert_eq!(Value::from(Some("x")), Value::utf8("x"));
    }
}
