//! Conversion to and from `serde_json::Value`.

use serde_json::{Map, Number as JsonNumber, Value as Json};

use crate::number::Number;
use crate::string::Str;
use crate::table::Table;
use crate::traversal::Traversal;
use crate::value::Value;

/// Objects become map tables and arrays list tables, dropping nulls the way
/// the decoder does. Integers above `i64::MAX` wrap.
impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Nil,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(number_from_json(&n)),
            Json::String(s) => Value::utf8(s),
            Json::Array(items) => {
                let table = Table::list();
                for item in items.into_iter().filter(|item| !item.is_null()) {
                    table.insert(Value::from(item));
                }
                Value::Table(table)
            }
            Json::Object(fields) => {
                let table = Table::map();
                for (key, field) in fields.into_iter().filter(|(_, field)| !field.is_null()) {
                    table.put(&key, Value::from(field));
                }
                Value::Table(table)
            }
        }
    }
}

fn number_from_json(n: &JsonNumber) -> Number {
    if let Some(long) = n.as_i64() {
        Number::Long(long)
    } else if let Some(ulong) = n.as_u64() {
        Number::Long(ulong as i64)
    } else {
        n.as_f64().map_or_else(Number::nan, Number::Double)
    }
}

impl Value {
    /// Builds a `serde_json::Value`. Raw strings and unknown extensions
    /// become their display strings; NaN, infinities and cyclic tables
    /// become null.
    pub fn to_json_value(&self) -> Json {
        to_json_with(self, &mut Traversal::new())
    }
}

fn to_json_with(value: &Value, tr: &mut Traversal) -> Json {
    match value {
        Value::Nil => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(Number::Long(n)) => Json::from(*n),
        Value::Number(Number::Double(d)) => JsonNumber::from_f64(*d).map_or(Json::Null, Json::Number),
        Value::String(Str::Utf8(s)) => Json::String(s.clone()),
        Value::String(raw) => Json::String(raw.to_string()),
        Value::Unknown(u) => Json::String(u.to_string()),
        Value::List(l) => Json::Array(l.values().iter().map(|v| to_json_with(v, tr)).collect()),
        Value::Map(m) => {
            let mut fields = Map::with_capacity(m.len());
            for e in m.entries() {
                fields.insert(e.key().to_string(), to_json_with(e.value(), tr));
            }
            Json::Object(fields)
        }
        Value::Table(t) => table_to_json(t, tr),
    }
}

fn table_to_json(table: &Table, tr: &mut Traversal) -> Json {
    if !tr.enter(table.id()) {
        return Json::Null;
    }
    let (sequence, entries) = table.snapshot();
    let json = if sequence {
        Json::Array(entries.iter().map(|(_, v)| to_json_with(v, tr)).collect())
    } else {
        let mut fields = Map::with_capacity(entries.len());
        for (key, v) in &entries {
            fields.insert(key.to_string(), to_json_with(v, tr));
        }
        Json::Object(fields)
    };
    tr.leave();
    json
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::table::TableType;

    #[test]
    fn test_from_json() {
        let value = Value::from(json!({"b": [1, null, 2.5], "a": "x", "n": null}));
        let table = value.as_table().unwrap();
        assert_eq!(table.table_type(), TableType::Map);
        assert_eq!(table.keys(), ["a", "b"]);
        let list = table.get_table("b").unwrap();
        assert_eq!(list.values(), [Value::long(1), Value::double(2.5)]);
        assert_eq!(Value::from(json!(u64::MAX)), Value::long(-1));
    }

    #[test]
    fn test_to_json_value() {
        let t = Table::list();
        t.insert("a");
        t.insert(Value::raw(vec![0, 1, 2]));
        t.insert(f64::NAN);
        assert_eq!(
            Value::from(t).to_json_value(),
            json!(["a", "base64,AAEC", null])
        );
    }

    #[test]
    fn test_cycle_becomes_null() {
        let m = Table::map();
        m.put("self", m.clone());
        m.put("n", 1);
        assert_eq!(
            Value::from(m).to_json_value(),
            json!({"n": 1, "self": null})
        );
    }
}
