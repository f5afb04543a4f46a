//! Generic self-describing values.
//!
//! [`Value`] covers nil, bool, numbers, UTF-8 and raw strings, persistent
//! lists and sorted maps, append-log [`Table`]s, and extension values kept
//! as [`Unknown`]. Values pack to MessagePack through [`genval_pack`],
//! decode back into tables, and render as JSON.
//!
//! ```
//! use genval::{hex, json, unpack, Table, Value};
//!
//! let t = Table::list();
//! t.insert(true);
//! t.insert(123);
//! t.insert("text");
//! let value = Value::from(t);
//!
//! assert_eq!(hex(&value), "93c37ba474657874");
//! assert_eq!(json(&value), r#"[true,123,"text"]"#);
//! assert_eq!(unpack(&genval::pack(&value)).unwrap(), value);
//! ```

mod codec;
mod coerce;
pub mod constants;
mod convert;
pub mod decode;
mod expression;
mod json;
mod list;
mod number;
mod sorted_map;
pub mod stream;
mod string;
mod table;
mod traversal;
mod unknown;
mod value;

pub use codec::{equal, hex, json, pack, read, unpack, write};
pub use coerce::{parse_bool, parse_number, parse_string};
pub use decode::parse;
pub use expression::Expression;
pub use genval_pack::{PackError, UnpackError};
pub use list::List;
pub use number::{format_double, Number, NumberType};
pub use sorted_map::{MapEntry, SortedMap};
pub use string::{Str, StringType};
pub use table::{Table, TableKey, TableType};
pub use unknown::Unknown;
pub use value::{Kind, Value};
