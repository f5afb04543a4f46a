//! Token stream to [`Value`].
//!
//! Arrays and maps decode into [`Table`]s. Nil elements of an array and
//! pairs with a nil key or value are dropped, so decoded tables never hold
//! nil. Integer map keys address table indexes.

use genval_pack::{parser, Format, UnpackError, Unpacker};

use crate::constants::MAX_DEPTH;
use crate::string::Str;
use crate::table::Table;
use crate::unknown::Unknown;
use crate::value::Value;

/// Decodes the next complete value.
///
/// Returns [`UnpackError::Eof`] only when the input ends before the first
/// token; input ending inside a value is [`UnpackError::UnexpectedEof`].
pub fn parse<U: Unpacker + ?Sized>(u: &mut U) -> Result<Value, UnpackError> {
    parse_at(u, 0)
}

fn parse_at<U: Unpacker + ?Sized>(u: &mut U, depth: usize) -> Result<Value, UnpackError> {
    let token = match u.next() {
        Err(UnpackError::Eof) if depth > 0 => return Err(UnpackError::UnexpectedEof),
        other => other?,
    };
    let header = token.header();
    let value = match token.format() {
        Format::Nil => Value::Nil,
        Format::Bool => Value::Bool(parser::parse_bool(header)?),
        Format::Long => Value::long(parser::parse_long(header)?),
        Format::Double => Value::double(parser::parse_double(header)?),
        Format::BinHeader => {
            let len = parser::parse_bin(header)?;
            Value::String(Str::Raw(u.read(len)?))
        }
        Format::StrHeader => {
            let len = parser::parse_str(header)?;
            let text = String::from_utf8(u.read(len)?).map_err(|_| UnpackError::InvalidUtf8)?;
            Value::utf8(text)
        }
        Format::FixExt | Format::ExtHeader => {
            let len = parser::parse_ext(header)?;
            let bytes = u.read(len + 1)?;
            // `read` yields exactly `len + 1` bytes, so the tag is always present.
            let unknown = Unknown::from_tag_and_data(&bytes).ok_or(UnpackError::UnexpectedEof)?;
            tracing::trace!(tag = unknown.tag(), len, "keeping unknown extension");
            Value::Unknown(unknown)
        }
        Format::ListHeader => {
            check_depth(depth)?;
            let len = parser::parse_list(header)?;
            let table = Table::list();
            for _ in 0..len {
                let item = parse_at(u, depth + 1)?;
                if !item.is_nil() {
                    table.insert(item);
                }
            }
            Value::Table(table)
        }
        Format::MapHeader => {
            check_depth(depth)?;
            let len = parser::parse_map(header)?;
            let table = Table::map();
            for _ in 0..len {
                let key = parse_at(u, depth + 1)?;
                let value = parse_at(u, depth + 1)?;
                if key.is_nil() || value.is_nil() {
                    continue;
                }
                match key {
                    Value::Number(n) => table.put_at(n.as_long(), value),
                    key => table.put(&key.to_string(), value),
                }
            }
            Value::Table(table)
        }
    };
    Ok(value)
}

fn check_depth(depth: usize) -> Result<(), UnpackError> {
    if depth >= MAX_DEPTH {
        tracing::debug!(limit = MAX_DEPTH, "nesting too deep, giving up");
        return Err(UnpackError::DepthLimitExceeded(MAX_DEPTH));
    }
    Ok(())
}
