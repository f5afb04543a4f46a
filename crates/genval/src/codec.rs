//! One-call helpers over the packer, the decoder and JSON rendering.

use std::io::{Read, Write};

use genval_pack::{MessagePacker, PackError, SliceUnpacker, StreamUnpacker, UnpackError};

use crate::decode;
use crate::value::Value;

/// Encodes `value` into a fresh buffer.
pub fn pack(value: &Value) -> Vec<u8> {
    let mut packer = MessagePacker::new(Vec::new());
    value.pack(&mut packer);
    // Writes into a Vec do not fail.
    packer.finish().unwrap_or_default()
}

/// Decodes the first value in `bytes`. Trailing bytes are ignored.
pub fn unpack(bytes: &[u8]) -> Result<Value, UnpackError> {
    decode::parse(&mut SliceUnpacker::new(bytes))
}

/// Decodes one value from `r`, leaving it positioned after that value.
pub fn read<R: Read>(r: R) -> Result<Value, UnpackError> {
    decode::parse(&mut StreamUnpacker::new(r))
}

/// Encodes `value` into `w` and flushes.
pub fn write<W: Write>(w: W, value: &Value) -> Result<(), PackError> {
    let mut packer = MessagePacker::new(w);
    value.pack(&mut packer);
    packer.finish().map(drop)
}

/// Lowercase hex of the encoding.
pub fn hex(value: &Value) -> String {
    hex::encode(pack(value))
}

pub fn json(value: &Value) -> String {
    value.to_json()
}

/// Structural equality; two nils are equal.
pub fn equal(a: &Value, b: &Value) -> bool {
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let mut out = Vec::new();
        write(&mut out, &Value::utf8("x")).unwrap();
        write(&mut out, &Value::long(300)).unwrap();
        let mut r = out.as_slice();
        assert_eq!(read(&mut r).unwrap(), Value::utf8("x"));
        assert_eq!(read(&mut r).unwrap(), Value::long(300));
        assert!(read(&mut r).unwrap_err().is_eof());
    }

    #[test]
    fn test_hex_and_json() {
        assert_eq!(hex(&Value::long(128)), "cc80");
        assert_eq!(json(&Value::utf8("a\"b")), r#""a\"b""#);
        assert!(equal(&Value::Nil, &Value::Nil));
        assert!(!equal(&Value::Nil, &Value::long(0)));
    }
}
