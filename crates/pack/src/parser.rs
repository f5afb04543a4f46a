//! Fixed-header parsing.
//!
//! Each function takes the header bytes of a [`Token`](crate::Token) and
//! returns the scalar it carries or the length of the payload that follows.
//! A header whose marker belongs to another kind is rejected with
//! [`UnpackError::InvalidHeader`].

use genval_buffers::Reader;

use crate::constants::*;
use crate::error::UnpackError;

fn invalid(expected: &'static str, marker: u8) -> UnpackError {
    UnpackError::InvalidHeader { expected, marker }
}

pub fn parse_bool(header: &[u8]) -> Result<bool, UnpackError> {
    let mut r = Reader::new(header);
    match r.u8()? {
        TRUE => Ok(true),
        FALSE => Ok(false),
        marker => Err(invalid("bool", marker)),
    }
}

/// Parses any integer form. `uint64` values above `i64::MAX` wrap.
pub fn parse_long(header: &[u8]) -> Result<i64, UnpackError> {
    let mut r = Reader::new(header);
    let marker = r.u8()?;
    let val = match marker {
        0x00..=0x7f => marker as i64,
        0xe0..=0xff => marker as i8 as i64,
        UINT8 => r.u8()? as i64,
        UINT16 => r.u16()? as i64,
        UINT32 => r.u32()? as i64,
        UINT64 => r.u64()? as i64,
        INT8 => r.i8()? as i64,
        INT16 => r.i16()? as i64,
        INT32 => r.i32()? as i64,
        INT64 => r.i64()?,
        _ => return Err(invalid("integer", marker)),
    };
    Ok(val)
}

/// Parses `float64`, widening `float32`.
pub fn parse_double(header: &[u8]) -> Result<f64, UnpackError> {
    let mut r = Reader::new(header);
    match r.u8()? {
        FLOAT32 => Ok(r.f32()? as f64),
        FLOAT64 => Ok(r.f64()?),
        marker => Err(invalid("float", marker)),
    }
}

pub fn parse_bin(header: &[u8]) -> Result<usize, UnpackError> {
    let mut r = Reader::new(header);
    match r.u8()? {
        BIN8 => Ok(r.u8()? as usize),
        BIN16 => Ok(r.u16()? as usize),
        BIN32 => Ok(r.u32()? as usize),
        marker => Err(invalid("bin", marker)),
    }
}

pub fn parse_str(header: &[u8]) -> Result<usize, UnpackError> {
    let mut r = Reader::new(header);
    match r.u8()? {
        marker @ 0xa0..=0xbf => Ok((marker & 0x1f) as usize),
        STR8 => Ok(r.u8()? as usize),
        STR16 => Ok(r.u16()? as usize),
        STR32 => Ok(r.u32()? as usize),
        marker => Err(invalid("str", marker)),
    }
}

/// Parses an array header into its element count.
pub fn parse_list(header: &[u8]) -> Result<usize, UnpackError> {
    let mut r = Reader::new(header);
    match r.u8()? {
        marker @ 0x90..=0x9f => Ok((marker & 0x0f) as usize),
        ARRAY16 => Ok(r.u16()? as usize),
        ARRAY32 => Ok(r.u32()? as usize),
        marker => Err(invalid("array", marker)),
    }
}

/// Parses a map header into its pair count.
pub fn parse_map(header: &[u8]) -> Result<usize, UnpackError> {
    let mut r = Reader::new(header);
    match r.u8()? {
        marker @ 0x80..=0x8f => Ok((marker & 0x0f) as usize),
        MAP16 => Ok(r.u16()? as usize),
        MAP32 => Ok(r.u32()? as usize),
        marker => Err(invalid("map", marker)),
    }
}

/// Parses a fixext or ext header into the data length, excluding the tag.
pub fn parse_ext(header: &[u8]) -> Result<usize, UnpackError> {
    let mut r = Reader::new(header);
    match r.u8()? {
        FIXEXT1 => Ok(1),
        FIXEXT2 => Ok(2),
        FIXEXT4 => Ok(4),
        FIXEXT8 => Ok(8),
        FIXEXT16 => Ok(16),
        EXT8 => Ok(r.u8()? as usize),
        EXT16 => Ok(r.u16()? as usize),
        EXT32 => Ok(r.u32()? as usize),
        marker => Err(invalid("ext", marker)),
    }
}
