//! Token kinds and the marker table shared by both unpackers.

use genval_buffers::HeaderBuf;

use crate::constants::*;

/// Kind of the next token in an encoded stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Nil,
    Bool,
    Long,
    Double,
    /// Fixed-size extension; the header is the marker alone and the tag plus
    /// data follow as payload.
    FixExt,
    BinHeader,
    StrHeader,
    ListHeader,
    MapHeader,
    /// Variable-size extension; the header carries the length, the tag and
    /// data follow as payload.
    ExtHeader,
}

/// One decoded token: its kind and the complete fixed header (marker plus
/// any length or scalar bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    format: Format,
    header: HeaderBuf,
}

impl Token {
    pub fn new(format: Format, header: HeaderBuf) -> Self {
        Self { format, header }
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn header(&self) -> &[u8] {
        self.header.as_slice()
    }
}

/// Classifies `marker` and returns how many header bytes follow it.
/// Returns `None` for the never-used marker.
pub fn classify(marker: u8) -> Option<(Format, usize)> {
    let class = match marker {
        0x00..=0x7f | 0xe0..=0xff => (Format::Long, 0),
        0x80..=0x8f => (Format::MapHeader, 0),
        0x90..=0x9f => (Format::ListHeader, 0),
        0xa0..=0xbf => (Format::StrHeader, 0),
        NIL => (Format::Nil, 0),
        NEVER_USED => return None,
        FALSE | TRUE => (Format::Bool, 0),
        BIN8 => (Format::BinHeader, 1),
        BIN16 => (Format::BinHeader, 2),
        BIN32 => (Format::BinHeader, 4),
        EXT8 => (Format::ExtHeader, 1),
        EXT16 => (Format::ExtHeader, 2),
        EXT32 => (Format::ExtHeader, 4),
        FLOAT32 => (Format::Double, 4),
        FLOAT64 => (Format::Double, 8),
        UINT8 | INT8 => (Format::Long, 1),
        UINT16 | INT16 => (Format::Long, 2),
        UINT32 | INT32 => (Format::Long, 4),
        UINT64 | INT64 => (Format::Long, 8),
        FIXEXT1..=FIXEXT16 => (Format::FixExt, 0),
        STR8 => (Format::StrHeader, 1),
        STR16 => (Format::StrHeader, 2),
        STR32 => (Format::StrHeader, 4),
        ARRAY16 => (Format::ListHeader, 2),
        ARRAY32 => (Format::ListHeader, 4),
        MAP16 => (Format::MapHeader, 2),
        MAP32 => (Format::MapHeader, 4),
    };
    Some(class)
}
