//! Header encoding into a [`HeaderBuf`].
//!
//! Each function resets the buffer and writes one complete header in the
//! shortest form MessagePack allows. Payload bytes (string, binary and
//! extension data) are written separately by the caller.

use genval_buffers::HeaderBuf;

use crate::constants::*;

pub fn write_nil(header: &mut HeaderBuf) {
    header.reset();
    header.u8(NIL);
}

pub fn write_bool(header: &mut HeaderBuf, val: bool) {
    header.reset();
    header.u8(if val { TRUE } else { FALSE });
}

/// Writes an unsigned integer in the smallest fitting form.
pub fn write_ulong(header: &mut HeaderBuf, val: u64) {
    header.reset();
    if val <= 0x7f {
        header.u8(val as u8);
    } else if val <= 0xff {
        header.u8u8(UINT8, val as u8);
    } else if val <= 0xffff {
        header.u8u16(UINT16, val as u16);
    } else if val <= 0xffff_ffff {
        header.u8u32(UINT32, val as u32);
    } else {
        header.u8u64(UINT64, val);
    }
}

/// Writes a signed integer in the smallest fitting form. Non-negative values
/// use the unsigned encodings.
pub fn write_long(header: &mut HeaderBuf, val: i64) {
    if val >= 0 {
        write_ulong(header, val as u64);
        return;
    }
    header.reset();
    if val >= NEG_FIXINT_MIN {
        header.u8(val as i8 as u8);
    } else if val >= i8::MIN as i64 {
        header.u8u8(INT8, val as i8 as u8);
    } else if val >= i16::MIN as i64 {
        header.u8u16(INT16, val as i16 as u16);
    } else if val >= i32::MIN as i64 {
        header.u8u32(INT32, val as i32 as u32);
    } else {
        header.u8u64(INT64, val as u64);
    }
}

/// Doubles always take the 64-bit form.
pub fn write_double(header: &mut HeaderBuf, val: f64) {
    header.reset();
    header.u8f64(FLOAT64, val);
}

pub fn write_str_header(header: &mut HeaderBuf, len: usize) {
    header.reset();
    if len <= FIXSTR_MAX {
        header.u8(FIXSTR | len as u8);
    } else if len <= 0xff {
        header.u8u8(STR8, len as u8);
    } else if len <= 0xffff {
        header.u8u16(STR16, len as u16);
    } else {
        header.u8u32(STR32, len as u32);
    }
}

pub fn write_bin_header(header: &mut HeaderBuf, len: usize) {
    header.reset();
    if len <= 0xff {
        header.u8u8(BIN8, len as u8);
    } else if len <= 0xffff {
        header.u8u16(BIN16, len as u16);
    } else {
        header.u8u32(BIN32, len as u32);
    }
}

pub fn write_array_header(header: &mut HeaderBuf, len: usize) {
    header.reset();
    if len <= FIXCOLLECTION_MAX {
        header.u8(FIXARRAY | len as u8);
    } else if len <= 0xffff {
        header.u8u16(ARRAY16, len as u16);
    } else {
        header.u8u32(ARRAY32, len as u32);
    }
}

pub fn write_map_header(header: &mut HeaderBuf, len: usize) {
    header.reset();
    if len <= FIXCOLLECTION_MAX {
        header.u8(FIXMAP | len as u8);
    } else if len <= 0xffff {
        header.u8u16(MAP16, len as u16);
    } else {
        header.u8u32(MAP32, len as u32);
    }
}

/// Writes an extension header including the type tag. Data of length 1, 2,
/// 4, 8 or 16 uses the fixext forms.
pub fn write_ext_header(header: &mut HeaderBuf, tag: u8, len: usize) {
    header.reset();
    match len {
        1 => header.u8u8(FIXEXT1, tag),
        2 => header.u8u8(FIXEXT2, tag),
        4 => header.u8u8(FIXEXT4, tag),
        8 => header.u8u8(FIXEXT8, tag),
        16 => header.u8u8(FIXEXT16, tag),
        _ if len <= 0xff => {
            header.u8u8(EXT8, len as u8);
            header.u8(tag);
        }
        _ if len <= 0xffff => {
            header.u8u16(EXT16, len as u16);
            header.u8(tag);
        }
        _ => {
            header.u8u32(EXT32, len as u32);
            header.u8(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long(val: i64) -> Vec<u8> {
        let mut header = HeaderBuf::new();
        write_long(&mut header, val);
        header.as_slice().to_vec()
    }

    #[test]
    fn test_long_boundaries() {
        assert_eq!(long(0), [0x00]);
        assert_eq!(long(127), [0x7f]);
        assert_eq!(long(128), [0xcc, 0x80]);
        assert_eq!(long(-1), [0xff]);
        assert_eq!(long(-32), [0xe0]);
        assert_eq!(long(-33), [0xd0, 0xdf]);
        assert_eq!(long(-123), [0xd0, 0x85]);
        assert_eq!(long(-129), [0xd1, 0xff, 0x7f]);
        assert_eq!(long(65536), [0xce, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(
            long(i64::MIN),
            [0xd3, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_collection_headers() {
        let mut header = HeaderBuf::new();
        write_array_header(&mut header, 15);
        assert_eq!(header.as_slice(), [0x9f]);
        write_array_header(&mut header, 16);
        assert_eq!(header.as_slice(), [0xdc, 0x00, 0x10]);
        write_array_header(&mut header, 0x1_0000);
        assert_eq!(header.as_slice(), [0xdd, 0x00, 0x01, 0x00, 0x00]);
        write_map_header(&mut header, 0);
        assert_eq!(header.as_slice(), [0x80]);
        write_map_header(&mut header, 0x1_0000);
        assert_eq!(header.as_slice(), [0xdf, 0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_ext_header() {
        let mut header = HeaderBuf::new();
        write_ext_header(&mut header, 3, 1);
        assert_eq!(header.as_slice(), [0xd4, 0x03]);
        write_ext_header(&mut header, 3, 16);
        assert_eq!(header.as_slice(), [0xd8, 0x03]);
        write_ext_header(&mut header, 3, 3);
        assert_eq!(header.as_slice(), [0xc7, 0x03, 0x03]);
        write_ext_header(&mut header, 7, 0x100);
        assert_eq!(header.as_slice(), [0xc8, 0x01, 0x00, 0x07]);
    }
}
