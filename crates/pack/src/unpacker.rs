//! Token-level MessagePack readers.

use std::io::{self, Read};

use genval_buffers::{HeaderBuf, Reader};

use crate::error::UnpackError;
use crate::token::{classify, Token};

/// Pulls tokens from an encoded source.
///
/// [`Unpacker::next`] consumes one marker and its fixed header. Payload bytes
/// (string, binary, extension tag and data) stay in the source until the
/// caller asks for them with [`Unpacker::read`].
///
/// End of input exactly at a token boundary is [`UnpackError::Eof`]; input
/// ending anywhere else is [`UnpackError::UnexpectedEof`].
pub trait Unpacker {
    fn next(&mut self) -> Result<Token, UnpackError>;
    fn read(&mut self, size: usize) -> Result<Vec<u8>, UnpackError>;
}

/// [`Unpacker`] over an in-memory buffer.
#[derive(Debug, Clone)]
pub struct SliceUnpacker<'a> {
    reader: Reader<'a>,
}

impl<'a> SliceUnpacker<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
        }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.reader.size()
    }

    /// Borrows the next `size` payload bytes without copying.
    pub fn read_slice(&mut self, size: usize) -> Result<&'a [u8], UnpackError> {
        Ok(self.reader.buf(size)?)
    }
}

impl Unpacker for SliceUnpacker<'_> {
    fn next(&mut self) -> Result<Token, UnpackError> {
        if self.reader.is_at_end() {
            return Err(UnpackError::Eof);
        }
        let marker = self.reader.u8()?;
        let (format, extra) = classify(marker).ok_or(UnpackError::InvalidByte(marker))?;
        let mut header = HeaderBuf::new();
        header.u8(marker);
        header.buf(self.reader.buf(extra)?);
        Ok(Token::new(format, header))
    }

    fn read(&mut self, size: usize) -> Result<Vec<u8>, UnpackError> {
        self.read_slice(size).map(<[u8]>::to_vec)
    }
}

/// [`Unpacker`] over any `io::Read`.
///
/// Reads exactly the bytes of each token and never reads ahead, so the
/// underlying reader is left positioned after the last consumed value.
/// Unbuffered sources should be wrapped in `io::BufReader`.
#[derive(Debug)]
pub struct StreamUnpacker<R: Read> {
    r: R,
}

impl<R: Read> StreamUnpacker<R> {
    pub fn new(r: R) -> Self {
        Self { r }
    }

    pub fn get_ref(&self) -> &R {
        &self.r
    }

    pub fn into_inner(self) -> R {
        self.r
    }

    /// Reads one marker byte, or `None` at a clean end of input.
    fn marker(&mut self) -> Result<Option<u8>, UnpackError> {
        let mut byte = [0u8; 1];
        loop {
            match self.r.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(UnpackError::Io(err)),
            }
        }
    }
}

impl<R: Read> Unpacker for StreamUnpacker<R> {
    fn next(&mut self) -> Result<Token, UnpackError> {
        let marker = self.marker()?.ok_or(UnpackError::Eof)?;
        let (format, extra) = classify(marker).ok_or(UnpackError::InvalidByte(marker))?;
        let mut header = HeaderBuf::new();
        header.u8(marker);
        self.r.read_exact(header.reserve(extra))?;
        Ok(Token::new(format, header))
    }

    fn read(&mut self, size: usize) -> Result<Vec<u8>, UnpackError> {
        // Lengths come from untrusted headers; grow with the data actually read.
        let mut buf = Vec::new();
        (&mut self.r).take(size as u64).read_to_end(&mut buf)?;
        if buf.len() < size {
            return Err(UnpackError::UnexpectedEof);
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Format;

    #[test]
    fn test_slice_tokens() {
        let data = [0xcd, 0x01, 0x00, 0xa2, b'h', b'i'];
        let mut unpacker = SliceUnpacker::new(&data);
        let token = unpacker.next().unwrap();
        assert_eq!(token.format(), Format::Long);
        assert_eq!(token.header(), [0xcd, 0x01, 0x00]);
        let token = unpacker.next().unwrap();
        assert_eq!(token.format(), Format::StrHeader);
        assert_eq!(unpacker.read(2).unwrap(), b"hi");
        assert!(unpacker.next().unwrap_err().is_eof());
    }

    #[test]
    fn test_truncated_header_is_unexpected_eof() {
        let mut unpacker = SliceUnpacker::new(&[0xcd, 0x01]);
        assert!(matches!(unpacker.next(), Err(UnpackError::UnexpectedEof)));
        let mut unpacker = StreamUnpacker::new(&[0xcd, 0x01][..]);
        assert!(matches!(unpacker.next(), Err(UnpackError::UnexpectedEof)));
    }

    #[test]
    fn test_invalid_marker() {
        let mut unpacker = SliceUnpacker::new(&[0xc1]);
        assert!(matches!(unpacker.next(), Err(UnpackError::InvalidByte(0xc1))));
        let mut unpacker = StreamUnpacker::new(&[0xc1][..]);
        assert!(matches!(unpacker.next(), Err(UnpackError::InvalidByte(0xc1))));
    }

    #[test]
    fn test_stream_payload_and_position() {
        let data = [0xc4, 0x03, 0, 1, 2, 0xc0];
        let mut unpacker = StreamUnpacker::new(&data[..]);
        let token = unpacker.next().unwrap();
        assert_eq!(token.format(), Format::BinHeader);
        assert_eq!(token.header(), [0xc4, 0x03]);
        assert_eq!(unpacker.read(3).unwrap(), [0, 1, 2]);
        assert_eq!(*unpacker.get_ref(), [0xc0]);
        assert_eq!(unpacker.next().unwrap().format(), Format::Nil);
        assert!(unpacker.next().unwrap_err().is_eof());
    }

    #[test]
    fn test_stream_short_payload() {
        let mut unpacker = StreamUnpacker::new(&[0xc4, 0xff, 0x00][..]);
        unpacker.next().unwrap();
        assert!(matches!(unpacker.read(0xff), Err(UnpackError::UnexpectedEof)));
    }
}
