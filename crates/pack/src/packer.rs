//! Token-level MessagePack writer.

use std::io::Write;

use genval_buffers::HeaderBuf;

use crate::error::PackError;
use crate::writer;

/// Emits MessagePack tokens.
///
/// Collections are written as a header followed by their children:
/// `pack_list(n)` is followed by `n` values, `pack_map(n)` by `n` key/value
/// pairs. Failures are sticky: after the first write error every later call
/// is a no-op and [`Packer::error`] reports the original failure.
pub trait Packer {
    fn pack_nil(&mut self);
    fn pack_bool(&mut self, val: bool);
    fn pack_long(&mut self, val: i64);
    fn pack_double(&mut self, val: f64);
    fn pack_str(&mut self, val: &str);
    fn pack_bin(&mut self, val: &[u8]);
    fn pack_list(&mut self, len: usize);
    fn pack_map(&mut self, len: usize);
    fn pack_ext(&mut self, tag: u8, data: &[u8]);
    fn error(&self) -> Option<&PackError>;
}

/// [`Packer`] over any `io::Write`.
///
/// ```
/// use genval_pack::{MessagePacker, Packer};
///
/// let mut packer = MessagePacker::new(Vec::new());
/// packer.pack_list(2);
/// packer.pack_nil();
/// packer.pack_bool(true);
/// assert_eq!(packer.finish().unwrap(), [0x92, 0xc0, 0xc3]);
/// ```
#[derive(Debug)]
pub struct MessagePacker<W: Write> {
    w: W,
    header: HeaderBuf,
    err: Option<PackError>,
}

impl<W: Write> MessagePacker<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            header: HeaderBuf::new(),
            err: None,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.w
    }

    /// Flushes the writer and hands it back, or returns the first failure.
    pub fn finish(mut self) -> Result<W, PackError> {
        if let Some(err) = self.err.take() {
            return Err(err);
        }
        self.w.flush()?;
        Ok(self.w)
    }

    #[inline]
    fn failed(&self) -> bool {
        self.err.is_some()
    }

    fn emit_header(&mut self) {
        if let Err(err) = self.w.write_all(self.header.as_slice()) {
            self.latch(err);
        }
    }

    fn emit_payload(&mut self, bytes: &[u8]) {
        if self.failed() || bytes.is_empty() {
            return;
        }
        if let Err(err) = self.w.write_all(bytes) {
            self.latch(err);
        }
    }

    fn latch(&mut self, err: std::io::Error) {
        tracing::debug!(error = %err, "packer write failed, dropping further tokens");
        self.err = Some(PackError::Io(err));
    }
}

impl<W: Write> Packer for MessagePacker<W> {
    fn pack_nil(&mut self) {
        if self.failed() {
            return;
        }
        writer::write_nil(&mut self.header);
        self.emit_header();
    }

    fn pack_bool(&mut self, val: bool) {
        if self.failed() {
            return;
        }
        writer::write_bool(&mut self.header, val);
        self.emit_header();
    }

    fn pack_long(&mut self, val: i64) {
        if self.failed() {
            return;
        }
        writer::write_long(&mut self.header, val);
        self.emit_header();
    }

    fn pack_double(&mut self, val: f64) {
        if self.failed() {
            return;
        }
        writer::write_double(&mut self.header, val);
        self.emit_header();
    }

    fn pack_str(&mut self, val: &str) {
        if self.failed() {
            return;
        }
        writer::write_str_header(&mut self.header, val.len());
        self.emit_header();
        self.emit_payload(val.as_bytes());
    }

    fn pack_bin(&mut self, val: &[u8]) {
        if self.failed() {
            return;
        }
        writer::write_bin_header(&mut self.header, val.len());
        self.emit_header();
        self.emit_payload(val);
    }

    fn pack_list(&mut self, len: usize) {
        if self.failed() {
            return;
        }
        writer::write_array_header(&mut self.header, len);
        self.emit_header();
    }

    fn pack_map(&mut self, len: usize) {
        if self.failed() {
            return;
        }
        writer::write_map_header(&mut self.header, len);
        self.emit_header();
    }

    fn pack_ext(&mut self, tag: u8, data: &[u8]) {
        if self.failed() {
            return;
        }
        writer::write_ext_header(&mut self.header, tag, data.len());
        self.emit_header();
        self.emit_payload(data);
    }

    fn error(&self) -> Option<&PackError> {
        self.err.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    /// Accepts `limit` bytes, then fails every write.
    struct Limited {
        written: Vec<u8>,
        limit: usize,
        calls: usize,
    }

    impl Write for Limited {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            let room = self.limit - self.written.len();
            if room == 0 {
                return Err(io::Error::other("full"));
            }
            let n = room.min(buf.len());
            self.written.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_scalars() {
        let mut packer = MessagePacker::new(Vec::new());
        packer.pack_nil();
        packer.pack_bool(false);
        packer.pack_long(-33);
        packer.pack_double(0.0);
        let bytes = packer.finish().unwrap();
        assert_eq!(
            bytes,
            [0xc0, 0xc2, 0xd0, 0xdf, 0xcb, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_str_and_bin_payloads() {
        let mut packer = MessagePacker::new(Vec::new());
        packer.pack_str("text");
        packer.pack_bin(&[0, 1, 2]);
        packer.pack_ext(3, &[1]);
        assert_eq!(
            packer.get_ref().as_slice(),
            [0xa4, b't', b'e', b'x', b't', 0xc4, 0x03, 0, 1, 2, 0xd4, 0x03, 0x01]
        );
        assert!(packer.error().is_none());
    }

    #[test]
    fn test_error_is_sticky() {
        let sink = Limited {
            written: Vec::new(),
            limit: 3,
            calls: 0,
        };
        let mut packer = MessagePacker::new(sink);
        packer.pack_str("hello");
        assert!(packer.error().is_some());
        let calls = packer.get_ref().calls;
        packer.pack_nil();
        packer.pack_long(1);
        assert_eq!(packer.get_ref().calls, calls);
        assert!(matches!(packer.finish(), Err(PackError::Io(_))));
    }
}
