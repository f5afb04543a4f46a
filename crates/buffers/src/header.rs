//! Fixed-size scratch buffer for token headers.

/// Capacity of a [`HeaderBuf`]. The largest MessagePack header is nine bytes
/// (marker plus a 64-bit payload), so one buffer always fits a full header.
pub const HEADER_BUF_SIZE: usize = 16;

/// A fixed-capacity header buffer.
///
/// Writes append big-endian values after the cursor. Callers `reset` between
/// headers; writing past [`HEADER_BUF_SIZE`] bytes without a reset panics.
///
/// ```
/// use genval_buffers::HeaderBuf;
///
/// let mut header = HeaderBuf::new();
/// header.u8f64(0xcb, 1.0);
/// assert_eq!(header.len(), 9);
/// header.reset();
/// assert!(header.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderBuf {
    uint8: [u8; HEADER_BUF_SIZE],
    x: usize,
}

impl Default for HeaderBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderBuf {
    pub const fn new() -> Self {
        Self {
            uint8: [0u8; HEADER_BUF_SIZE],
            x: 0,
        }
    }

    /// Builds a header holding a copy of `bytes`.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut header = Self::new();
        header.buf(bytes);
        header
    }

    /// Moves the cursor back to the start.
    #[inline]
    pub fn reset(&mut self) {
        self.x = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x == 0
    }

    /// Returns the bytes written since the last reset.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.uint8[..self.x]
    }

    /// Advances the cursor by `size` and returns the skipped region for the
    /// caller to fill, e.g. from `io::Read::read_exact`.
    pub fn reserve(&mut self, size: usize) -> &mut [u8] {
        let start = self.x;
        self.x += size;
        &mut self.uint8[start..self.x]
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8[self.x] = val;
        self.x += 1;
    }

    /// Writes two single bytes, marker followed by an 8-bit payload.
    #[inline]
    pub fn u8u8(&mut self, marker: u8, val: u8) {
        self.uint8[self.x] = marker;
        self.uint8[self.x + 1] = val;
        self.x += 2;
    }

    /// Writes a u8 followed by a u16 (big-endian).
    pub fn u8u16(&mut self, marker: u8, val: u16) {
        self.uint8[self.x] = marker;
        self.uint8[self.x + 1..self.x + 3].copy_from_slice(&val.to_be_bytes());
        self.x += 3;
    }

    /// Writes a u8 followed by a u32 (big-endian).
    pub fn u8u32(&mut self, marker: u8, val: u32) {
        self.uint8[self.x] = marker;
        self.uint8[self.x + 1..self.x + 5].copy_from_slice(&val.to_be_bytes());
        self.x += 5;
    }

    /// Writes a u8 followed by a u64 (big-endian).
    pub fn u8u64(&mut self, marker: u8, val: u64) {
        self.uint8[self.x] = marker;
        self.uint8[self.x + 1..self.x + 9].copy_from_slice(&val.to_be_bytes());
        self.x += 9;
    }

    /// Writes a u8 followed by a f64 (big-endian).
    pub fn u8f64(&mut self, marker: u8, val: f64) {
        self.u8u64(marker, val.to_bits());
    }

    /// Writes a byte slice.
    pub fn buf(&mut self, bytes: &[u8]) {
        let length = bytes.len();
        self.uint8[self.x..self.x + length].copy_from_slice(bytes);
        self.x += length;
    }
}
