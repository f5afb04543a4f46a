//! Bounds-checked binary reader with cursor tracking.

use crate::BufferError;

/// A binary reader over a byte slice.
///
/// Every read checks the remaining length first and reports
/// [`BufferError::OutOfBounds`] instead of panicking, leaving the cursor
/// where it was.
///
/// ```
/// use genval_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u16().unwrap(), 0x0203);
/// assert_eq!(reader.size(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

macro_rules! be_read {
    ($name:ident, $ty:ty, $size:expr) => {
        #[doc = concat!("Reads a big-endian `", stringify!($ty), "`.")]
        #[inline]
        pub fn $name(&mut self) -> Result<$ty, BufferError> {
            let bytes = self.buf($size)?;
            let mut arr = [0u8; $size];
            arr.copy_from_slice(bytes);
            Ok(<$ty>::from_be_bytes(arr))
        }
    };
}

impl<'a> Reader<'a> {
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Returns the number of remaining bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.uint8.len().saturating_sub(self.x)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.size() == 0
    }

    #[inline]
    fn check(&self, size: usize) -> Result<(), BufferError> {
        let available = self.size();
        if size > available {
            return Err(BufferError::OutOfBounds {
                needed: size,
                available,
            });
        }
        Ok(())
    }

    /// Returns the next `size` bytes and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let start = self.x;
        self.x += size;
        Ok(&self.uint8[start..self.x])
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let val = self.uint8[self.x];
        self.x += 1;
        Ok(val)
    }

    #[inline]
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        self.u8().map(|val| val as i8)
    }

    be_read!(u16, u16, 2);
    be_read!(i16, i16, 2);
    be_read!(u32, u32, 4);
    be_read!(i32, i32, 4);
    be_read!(u64, u64, 8);
    be_read!(i64, i64, 8);
    be_read!(f32, f32, 4);
    be_read!(f64, f64, 8);
}
