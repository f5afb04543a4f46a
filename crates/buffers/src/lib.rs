//! Byte buffer primitives shared by the genval codec.
//!
//! - [`HeaderBuf`]: a fixed 16-byte scratch area that token headers are
//!   assembled into before they are flushed to a sink.
//! - [`Reader`]: a cursor over a byte slice whose every read is bounds-checked.
//!
//! # Example
//!
//! ```
//! use genval_buffers::{HeaderBuf, Reader};
//!
//! let mut header = HeaderBuf::new();
//! header.u8u16(0xcd, 0x0102);
//! assert_eq!(header.as_slice(), &[0xcd, 0x01, 0x02]);
//!
//! let mut reader = Reader::new(header.as_slice());
//! assert_eq!(reader.u8().unwrap(), 0xcd);
//! assert_eq!(reader.u16().unwrap(), 0x0102);
//! assert!(reader.u8().is_err());
//! ```

mod error;
mod header;
mod reader;

pub use error::BufferError;
pub use header::{HeaderBuf, HEADER_BUF_SIZE};
pub use reader::Reader;
