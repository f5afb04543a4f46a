//! MessagePack wire codec for genval values.
//!
//! The codec is split along the token boundary:
//!
//! - [`writer`] encodes headers (and scalar tokens) into a [`HeaderBuf`];
//! - [`Packer`] / [`MessagePacker`] stream tokens and payloads into any
//!   `io::Write` with a sticky error;
//! - [`Unpacker`] yields one [`Token`] (kind plus fixed header) at a time and
//!   pulls payload bytes on request, from a slice ([`SliceUnpacker`]) or a
//!   reader ([`StreamUnpacker`]);
//! - [`parser`] turns a fixed header into a scalar or a payload length.
//!
//! ```
//! use genval_pack::{parser, MessagePacker, Packer, SliceUnpacker, Unpacker};
//!
//! let mut packer = MessagePacker::new(Vec::new());
//! packer.pack_long(128);
//! packer.pack_str("hi");
//! let bytes = packer.finish().unwrap();
//! assert_eq!(bytes, [0xcc, 0x80, 0xa2, b'h', b'i']);
//!
//! let mut unpacker = SliceUnpacker::new(&bytes);
//! let token = unpacker.next().unwrap();
//! assert_eq!(parser::parse_long(token.header()).unwrap(), 128);
//! let token = unpacker.next().unwrap();
//! let len = parser::parse_str(token.header()).unwrap();
//! assert_eq!(unpacker.read(len).unwrap(), b"hi");
//! ```
//!
//! [`HeaderBuf`]: genval_buffers::HeaderBuf

pub mod constants;
pub mod error;
pub mod packer;
pub mod parser;
pub mod token;
pub mod unpacker;
pub mod writer;

pub use error::{PackError, UnpackError};
pub use packer::{MessagePacker, Packer};
pub use token::{Format, Token};
pub use unpacker::{SliceUnpacker, StreamUnpacker, Unpacker};
