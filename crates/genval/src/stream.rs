//! Moving sequences of values between byte streams and channels.
//!
//! Values on the wire follow each other with no extra framing. Both helpers
//! block, so each normally runs on its own thread:
//!
//! ```
//! use std::thread;
//!
//! use genval::stream::{channel, read_stream, write_stream};
//!
//! let (tx, rx) = channel();
//! let writer = thread::spawn(move || {
//!     let mut out = Vec::new();
//!     write_stream(&mut out, rx).map(|_| out)
//! });
//! let bytes = [0x01, 0xa1, b'a'];
//! read_stream(&bytes[..], tx).unwrap();
//! assert_eq!(writer.join().unwrap().unwrap(), bytes);
//! ```

use std::io::{Read, Write};

use crossbeam::channel::{bounded, Receiver, Sender};
use genval_pack::{MessagePacker, PackError, Packer, StreamUnpacker, UnpackError};

use crate::decode;
use crate::value::Value;

/// A rendezvous channel: every send waits for the matching receive.
pub fn channel() -> (Sender<Value>, Receiver<Value>) {
    bounded(0)
}

/// Packs every value received from `rx` until all senders are gone or a
/// write fails. Returns the number of values written.
pub fn write_stream<W: Write>(w: W, rx: Receiver<Value>) -> Result<usize, PackError> {
    let mut packer = MessagePacker::new(w);
    let mut count = 0;
    for value in rx.iter() {
        value.pack(&mut packer);
        if packer.error().is_some() {
            break;
        }
        count += 1;
    }
    tracing::debug!(count, "write stream finished");
    packer.finish().map(|_| count)
}

/// Decodes values from `r` and sends each one to `tx`.
///
/// Stops cleanly at the end of input or when the receiver is dropped, and
/// returns the number of values sent. A decode error is returned. `tx` is
/// dropped on return, closing the channel.
pub fn read_stream<R: Read>(r: R, tx: Sender<Value>) -> Result<usize, UnpackError> {
    let mut unpacker = StreamUnpacker::new(r);
    let mut count = 0;
    loop {
        let value = match decode::parse(&mut unpacker) {
            Ok(value) => value,
            Err(UnpackError::Eof) => break,
            Err(err) => {
                tracing::debug!(error = %err, count, "read stream failed");
                return Err(err);
            }
        };
        if tx.send(value).is_err() {
            tracing::debug!(count, "receiver gone, stopping read stream");
            return Ok(count);
        }
        count += 1;
    }
    tracing::debug!(count, "read stream reached end of input");
    Ok(count)
}
