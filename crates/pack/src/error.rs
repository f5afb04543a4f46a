use std::io;

use genval_buffers::BufferError;
use thiserror::Error;

/// Failure while writing encoded tokens.
#[derive(Debug, Error)]
pub enum PackError {
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}

/// Failure while reading or parsing encoded tokens.
#[derive(Debug, Error)]
pub enum UnpackError {
    /// Clean end of input at a token boundary.
    #[error("end of input")]
    Eof,
    /// Input ended inside a header or payload.
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid byte 0x{0:02x}")]
    InvalidByte(u8),
    #[error("expected {expected} header, found marker 0x{marker:02x}")]
    InvalidHeader { expected: &'static str, marker: u8 },
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("nesting deeper than {0} levels")]
    DepthLimitExceeded(usize),
    #[error("read failed: {0}")]
    Io(#[source] io::Error),
}

impl UnpackError {
    /// Whether this is a clean end of input rather than a failure.
    pub fn is_eof(&self) -> bool {
        matches!(self, UnpackError::Eof)
    }
}

impl From<io::Error> for UnpackError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => UnpackError::UnexpectedEof,
            _ => UnpackError::Io(err),
        }
    }
}

impl From<BufferError> for UnpackError {
    fn from(_: BufferError) -> Self {
        UnpackError::UnexpectedEof
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_eof_maps_to_unexpected_eof() {
        let err: UnpackError = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(matches!(err, UnpackError::UnexpectedEof));
        let err: UnpackError = io::Error::from(io::ErrorKind::BrokenPipe).into();
        assert!(matches!(err, UnpackError::Io(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!(UnpackError::InvalidByte(0xc1).to_string(), "invalid byte 0xc1");
        let err = UnpackError::InvalidHeader {
            expected: "str",
            marker: 0xc0,
        };
        assert_eq!(err.to_string(), "expected str header, found marker 0xc0");
        assert!(UnpackError::Eof.is_eof());
        assert!(!UnpackError::UnexpectedEof.is_eof());
    }
}
