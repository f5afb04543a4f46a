use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("out of bounds: needed {needed} bytes, {available} available")]
    OutOfBounds { needed: usize, available: usize },
}
