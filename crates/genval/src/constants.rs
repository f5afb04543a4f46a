//! Crate-wide constants.

/// Table indexes start from one.
pub const FIRST_INDEX: i64 = 1;

/// Initial capacity of a table log.
pub const INIT_TABLE_SIZE: usize = 16;

/// Deepest nesting the decoder accepts.
pub const MAX_DEPTH: usize = 512;

/// Display prefix of raw byte strings.
pub const BASE64_PREFIX: &str = "base64,";

/// Display prefix of unknown extension values, followed by [`BASE64_PREFIX`].
pub const UNKNOWN_PREFIX: &str = "data:application/x-msgpack-ext;";

/// Separator between expression tokens.
pub const EXPRESSION_SEPARATOR: &str = ".";

/// Doubles closer than this compare equal.
pub const PRECISION: f64 = 0.00001;

/// Most nil padding [`List::put_at`](crate::List::put_at) writes before a far
/// index is treated as an append instead.
pub const MAX_LIST_GAP: usize = 4096;
