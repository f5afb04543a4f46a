use std::fmt;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use genval_pack::Packer;

use crate::constants::{BASE64_PREFIX, UNKNOWN_PREFIX};

/// An extension value the codec does not interpret, kept as tag and data so
/// it packs back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unknown {
    tag: u8,
    data: Vec<u8>,
}

impl Unknown {
    pub fn new(tag: u8, data: Vec<u8>) -> Self {
        Self { tag, data }
    }

    /// Splits a tag-prefixed payload. Returns `None` for an empty slice.
    pub fn from_tag_and_data(bytes: &[u8]) -> Option<Self> {
        let (&tag, data) = bytes.split_first()?;
        Some(Self::new(tag, data.to_vec()))
    }

    pub fn tag(&self) -> u8 {
        self.tag
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn encoded(&self) -> String {
        let mut tag_and_data = Vec::with_capacity(self.data.len() + 1);
        tag_and_data.push(self.tag);
        tag_and_data.extend_from_slice(&self.data);
        STANDARD_NO_PAD.encode(tag_and_data)
    }

    pub fn pack<P: Packer + ?Sized>(&self, p: &mut P) {
        p.pack_ext(self.tag, &self.data);
    }

    pub fn print_json(&self, out: &mut String) {
        out.push('"');
        out.push_str(&self.to_string());
        out.push('"');
    }
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{UNKNOWN_PREFIX}{BASE64_PREFIX}{}", self.encoded())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_covers_tag_and_data() {
        let unknown = Unknown::new(3, vec![1]);
        assert_eq!(
            unknown.to_string(),
            "data:application/x-msgpack-ext;base64,AwE"
        );
        let mut out = String::new();
        unknown.print_json(&mut out);
        assert_eq!(out, "\"data:application/x-msgpack-ext;base64,AwE\"");
    }

    #[test]
    fn test_from_tag_and_data() {
        let unknown = Unknown::from_tag_and_data(&[7, 1, 2]).unwrap();
        assert_eq!(unknown.tag(), 7);
        assert_eq!(unknown.data(), [1, 2]);
        assert!(Unknown::from_tag_and_data(&[]).is_none());
    }
}
