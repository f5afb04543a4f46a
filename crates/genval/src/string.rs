use std::borrow::Cow;
use std::fmt;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use genval_pack::Packer;

use crate::constants::BASE64_PREFIX;
use crate::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringType {
    Utf8,
    Raw,
}

/// A text or byte string.
///
/// Raw strings display as `base64,` followed by unpadded standard base64.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Str {
    Utf8(String),
    Raw(Vec<u8>),
}

impl Str {
    pub fn string_type(&self) -> StringType {
        match self {
            Str::Utf8(_) => StringType::Utf8,
            Str::Raw(_) => StringType::Raw,
        }
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Str::Utf8(s) => s.as_bytes(),
            Str::Raw(b) => b,
        }
    }

    /// Reads the string as text; raw bytes are decoded lossily.
    pub fn to_utf8(&self) -> Cow<'_, str> {
        match self {
            Str::Utf8(s) => Cow::Borrowed(s),
            Str::Raw(b) => String::from_utf8_lossy(b),
        }
    }

    pub fn pack<P: Packer + ?Sized>(&self, p: &mut P) {
        match self {
            Str::Utf8(s) => p.pack_str(s),
            Str::Raw(b) => p.pack_bin(b),
        }
    }

    pub fn print_json(&self, out: &mut String) {
        match self {
            Str::Utf8(s) => json::write_quoted(out, s),
            Str::Raw(b) => {
                out.push('"');
                out.push_str(BASE64_PREFIX);
                STANDARD_NO_PAD.encode_string(b, out);
                out.push('"');
            }
        }
    }
}

impl fmt::Display for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Str::Utf8(s) => f.write_str(s),
            Str::Raw(b) => write!(f, "{BASE64_PREFIX}{}", STANDARD_NO_PAD.encode(b)),
        }
    }
}

impl From<&str> for Str {
    fn from(val: &str) -> Self {
        Str::Utf8(val.to_string())
    }
}

impl From<String> for Str {
    fn from(val: String) -> Self {
        Str::Utf8(val)
    }
}

impl From<Vec<u8>> for Str {
    fn from(val: Vec<u8>) -> Self {
        Str::Raw(val)
    }
}

impl From<&[u8]> for Str {
    fn from(val: &[u8]) -> Self {
        Str::Raw(val.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_display() {
        let raw = Str::Raw(vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(raw.to_string(), "base64,AAECAwQF");
        let mut out = String::new();
        raw.print_json(&mut out);
        assert_eq!(out, "\"base64,AAECAwQF\"");
        assert_eq!(raw.len(), 6);
    }

    #[test]
    fn test_utf8_json_escapes() {
        let mut out = String::new();
        Str::from("a\"b\n").print_json(&mut out);
        assert_eq!(out, r#""a\"b\n""#);
    }

    #[test]
    fn test_subtypes_differ() {
        assert_ne!(Str::from("ab"), Str::from(b"ab".to_vec()));
        assert_eq!(Str::from(b"ab".to_vec()).to_utf8(), "ab");
        assert_eq!(Str::from("ab").as_bytes(), *b"ab");
    }
}
