//! JSON text output helpers.
//!
//! Rendering is output only: objects print as `{"key": value,"key2": value}`
//! and arrays as `[a,b]`.

/// Appends `s` as a quoted, escaped JSON string.
pub(crate) fn write_quoted(out: &mut String, s: &str) {
    // Serializing a str cannot fail.
    out.push_str(&serde_json::to_string(s).unwrap_or_default());
}

pub(crate) fn write_null(out: &mut String) {
    out.push_str("null");
}

/// Appends a separator before every element but the first.
pub(crate) fn write_separator(out: &mut String, i: usize) {
    if i != 0 {
        out.push(',');
    }
}

/// Appends a quoted key and the `": "` that follows it.
pub(crate) fn write_key(out: &mut String, key: &str) {
    write_quoted(out, key);
    out.push_str(": ");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_layout() {
        let mut out = String::from("{");
        for (i, key) in ["a", "b\"c"].into_iter().enumerate() {
            write_separator(&mut out, i);
            write_key(&mut out, key);
            write_null(&mut out);
        }
        out.push('}');
        assert_eq!(out, r#"{"a": null,"b\"c": null}"#);
    }
}
