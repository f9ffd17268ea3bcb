//! Percent-encoding for identifiers interpolated into API paths.
//!
//! Log ids, file ids and job ids are caller-supplied. Encoding every byte that
//! could change the shape of the path keeps `a/b` from becoming two segments
//! and `id?x` from starting a query string.
//!
//! # Example
//!
//! ```
//! use oathnet_client::endpoints::url_encoding::encode_path_segment;
//!
//! assert_eq!(encode_path_segment("log/1"), "log%2F1");
//! ```

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in a single path segment.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'#')
    .add(b'+')
    .add(b'[')
    .add(b']');

/// Percent-encode a string for safe use as one URL path segment.
pub fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_pass_through() {
        assert_eq!(encode_path_segment("fs_01HZX3"), "fs_01HZX3");
        assert_eq!(encode_path_segment("a1b2-c3d4.e5"), "a1b2-c3d4.e5");
        assert_eq!(encode_path_segment("file:7"), "file:7");
    }

    #[test]
    fn test_path_breaking_characters_are_encoded() {
        assert_eq!(encode_path_segment("../etc"), "..%2Fetc");
        assert_eq!(encode_path_segment("id?x=1"), "id%3Fx=1");
        assert_eq!(encode_path_segment("id#frag"), "id%23frag");
        assert_eq!(encode_path_segment("two words"), "two%20words");
    }

    #[test]
    fn test_percent_is_not_double_decoded() {
        assert_eq!(encode_path_segment("id%2F"), "id%252F");
    }

    #[test]
    fn test_non_ascii_is_utf8_encoded() {
        assert_eq!(encode_path_segment("caf\u{00e9}"), "caf%C3%A9");
    }
}
