use crate::character_sets::{HostByte, classify_host_byte};
use crate::compat::String;
use crate::error::ParseError;

/// Check if 4 bytes match "xn--" (case insensitive)
fn is_punycode_prefix(slice: &[u8]) -> bool {
    slice.len() >= 4
        && matches!(slice[0], b'x' | b'X')
        && matches!(slice[1], b'n' | b'N')
        && slice[2] == b'-'
        && slice[3] == b'-'
}

/// Check if a domain contains a Punycode label
pub fn has_punycode(domain: &str) -> bool {
    let bytes = domain.as_bytes();
    if is_punycode_prefix(bytes) {
        return true;
    }
    memchr::memchr_iter(b'.', bytes).any(|pos| is_punycode_prefix(&bytes[pos + 1..]))
}

/// Normalize a registered host name to lowercase ASCII.
/// Plain ASCII names are checked byte by byte; Unicode or Punycode
/// names go through IDNA `ToASCII`.
pub fn host_to_ascii(domain: &str) -> Result<String, ParseError> {
    if domain.is_empty() {
        return Err(ParseError::InvalidHost);
    }

    if domain.is_ascii() && !has_punycode(domain) {
        let mut result = String::with_capacity(domain.len());
        for b in domain.bytes() {
            match classify_host_byte(b) {
                HostByte::Valid => result.push(b as char),
                HostByte::Upper => result.push(b.to_ascii_lowercase() as char),
                HostByte::Invalid => return Err(ParseError::InvalidHost),
            }
        }
        if result.starts_with('.') || result.contains("..") {
            return Err(ParseError::InvalidHost);
        }
        return Ok(result);
    }

    idna::domain_to_ascii(domain).map_err(|_| ParseError::IdnaError)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_host_to_ascii() {
        assert_eq!(host_to_ascii("Example.COM").unwrap(), "example.com");
        assert_eq!(host_to_ascii("localhost").unwrap(), "localhost");
        assert_eq!(host_to_ascii("exa mple.com"), Err(ParseError::InvalidHost));
        assert_eq!(host_to_ascii(""), Err(ParseError::InvalidHost));
        assert_eq!(host_to_ascii("a..b"), Err(ParseError::InvalidHost));

        let result = host_to_ascii("日本.jp").unwrap();
        assert!(result.starts_with("xn--"));
    }

    #[test]
    fn test_has_punycode() {
        assert!(has_punycode("xn--wgv71a.jp"));
        assert!(has_punycode("www.XN--wgv71a.jp"));
        assert!(!has_punycode("example.com"));
    }
}
