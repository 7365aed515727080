use crate::character_sets::is_param_trim_char;

/// Prune fragment (#hash) from a request URI.
/// Returns (`uri_without_fragment`, `fragment_without_hash`)
pub fn prune_fragment(input: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'#', input.as_bytes()).map_or((input, None), |pos| {
        (&input[..pos], Some(&input[pos + 1..]))
    })
}

/// Split a URI into path and query (query returned without the leading '?')
pub fn split_query(input: &str) -> (&str, Option<&str>) {
    memchr::memchr(b'?', input.as_bytes()).map_or((input, None), |pos| {
        (&input[..pos], Some(&input[pos + 1..]))
    })
}

/// Check whether a URL carries a query part
pub fn has_query(input: &str) -> bool {
    memchr::memchr(b'?', input.as_bytes()).is_some()
}

/// Trim whitespace and control padding from a parameter value
pub fn trim_param(input: &str) -> &str {
    input.trim_matches(is_param_trim_char)
}

/// Split a rewritten path into segments, dropping one trailing empty segment
/// (`"a/b/"` yields `["a", "b"]`).
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.strip_suffix('/').unwrap_or(path);
    let empty = path.is_empty();
    path.split('/').filter(move |_| !empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::{Vec, vec};

    #[test]
    fn test_prune_fragment() {
        assert_eq!(prune_fragment("/a?b#c"), ("/a?b", Some("c")));
        assert_eq!(prune_fragment("/a"), ("/a", None));
    }

    #[test]
    fn test_split_query() {
        assert_eq!(split_query("/list/?page=2"), ("/list/", Some("page=2")));
        assert_eq!(split_query("/list/"), ("/list/", None));
        assert_eq!(split_query("?"), ("", Some("")));
        assert!(has_query("http://x/?a=1"));
        assert!(!has_query("http://x/a"));
    }

    #[test]
    fn test_trim_param() {
        assert_eq!(trim_param("  value\t\n"), "value");
        assert_eq!(trim_param("\0\x0Bv a\r"), "v a");
        assert_eq!(trim_param("   "), "");
    }

    #[test]
    fn test_path_segments() {
        let segs: Vec<&str> = path_segments("products/id/42/").collect();
        assert_eq!(segs, vec!["products", "id", "42"]);

        let segs: Vec<&str> = path_segments("products").collect();
        assert_eq!(segs, vec!["products"]);

        assert_eq!(path_segments("").count(), 0);
        assert_eq!(path_segments("/").count(), 0);

        // Inner empty segments are kept
        let segs: Vec<&str> = path_segments("a//b").collect();
        assert_eq!(segs, vec!["a", "", "b"]);
    }
}
