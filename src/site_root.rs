use crate::compat::{String, ToString};
use crate::error::ParseError;
use crate::scheme::{Scheme, get_scheme};
use crate::unicode::idna::host_to_ascii;

/// A validated site root: an absolute http(s) URL normalized to end with `/`.
///
/// Example: `"HTTP://Example.com:8080/app"` becomes `"http://example.com:8080/app/"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRoot {
    href: String,
    scheme: Scheme,
    host_end: usize,
    port: Option<u16>,
}

/// Parse a port string to u16.
/// Returns None if empty, contains non-digit characters, or is out of range.
fn parse_port(port: &str) -> Option<u16> {
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse::<u16>().ok()
}

/// Split an authority into host and optional port, handling IPv6 brackets
fn split_host_port(authority: &str) -> Result<(&str, Option<&str>), ParseError> {
    if authority.starts_with('[') {
        let Some(bracket_end) = authority.find(']') else {
            return Err(ParseError::InvalidIpv6);
        };
        let rest = &authority[bracket_end + 1..];
        let port = match rest.strip_prefix(':') {
            Some(port) => Some(port),
            None if rest.is_empty() => None,
            None => return Err(ParseError::InvalidHost),
        };
        return Ok((&authority[..=bracket_end], port));
    }

    Ok(match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    })
}

fn normalize_host(host: &str) -> Result<String, ParseError> {
    if let Some(literal) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        return literal
            .parse::<core::net::Ipv6Addr>()
            .map(|addr| crate::compat::format!("[{addr}]"))
            .map_err(|_| ParseError::InvalidIpv6);
    }
    host_to_ascii(host)
}

impl SiteRoot {
    /// Validate and normalize an absolute http(s) base URL
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.bytes().any(|b| b <= 0x20 || b == 0x7F) {
            return Err(ParseError::InvalidUrl);
        }

        let Some((scheme, rest)) = input.split_once("://") else {
            return Err(ParseError::InvalidUrl);
        };
        let scheme = get_scheme(scheme).ok_or(ParseError::InvalidScheme)?;

        if rest.contains(['?', '#']) {
            return Err(ParseError::InvalidUrl);
        }

        let (authority, path) = rest.find('/').map_or((rest, ""), |pos| rest.split_at(pos));
        if authority.contains('@') {
            return Err(ParseError::InvalidUrl);
        }

        let (host, port) = split_host_port(authority)?;
        let host = normalize_host(host)?;
        let port = port
            .map(|p| parse_port(p).ok_or(ParseError::InvalidPort))
            .transpose()?;

        let mut href = String::with_capacity(input.len() + 1);
        href.push_str(scheme.as_str());
        href.push_str("://");
        href.push_str(&host);
        let host_end = href.len();
        if let Some(port) = port {
            href.push(':');
            href.push_str(&port.to_string());
        }
        if !path.starts_with('/') {
            href.push('/');
        }
        href.push_str(path);
        if !href.ends_with('/') {
            href.push('/');
        }

        Ok(Self {
            href,
            scheme,
            host_end,
            port,
        })
    }

    /// The normalized root, always ending with `/`
    pub fn as_str(&self) -> &str {
        &self.href
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Lowercase ASCII host, IPv6 literals in brackets
    pub fn host(&self) -> &str {
        &self.href[self.scheme.as_str().len() + 3..self.host_end]
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Path below the host, starting and ending with `/`
    pub fn path(&self) -> &str {
        let authority_start = self.scheme.as_str().len() + 3;
        self.href[authority_start..]
            .find('/')
            .map_or("/", |pos| &self.href[authority_start + pos..])
    }

    /// Strip this root from the front of `url`.
    /// The comparison is ASCII case-insensitive.
    pub fn strip_from<'a>(&self, url: &'a str) -> Option<&'a str> {
        let prefix = url.get(..self.href.len())?;
        if prefix.eq_ignore_ascii_case(&self.href) {
            return Some(&url[self.href.len()..]);
        }
        // "http://x/app" matches the root "http://x/app/"
        if url.len() + 1 == self.href.len() && self.href.starts_with(url) {
            return Some("");
        }
        None
    }
}

impl core::fmt::Display for SiteRoot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.href)
    }
}

impl core::str::FromStr for SiteRoot {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_trailing_slash() {
        let root = SiteRoot::parse("http://example.com").unwrap();
        assert_eq!(root.as_str(), "http://example.com/");
        assert_eq!(root.path(), "/");

        let root = SiteRoot::parse("https://example.com/app").unwrap();
        assert_eq!(root.as_str(), "https://example.com/app/");
        assert_eq!(root.scheme(), Scheme::Https);
        assert_eq!(root.path(), "/app/");

        let root = SiteRoot::parse("http://example.com/app/").unwrap();
        assert_eq!(root.as_str(), "http://example.com/app/");
    }

    #[test]
    fn test_parse_lowercases_scheme_and_host() {
        let root = SiteRoot::parse("HTTP://Example.COM:8080/App").unwrap();
        assert_eq!(root.as_str(), "http://example.com:8080/App/");
        assert_eq!(root.host(), "example.com");
        assert_eq!(root.port(), Some(8080));
    }

    #[test]
    fn test_parse_ipv6() {
        let root = SiteRoot::parse("http://[::1]:8000").unwrap();
        assert_eq!(root.as_str(), "http://[::1]:8000/");
        assert_eq!(root.host(), "[::1]");
        assert_eq!(SiteRoot::parse("http://[::zz]/"), Err(ParseError::InvalidIpv6));
        assert_eq!(SiteRoot::parse("http://[::1/"), Err(ParseError::InvalidIpv6));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(SiteRoot::parse("example.com"), Err(ParseError::InvalidUrl));
        assert_eq!(SiteRoot::parse("/relative/"), Err(ParseError::InvalidUrl));
        assert_eq!(SiteRoot::parse("ftp://example.com/"), Err(ParseError::InvalidScheme));
        assert_eq!(SiteRoot::parse("http:///path"), Err(ParseError::InvalidHost));
        assert_eq!(SiteRoot::parse("http://example.com:99999/"), Err(ParseError::InvalidPort));
        assert_eq!(SiteRoot::parse("http://example.com:/"), Err(ParseError::InvalidPort));
        assert_eq!(SiteRoot::parse("http://user@example.com/"), Err(ParseError::InvalidUrl));
        assert_eq!(SiteRoot::parse("http://example.com/?a=1"), Err(ParseError::InvalidUrl));
        assert_eq!(SiteRoot::parse("http://exa mple.com/"), Err(ParseError::InvalidUrl));
    }

    #[test]
    fn test_strip_from() {
        let root = SiteRoot::parse("http://example.com/app").unwrap();
        assert_eq!(root.strip_from("http://example.com/app/list/"), Some("list/"));
        assert_eq!(root.strip_from("HTTP://EXAMPLE.com/app/list/"), Some("list/"));
        assert_eq!(root.strip_from("http://example.com/app"), Some(""));
        assert_eq!(root.strip_from("http://example.com/other/"), None);
        assert_eq!(root.strip_from("https://example.com/app/"), None);
    }
}
