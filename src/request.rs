use crate::compat::{String, ToOwned, Vec, format};
use crate::error::ParseError;
use crate::helpers::{prune_fragment, split_query};
use crate::scheme::{Scheme, get_scheme};
use crate::unicode::percent_encode::decode_component;

/// Snapshot of the inbound request the codec decodes.
///
/// The codec only ever looks at this value, never at process state, so a
/// request can be described directly in tests:
///
/// ```
/// use siteurl::Request;
///
/// let request = Request::new(false, "example.com", "/list/?page=2");
/// assert_eq!(request.url(), "http://example.com/list/?page=2");
/// assert_eq!(request.query_param("page"), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    secure: bool,
    host: String,
    request_uri: String,
    query: Vec<(String, String)>,
}

/// Parse a raw query string into decoded pairs, skipping empty pieces
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    let query = query.strip_prefix('?').unwrap_or(query);

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (
                decode_component(key).into_owned(),
                decode_component(value).into_owned(),
            ),
            None => (decode_component(pair).into_owned(), String::new()),
        })
        .collect()
}

impl Request {
    /// Describe a request by its parts. `request_uri` is the path plus an
    /// optional query; a fragment, if present, is ignored.
    pub fn new(secure: bool, host: impl Into<String>, request_uri: impl Into<String>) -> Self {
        let mut request_uri = request_uri.into();
        let end = prune_fragment(&request_uri).0.len();
        request_uri.truncate(end);
        if !request_uri.starts_with('/') {
            request_uri.insert(0, '/');
        }

        let query = split_query(&request_uri).1.map(parse_query).unwrap_or_default();

        Self {
            secure,
            host: host.into(),
            request_uri,
            query,
        }
    }

    /// Describe a request from its absolute URL
    pub fn from_url(url: &str) -> Result<Self, ParseError> {
        let Some((scheme, rest)) = url.split_once("://") else {
            return Err(ParseError::InvalidUrl);
        };
        let scheme = get_scheme(scheme).ok_or(ParseError::InvalidScheme)?;

        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (host, request_uri) = rest.split_at(authority_end);
        if host.is_empty() {
            return Err(ParseError::InvalidHost);
        }

        Ok(Self::new(scheme == Scheme::Https, host, request_uri))
    }

    /// Describe a request from CGI-style server variables (`HTTPS`,
    /// `HTTP_HOST`, `REQUEST_URI`, with the usual fallbacks to
    /// `SERVER_NAME`/`SERVER_PORT` and `SCRIPT_NAME`/`PATH_INFO`/`QUERY_STRING`).
    pub fn from_cgi_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let vars: Vec<(String, String)> = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_owned(), v.as_ref().to_owned()))
            .collect();
        let var = |name: &str| {
            vars.iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .filter(|v| !v.is_empty())
        };

        let secure = var("HTTPS").is_some_and(|v| !v.eq_ignore_ascii_case("off"));
        let scheme = Scheme::for_request(secure);

        let host = match var("HTTP_HOST") {
            Some(host) => host.to_owned(),
            None => {
                let name = var("SERVER_NAME").unwrap_or("localhost");
                match var("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
                    Some(port) if port != scheme.default_port() => format!("{name}:{port}"),
                    _ => name.to_owned(),
                }
            }
        };

        let request_uri = match var("REQUEST_URI") {
            Some(uri) => uri.to_owned(),
            None => {
                let mut uri = String::from(var("SCRIPT_NAME").unwrap_or("/"));
                if let Some(path_info) = var("PATH_INFO") {
                    uri.push_str(path_info);
                }
                if let Some(query) = var("QUERY_STRING") {
                    uri.push('?');
                    uri.push_str(query);
                }
                uri
            }
        };

        Self::new(secure, host, request_uri)
    }

    /// Replace the query map, e.g. with pairs a framework already parsed
    #[must_use]
    pub fn with_query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn scheme(&self) -> Scheme {
        Scheme::for_request(self.secure)
    }

    /// Host as sent by the client, port included
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Path plus query, always starting with `/`
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    pub fn path(&self) -> &str {
        split_query(&self.request_uri).0
    }

    /// Raw query string without the leading `?`
    pub fn query_string(&self) -> Option<&str> {
        split_query(&self.request_uri).1
    }

    /// Decoded query pairs in request order
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Last decoded value for `name`, matching how form handlers collapse
    /// repeated keys
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Fully qualified URL: scheme, lowercased host and request URI
    pub fn url(&self) -> String {
        let scheme = self.scheme().as_str();
        let mut url =
            String::with_capacity(scheme.len() + 3 + self.host.len() + self.request_uri.len());
        url.push_str(scheme);
        url.push_str("://");
        url.push_str(&self.host.to_ascii_lowercase());
        url.push_str(&self.request_uri);
        url
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compat::vec;

    #[test]
    fn test_parse_query() {
        let pairs = parse_query("?a=1&&b=hello+world&c&d=x%3Dy");
        assert_eq!(
            pairs,
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("b".to_owned(), "hello world".to_owned()),
                ("c".to_owned(), String::new()),
                ("d".to_owned(), "x=y".to_owned()),
            ]
        );
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_new_normalizes_uri() {
        let request = Request::new(false, "x", "list#top");
        assert_eq!(request.request_uri(), "/list");
        assert_eq!(request.url(), "http://x/list");
        assert_eq!(request.query_string(), None);
    }

    #[test]
    fn test_from_url() {
        let request = Request::from_url("https://Example.com:8443/a/b?x=1#frag").unwrap();
        assert!(request.is_secure());
        assert_eq!(request.host(), "Example.com:8443");
        assert_eq!(request.path(), "/a/b");
        assert_eq!(request.query_string(), Some("x=1"));
        assert_eq!(request.url(), "https://example.com:8443/a/b?x=1");

        let request = Request::from_url("http://x?a=1").unwrap();
        assert_eq!(request.request_uri(), "/?a=1");

        assert_eq!(Request::from_url("x/y"), Err(ParseError::InvalidUrl));
        assert_eq!(Request::from_url("ftp://x/"), Err(ParseError::InvalidScheme));
        assert_eq!(Request::from_url("http:///y"), Err(ParseError::InvalidHost));
    }

    #[test]
    fn test_query_param_last_wins() {
        let request = Request::new(false, "x", "/?a=1&a=2");
        assert_eq!(request.query_param("a"), Some("2"));
        assert_eq!(request.query_param("b"), None);
    }

    #[test]
    fn test_from_cgi_vars() {
        let request = Request::from_cgi_vars([
            ("HTTPS", "on"),
            ("HTTP_HOST", "example.com"),
            ("REQUEST_URI", "/list/?page=2"),
        ]);
        assert_eq!(request.url(), "https://example.com/list/?page=2");

        let request = Request::from_cgi_vars([
            ("HTTPS", "off"),
            ("SERVER_NAME", "example.com"),
            ("SERVER_PORT", "8080"),
            ("SCRIPT_NAME", "/index.php"),
            ("QUERY_STRING", "controller=list"),
        ]);
        assert!(!request.is_secure());
        assert_eq!(request.url(), "http://example.com:8080/index.php?controller=list");
        assert_eq!(request.query_param("controller"), Some("list"));
    }

    #[test]
    fn test_with_query_replaces_pairs() {
        let request = Request::new(false, "x", "/?a=1").with_query([("b", "2")]);
        assert_eq!(request.query_param("a"), None);
        assert_eq!(request.query_param("b"), Some("2"));
        assert_eq!(request.query_string(), Some("a=1"));
    }
}
