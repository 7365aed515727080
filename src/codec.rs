use crate::compat::{String, ToOwned, Vec};
use crate::config::Config;
use crate::error::{CodecError, Result};
use crate::helpers::{has_query, path_segments, split_query, trim_param};
use crate::param_map::{ParamMap, ReservedKeys, Slot};
use crate::request::Request;
use crate::site_root::SiteRoot;
use crate::unicode::percent_encode::{
    decode_component, encode_component, encode_component_into, encode_page_into,
};
use tracing::{debug, trace, warn};

/// Trim, encode and store a value. Unnamed parameters and values that are
/// empty after trimming are not stored. Returns whether anything was written.
fn store(params: &mut ParamMap, keys: &ReservedKeys, name: &str, value: &str) -> bool {
    let value = trim_param(value);
    if name.is_empty() || value.is_empty() {
        return false;
    }
    params.insert(keys.slot(name), encode_component(value));
    true
}

/// Upsert a decoded value into a query pair list
fn mirror(query: &mut Vec<(String, String)>, name: &str, encoded: &str) {
    let value = decode_component(encoded).into_owned();
    if let Some((_, v)) = query.iter_mut().find(|(k, _)| k == name) {
        *v = value;
    } else {
        query.push((name.to_owned(), value));
    }
}

/// A redirect target produced by [`UrlCodec::redirect`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    location: String,
    status: u16,
}

impl Redirect {
    /// `302 Found` to an arbitrary location
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            status: 302,
        }
    }

    /// Turn into `301 Moved Permanently`
    #[must_use]
    pub fn permanent(mut self) -> Self {
        self.status = 301;
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// The `Location` header as a name/value pair
    pub fn header(&self) -> (&'static str, &str) {
        ("Location", &self.location)
    }
}

/// Decodes the inbound request into parameters and builds outbound links.
///
/// One codec lives for one request. Values are stored URL-encoded; use
/// [`UrlCodec::param_decoded`] to read them back as plain text.
///
/// ```
/// use siteurl::{Config, Request, UrlCodec};
///
/// let config = Config::new("http://example.com/").with_rewrite(true);
/// let request = Request::new(false, "example.com", "/products/id/42/");
/// let mut codec = UrlCodec::new(config, request)?;
///
/// assert_eq!(codec.current_page(), "products");
/// assert_eq!(codec.param("id"), Some("42"));
/// assert_eq!(codec.build("cart", [("add", "42")], false), "http://example.com/cart/add/42");
/// # Ok::<(), siteurl::CodecError>(())
/// ```
#[derive(Debug, Clone)]
pub struct UrlCodec {
    config: Config,
    keys: ReservedKeys,
    root: SiteRoot,
    ssl_root: Option<SiteRoot>,
    request: Request,
    current_url: String,
    params: ParamMap,
    persistent: ParamMap,
    synced_query: Vec<(String, String)>,
    use_ssl: bool,
    one_shot_ssl: bool,
}

impl UrlCodec {
    /// Validate the configuration and, unless `auto_initialize` is off,
    /// decode `request`.
    ///
    /// # Errors
    ///
    /// [`CodecError::MissingSiteRoot`] for an empty site root,
    /// [`CodecError::MissingSslRoot`] when SSL is required but no SSL root is
    /// configured, and [`CodecError::InvalidSiteRoot`] /
    /// [`CodecError::InvalidSslRoot`] for roots that are not absolute http(s)
    /// URLs.
    pub fn new(config: Config, request: Request) -> Result<Self> {
        if config.site_root.trim().is_empty() {
            return Err(CodecError::MissingSiteRoot);
        }
        let root = SiteRoot::parse(&config.site_root).map_err(CodecError::InvalidSiteRoot)?;
        let ssl_root = config
            .site_root_ssl
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(SiteRoot::parse)
            .transpose()
            .map_err(CodecError::InvalidSslRoot)?;
        if config.require_ssl && ssl_root.is_none() {
            return Err(CodecError::MissingSslRoot);
        }

        let keys = ReservedKeys::new(
            &config.controller_key,
            config.mvc.then_some(config.action_key.as_str()),
        );

        let mut codec = Self {
            keys,
            root,
            ssl_root,
            current_url: request.url(),
            request,
            params: ParamMap::new(),
            persistent: ParamMap::new(),
            synced_query: Vec::new(),
            use_ssl: false,
            one_shot_ssl: false,
            config,
        };

        if codec.config.auto_initialize {
            codec.initialize()?;
        }
        Ok(codec)
    }

    /// Decode the request into parameters and capture persistent ones.
    /// Calling it again starts over from the request.
    ///
    /// # Errors
    ///
    /// [`CodecError::MissingSslRoot`] if SSL is required without an SSL root.
    pub fn initialize(&mut self) -> Result<()> {
        let mut current_url = self.request.url();
        if self.config.rewrite && !has_query(&current_url) && !current_url.ends_with('/') {
            current_url.push('/');
        }
        self.current_url = current_url;

        if self.config.require_ssl {
            self.enable_ssl()?;
        }

        self.params.clear();
        for (name, value) in self.request.query() {
            store(&mut self.params, &self.keys, name, value);
        }

        if self.config.rewrite {
            self.decode_path();
        }

        if self.params.controller().is_none() {
            self.params
                .insert(Slot::Controller, encode_component(&self.config.index_page));
        }

        self.persistent.clear();
        for name in &self.config.persistent_params {
            let slot = self.keys.slot(name);
            if let Some(value) = self.params.get(slot).filter(|v| !v.is_empty()) {
                self.persistent.insert(slot, value.to_owned());
            }
        }

        if self.config.sync_query {
            self.synced_query = self.request.query().to_vec();
            for (name, value) in self.params.to_pairs(&self.keys) {
                mirror(&mut self.synced_query, &name, &value);
            }
        }

        debug!(
            url = %self.current_url,
            rewrite = self.config.rewrite,
            mvc = self.config.mvc,
            params = self.params.len(),
            persistent = self.persistent.len(),
            "decoded request"
        );
        Ok(())
    }

    /// The part of the current URL below the site root, or `None` when the
    /// URL is the root itself
    fn relative_url(&self) -> Option<&str> {
        let active = self.active_root();
        if active.as_str().eq_ignore_ascii_case(&self.current_url) {
            return None;
        }

        let other = if core::ptr::eq(active, &self.root) {
            self.ssl_root.as_ref()
        } else {
            Some(&self.root)
        };
        let relative = active
            .strip_from(&self.current_url)
            .or_else(|| other.and_then(|root| root.strip_from(&self.current_url)));
        if relative.is_some() {
            return relative;
        }

        warn!(url = %self.current_url, root = %active, "request is outside the site root");
        let path = self.request.path();
        path.strip_prefix(self.root.path())
            .or_else(|| path.strip_prefix('/'))
            .or(Some(path))
    }

    /// Rewrite addressing: `controller[/action]/name/value/...`
    fn decode_path(&mut self) {
        let Some(relative) = self.relative_url() else {
            return;
        };
        let path = split_query(relative).0;

        let mut segments = path_segments(path).map(decode_component);
        let mut decoded = ParamMap::new();
        if let Some(controller) = segments.next() {
            store(&mut decoded, &self.keys, self.keys.controller(), &controller);
        }
        if let Some(action_key) = self.keys.action() {
            if let Some(action) = segments.next() {
                store(&mut decoded, &self.keys, action_key, &action);
            }
        }

        let rest: Vec<_> = segments.collect();
        if let Some(dropped) = rest.last().filter(|_| rest.len() % 2 == 1) {
            warn!(path, %dropped, "odd number of name/value segments");
        }
        for pair in rest.chunks_exact(2) {
            trace!(name = %pair[0], value = %pair[1], "path parameter");
            store(&mut decoded, &self.keys, &pair[0], &pair[1]);
        }

        self.params.merge(&decoded);
    }

    fn active_root(&self) -> &SiteRoot {
        match &self.ssl_root {
            Some(ssl_root) if self.use_ssl || self.one_shot_ssl => ssl_root,
            _ => &self.root,
        }
    }

    /// Stored (URL-encoded) value of a parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(self.keys.slot(name))
    }

    pub fn param_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.param(name).unwrap_or(default)
    }

    /// Parameter value decoded back to plain text
    pub fn param_decoded(&self, name: &str) -> Option<String> {
        self.param(name).map(|v| decode_component(v).into_owned())
    }

    /// Store a parameter. Values that are empty after trimming are ignored.
    pub fn set_param(&mut self, name: &str, value: &str) -> &mut Self {
        if store(&mut self.params, &self.keys, name, value) && self.config.sync_query {
            if let Some(stored) = self.params.get(self.keys.slot(name)) {
                mirror(&mut self.synced_query, name, stored);
            }
        }
        self
    }

    pub fn remove_param(&mut self, name: &str) -> &mut Self {
        self.params.remove(self.keys.slot(name));
        if self.config.sync_query {
            self.synced_query.retain(|(k, _)| k != name);
        }
        self
    }

    /// All parameters as `(name, encoded value)` pairs, controller first
    pub fn params(&self) -> Vec<(String, String)> {
        self.params.to_pairs(&self.keys)
    }

    /// Parameters captured as persistent when the request was decoded
    pub fn persistent_params(&self) -> Vec<(String, String)> {
        self.persistent.to_pairs(&self.keys)
    }

    /// Request query pairs with every decoded parameter mirrored in.
    /// Empty unless `sync_query` is enabled.
    pub fn synced_query(&self) -> &[(String, String)] {
        &self.synced_query
    }

    /// The controller value
    pub fn current_page(&self) -> &str {
        self.params
            .controller()
            .unwrap_or(self.config.index_page.as_str())
    }

    /// The action value (MVC style only)
    pub fn current_action(&self) -> Option<&str> {
        self.params.action()
    }

    /// Fully qualified URL of the request being handled
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Root the next generated URL starts with
    pub fn root(&self) -> &str {
        self.active_root().as_str()
    }

    pub fn is_ssl(&self) -> bool {
        self.use_ssl
    }

    /// Generate every following URL on the SSL root
    ///
    /// # Errors
    ///
    /// [`CodecError::MissingSslRoot`] when no SSL root is configured.
    pub fn enable_ssl(&mut self) -> Result<&mut Self> {
        if self.ssl_root.is_none() {
            return Err(CodecError::MissingSslRoot);
        }
        self.use_ssl = true;
        Ok(self)
    }

    /// Generate following URLs on the plain root again
    pub fn disable_ssl(&mut self) -> &mut Self {
        self.use_ssl = false;
        self
    }

    /// Generate only the next URL on the SSL root
    ///
    /// # Errors
    ///
    /// [`CodecError::MissingSslRoot`] when no SSL root is configured.
    pub fn ssl(&mut self) -> Result<&mut Self> {
        if self.ssl_root.is_none() {
            return Err(CodecError::MissingSslRoot);
        }
        self.one_shot_ssl = true;
        Ok(self)
    }

    /// Link to `page` carrying only persistent parameters
    pub fn url(&mut self, page: &str) -> String {
        self.build(page, None::<(&str, &str)>, false)
    }

    /// Build a link to `page`.
    ///
    /// An empty `page` means the current page. Caller parameters win over
    /// current ones when `merge_current` is set; persistent parameters fill
    /// in names that are still unset, except when linking to the current
    /// page with `merge_current`, where the current parameters already
    /// carry them.
    pub fn build<I, K, V>(&mut self, page: &str, params: I, merge_current: bool) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let use_ssl_root = self.use_ssl || self.one_shot_ssl;
        let root = self.active_root().as_str().to_owned();
        self.one_shot_ssl = false;

        let current_page = decode_component(self.current_page()).into_owned();
        let page = if page.is_empty() {
            current_page.as_str()
        } else {
            page
        };

        let mut caller = ParamMap::new();
        for (name, value) in params {
            store(&mut caller, &self.keys, name.as_ref(), value.as_ref());
        }

        let mut effective = if merge_current {
            let mut merged = self.params.clone();
            merged.merge(&caller);
            merged
        } else {
            caller
        };
        if !(merge_current && page == current_page) {
            effective.fill_missing(&self.persistent);
        }

        // The page is positional, so a controller entry is never re-emitted
        effective.retain(|slot, value| slot != Slot::Controller && !value.is_empty());
        if self.config.mvc && effective.has_named() && effective.action().is_none() {
            effective.insert(Slot::Action, "index".to_owned());
        }

        let url = self.encode(root, page, &effective);
        debug!(%url, ssl = use_ssl_root, "built url");
        url
    }

    fn encode(&self, mut url: String, page: &str, params: &ParamMap) -> String {
        if self.config.rewrite {
            encode_page_into(&mut url, page);
            if let Some(action) = params.action() {
                url.push('/');
                url.push_str(action);
            }
            for (name, value) in params.named() {
                url.push('/');
                encode_component_into(&mut url, name);
                url.push('/');
                url.push_str(value);
            }
        } else {
            url.push('?');
            encode_component_into(&mut url, self.keys.controller());
            url.push('=');
            encode_component_into(&mut url, page);
            if let (Some(action), Some(key)) = (params.action(), self.keys.action()) {
                url.push('&');
                encode_component_into(&mut url, key);
                url.push('=');
                url.push_str(action);
            }
            for (name, value) in params.named() {
                url.push('&');
                encode_component_into(&mut url, name);
                url.push('=');
                url.push_str(value);
            }
        }
        url
    }

    /// `302` redirect to a generated link
    pub fn redirect<I, K, V>(&mut self, page: &str, params: I) -> Redirect
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Redirect::to(self.build(page, params, false))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compat::vec;

    fn codec(config: Config, uri: &str) -> UrlCodec {
        UrlCodec::new(config, Request::new(false, "x", uri)).unwrap()
    }

    #[test]
    fn test_store_skips_empty_and_encodes() {
        let keys = ReservedKeys::new("controller", None);
        let mut params = ParamMap::new();
        assert!(!store(&mut params, &keys, "a", " \t"));
        assert!(!store(&mut params, &keys, "", "5"));
        assert!(store(&mut params, &keys, "a", " hello world "));
        assert_eq!(params.get(Slot::Named("a")), Some("hello+world"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_mirror_upserts_decoded() {
        let mut query = vec![("a".to_owned(), "1".to_owned())];
        mirror(&mut query, "a", "x+y");
        mirror(&mut query, "b", "%26");
        assert_eq!(
            query,
            vec![
                ("a".to_owned(), "x y".to_owned()),
                ("b".to_owned(), "&".to_owned()),
            ]
        );
    }

    #[test]
    fn test_relative_url_at_root() {
        let codec = codec(Config::new("http://x/").with_rewrite(true), "/");
        assert_eq!(codec.current_url(), "http://x/");
        assert_eq!(codec.relative_url(), None);
        assert_eq!(codec.current_page(), "index");
    }

    #[test]
    fn test_relative_url_falls_back_to_request_path() {
        let config = Config::new("http://example.com/app/").with_rewrite(true);
        let codec = codec(config, "/app/list/");
        assert_eq!(codec.relative_url(), Some("list/"));
        assert_eq!(codec.current_page(), "list");
    }

    #[test]
    fn test_redirect() {
        let mut codec = codec(Config::new("http://x/"), "/");
        let redirect = codec.redirect("login", [("next", "cart")]);
        assert_eq!(redirect.status(), 302);
        assert_eq!(redirect.location(), "http://x/?controller=login&next=cart");
        assert_eq!(redirect.header(), ("Location", "http://x/?controller=login&next=cart"));
        assert_eq!(redirect.permanent().status(), 301);
    }
}
