use crate::compat::{String, ToOwned, Vec};

/// Codec configuration.
///
/// Every field has a default, so a config only needs a site root:
///
/// ```
/// use siteurl::Config;
///
/// let config = Config::new("http://example.com/")
///     .with_rewrite(true)
///     .with_persistent_params(["lang"]);
/// assert_eq!(config.controller_key, "controller");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    /// Base URL for plain links
    pub site_root: String,
    /// Base URL for SSL links
    pub site_root_ssl: Option<String>,
    pub controller_key: String,
    pub action_key: String,
    /// Controller value used when the request names none
    pub index_page: String,
    /// Names re-attached to every generated URL once seen on the request
    pub persistent_params: Vec<String>,
    /// `/page/name/value` addressing instead of `?controller=page&name=value`
    pub rewrite: bool,
    /// Mirror extracted parameters into the query map snapshot
    pub sync_query: bool,
    pub require_ssl: bool,
    /// Enable the action slot after the controller
    pub mvc: bool,
    /// Decode the request as part of construction
    pub auto_initialize: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_root: String::new(),
            site_root_ssl: None,
            controller_key: "controller".to_owned(),
            action_key: "action".to_owned(),
            index_page: "index".to_owned(),
            persistent_params: Vec::new(),
            rewrite: false,
            sync_query: false,
            require_ssl: false,
            mvc: false,
            auto_initialize: true,
        }
    }
}

impl Config {
    pub fn new(site_root: impl Into<String>) -> Self {
        Self {
            site_root: site_root.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ssl_root(mut self, root: impl Into<String>) -> Self {
        self.site_root_ssl = Some(root.into());
        self
    }

    #[must_use]
    pub fn with_controller_key(mut self, key: impl Into<String>) -> Self {
        self.controller_key = key.into();
        self
    }

    #[must_use]
    pub fn with_action_key(mut self, key: impl Into<String>) -> Self {
        self.action_key = key.into();
        self
    }

    #[must_use]
    pub fn with_index_page(mut self, page: impl Into<String>) -> Self {
        self.index_page = page.into();
        self
    }

    #[must_use]
    pub fn with_persistent_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.persistent_params = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_rewrite(mut self, enabled: bool) -> Self {
        self.rewrite = enabled;
        self
    }

    #[must_use]
    pub fn with_sync_query(mut self, enabled: bool) -> Self {
        self.sync_query = enabled;
        self
    }

    #[must_use]
    pub fn with_require_ssl(mut self, enabled: bool) -> Self {
        self.require_ssl = enabled;
        self
    }

    #[must_use]
    pub fn with_mvc(mut self, enabled: bool) -> Self {
        self.mvc = enabled;
        self
    }

    #[must_use]
    pub fn with_auto_initialize(mut self, enabled: bool) -> Self {
        self.auto_initialize = enabled;
        self
    }
}
