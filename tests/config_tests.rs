#![allow(clippy::unwrap_used, clippy::panic, clippy::expect_used)]

/// Loading `Config` through serde (requires the `serde` feature)
use siteurl::{Config, Request, UrlCodec};

#[test]
fn test_deserialize_defaults() {
    let config: Config = serde_json::from_str(r#"{ "site_root": "http://x/" }"#).unwrap();
    assert_eq!(config, Config::new("http://x/"));
}

#[test]
fn test_deserialize_full() {
    let config: Config = serde_json::from_str(
        r#"{
            "site_root": "http://example.com/",
            "site_root_ssl": "https://example.com/",
            "controller_key": "c",
            "action_key": "a",
            "index_page": "home",
            "persistent_params": ["lang"],
            "rewrite": true,
            "sync_query": true,
            "require_ssl": false,
            "mvc": true,
            "auto_initialize": true
        }"#,
    )
    .unwrap();

    assert_eq!(config.site_root_ssl.as_deref(), Some("https://example.com/"));
    assert_eq!(config.persistent_params, ["lang"]);
    assert!(config.rewrite && config.mvc && config.sync_query);

    let request = Request::new(false, "example.com", "/shop/buy/lang/fr/");
    let mut codec = UrlCodec::new(config, request).unwrap();
    assert_eq!(codec.current_page(), "shop");
    assert_eq!(codec.current_action(), Some("buy"));
    assert_eq!(codec.url("cart"), "http://example.com/cart/index/lang/fr");
}

#[test]
fn test_deserialize_rejects_unknown_fields() {
    let result: Result<Config, _> =
        serde_json::from_str(r#"{ "site_root": "http://x/", "rewrite_enabled": true }"#);
    assert!(result.is_err());
}
