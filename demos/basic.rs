use siteurl::{Config, Request, UrlCodec};

fn main() {
    // RUST_LOG=siteurl=debug shows what the codec decoded and built
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::new("http://example.com/")
        .with_ssl_root("https://example.com/")
        .with_rewrite(true)
        .with_mvc(true)
        .with_persistent_params(["lang"]);
    let request = Request::new(false, "example.com", "/products/view/id/42/lang/fr/");

    let mut codec = UrlCodec::new(config, request).expect("valid configuration");

    println!("Page: {}", codec.current_page()); // products
    println!("Action: {:?}", codec.current_action()); // Some("view")
    println!("id: {:?}", codec.param("id")); // Some("42")

    // http://example.com/cart/index/add/42/lang/fr
    println!("{}", codec.build("cart", [("add", "42")], false));

    // https://example.com/login/index/lang/fr
    codec.ssl().expect("SSL root configured");
    println!("{}", codec.url("login"));
}
