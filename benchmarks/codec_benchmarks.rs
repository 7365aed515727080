#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::expect_used,
    clippy::print_stdout
)]

/// Codec benchmarks: request decoding, link building and site root validation
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use siteurl::{Config, Request, SiteRoot, UrlCodec};

// Rust url crate
use url::Url as UrlCrate;

fn rewrite_config() -> Config {
    Config::new("http://example.com/")
        .with_rewrite(true)
        .with_mvc(true)
        .with_persistent_params(["lang"])
}

fn bench_decode_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let query = Request::new(false, "example.com", "/?controller=list&page=2&sort=name&lang=fr");
    group.bench_function("query_string", |b| {
        b.iter(|| {
            UrlCodec::new(
                Config::new("http://example.com/").with_persistent_params(["lang"]),
                black_box(query.clone()),
            )
            .unwrap()
        });
    });

    let rewrite = Request::new(false, "example.com", "/list/view/page/2/sort/name/lang/fr/");
    group.bench_function("rewrite_mvc", |b| {
        b.iter(|| UrlCodec::new(rewrite_config(), black_box(rewrite.clone())).unwrap());
    });

    group.finish();
}

fn bench_build_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    let request = Request::new(false, "example.com", "/list/view/page/2/lang/fr/");
    let mut codec = UrlCodec::new(rewrite_config(), request).unwrap();

    group.bench_function("rewrite_persistent", |b| {
        b.iter(|| codec.build(black_box("detail"), [("id", "42")], false));
    });

    group.bench_function("rewrite_merge_current", |b| {
        b.iter(|| codec.build(black_box("list"), [("page", "3")], true));
    });

    let mut codec = UrlCodec::new(
        Config::new("http://example.com/"),
        Request::new(false, "example.com", "/?controller=list&q=caf%C3%A9+au+lait"),
    )
    .unwrap();
    group.bench_function("query_string_encoded", |b| {
        b.iter(|| codec.build(black_box("search"), [("q", "caf\u{e9} & more")], true));
    });

    group.finish();
}

fn bench_site_root_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("site_root");
    let input = "https://Example.com:8443/app";

    group.bench_function("siteurl", |b| {
        b.iter(|| SiteRoot::parse(black_box(input)).unwrap());
    });

    group.bench_function("url_crate", |b| {
        b.iter(|| UrlCrate::parse(black_box(input)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_decode_all, bench_build_all, bench_site_root_all);

criterion_main!(benches);
