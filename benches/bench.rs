use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use strict_uri::Uri;

criterion_group!(
    benches,
    bench_parse,
    bench_parse_ip_literal,
    bench_parse_reference,
    bench_validate,
    bench_query_params,
);
criterion_main!(benches);

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| {
            let s = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";
            let _ = black_box(Uri::parse(black_box(s)));
        })
    });
}

fn bench_parse_ip_literal(c: &mut Criterion) {
    c.bench_function("parse_ip_literal", |b| {
        b.iter(|| {
            let s = "https://user:passwd@[21DA:00D3:0000:2F3B:02AA:00FF:FE28:9C5A%25en0]:8080/a?query=value#fragment";
            let _ = black_box(Uri::parse(black_box(s)));
        })
    });
}

fn bench_parse_reference(c: &mut Criterion) {
    c.bench_function("parse_reference", |b| {
        b.iter(|| {
            let s = "//host.domain.com:8080/a/b?query=x#frag";
            let _ = black_box(Uri::parse_reference(black_box(s)));
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    let uri = Uri::parse("https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment").unwrap();
    c.bench_function("validate", |b| {
        b.iter(|| {
            let _ = black_box(black_box(&uri).validate());
        })
    });
}

fn bench_query_params(c: &mut Criterion) {
    let uri = Uri::parse("http://example.com/?id=5&part=three&part=four&q=a+b%20c").unwrap();
    c.bench_function("query_params", |b| {
        b.iter(|| {
            let _ = black_box(black_box(&uri).query_params());
        })
    });
}
