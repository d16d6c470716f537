#![no_main]
use libfuzzer_sys::fuzz_target;
use strict_uri::Uri;

fuzz_target!(|data: &str| {
    let Ok(uri) = Uri::parse_reference(data) else {
        return;
    };
    // an untouched builder reproduces the same decomposition
    let rebuilt = uri.to_builder().build().unwrap();
    assert_eq!(rebuilt.scheme(), uri.scheme());
    let (a, b) = (rebuilt.authority(), uri.authority());
    assert_eq!(a.user_info(), b.user_info());
    assert_eq!(a.host(), b.host());
    assert_eq!(a.host_kind(), b.host_kind());
    assert_eq!(a.path(), b.path());
});
