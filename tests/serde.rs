#![cfg(feature = "serde")]

use strict_uri::Uri;

#[test]
fn serializes_as_the_exact_text() {
    let uri = Uri::parse("foo://example.com:8042/over/there?name=ferret#nose").unwrap();
    let json = serde_json::to_string(&uri).unwrap();
    assert_eq!(
        json,
        "\"foo://example.com:8042/over/there?name=ferret#nose\""
    );
}

#[test]
fn deserializes_references() {
    let uri: Uri = serde_json::from_str("\"//host.domain.com/a/b\"").unwrap();
    assert_eq!(uri.authority().host(), "host.domain.com");

    let err = serde_json::from_str::<Uri>("\"http://exa mple.org\"").unwrap_err();
    assert!(err.to_string().contains("invalid host"));
}

#[test]
fn round_trips_through_serde() {
    let uri = Uri::parse("https://user@[fe80::1%25en0]:8080/a?q=v#f").unwrap();
    let json = serde_json::to_string(&uri).unwrap();
    let back: Uri = serde_json::from_str(&json).unwrap();
    assert_eq!(back, uri);
}
