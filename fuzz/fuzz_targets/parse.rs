#![no_main]
use libfuzzer_sys::fuzz_target;
use strict_uri::Uri;

fuzz_target!(|data: &str| {
    let _ = Uri::parse(data);
    let Ok(uri) = Uri::parse_reference(data) else {
        return;
    };
    // accepted input serializes back byte for byte and stays valid
    assert_eq!(uri.as_str(), data);
    uri.validate().unwrap();

    // the predicates agree with the parsers
    assert!(strict_uri::is_uri_reference(data));
    assert_eq!(strict_uri::is_uri(data), Uri::parse(data).is_ok());
});
