use strict_uri::Uri;

#[test]
fn default_ports() {
    for (input, is_default, default) in [
        ("http://host:80", true, Some(80)),
        ("http://host:8080", false, Some(80)),
        ("http://host", true, Some(80)),
        ("https://host:443/a", true, Some(443)),
        ("postgresql://host:6532", false, Some(5432)),
        ("postgresql://host:5432", true, Some(5432)),
        ("foo://host:1234", false, None),
        ("foo://host", true, None),
        // an empty port counts as default
        ("foo://host:", true, None),
        ("HTTPS://host:443", true, Some(443)),
    ] {
        let uri = Uri::parse(input).unwrap();
        assert_eq!(
            uri.is_default_port(),
            is_default,
            "is_default_port mismatch for {input:?}"
        );
        assert_eq!(
            uri.default_port(),
            default,
            "default_port mismatch for {input:?}"
        );
    }
}

#[test]
fn default_port_without_scheme() {
    let uri = Uri::parse_reference("//host:8080").unwrap();
    assert_eq!(uri.default_port(), None);
    assert!(!uri.is_default_port());
}
