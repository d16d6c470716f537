#![warn(rust_2018_idioms, unreachable_pub, missing_docs)]
#![forbid(unsafe_code)]
//! A strict URI parser, validator and builder adhering to IETF
//! [RFC 3986] and [RFC 6874].
//!
//! The parser decomposes a textual URI into scheme, authority (userinfo,
//! host, port, path) plus query and fragment, rejecting, not repairing,
//! any input that violates the grammar or the percent-encoding/UTF-8
//! rules. Hosts of well-known schemes (`http`,
//! `ssh`, `smtp`, …) are additionally held to RFC 1034 DNS name rules;
//! everything else falls under the generic registered-name grammar.
//!
//! No normalization is performed: a parsed URI serializes back to its
//! input byte for byte.
//!
//! [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
//! [RFC 6874]: https://datatracker.ietf.org/doc/html/rfc6874/
//!
//! # Examples
//!
//! ```
//! use strict_uri::{is_uri_reference, ErrorKind, HostKind, Uri};
//!
//! let uri = Uri::parse("https://user@[fe80::abcd]:6780/files?dir=src#top")?;
//! let auth = uri.authority();
//! assert_eq!(auth.user_info(), Some("user"));
//! assert_eq!(auth.host(), "fe80::abcd");
//! assert!(matches!(auth.host_kind(), HostKind::Ipv6(_)));
//! assert_eq!(auth.port(), Some("6780"));
//! assert_eq!(auth.path(), "/files");
//!
//! // strictness: a DNS-validating scheme rejects a malformed host
//! let err = Uri::parse("https://256.256.256.256/").unwrap_err();
//! assert!(err.is(ErrorKind::InvalidHost));
//!
//! // relative references are fine through the reference entry point
//! assert!(is_uri_reference("//host.domain.com/a/b"));
//! # Ok::<_, strict_uri::Error>(())
//! ```

mod authority;
mod builder;
mod dns;
mod encoding;
mod error;
mod host;
mod ip;
mod parser;
mod query;
mod scheme;
mod uri;

pub use authority::Authority;
pub use builder::Builder;
pub use error::{Error, ErrorKind};
pub use host::HostKind;
pub use query::QueryParams;
pub use scheme::{
    default_port_for_scheme, set_default_port_for_scheme, set_uses_dns_host_validation,
    uses_dns_host_validation,
};
pub use uri::Uri;

/// Tells whether `s` is a valid URI (scheme required).
///
/// ```
/// use strict_uri::is_uri;
///
/// assert!(is_uri("http://example.com/"));
/// assert!(!is_uri("//example.com/"));
/// assert!(!is_uri(""));
/// ```
pub fn is_uri(s: &str) -> bool {
    Uri::parse(s).is_ok()
}

/// Tells whether `s` is a valid URI reference (scheme optional).
///
/// ```
/// use strict_uri::is_uri_reference;
///
/// assert!(is_uri_reference("//example.com/"));
/// assert!(is_uri_reference("dir/file.txt"));
/// assert!(is_uri_reference(""));
/// assert!(!is_uri_reference("?"));
/// ```
pub fn is_uri_reference(s: &str) -> bool {
    Uri::parse_reference(s).is_ok()
}
