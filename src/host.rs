//! Host classification and validation.
//!
//! A bracketed host is an IP literal: an IPv6 address, optionally with an
//! RFC 6874 zone identifier, or an `IPvFuture` literal when it opens with
//! `v`. A bare host is first tried as a strict IPv4 literal and otherwise
//! routed to DNS-name or registered-name validation depending on the
//! scheme.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::dns::validate_dns_name;
use crate::encoding::table::{IPV_FUTURE, REG_NAME, ZONE_ID};
use crate::encoding::validate_component;
use crate::error::{Error, ErrorKind};
use crate::ip;
use crate::scheme::uses_dns_host_validation;

/// Classification of the host subcomponent of a URI.
///
/// Set exactly once per parsed URI, by the host validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostKind {
    /// No host: the URI has no authority, or an empty one.
    None,
    /// An RFC 3986 registered name.
    Registered,
    /// An RFC 1034 DNS host name, required for schemes known to carry
    /// them (see [`uses_dns_host_validation`]).
    Dns,
    /// A strict dotted-decimal IPv4 literal.
    Ipv4(Ipv4Addr),
    /// A bracketed IPv6 literal. The zone identifier, when present,
    /// stays in the host text after the `%25` separator.
    Ipv6(Ipv6Addr),
    /// A bracketed literal of a future IP version (`v<hex>.<body>`).
    IpvFuture,
}

impl HostKind {
    /// Returns `true` for IPv4 and IPv6 hosts, but not for `IPvFuture`.
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let uri = Uri::parse("telnet://192.0.2.16:80/").unwrap();
    /// assert!(uri.authority().is_ip());
    /// let uri = Uri::parse("http://[vFe.foo:bar]").unwrap();
    /// assert!(!uri.authority().is_ip());
    /// ```
    #[inline]
    pub fn is_ip(&self) -> bool {
        matches!(self, HostKind::Ipv4(_) | HostKind::Ipv6(_))
    }

    /// Returns the parsed address for IPv4 and IPv6 hosts.
    pub fn ip_addr(&self) -> Option<IpAddr> {
        match *self {
            HostKind::Ipv4(addr) => Some(IpAddr::V4(addr)),
            HostKind::Ipv6(addr) => Some(IpAddr::V6(addr)),
            _ => None,
        }
    }
}

/// Validates a host and classifies it. `host` carries the text between
/// the brackets when `bracketed` is set.
pub(crate) fn validate_host(
    host: &str,
    bracketed: bool,
    scheme: Option<&str>,
) -> Result<HostKind, Error> {
    if bracketed {
        return validate_ip_literal(host);
    }
    if host.is_empty() {
        return Ok(HostKind::None);
    }

    if let Some(addr) = ip::parse_v4(host.as_bytes()) {
        return Ok(HostKind::Ipv4(addr));
    }

    if uses_dns_host_validation(scheme.unwrap_or("")) {
        validate_dns_name(host).map_err(|e| Error::wrap(ErrorKind::InvalidHost, e))?;
        Ok(HostKind::Dns)
    } else {
        validate_component(host, REG_NAME)
            .map_err(|e| {
                Error::wrap(
                    ErrorKind::InvalidHost,
                    Error::wrap(ErrorKind::InvalidRegisteredName, e),
                )
            })?;
        Ok(HostKind::Registered)
    }
}

fn validate_ip_literal(inner: &str) -> Result<HostKind, Error> {
    if matches!(inner.bytes().next(), Some(b'v' | b'V')) {
        validate_ipv_future(&inner[1..])?;
        return Ok(HostKind::IpvFuture);
    }

    let (addr, zone) = match inner.find('%') {
        Some(0) => {
            return Err(Error::with_detail(
                ErrorKind::InvalidHostAddress,
                "an IPv6 literal cannot start with a zone identifier",
            ));
        }
        Some(i) => (&inner[..i], Some(&inner[i..])),
        None => (inner, None),
    };

    let addr = ip::parse_v6(addr.as_bytes()).ok_or_else(|| {
        Error::with_detail(
            ErrorKind::InvalidHostAddress,
            format!("a square-bracketed host must be a valid IPv6 address: {inner:?}"),
        )
    })?;

    if let Some(zone) = zone {
        validate_zone_id(zone)?;
    }
    Ok(HostKind::Ipv6(addr))
}

/// Validates an RFC 6874 zone identifier, `zone` starting at the `%` of
/// the escaped separator. The separator must be spelled `%25` and must be
/// followed by at least one zone byte.
fn validate_zone_id(zone: &str) -> Result<(), Error> {
    if zone.len() < 4 || !zone.starts_with("%25") {
        return Err(Error::with_detail(
            ErrorKind::InvalidHostAddress,
            format!("the zone identifier of an IPv6 literal must be separated with \"%25\": {zone:?}"),
        ));
    }
    validate_component(&zone[3..], ZONE_ID)
        .map_err(|e| Error::wrap(ErrorKind::InvalidHostAddress, e))
}

/// `IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )`,
/// with `rest` starting after the `v`. No percent-encoding is allowed.
fn validate_ipv_future(rest: &str) -> Result<(), Error> {
    let Some(dot) = rest.find('.') else {
        return Err(Error::with_detail(
            ErrorKind::InvalidHostAddress,
            "expected a '.' after the hexadecimal version tag of a future IP literal",
        ));
    };
    let (version, body) = (&rest[..dot], &rest[dot + 1..]);

    if version.is_empty() || !version.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::with_detail(
            ErrorKind::InvalidHostAddress,
            "expected a hexadecimal version tag in a future IP literal",
        ));
    }
    if body.is_empty() {
        return Err(Error::with_detail(
            ErrorKind::InvalidHostAddress,
            "expected a non-empty address after the version tag of a future IP literal",
        ));
    }
    for &b in body.as_bytes() {
        if !b.is_ascii() || !IPV_FUTURE.allows_ascii(b) {
            return Err(Error::with_detail(
                ErrorKind::InvalidHostAddress,
                format!("unexpected character in a future IP literal: {:?}", b as char),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_classification() {
        assert_eq!(
            validate_host("127.0.0.1", false, Some("http")).unwrap(),
            HostKind::Ipv4(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(
            validate_host("example.com", false, Some("http")).unwrap(),
            HostKind::Dns
        );
        assert_eq!(
            validate_host("example.com", false, Some("foo")).unwrap(),
            HostKind::Registered
        );
        assert_eq!(validate_host("", false, Some("http")).unwrap(), HostKind::None);

        // a near-miss IPv4 literal falls back to the name validators
        assert_eq!(
            validate_host("127.0.0.301", false, Some("foo")).unwrap(),
            HostKind::Registered
        );
        assert!(validate_host("127.0.0.301", false, Some("http"))
            .unwrap_err()
            .is(ErrorKind::InvalidDnsName));
    }

    #[test]
    fn ip_literals() {
        assert!(matches!(
            validate_host("fe80::1", true, None).unwrap(),
            HostKind::Ipv6(_)
        ));
        assert!(matches!(
            validate_host("fe80::1%25en0", true, None).unwrap(),
            HostKind::Ipv6(_)
        ));
        assert_eq!(
            validate_host("v6.fe80::a_en1", true, None).unwrap(),
            HostKind::IpvFuture
        );

        // IPv4 literals may not appear in brackets
        assert!(validate_host("192.169.224.1", true, None)
            .unwrap_err()
            .is(ErrorKind::InvalidHostAddress));
        // zone without the %25 escape
        assert!(validate_host("fe80::1%en0", true, None).is_err());
        // empty zone
        assert!(validate_host("fe80::1%25", true, None).is_err());
    }

    #[test]
    fn future_ip_literals() {
        assert!(validate_ipv_future("6.fe80::a_en1").is_ok());
        assert!(validate_ipv_future("FFF.fe80::a_en1").is_ok());
        assert!(validate_ipv_future("Z.fe80::a_en1").is_err());
        assert!(validate_ipv_future("").is_err());
        assert!(validate_ipv_future("B.").is_err());
        assert!(validate_ipv_future("AF.{}").is_err());
        assert!(validate_ipv_future("AF.%20").is_err());
    }
}
