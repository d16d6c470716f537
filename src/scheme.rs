//! Scheme classification: which schemes carry DNS host names, and the
//! default port registered for a scheme.
//!
//! Both lookups key on the lowercased scheme and consult a process-wide
//! table that may be replaced once, before the first parse. Replacement
//! goes through a [`OnceLock`], so a table installed after first use is
//! rejected instead of racing concurrent parses.
//!
//! Reference: <https://www.iana.org/assignments/uri-schemes/uri-schemes.xhtml>

use std::sync::OnceLock;

static DNS_HOST_VALIDATION: OnceLock<fn(&str) -> bool> = OnceLock::new();
static DEFAULT_PORTS: OnceLock<fn(&str) -> Option<u16>> = OnceLock::new();

/// Tells whether hosts for this scheme are validated as DNS names
/// (RFC 1034) rather than as RFC 3986 registered names.
///
/// The scheme is lowercased before the lookup.
///
/// ```
/// use strict_uri::uses_dns_host_validation;
///
/// assert!(uses_dns_host_validation("https"));
/// assert!(uses_dns_host_validation("SSH"));
/// assert!(!uses_dns_host_validation("urn"));
/// ```
pub fn uses_dns_host_validation(scheme: &str) -> bool {
    let f = DNS_HOST_VALIDATION
        .get()
        .copied()
        .unwrap_or(builtin_uses_dns_host_validation);
    if scheme.bytes().any(|b| b.is_ascii_uppercase()) {
        f(&scheme.to_ascii_lowercase())
    } else {
        f(scheme)
    }
}

/// Replaces the DNS-host-validation predicate for the whole process.
///
/// Must be called before the first parse; the predicate receives
/// lowercased schemes. Returns `false` if a predicate was already
/// installed, in which case the existing one is kept.
pub fn set_uses_dns_host_validation(f: fn(&str) -> bool) -> bool {
    DNS_HOST_VALIDATION.set(f).is_ok()
}

/// Returns the default port registered for a scheme, or `None` when no
/// default is known.
///
/// The scheme is lowercased before the lookup.
///
/// ```
/// use strict_uri::default_port_for_scheme;
///
/// assert_eq!(default_port_for_scheme("https"), Some(443));
/// assert_eq!(default_port_for_scheme("Postgresql"), Some(5432));
/// assert_eq!(default_port_for_scheme("example"), None);
/// ```
pub fn default_port_for_scheme(scheme: &str) -> Option<u16> {
    let f = DEFAULT_PORTS.get().copied().unwrap_or(builtin_default_port);
    if scheme.bytes().any(|b| b.is_ascii_uppercase()) {
        f(&scheme.to_ascii_lowercase())
    } else {
        f(scheme)
    }
}

/// Replaces the default-port lookup for the whole process.
///
/// Must be called before the first parse; the lookup receives lowercased
/// schemes. Returns `false` if a lookup was already installed, in which
/// case the existing one is kept.
pub fn set_default_port_for_scheme(f: fn(&str) -> Option<u16>) -> bool {
    DEFAULT_PORTS.set(f).is_ok()
}

fn builtin_uses_dns_host_validation(scheme: &str) -> bool {
    matches!(
        scheme,
        "dns" | "dntp"
            | "finger"
            | "ftp"
            | "git"
            | "http"
            | "https"
            | "imap"
            | "irc"
            | "jms"
            | "mailto"
            | "nfs"
            | "nntp"
            | "ntp"
            | "postgres"
            | "postgresql"
            | "redis"
            | "rmi"
            | "rtsp"
            | "rsync"
            | "sftp"
            | "skype"
            | "smtp"
            | "snmp"
            | "soap"
            | "ssh"
            | "steam"
            | "svn"
            | "tcp"
            | "telnet"
            | "udp"
            | "vnc"
            | "wais"
            | "ws"
            | "wss"
    )
}

fn builtin_default_port(scheme: &str) -> Option<u16> {
    let port = match scheme {
        "aaa" => 3868,
        "aaas" => 5658,
        "acap" => 674,
        "cap" => 1026,
        "coap" | "coap+tcp" => 5683,
        "coaps" => 5684,
        "coap+ws" => 80,
        "coaps+ws" => 443,
        "dict" => 2628,
        "dns" => 53,
        "finger" => 79,
        "ftp" => 21,
        "git" => 9418,
        "go" => 1096,
        "gopher" => 70,
        "http" => 80,
        "https" => 443,
        "iax" => 4569,
        "icap" => 1344,
        "imap" => 143,
        "ipp" | "ipps" => 631,
        "irc" => 194,
        "ldap" => 389,
        "mailto" => 25,
        "nfs" => 2049,
        "nntp" => 119,
        "ntp" => 123,
        "postgresql" => 5432,
        "radius" => 1812,
        "redis" => 6379,
        "rmi" => 1098,
        "rtsp" => 554,
        "rsync" => 873,
        "sftp" => 22,
        "skype" => 23399,
        "smtp" => 25,
        "snmp" => 161,
        "ssh" => 22,
        "steam" => 7777,
        "svn" => 3690,
        "telnet" => 23,
        "vnc" => 5500,
        "wss" => 6602,
        _ => return None,
    };
    Some(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dns_scheme_set() {
        for scheme in [
            "dns", "dntp", "finger", "ftp", "git", "http", "https", "imap", "irc", "jms",
            "mailto", "nfs", "nntp", "ntp", "postgres", "postgresql", "redis", "rmi", "rtsp",
            "rsync", "sftp", "skype", "smtp", "snmp", "soap", "ssh", "steam", "svn", "tcp",
            "telnet", "udp", "vnc", "wais", "ws", "wss",
        ] {
            assert!(
                uses_dns_host_validation(scheme),
                "expected scheme {scheme:?} to use DNS host names"
            );
        }

        assert!(!uses_dns_host_validation("phone"));
        assert!(!uses_dns_host_validation("file"));
        assert!(!uses_dns_host_validation("urn"));
    }

    #[test]
    fn known_ports() {
        assert_eq!(default_port_for_scheme("http"), Some(80));
        assert_eq!(default_port_for_scheme("ftp"), Some(21));
        assert_eq!(default_port_for_scheme("ssh"), Some(22));
        assert_eq!(default_port_for_scheme("telnet"), Some(23));
        assert_eq!(default_port_for_scheme("redis"), Some(6379));
        // deliberately unregistered
        assert_eq!(default_port_for_scheme("mysql"), None);
    }
}
