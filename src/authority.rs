//! The authority view of a parsed URI.

use std::fmt;
use std::net::IpAddr;

use crate::error::Error;
use crate::host::HostKind;
use crate::parser;
use crate::uri::Meta;

/// The authority information of a [`Uri`], as specified by RFC 3986,
/// together with the path of the hier-part.
///
/// This is a borrowed view over the URI text. It exists for every URI;
/// for a URI without a `//` part, the subcomponents are empty and
/// [`path`] carries the whole hier-part (so `mailto:user@domain.com` has
/// the path `user@domain.com`).
///
/// [`Uri`]: crate::Uri
/// [`path`]: Self::path
#[derive(Clone, Copy, Debug)]
pub struct Authority<'a> {
    text: &'a str,
    meta: &'a Meta,
}

impl<'a> Authority<'a> {
    pub(crate) fn new(text: &'a str, meta: &'a Meta) -> Authority<'a> {
        Authority { text, meta }
    }

    /// Returns the full hier-part: the `//` prefix when present, the
    /// userinfo, host, port and path.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let uri = Uri::parse("ftp://user@ftp.is.co.za:21/rfc/rfc1808.txt")?;
    /// assert_eq!(uri.authority().as_str(), "//user@ftp.is.co.za:21/rfc/rfc1808.txt");
    /// # Ok::<_, strict_uri::Error>(())
    /// ```
    #[inline]
    pub fn as_str(&self) -> &'a str {
        let start = self.meta.scheme_end.map_or(0, |end| end + 1);
        &self.text[start..self.meta.path.1]
    }

    /// Returns the userinfo subcomponent, or `None` when no `@` is
    /// present.
    #[inline]
    pub fn user_info(&self) -> Option<&'a str> {
        let auth = self.meta.auth.as_ref()?;
        auth.userinfo_end.map(|at| &self.text[auth.start..at])
    }

    /// Returns the host subcomponent. For bracketed IP literals this is
    /// the text between the brackets, zone identifier included.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let uri = Uri::parse("http://[fe80::1%25en0]:8080/")?;
    /// assert_eq!(uri.authority().host(), "fe80::1%25en0");
    /// # Ok::<_, strict_uri::Error>(())
    /// ```
    #[inline]
    pub fn host(&self) -> &'a str {
        match &self.meta.auth {
            Some(auth) => &self.text[auth.host.0..auth.host.1],
            None => "",
        }
    }

    /// Returns the classification assigned by the host validator.
    #[inline]
    pub fn host_kind(&self) -> HostKind {
        self.meta
            .auth
            .as_ref()
            .map_or(HostKind::None, |auth| auth.kind)
    }

    /// Returns the port subcomponent, or `None` when no `:` follows the
    /// host. A trailing `:` yields `Some("")`.
    #[inline]
    pub fn port(&self) -> Option<&'a str> {
        let auth = self.meta.auth.as_ref()?;
        auth.port_start.map(|start| &self.text[start..self.meta.path.0])
    }

    /// Returns the path of the hier-part.
    #[inline]
    pub fn path(&self) -> &'a str {
        &self.text[self.meta.path.0..self.meta.path.1]
    }

    /// Returns `true` when the host is an IPv4 or IPv6 address (but not
    /// an `IPvFuture` literal).
    #[inline]
    pub fn is_ip(&self) -> bool {
        self.host_kind().is_ip()
    }

    /// Returns the parsed host address for IPv4 and IPv6 hosts.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::net::{IpAddr, Ipv4Addr};
    /// use strict_uri::Uri;
    ///
    /// let uri = Uri::parse("telnet://192.0.2.16:80/")?;
    /// assert_eq!(
    ///     uri.authority().ip_addr(),
    ///     Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 16)))
    /// );
    ///
    /// let uri = Uri::parse("https://example.com/")?;
    /// assert_eq!(uri.authority().ip_addr(), None);
    /// # Ok::<_, strict_uri::Error>(())
    /// ```
    #[inline]
    pub fn ip_addr(&self) -> Option<IpAddr> {
        self.host_kind().ip_addr()
    }

    /// Re-validates the path and the authority subcomponents, using
    /// `scheme` to route the host between DNS-name and registered-name
    /// validation.
    pub fn validate(&self, scheme: Option<&str>) -> Result<(), Error> {
        parser::validate_hier(self.text, self.meta, scheme).map(|_| ())
    }
}

impl fmt::Display for Authority<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
