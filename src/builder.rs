//! A fluent builder for URIs.

use std::fmt;

use crate::error::{Error, ErrorKind};
use crate::uri::Uri;

/// Assembles a URI from its components.
///
/// The builder is the only supported mutation path: it is seeded either
/// empty ([`Builder::new`]) or from an existing URI
/// ([`Uri::to_builder`]), the setters overwrite single components, and
/// [`build`] serializes the parts and re-runs the full parser, so a
/// built URI upholds every parsing invariant.
///
/// Setting any of userinfo, host or port materializes the `//` authority
/// prefix in the output.
///
/// [`build`]: Self::build
///
/// # Examples
///
/// ```
/// use strict_uri::Uri;
///
/// let uri = Uri::parse("mailto://user@domain.com")?
///     .to_builder()
///     .scheme("http")
///     .userinfo("yolo")
///     .host("newdomain.com")
///     .port("443")
///     .build()?;
/// assert_eq!(uri.as_str(), "http://yolo@newdomain.com:443");
///
/// let uri = uri
///     .to_builder()
///     .path("/abcd")
///     .query("a=b&x=5")
///     .fragment("chapter")
///     .build()?;
/// assert_eq!(uri.as_str(), "http://yolo@newdomain.com:443/abcd?a=b&x=5#chapter");
/// # Ok::<_, strict_uri::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct Builder {
    scheme: String,
    has_authority: bool,
    userinfo: String,
    host: String,
    bracketed: bool,
    ip_literal: Option<bool>,
    port: String,
    path: String,
    query: String,
    fragment: String,
}

impl Builder {
    /// Creates an empty builder.
    pub fn new() -> Builder {
        Builder::default()
    }

    pub(crate) fn from_uri(uri: &Uri) -> Builder {
        let auth = uri.authority();
        Builder {
            scheme: uri.scheme().unwrap_or("").to_owned(),
            has_authority: uri.meta().auth.is_some(),
            userinfo: auth.user_info().unwrap_or("").to_owned(),
            host: auth.host().to_owned(),
            bracketed: uri
                .meta()
                .auth
                .as_ref()
                .is_some_and(|auth| auth.bracketed),
            ip_literal: None,
            port: auth.port().unwrap_or("").to_owned(),
            path: auth.path().to_owned(),
            query: uri.query().unwrap_or("").to_owned(),
            fragment: uri.fragment().unwrap_or("").to_owned(),
        }
    }

    /// Sets the scheme. An empty scheme makes the output a relative
    /// reference.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Builder {
        self.scheme = scheme.into();
        self
    }

    /// Sets the userinfo subcomponent.
    pub fn userinfo(mut self, userinfo: impl Into<String>) -> Builder {
        self.userinfo = userinfo.into();
        self.has_authority = true;
        self
    }

    /// Sets the host subcomponent.
    ///
    /// A host containing `:` is emitted in brackets, as IP literals
    /// require. A literal without a colon, such as an `IPvFuture` body
    /// of unreserved characters only, is indistinguishable from a name
    /// by its text; mark it with [`ip_literal`].
    ///
    /// [`ip_literal`]: Self::ip_literal
    pub fn host(mut self, host: impl Into<String>) -> Builder {
        self.host = host.into();
        self.bracketed = self.host.contains(':');
        self.has_authority = true;
        self
    }

    /// States whether the host is a bracketed IP literal, overriding
    /// the colon heuristic of [`host`].
    ///
    /// [`host`]: Self::host
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::{Builder, HostKind};
    ///
    /// let uri = Builder::new()
    ///     .scheme("http")
    ///     .host("v6.deadbeef")
    ///     .ip_literal(true)
    ///     .build()?;
    /// assert_eq!(uri.as_str(), "http://[v6.deadbeef]");
    /// assert_eq!(uri.authority().host_kind(), HostKind::IpvFuture);
    /// # Ok::<_, strict_uri::Error>(())
    /// ```
    pub fn ip_literal(mut self, ip_literal: bool) -> Builder {
        self.ip_literal = Some(ip_literal);
        self.has_authority = true;
        self
    }

    /// Sets the port subcomponent. An empty port elides the `:`.
    pub fn port(mut self, port: impl Into<String>) -> Builder {
        self.port = port.into();
        self.has_authority = true;
        self
    }

    /// Sets the path component.
    pub fn path(mut self, path: impl Into<String>) -> Builder {
        self.path = path.into();
        self
    }

    /// Sets the query component, without the leading `?`. An empty query
    /// elides the `?`.
    pub fn query(mut self, query: impl Into<String>) -> Builder {
        self.query = query.into();
        self
    }

    /// Sets the fragment component, without the leading `#`. An empty
    /// fragment elides the `#`.
    pub fn fragment(mut self, fragment: impl Into<String>) -> Builder {
        self.fragment = fragment.into();
        self
    }

    /// Serializes the components and re-runs the full validation,
    /// returning the built URI.
    ///
    /// # Errors
    ///
    /// Returns the first defect of the assembled text, exactly as
    /// [`Uri::parse`] (or [`Uri::parse_reference`] for a scheme-less
    /// builder) would report it.
    pub fn build(self) -> Result<Uri, Error> {
        if self.emits_authority() && !self.path.is_empty() && !self.path.starts_with('/') {
            return Err(Error::with_detail(
                ErrorKind::InvalidPath,
                "a URI with an authority requires an empty path or one beginning with '/'",
            ));
        }
        let text = self.assemble();
        if self.scheme.is_empty() {
            Uri::parse_reference(&text)
        } else {
            Uri::parse(&text)
        }
    }

    fn emits_authority(&self) -> bool {
        self.has_authority
            || !self.userinfo.is_empty()
            || !self.host.is_empty()
            || !self.port.is_empty()
    }

    fn assemble(&self) -> String {
        let mut out = String::new();
        if !self.scheme.is_empty() {
            out.push_str(&self.scheme);
            out.push(':');
        }
        if self.emits_authority() {
            out.push_str("//");
            if !self.userinfo.is_empty() {
                out.push_str(&self.userinfo);
                out.push('@');
            }
            if self.ip_literal.unwrap_or(self.bracketed) {
                out.push('[');
                out.push_str(&self.host);
                out.push(']');
            } else {
                out.push_str(&self.host);
            }
            if !self.port.is_empty() {
                out.push(':');
                out.push_str(&self.port);
            }
        }
        out.push_str(&self.path);
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }
        out
    }
}

impl fmt::Display for Builder {
    /// Writes the assembled text without validating it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.assemble())
    }
}
