//! The parsed URI value.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::authority::Authority;
use crate::builder::Builder;
use crate::error::Error;
use crate::host::HostKind;
use crate::parser;
use crate::query::QueryParams;
use crate::scheme::default_port_for_scheme;

/// Byte bounds of the components inside the URI text.
#[derive(Clone, Debug)]
pub(crate) struct Meta {
    /// Length of the scheme; the `:` sits at this index.
    pub(crate) scheme_end: Option<usize>,
    pub(crate) auth: Option<AuthMeta>,
    pub(crate) path: (usize, usize),
    /// Index just past the `?`.
    pub(crate) query_start: Option<usize>,
    /// Index just past the `#`.
    pub(crate) fragment_start: Option<usize>,
}

#[derive(Clone, Debug)]
pub(crate) struct AuthMeta {
    /// Index just past the `//` prefix.
    pub(crate) start: usize,
    /// Index of the `@` closing the userinfo.
    pub(crate) userinfo_end: Option<usize>,
    /// Host bounds, brackets excluded for IP literals.
    pub(crate) host: (usize, usize),
    pub(crate) bracketed: bool,
    /// Index just past the `:` opening the port.
    pub(crate) port_start: Option<usize>,
    pub(crate) kind: HostKind,
}

/// A URI (or URI reference) as defined in [RFC 3986], with the zone
/// identifiers of [RFC 6874].
///
/// The value owns the exact text it was parsed from and an index table
/// over it; accessors borrow from that text and [`as_str`] returns it
/// byte for byte, so a parsed URI always serializes back to its input.
///
/// [RFC 3986]: https://datatracker.ietf.org/doc/html/rfc3986/
/// [RFC 6874]: https://datatracker.ietf.org/doc/html/rfc6874/
/// [`as_str`]: Self::as_str
///
/// # Examples
///
/// ```
/// use strict_uri::Uri;
///
/// let uri = Uri::parse("foo://example.com:8042/over/there?name=ferret#nose")?;
/// assert_eq!(uri.scheme(), Some("foo"));
/// let auth = uri.authority();
/// assert_eq!(auth.host(), "example.com");
/// assert_eq!(auth.port(), Some("8042"));
/// assert_eq!(auth.path(), "/over/there");
/// assert_eq!(uri.query(), Some("name=ferret"));
/// assert_eq!(uri.fragment(), Some("nose"));
/// assert_eq!(uri.to_string(), "foo://example.com:8042/over/there?name=ferret#nose");
/// # Ok::<_, strict_uri::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Uri {
    text: String,
    meta: Meta,
}

impl Uri {
    /// Parses a URI. The scheme is mandatory; use [`parse_reference`] for
    /// relative references.
    ///
    /// The input is validated strictly and is rejected, never repaired:
    /// every component must match its RFC 3986 grammar and every
    /// percent-escape must decode to a valid Unicode scalar.
    ///
    /// [`parse_reference`]: Self::parse_reference
    ///
    /// # Errors
    ///
    /// Returns the first defect found, identified by [`ErrorKind`].
    ///
    /// [`ErrorKind`]: crate::ErrorKind
    #[inline]
    pub fn parse(s: &str) -> Result<Uri, Error> {
        parser::parse(s, false)
    }

    /// Parses a URI reference: a URI, or a relative reference without a
    /// scheme, such as `//host/path`, `dir/file.txt` or the empty string.
    ///
    /// An input starting with `//` is taken as a scheme-less authority
    /// form even when a `:` occurs later.
    ///
    /// # Errors
    ///
    /// Returns the first defect found, identified by [`ErrorKind`].
    ///
    /// [`ErrorKind`]: crate::ErrorKind
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// assert!(Uri::parse("//host.domain.com/a/b").is_err());
    /// let r = Uri::parse_reference("//host.domain.com/a/b")?;
    /// assert_eq!(r.scheme(), None);
    /// assert_eq!(r.authority().host(), "host.domain.com");
    /// assert_eq!(r.authority().path(), "/a/b");
    /// # Ok::<_, strict_uri::Error>(())
    /// ```
    #[inline]
    pub fn parse_reference(s: &str) -> Result<Uri, Error> {
        parser::parse(s, true)
    }

    pub(crate) fn from_parts(text: String, meta: Meta) -> Uri {
        Uri { text, meta }
    }

    /// Returns the scheme, or `None` for a scheme-less reference.
    ///
    /// The scheme is returned in its raw spelling; no case folding is
    /// performed.
    #[inline]
    pub fn scheme(&self) -> Option<&str> {
        self.meta.scheme_end.map(|end| &self.text[..end])
    }

    /// Returns the authority view, which also carries the path.
    ///
    /// The view is empty (and its host kind is [`HostKind::None`]) when
    /// the URI has no `//` part.
    #[inline]
    pub fn authority(&self) -> Authority<'_> {
        Authority::new(&self.text, &self.meta)
    }

    /// Returns the path component.
    #[inline]
    pub fn path(&self) -> &str {
        &self.text[self.meta.path.0..self.meta.path.1]
    }

    /// Returns the raw query, without the `?`.
    ///
    /// A trailing `?` yields `Some("")`, distinguished from `None` when
    /// no `?` is present.
    #[inline]
    pub fn query(&self) -> Option<&str> {
        self.meta
            .query_start
            .map(|start| &self.text[start..self.query_end()])
    }

    /// Decodes the query into key/multi-value pairs following the
    /// `application/x-www-form-urlencoded` rules.
    ///
    /// This decoding is a convention on top of RFC 3986; the raw slice
    /// stays available through [`query`].
    ///
    /// [`query`]: Self::query
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let uri = Uri::parse("http://example.com/?id=5&part=three&part=four")?;
    /// let params = uri.query_params();
    /// assert_eq!(params.get("id"), Some("5"));
    /// assert_eq!(params.get_all("part").collect::<Vec<_>>(), ["three", "four"]);
    /// # Ok::<_, strict_uri::Error>(())
    /// ```
    pub fn query_params(&self) -> QueryParams {
        QueryParams::parse(self.query().unwrap_or(""))
    }

    /// Returns the fragment, without the `#`.
    ///
    /// A trailing `#` yields `Some("")`.
    #[inline]
    pub fn fragment(&self) -> Option<&str> {
        self.meta.fragment_start.map(|start| &self.text[start..])
    }

    /// Returns the exact text this URI was parsed from.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the URI and returns its text.
    #[inline]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Re-runs validation over every component.
    ///
    /// Always succeeds for a value produced by [`parse`],
    /// [`parse_reference`] or [`Builder::build`].
    ///
    /// [`parse`]: Self::parse
    /// [`parse_reference`]: Self::parse_reference
    /// [`Builder::build`]: crate::Builder::build
    pub fn validate(&self) -> Result<(), Error> {
        let mut meta = self.meta.clone();
        parser::validate(&self.text, &mut meta)
    }

    /// Returns a builder primed with this URI's components.
    ///
    /// The builder is an independent value; mutating it never affects
    /// this URI.
    pub fn to_builder(&self) -> Builder {
        Builder::from_uri(self)
    }

    /// Tells whether the port is the default one for the scheme: true
    /// when no port is given, or when the scheme has a known default
    /// equal to the port.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// assert!(Uri::parse("http://host:80")?.is_default_port());
    /// assert!(Uri::parse("http://host")?.is_default_port());
    /// assert!(!Uri::parse("http://host:8080")?.is_default_port());
    /// # Ok::<_, strict_uri::Error>(())
    /// ```
    pub fn is_default_port(&self) -> bool {
        let port = self.authority().port().unwrap_or("");
        if port.is_empty() {
            return true;
        }
        match (self.default_port(), port.parse::<u64>()) {
            (Some(default), Ok(port)) => u64::from(default) == port,
            _ => false,
        }
    }

    /// Returns the default port registered for this URI's scheme, if any.
    pub fn default_port(&self) -> Option<u16> {
        default_port_for_scheme(self.scheme().unwrap_or(""))
    }

    pub(crate) fn meta(&self) -> &Meta {
        &self.meta
    }

    fn query_end(&self) -> usize {
        self.meta.fragment_start.map_or(self.text.len(), |f| f - 1)
    }
}

impl fmt::Display for Uri {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for Uri {
    #[inline]
    fn eq(&self, other: &Uri) -> bool {
        self.text == other.text
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl FromStr for Uri {
    type Err = Error;

    /// Strictly parses a URI; equivalent to [`Uri::parse`].
    #[inline]
    fn from_str(s: &str) -> Result<Uri, Error> {
        Uri::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = Error;

    /// Parses a URI reference; equivalent to [`Uri::parse_reference`].
    #[inline]
    fn try_from(s: &str) -> Result<Uri, Error> {
        Uri::parse_reference(s)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Uri;
    use serde::de::{self, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for Uri {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    struct UriVisitor;

    impl Visitor<'_> for UriVisitor {
        type Value = Uri;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a URI reference string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Uri, E> {
            Uri::parse_reference(v).map_err(de::Error::custom)
        }
    }

    impl<'de> Deserialize<'de> for Uri {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Uri, D::Error> {
            deserializer.deserialize_str(UriVisitor)
        }
    }
}
