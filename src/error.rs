//! Error types.

use std::borrow::Cow;
use std::fmt;

/// The category of a [`Error`].
///
/// Each validator reports exactly one kind; outer layers may wrap an inner
/// error, in which case the full chain is reachable through
/// [`std::error::Error::source`] and searchable with [`Error::is`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No scheme found in a URI where one is required.
    NoScheme,
    /// The input does not have the shape of a URI.
    InvalidUri,
    /// A character is not allowed where it appeared.
    InvalidCharacter,
    /// Invalid scheme component.
    InvalidScheme,
    /// Invalid query component.
    InvalidQuery,
    /// Invalid fragment component.
    InvalidFragment,
    /// Invalid path component.
    InvalidPath,
    /// Invalid host subcomponent.
    InvalidHost,
    /// Invalid host as a registered name.
    InvalidRegisteredName,
    /// Invalid host as a DNS name.
    InvalidDnsName,
    /// Invalid host as an IP address literal.
    InvalidHostAddress,
    /// Invalid port subcomponent.
    InvalidPort,
    /// Invalid userinfo subcomponent.
    InvalidUserInfo,
    /// A port was given without a host.
    MissingHost,
    /// Invalid percent-escaping sequence.
    InvalidEscaping,
}

impl ErrorKind {
    /// Returns a short description of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NoScheme => "no scheme found in URI",
            ErrorKind::InvalidUri => "not a valid URI",
            ErrorKind::InvalidCharacter => "invalid character in URI",
            ErrorKind::InvalidScheme => "invalid scheme in URI",
            ErrorKind::InvalidQuery => "invalid query string in URI",
            ErrorKind::InvalidFragment => "invalid fragment in URI",
            ErrorKind::InvalidPath => "invalid path in URI",
            ErrorKind::InvalidHost => "invalid host in URI",
            ErrorKind::InvalidRegisteredName => "invalid host (registered name)",
            ErrorKind::InvalidDnsName => "invalid host (DNS name)",
            ErrorKind::InvalidHostAddress => "invalid address for host",
            ErrorKind::InvalidPort => "invalid port in URI",
            ErrorKind::InvalidUserInfo => "invalid userinfo in URI",
            ErrorKind::MissingHost => "missing host in URI",
            ErrorKind::InvalidEscaping => "invalid percent-escaping sequence",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error produced when parsing, validating or building a URI.
///
/// An error carries a stable [`kind`], an optional detail message and an
/// optional wrapped cause. The cause chain is diagnostic only; callers
/// branch on kinds:
///
/// ```
/// use strict_uri::{ErrorKind, Uri};
///
/// let err = Uri::parse("https://www.exa mple.org").unwrap_err();
/// assert!(err.is(ErrorKind::InvalidHost));
/// assert!(err.is(ErrorKind::InvalidDnsName));
/// assert!(!err.is(ErrorKind::InvalidPort));
/// ```
///
/// [`kind`]: Error::kind
#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    detail: Option<Cow<'static, str>>,
    source: Option<Box<Error>>,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error {
            kind,
            detail: None,
            source: None,
        }
    }

    pub(crate) fn with_detail(kind: ErrorKind, detail: impl Into<Cow<'static, str>>) -> Error {
        Error {
            kind,
            detail: Some(detail.into()),
            source: None,
        }
    }

    pub(crate) fn wrap(kind: ErrorKind, cause: Error) -> Error {
        Error {
            kind,
            detail: None,
            source: Some(Box::new(cause)),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Checks whether this error or any error in its cause chain is of the
    /// given kind.
    pub fn is(&self, kind: ErrorKind) -> bool {
        let mut cur = Some(self);
        while let Some(err) = cur {
            if err.kind == kind {
                return true;
            }
            cur = err.source.as_deref();
        }
        false
    }

    /// Returns the detail message attached to this error, if any.
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref().map(|e| e as _)
    }
}
