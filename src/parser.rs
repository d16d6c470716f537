//! Structural parsing.
//!
//! The input is split into scheme / hier-part / query / fragment by the
//! positions of the first `:`, `?` and `#`, then the hier-part is
//! decomposed into the authority subcomponents and the path. The split
//! records byte bounds only; component validation runs as a second step
//! over the recorded slices and classifies the host.

use crate::encoding::table::{QUERY_FRAGMENT, SCHEME, SEGMENT, USERINFO};
use crate::encoding::validate_component;
use crate::error::{Error, ErrorKind};
use crate::host::{validate_host, HostKind};
use crate::uri::{AuthMeta, Meta, Uri};

pub(crate) fn parse(raw: &str, reference: bool) -> Result<Uri, Error> {
    let mut meta = split(raw, reference)?;
    validate(raw, &mut meta)?;
    Ok(Uri::from_parts(raw.to_owned(), meta))
}

/// Splits `raw` at its separators, applying the structural rules only.
fn split(raw: &str, reference: bool) -> Result<Meta, Error> {
    let len = raw.len();
    let colon = raw.find(':');
    let question = raw.find('?');
    let hash = raw.find('#');

    // pathological inputs reject eagerly
    if colon == Some(0) || question == Some(0) || hash == Some(0) {
        return Err(Error::new(ErrorKind::InvalidUri));
    }
    if colon == Some(1) {
        return Err(Error::with_detail(
            ErrorKind::InvalidScheme,
            "the scheme has a minimum length of 2 characters",
        ));
    }
    if question == Some(1) || hash == Some(1) {
        return Err(Error::new(ErrorKind::InvalidUri));
    }
    // a separator inside the scheme
    if let (Some(c), Some(q)) = (colon, question) {
        if q < c {
            return Err(Error::with_detail(
                ErrorKind::InvalidUri,
                "a '?' separator appears before the scheme delimiter",
            ));
        }
    }
    if let (Some(c), Some(h)) = (colon, hash) {
        if h < c {
            return Err(Error::with_detail(
                ErrorKind::InvalidUri,
                "a '#' separator appears before the scheme delimiter",
            ));
        }
    }
    // when '#' comes first, the '?' belongs to the fragment
    let question = match (question, hash) {
        (Some(q), Some(h)) if h < q => None,
        _ => question,
    };

    // a leading "//" makes a scheme-less reference, even with a later ':'
    let relative = raw.starts_with("//");
    let scheme_end = match colon {
        Some(c) if !relative => Some(c),
        _ => None,
    };
    if scheme_end.is_none() && !reference {
        return Err(Error::with_detail(
            ErrorKind::NoScheme,
            "a URI requires a scheme; only URI references may omit it",
        ));
    }

    let hier_start = scheme_end.map_or(0, |c| c + 1);
    let hier_end = question.map_or_else(|| hash.map_or(len, |h| h), |q| q);

    let mut meta = Meta {
        scheme_end,
        auth: None,
        path: (hier_start, hier_end),
        query_start: question.map(|q| q + 1),
        fragment_start: hash.map(|h| h + 1),
    };

    if raw[hier_start..hier_end].starts_with("//") {
        let auth_start = hier_start + 2;
        let rest = &raw[auth_start..hier_end];
        let chunk_end = rest.find('/').map_or(hier_end, |i| auth_start + i);
        meta.path = (chunk_end, hier_end);

        let chunk = &raw[auth_start..chunk_end];
        let userinfo_end = match chunk.find('@') {
            Some(at) if at > 0 => Some(auth_start + at),
            _ => None,
        };
        let host_start = userinfo_end.map_or(auth_start, |at| at + 1);
        let hostport = &raw[host_start..chunk_end];

        let (host, bracketed, port_start) = if hostport.starts_with('[') {
            let close = hostport.find(']').ok_or_else(|| bad_literal("missing closing bracket in address literal"))?;
            if close == 1 {
                return Err(bad_literal("empty address literal"));
            }
            let after = &hostport[close + 1..];
            let port_start = if after.is_empty() {
                None
            } else if after.starts_with(':') {
                Some(host_start + close + 2)
            } else {
                return Err(bad_literal("an address literal may only be followed by a port"));
            };
            ((host_start + 1, host_start + close), true, port_start)
        } else {
            match hostport.find(':') {
                Some(i) => (
                    (host_start, host_start + i),
                    false,
                    Some(host_start + i + 1),
                ),
                None => ((host_start, chunk_end), false, None),
            }
        };

        meta.auth = Some(AuthMeta {
            start: auth_start,
            userinfo_end,
            host,
            bracketed,
            port_start,
            kind: HostKind::None,
        });
    }

    Ok(meta)
}

fn bad_literal(detail: &'static str) -> Error {
    Error::wrap(
        ErrorKind::InvalidUri,
        Error::with_detail(ErrorKind::InvalidHostAddress, detail),
    )
}

/// Validates every component recorded in `meta` and classifies the host.
pub(crate) fn validate(text: &str, meta: &mut Meta) -> Result<(), Error> {
    if let Some(end) = meta.scheme_end {
        validate_scheme(&text[..end])?;
    }

    let query_end = meta.fragment_start.map_or(text.len(), |f| f - 1);
    if let Some(start) = meta.query_start {
        let query = &text[start..query_end];
        if !query.is_empty() {
            validate_component(query, QUERY_FRAGMENT)
                .map_err(|e| Error::wrap(ErrorKind::InvalidQuery, e))?;
        }
    }
    if let Some(start) = meta.fragment_start {
        let fragment = &text[start..];
        if !fragment.is_empty() {
            validate_component(fragment, QUERY_FRAGMENT)
                .map_err(|e| Error::wrap(ErrorKind::InvalidFragment, e))?;
        }
    }

    let scheme = meta.scheme_end.map(|end| &text[..end]);
    let kind = validate_hier(text, meta, scheme)?;
    if let Some(auth) = meta.auth.as_mut() {
        auth.kind = kind;
    }
    Ok(())
}

/// Validates the hier-part (path and authority subcomponents) and returns
/// the host classification.
pub(crate) fn validate_hier(
    text: &str,
    meta: &Meta,
    scheme: Option<&str>,
) -> Result<HostKind, Error> {
    let path = &text[meta.path.0..meta.path.1];
    let (userinfo, host, bracketed, port) = match &meta.auth {
        Some(auth) => (
            auth.userinfo_end.map(|at| &text[auth.start..at]),
            &text[auth.host.0..auth.host.1],
            auth.bracketed,
            auth.port_start.map(|p| &text[p..meta.path.0]),
        ),
        None => (None, "", false, None),
    };

    validate_path(path, host, port)?;

    let kind = validate_host(host, bracketed, scheme)?;

    if let Some(port) = port {
        validate_port(port, host)?;
    }
    if let Some(userinfo) = userinfo {
        if !userinfo.is_empty() {
            validate_component(userinfo, USERINFO)
                .map_err(|e| Error::wrap(ErrorKind::InvalidUserInfo, e))?;
        }
    }
    Ok(kind)
}

/// `scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`, minimum two
/// characters, no percent-encoding.
fn validate_scheme(scheme: &str) -> Result<(), Error> {
    if scheme.len() < 2 {
        return Err(Error::with_detail(
            ErrorKind::InvalidScheme,
            "the scheme has a minimum length of 2 characters",
        ));
    }
    let bytes = scheme.as_bytes();
    if !bytes[0].is_ascii_alphabetic() {
        return Err(Error::with_detail(
            ErrorKind::InvalidScheme,
            "the scheme must start with an ASCII letter",
        ));
    }
    for &b in &bytes[1..] {
        if !b.is_ascii() || !SCHEME.allows_ascii(b) {
            return Err(Error::with_detail(
                ErrorKind::InvalidScheme,
                format!("unexpected character in scheme: {:?}", b as char),
            ));
        }
    }
    Ok(())
}

/// Path segments are `pchar` sequences. Without an authority host, the
/// path may not open with `//`.
fn validate_path(path: &str, host: &str, port: Option<&str>) -> Result<(), Error> {
    if host.is_empty() && port.unwrap_or("").is_empty() && path.starts_with("//") {
        return Err(Error::with_detail(
            ErrorKind::InvalidPath,
            "a URI without an authority cannot have a path beginning with \"//\"",
        ));
    }
    for segment in path.split('/') {
        if segment.is_empty() {
            continue;
        }
        validate_component(segment, SEGMENT).map_err(|e| Error::wrap(ErrorKind::InvalidPath, e))?;
    }
    Ok(())
}

/// `port = *DIGIT`; a port, even an empty one, requires a host.
fn validate_port(port: &str, host: &str) -> Result<(), Error> {
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::with_detail(
            ErrorKind::InvalidPort,
            "the port must be a sequence of decimal digits",
        ));
    }
    if host.is_empty() {
        return Err(Error::with_detail(
            ErrorKind::MissingHost,
            "whenever a port is specified, a host must be present",
        ));
    }
    Ok(())
}
