//! DNS host name validation as per RFC 1034.
//!
//! ```text
//! <domain>      ::= <subdomain> | " "
//! <subdomain>   ::= <label> | <subdomain> "." <label>
//! <label>       ::= <letter> [ [ <ldh-str> ] <let-dig> ]
//! <ldh-str>     ::= <let-dig-hyp> | <let-dig-hyp> <ldh-str>
//! <let-dig-hyp> ::= <let-dig> | "-"
//! <let-dig>     ::= <letter> | <digit>
//! ```
//!
//! The walk is escape-transparent: a percent-encoded `.` (`%2E`) separates
//! labels just like an unencoded dot, and escaped letters and digits count
//! as such. Sizes are measured in raw bytes, so differently escaped
//! spellings of one name may not be equally valid.

use crate::encoding::decode_escape;
use crate::error::{Error, ErrorKind};

const MAX_NAME_LENGTH: usize = 255;
const MAX_LABEL_LENGTH: usize = 63;

pub(crate) fn validate_dns_name(host: &str) -> Result<(), Error> {
    if host.len() > MAX_NAME_LENGTH {
        return Err(Error::with_detail(
            ErrorKind::InvalidDnsName,
            "a DNS name is limited to 255 bytes",
        ));
    }
    if host.is_empty() {
        return Err(empty_label(host));
    }

    let mut offset = 0;
    while offset < host.len() {
        offset = validate_label(host, offset)?;
    }
    Ok(())
}

/// Validates the label starting at `start` and returns the offset just
/// past its separator (or the end of the name).
fn validate_label(host: &str, start: usize) -> Result<usize, Error> {
    let (first, mut offset) = next_scalar(host, start)?;
    if first == '.' {
        return Err(empty_label(host));
    }
    if !first.is_alphabetic() {
        return Err(Error::with_detail(
            ErrorKind::InvalidDnsName,
            format!("a DNS label must begin with a letter: got {first:?} in {host:?}"),
        ));
    }

    let mut last = first;
    while offset < host.len() {
        let (c, next) = next_scalar(host, offset)?;
        offset = next;

        if c == '.' {
            if offset >= host.len() {
                // trailing separator
                return Err(empty_label(host));
            }
            if !last.is_alphanumeric() {
                return Err(bad_label_end(host, last));
            }
            return Ok(offset);
        }
        if offset - start > MAX_LABEL_LENGTH {
            return Err(Error::with_detail(
                ErrorKind::InvalidDnsName,
                "a DNS label is limited to 63 bytes",
            ));
        }
        if !c.is_alphanumeric() && c != '-' {
            return Err(Error::with_detail(
                ErrorKind::InvalidDnsName,
                format!("a DNS label may only contain letters, digits or '-': got {c:?} in {host:?}"),
            ));
        }
        last = c;
    }

    if !last.is_alphanumeric() {
        return Err(bad_label_end(host, last));
    }
    Ok(offset)
}

/// Reads the scalar at `i`, decoding a percent-escape when one starts
/// there. Returns the scalar and the offset just past it.
fn next_scalar(host: &str, i: usize) -> Result<(char, usize), Error> {
    let bytes = host.as_bytes();
    if bytes[i] == b'%' {
        match decode_escape(&bytes[i + 1..]) {
            Ok((c, consumed)) => Ok((c, i + 1 + consumed)),
            Err(e) => Err(Error::wrap(ErrorKind::InvalidDnsName, e)),
        }
    } else {
        let c = host[i..].chars().next().unwrap();
        Ok((c, i + c.len_utf8()))
    }
}

fn empty_label(host: &str) -> Error {
    Error::with_detail(
        ErrorKind::InvalidDnsName,
        format!("a DNS name cannot contain an empty label: {host:?}"),
    )
}

fn bad_label_end(host: &str, last: char) -> Error {
    Error::with_detail(
        ErrorKind::InvalidDnsName,
        format!("a DNS label must end with a letter or a digit: {host:?} ends with {last:?}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_names() {
        for host in [
            "a.b.c",
            "a",
            "a.b1b",
            "a.b2",
            "a.b.c.d",
            "a-b.c-d",
            "www.詹姆斯.org",
            "www.詹-姆斯.org",
            "a%2Eb%2ec.d",
            "a.b.c.d%30",
            "a.b.c.%55",
        ] {
            assert!(
                validate_dns_name(host).is_ok(),
                "expected {host:?} to validate"
            );
        }

        let max_label = format!("a.{}.c", "b".repeat(63));
        assert!(validate_dns_name(&max_label).is_ok());
    }

    #[test]
    fn rejects_malformed_names() {
        for host in [
            "a.b.c|",
            "a.b.c-",
            "a-",
            "a.",
            "a.b.",
            "a.1b",
            "a.2",
            "a.b.c..",
            ".",
            "",
            ".a.b.c",
            "a_b.c",
            "a.b.c.d%2b",
            "a.b.c.%30d",
            "a.b.c.%",
            "a.b.c.%X",
            "%",
            "%X",
        ] {
            assert!(
                validate_dns_name(host).is_err(),
                "expected {host:?} not to validate"
            );
        }

        let oversized_label = format!("a.{}.c", "b".repeat(64));
        assert!(validate_dns_name(&oversized_label).is_err());
        let oversized_name = "x".repeat(256);
        assert!(validate_dns_name(&oversized_name).is_err());
    }

    #[test]
    fn escape_errors_carry_the_cause() {
        let err = validate_dns_name("a.b.%zz").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDnsName);
        assert!(err.is(ErrorKind::InvalidEscaping));
    }
}
