//! Percent-encoding aware character validation.
//!
//! Percent-decoding and UTF-8 validation are fused: a `%HH` triplet whose
//! octet announces a multi-byte UTF-8 sequence pulls the continuation
//! triplets in the same pass, and the accumulated bytes must form exactly
//! one Unicode scalar. A malformed sequence is reported at the first
//! offending escape, never replaced.

pub(crate) mod table;

use crate::error::{Error, ErrorKind};
use table::Table;

pub(crate) fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn hex_octet(s: &[u8]) -> Result<u8, Error> {
    if s.len() < 2 {
        return Err(Error::with_detail(
            ErrorKind::InvalidEscaping,
            "expected two hex digits after '%'",
        ));
    }
    match (hex_value(s[0]), hex_value(s[1])) {
        (Some(hi), Some(lo)) => Ok(hi << 4 | lo),
        _ => Err(Error::with_detail(
            ErrorKind::InvalidEscaping,
            "malformed hex digit in percent-encoded octet",
        )),
    }
}

/// Decodes one percent-encoded scalar from `s`, which starts right after
/// a `%`. Returns the scalar and the number of source bytes consumed.
///
/// The lead octet decides how many continuation octets are read: one
/// `%HH` triplet for ASCII, two to four for multi-byte UTF-8 sequences.
pub(crate) fn decode_escape(s: &[u8]) -> Result<(char, usize), Error> {
    let mut buf = [0u8; 4];
    buf[0] = hex_octet(s)?;
    let mut offset = 2;

    let total = match buf[0] {
        0x00..=0xBF => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xFF => 4,
    };
    for slot in buf.iter_mut().take(total).skip(1) {
        if s.get(offset) != Some(&b'%') {
            return Err(Error::with_detail(
                ErrorKind::InvalidEscaping,
                "expected a '%' continuing a multi-byte escape sequence",
            ));
        }
        offset += 1;
        *slot = hex_octet(&s[offset..])?;
        offset += 2;
    }

    match std::str::from_utf8(&buf[..total]) {
        Ok(decoded) => match decoded.chars().next() {
            Some(c) => Ok((c, offset)),
            None => Err(Error::with_detail(
                ErrorKind::InvalidEscaping,
                "the escaped octets do not form a Unicode scalar",
            )),
        },
        Err(_) => Err(Error::with_detail(
            ErrorKind::InvalidEscaping,
            "the escaped octets do not form a Unicode scalar",
        )),
    }
}

/// Walks a component slice, checking every unencoded character against
/// `table` and every percent-escape through [`decode_escape`].
pub(crate) fn validate_component(s: &str, table: &Table) -> Result<(), Error> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' && table.allows_pct_encoded() {
            let (_, consumed) = decode_escape(&bytes[i + 1..])?;
            i += consumed + 1;
        } else if b.is_ascii() {
            if !table.allows_ascii(b) {
                return Err(Error::with_detail(
                    ErrorKind::InvalidCharacter,
                    format!("unexpected character {:?}", b as char),
                ));
            }
            i += 1;
        } else {
            // i always sits on a character boundary here
            let c = s[i..].chars().next().unwrap();
            if !table.allows_char(c) {
                return Err(Error::with_detail(
                    ErrorKind::InvalidCharacter,
                    format!("unexpected character {c:?}"),
                ));
            }
            i += c.len_utf8();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(s: &str) -> Result<(char, usize), Error> {
        decode_escape(s.as_bytes())
    }

    #[test]
    fn decode_single_octet() {
        assert_eq!(decode("25").unwrap(), ('%', 2));
        assert_eq!(decode("41").unwrap(), ('A', 2));
        assert_eq!(decode("01").unwrap(), ('\u{1}', 2));
        assert_eq!(decode("7Fxyz").unwrap(), ('\u{7f}', 2));
    }

    #[test]
    fn decode_multi_octet() {
        assert_eq!(decode("C3%b6").unwrap(), ('ö', 5));
        assert_eq!(decode("E3%a3%Af").unwrap(), ('\u{38ef}', 8));
        assert_eq!(decode("F0%9F%8F%88").unwrap(), ('🏈', 11));
        // trailing bytes are not consumed
        assert_eq!(decode("C3%b6rest").unwrap(), ('ö', 5));
    }

    #[test]
    fn decode_truncations() {
        for bad in [
            "", "F", "%", "F0", "E3a3%Af", "E3%a", "F0%9F%88", "F0%9F%8", "F0%9F", "F0%9FX",
            "F0%9F%8F88", "F0%9F%8F%8",
        ] {
            assert!(decode(bad).is_err(), "expected {bad:?} to fail");
        }
    }

    #[test]
    fn decode_invalid_sequences() {
        // non-hex digits
        assert!(decode("F0%NF%8F%88").is_err());
        // continuation byte without a lead byte
        assert!(decode("80").is_err());
        // bad continuation byte
        assert!(decode("F0%9F%8F%01").is_err());
        // overlong encoding
        assert!(decode("C0%80").is_err());
        // surrogate code point
        assert!(decode("ED%A0%80").is_err());
        // beyond U+10FFFF
        assert!(decode("F4%90%80%80").is_err());
    }

    #[test]
    fn component_walk() {
        use super::table::QUERY_FRAGMENT;

        assert!(validate_component("a=b&c=%C3%B6", QUERY_FRAGMENT).is_ok());
        assert!(validate_component("héllo", QUERY_FRAGMENT).is_ok());
        assert!(validate_component("", QUERY_FRAGMENT).is_ok());

        let err = validate_component("a=%zz", QUERY_FRAGMENT).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEscaping);
        let err = validate_component("a{b", QUERY_FRAGMENT).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCharacter);
        assert!(validate_component("☃", QUERY_FRAGMENT).is_err());
    }
}
