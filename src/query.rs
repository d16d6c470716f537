//! Query-string decoding.
//!
//! Queries are decoded with the `application/x-www-form-urlencoded`
//! conventions: pairs separated by `&`, keys and values separated by the
//! first `=`, `+` decoding to a space and `%HH` to a raw octet. This is a
//! convention layered on top of RFC 3986, so it is deliberately lenient:
//! pairs that do not decode to valid UTF-8 are skipped rather than
//! failing the whole query.

use crate::encoding::hex_value;

/// The decoded key/multi-value pairs of a query string.
///
/// Pairs keep their order of appearance; a key may occur several times.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub(crate) fn parse(query: &str) -> QueryParams {
        let mut pairs = Vec::new();
        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if let (Some(key), Some(value)) = (decode(key), decode(value)) {
                pairs.push((key, value));
            }
        }
        QueryParams { pairs }
    }

    /// Returns the first value recorded for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value recorded for `key`, in order of appearance.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over all pairs in order of appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Tells whether no pair was decoded.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' => {
                if i + 2 >= bytes.len() {
                    return None;
                }
                let hi = hex_value(bytes[i + 1])?;
                let lo = hex_value(bytes[i + 2])?;
                out.push(hi << 4 | lo);
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8(out).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_decodes_pairs() {
        let params = QueryParams::parse("id=5&part=three&part=four&flag");
        assert_eq!(params.len(), 4);
        assert_eq!(params.get("id"), Some("5"));
        assert_eq!(params.get("part"), Some("three"));
        assert_eq!(
            params.get_all("part").collect::<Vec<_>>(),
            ["three", "four"]
        );
        assert_eq!(params.get("flag"), Some(""));
        assert_eq!(params.get("absent"), None);
    }

    #[test]
    fn form_decoding() {
        let params = QueryParams::parse("q=a+b%20c&snow=%E2%98%83");
        assert_eq!(params.get("q"), Some("a b c"));
        assert_eq!(params.get("snow"), Some("☃"));
    }

    #[test]
    fn malformed_pairs_are_skipped() {
        let params = QueryParams::parse("ok=1&bad=%zz&trunc=%e2&also=2");
        assert_eq!(params.get("ok"), Some("1"));
        assert_eq!(params.get("also"), Some("2"));
        assert_eq!(params.get("bad"), None);
        assert_eq!(params.get("trunc"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn empty_query() {
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("&&").is_empty());
    }
}
