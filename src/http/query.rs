//! The request-target parser (C3), spec §4.3.

/// A hard ceiling on how many `name=value` pairs a single request
/// contributes; everything past it is silently dropped, not a failure.
pub const MAX_PARAMS: usize = 40;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("query has no parameters")]
    Empty,
    #[error("parameter has no '=' separator")]
    BareParameter,
}

/// One `name=value` pair, held as raw, never percent-decoded bytes — the
/// bencoded reply echoes `info_hash` back byte-for-byte, so decoding here
/// would corrupt it (spec §4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Vec<u8>,
    pub value: Vec<u8>,
}

/// The decomposed request target: which endpoint, and its parameters
/// sorted lexicographically by name so lookup can proceed by binary
/// search (spec §4.3's output contract).
#[derive(Debug)]
pub struct Target {
    pub endpoint: Endpoint,
    params: Vec<Param>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Announce,
    Scrape,
}

impl Target {
    /// Parses the bytes between `GET ` and the next space. Returns `Ok(None)`
    /// for an endpoint the tracker doesn't serve (a 404, not a parse
    /// failure); `Err` for a query that fails to decompose into parameters.
    pub fn parse(raw: &[u8]) -> Result<Option<Self>, ParseFailure> {
        let (path, query) = match raw.iter().position(|&b| b == b'?') {
            Some(idx) => (&raw[..idx], &raw[idx + 1..]),
            None => (raw, &raw[..0]),
        };

        let endpoint = match path {
            b"/announce.php" => Endpoint::Announce,
            b"/scrape.php" => Endpoint::Scrape,
            _ => return Ok(None),
        };

        let mut params = Vec::new();
        for pair in query.split(|&b| b == b'&') {
            if pair.is_empty() {
                continue;
            }
            if params.len() >= MAX_PARAMS {
                break;
            }
            let eq = pair.iter().position(|&b| b == b'=').ok_or(ParseFailure::BareParameter)?;
            params.push(Param {
                name: pair[..eq].to_vec(),
                value: pair[eq + 1..].to_vec(),
            });
        }

        if params.is_empty() {
            return Err(ParseFailure::Empty);
        }

        params.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(Some(Self { endpoint, params }))
    }

    #[must_use]
    pub fn get(&self, name: &[u8]) -> Option<&[u8]> {
        self.params
            .binary_search_by(|p| p.name.as_slice().cmp(name))
            .ok()
            .map(|idx| self.params[idx].value.as_slice())
    }

    #[must_use]
    pub fn has(&self, name: &[u8]) -> bool {
        self.get(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_endpoint_is_not_a_parse_failure() {
        assert!(Target::parse(b"/foo.php?a=1").unwrap().is_none());
    }

    #[test]
    fn zero_parameters_is_a_parse_failure() {
        assert_eq!(Target::parse(b"/announce.php"), Err(ParseFailure::Empty));
        assert_eq!(Target::parse(b"/announce.php?"), Err(ParseFailure::Empty));
    }

    #[test]
    fn a_bare_name_with_no_equals_is_a_parse_failure() {
        assert_eq!(Target::parse(b"/announce.php?foo"), Err(ParseFailure::BareParameter));
    }

    #[test]
    fn params_beyond_the_cap_are_silently_dropped() {
        let query: Vec<String> = (0..45).map(|i| format!("p{i}=1")).collect();
        let raw = format!("/announce.php?{}", query.join("&"));
        let target = Target::parse(raw.as_bytes()).unwrap().unwrap();
        assert!(!target.has(b"p44"));
        assert!(target.has(b"p39"));
    }

    #[test]
    fn values_are_not_percent_decoded() {
        let target = Target::parse(b"/announce.php?info_hash=%41%42").unwrap().unwrap();
        assert_eq!(target.get(b"info_hash"), Some(b"%41%42".as_slice()));
    }

    #[test]
    fn lookup_is_order_independent() {
        let target = Target::parse(b"/announce.php?zeta=1&alpha=2").unwrap().unwrap();
        assert_eq!(target.get(b"alpha"), Some(b"2".as_slice()));
        assert_eq!(target.get(b"zeta"), Some(b"1".as_slice()));
    }
}
