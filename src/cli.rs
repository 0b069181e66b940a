//! Command-line parsing: `mini-tracker [port]`.
//!
//! `clap` is not used here: its own error text doesn't match the
//! original's `"Usage: %s [bindport]"` contract, and the port token
//! itself isn't a plain decimal — it accepts octal (`0`-prefixed) and
//! hex (`0x`-prefixed) the way `strtol(argv[1], &s, 0)` does, which a
//! derived `clap::Parser` argument wouldn't parse natively. `main.rs`
//! reads `std::env::args()` directly and hands the single token here.

/// Parses a port token in decimal, octal (leading `0`), or hex (leading
/// `0x`/`0X`), taken modulo 65536 — mirroring `USHRT_MAX & strtol(s, &s, 0)`
/// in the original. Returns `None` on any malformed or partially-consumed
/// token, the equivalent of the original's `if (*s) goto error`.
#[must_use]
pub fn parse_port_token(raw: &str) -> Option<u16> {
    let (negative, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    let (digits, radix) = if let Some(rest) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) {
        (rest, 16)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (&unsigned[1..], 8)
    } else {
        (unsigned, 10)
    };

    if digits.is_empty() {
        return None;
    }

    let magnitude = u64::from_str_radix(digits, radix).ok()?;
    let value = if negative {
        0u64.wrapping_sub(magnitude)
    } else {
        magnitude
    };

    #[allow(clippy::cast_possible_truncation)]
    Some((value % 65536) as u16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal() {
        assert_eq!(parse_port_token("6969"), Some(6969));
    }

    #[test]
    fn parses_octal() {
        assert_eq!(parse_port_token("010"), Some(8));
    }

    #[test]
    fn parses_hex() {
        assert_eq!(parse_port_token("0x1A"), Some(26));
    }

    #[test]
    fn wraps_modulo_65536() {
        assert_eq!(parse_port_token("65537"), Some(1));
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert_eq!(parse_port_token("80abc"), None);
    }

    #[test]
    fn zero_is_decimal_not_invalid_octal() {
        assert_eq!(parse_port_token("0"), Some(0));
    }
}
