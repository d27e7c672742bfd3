use std::num::ParseIntError;

use crate::Did;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDidError {
    #[error("no identifier given")]
    Empty,

    #[error("'{text}' is not a valid hexadecimal identifier")]
    InvalidHex { text: String },

    #[error("'{text}' is not a valid identifier: {source}")]
    InvalidDecimal {
        text: String,
        #[source]
        source: ParseIntError,
    },
}

/// Returns the digits following a case-insensitive `0x` prefix, or `None` if `text` does not
/// start with one.
pub fn strip_hex_prefix(text: &str) -> Option<&str> {
    let prefix = text.get(..2)?;
    prefix
        .eq_ignore_ascii_case("0x")
        .then(|| &text[prefix.len()..])
}

/// Parses up to eight hex digits (no prefix, no sign) into a `u32`.
pub fn parse_hex_u32(digits: &str) -> Option<u32> {
    let digits = digits.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Parse user supplied identifier text.
///
/// Accepts `0x`-prefixed hexadecimal or plain decimal, surrounded by optional whitespace.
/// Blank input is [`ParseDidError::Empty`] rather than zero, so that "nothing typed" can be told
/// apart from "zero typed".
pub fn parse_did(text: &str) -> Result<Did, ParseDidError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseDidError::Empty);
    }

    if let Some(digits) = strip_hex_prefix(text) {
        return parse_hex_u32(digits)
            .map(Did::new)
            .ok_or_else(|| ParseDidError::InvalidHex {
                text: text.to_string(),
            });
    }

    text.parse::<u32>()
        .map(Did::new)
        .map_err(|source| ParseDidError::InvalidDecimal {
            text: text.to_string(),
            source,
        })
}
