//! Identifier types shared by the lookup registry and the identifier catalog.
//!
//! A [`Did`] (data identifier) is a 32-bit reference to a named game asset: an icon, a motion
//! table, a spell table, and so on. A [`DidType`] is the semantic property type a [`Did`] is
//! stored under in the world database.
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

mod parse;
pub use parse::{ParseDidError, parse_did, parse_hex_u32, strip_hex_prefix};

#[derive(Debug, Copy, Clone, Eq, PartialOrd, Ord, PartialEq, Serialize, Deserialize, Hash)]
pub struct Did(u32);

impl Did {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// The `0x`-prefixed, zero padded, upper case hex form, e.g. `0x0000000A`
    pub fn to_hex(&self) -> String {
        format!("0x{:08X}", self.0)
    }
}

impl From<u32> for Did {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Did> for u32 {
    fn from(value: Did) -> Self {
        value.0
    }
}

impl Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::UpperHex for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::UpperHex::fmt(&self.0, f)
    }
}

impl FromStr for Did {
    type Err = ParseDidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_did(s)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialOrd, Ord, PartialEq, Serialize, Deserialize, Hash)]
pub struct DidType(u32);

impl DidType {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl From<u32> for DidType {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Display for DidType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_form_is_padded_upper_case() {
        assert_eq!(Did::new(10).to_hex(), "0x0000000A");
        assert_eq!(Did::new(0x0600_127D).to_hex(), "0x0600127D");
        assert_eq!(Did::new(u32::MAX).to_hex(), "0xFFFFFFFF");
        assert_eq!(format!("{:X}", Did::new(0xBEEF)), "BEEF");
    }

    #[test]
    fn from_str_delegates_to_parse_did() {
        assert_eq!("0x2A".parse::<Did>().unwrap(), Did::new(42));
        assert_eq!("42".parse::<Did>().unwrap(), Did::new(42));
        assert!("".parse::<Did>().is_err());
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Did::new(7)).unwrap();
        assert_eq!(json, "7");
        let back: Did = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Did::new(7));
    }
}
