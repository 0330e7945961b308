use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::layout::CID_LEN;

/// Component identifier of an sACN sender.
///
/// The 16 bytes are opaque: they are copied to and from the wire as-is and
/// never reinterpreted as a number, so no byte order applies.
///
/// # Examples
/// ```
/// use sacnwire_core::Cid;
///
/// let cid: Cid = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// assert_eq!(cid.as_bytes()[15], 0x0f);
/// assert_eq!(cid.to_string(), "000102030405060708090a0b0c0d0e0f");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cid([u8; CID_LEN]);

impl Cid {
    pub const NIL: Cid = Cid([0u8; CID_LEN]);

    pub const fn from_bytes(bytes: [u8; CID_LEN]) -> Self {
        Self(bytes)
    }

    /// Random (v4) identifier for a new sender.
    pub fn generate() -> Self {
        Self(*Uuid::new_v4().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; CID_LEN] {
        &self.0
    }
}

impl From<Uuid> for Cid {
    fn from(value: Uuid) -> Self {
        Self(*value.as_bytes())
    }
}

impl From<Cid> for Uuid {
    fn from(value: Cid) -> Self {
        Uuid::from_bytes(value.0)
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for Cid {
    type Err = uuid::Error;

    /// Accepts plain hex as well as the hyphenated UUID form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self::from)
    }
}

impl Serialize for Cid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Cid;

    #[test]
    fn display_is_lowercase_hex() {
        let cid = Cid::from_bytes([0xAB; 16]);
        assert_eq!(cid.to_string(), "ab".repeat(16));
    }

    #[test]
    fn parses_hyphenated_form() {
        let cid: Cid = "00010203-0405-0607-0809-0a0b0c0d0e0f".parse().unwrap();
        let expected: [u8; 16] = core::array::from_fn(|idx| idx as u8);
        assert_eq!(cid.as_bytes(), &expected);
    }

    #[test]
    fn rejects_garbage() {
        assert!("not-a-cid".parse::<Cid>().is_err());
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(Cid::generate(), Cid::generate());
    }

    #[test]
    fn serde_uses_hex_string() {
        let cid = Cid::from_bytes([1; 16]);
        let json = serde_json::to_string(&cid).unwrap();
        assert_eq!(json, format!("\"{}\"", "01".repeat(16)));
        let back: Cid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cid);
    }
}
