//! The record exchanged with record logs

use serde::{Deserialize, Serialize};

/// One record: an opaque value and the offset it lives at.
///
/// On the wire `value` is standard base64, the usual JSON form of raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record payload
    #[serde(default, with = "base64_bytes")]
    pub value: Vec<u8>,

    /// Address assigned by the log on append
    #[serde(default)]
    pub offset: u64,
}

impl Record {
    /// Create a record that has not been appended yet
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
            offset: 0,
        }
    }
}

mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
