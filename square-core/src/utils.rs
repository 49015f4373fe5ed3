//! Serde helpers for byte fields: raw bytes in binary formats, padded standard base64 strings in
//! text formats.
use serde::{Serialize, Serializer};

/// Borrowed byte field that serializes through [`serde_base64_bytes`].
pub(crate) struct Base64Bytes<'a>(pub &'a [u8]);

impl Serialize for Base64Bytes<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde_base64_bytes::serialize(self.0, serializer)
    }
}

pub(crate) mod serde_base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            STANDARD.encode(bytes).serialize(serializer)
        } else {
            bytes.serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            STANDARD.decode(s).map_err(serde::de::Error::custom)
        } else {
            Vec::<u8>::deserialize(deserializer)
        }
    }
}

pub(crate) mod serde_base64_bytes_opt {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer};

    /// `null` and a missing field both decode to `None`.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        if deserializer.is_human_readable() {
            Option::<String>::deserialize(deserializer)?
                .map(|s| STANDARD.decode(s))
                .transpose()
                .map_err(serde::de::Error::custom)
        } else {
            Option::<Vec<u8>>::deserialize(deserializer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_form_is_padded_base64() {
        let encoded = serde_json::to_string(&Base64Bytes(b"hello")).unwrap();
        assert_eq!(encoded, "\"aGVsbG8=\"");
        let mut de = serde_json::Deserializer::from_str(&encoded);
        assert_eq!(serde_base64_bytes::deserialize(&mut de).unwrap(), b"hello");
    }

    #[test]
    fn text_form_rejects_hex() {
        let mut de = serde_json::Deserializer::from_str("\"0x68656c6c6f\"");
        assert!(serde_base64_bytes::deserialize(&mut de).is_err());
    }

    #[test]
    fn optional_null_is_absent() {
        let mut de = serde_json::Deserializer::from_str("null");
        assert_eq!(serde_base64_bytes_opt::deserialize(&mut de).unwrap(), None);
        let mut de = serde_json::Deserializer::from_str("\"AQI=\"");
        assert_eq!(
            serde_base64_bytes_opt::deserialize(&mut de).unwrap(),
            Some(vec![1, 2])
        );
    }
}
