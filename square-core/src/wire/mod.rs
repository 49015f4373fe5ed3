//! Serializers for the wire formats.
//!
//! The binary format is bincode with fixed-width little endian integers and trailing bytes
//! rejected. The text format lives in [`text`].
pub mod errors;
pub mod text;

// Crates
use bincode::config::{
    FixintEncoding, LittleEndian, RejectTrailing, WithOtherEndian, WithOtherIntEncoding,
    WithOtherTrailing,
};
use bincode::Options;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
// Exports
pub use errors::Error;
pub type Result<T> = std::result::Result<T, Error>;

type BincodeOptions = WithOtherTrailing<
    WithOtherIntEncoding<WithOtherEndian<bincode::DefaultOptions, LittleEndian>, FixintEncoding>,
    RejectTrailing,
>;

// No size limit: blobs have no upper bound, and decoding only reads from an in-memory slice so
// a forged length prefix runs into the end of the input instead of allocating.
static OPTIONS: Lazy<BincodeOptions> = Lazy::new(|| {
    bincode::DefaultOptions::new()
        .with_little_endian()
        .with_fixint_encoding()
        .reject_trailing_bytes()
});

/// Exact number of bytes `item` occupies on the wire
pub fn serialized_size<T: Serialize>(item: &T) -> Result<u64> {
    OPTIONS.serialized_size(item).map_err(Error::Serialize)
}

/// Serialize an object directly into a vec
pub fn serialize<T: Serialize>(item: &T) -> Result<Vec<u8>> {
    let size = serialized_size(item)?;
    let mut buf = Vec::with_capacity(size as usize);
    OPTIONS
        .serialize_into(&mut buf, item)
        .map_err(Error::Serialize)?;
    Ok(buf)
}

/// Deserialize an object directly, the whole input must be consumed
pub fn deserialize<T: DeserializeOwned>(item: &[u8]) -> Result<T> {
    OPTIONS.deserialize(item).map_err(Error::Deserialize)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Versioned {
        version: u32,
        payload: Vec<u8>,
    }

    fn sample() -> Versioned {
        Versioned {
            version: 1,
            payload: b"hello".to_vec(),
        }
    }

    #[test]
    fn serialize_deserialize() {
        let item = sample();
        let serialized = serialize(&item).unwrap();
        assert_eq!(serialized.len() as u64, serialized_size(&item).unwrap());
        assert_eq!(deserialize::<Versioned>(&serialized).unwrap(), item);
    }

    #[test]
    fn integers_keep_their_width() {
        // u32 version + u64 length prefix + 5 payload bytes
        let serialized = serialize(&sample()).unwrap();
        assert_eq!(serialized.len(), 4 + 8 + 5);
        assert_eq!(&serialized[..4], &1u32.to_le_bytes());
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut serialized = serialize(&sample()).unwrap();
        serialized.push(0);
        let err = deserialize::<Versioned>(&serialized).unwrap_err();
        assert!(matches!(err, Error::Deserialize(_)));
        assert!(err.is_decode());
    }

    #[test]
    fn large_payloads_are_not_capped() {
        let item = Versioned {
            version: 0,
            payload: vec![9; 4 << 20],
        };
        let serialized = serialize(&item).unwrap();
        assert_eq!(deserialize::<Versioned>(&serialized).unwrap(), item);
    }

    #[test]
    fn forged_length_prefix_is_rejected() {
        let mut serialized = serialize(&sample()).unwrap();
        serialized[4..12].copy_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(
            deserialize::<Versioned>(&serialized),
            Err(Error::Deserialize(_))
        ));
    }

    #[test]
    fn text_round_trip() {
        let item = sample();
        let document = text::serialize(&item).unwrap();
        assert!(document.contains("\"version\":1"));
        assert_eq!(text::deserialize::<Versioned>(&document).unwrap(), item);
    }

    #[test]
    fn malformed_text_is_a_decode_error() {
        let err = text::deserialize::<Versioned>("{\"version\":").unwrap_err();
        assert!(matches!(err, Error::DeserializeText(_)));
        assert!(err.is_decode());
    }
}
