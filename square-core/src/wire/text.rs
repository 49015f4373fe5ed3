//! Human readable counterpart of the binary wire format.
//!
//! Documents are JSON objects keyed by the same field names the binary schema uses. Types that
//! switch on [`serde::Serializer::is_human_readable`] pick their textual form here.
// Crates
use serde::de::DeserializeOwned;
use serde::Serialize;
// Internal
use crate::wire::Error;

pub fn serialize<T: Serialize>(item: &T) -> crate::wire::Result<String> {
    serde_json::to_string(item).map_err(Error::SerializeText)
}

pub fn deserialize<T: DeserializeOwned>(item: &str) -> crate::wire::Result<T> {
    serde_json::from_str(item).map_err(Error::DeserializeText)
}
