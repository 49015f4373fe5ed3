// crates
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
// internal
use super::{Blob, BlobError};
use crate::namespace::{Namespace, NAMESPACE_VERSION_MAX};
use crate::share::MAX_SHARE_VERSION;
use crate::utils::{serde_base64_bytes, serde_base64_bytes_opt, Base64Bytes};

/// Flat wire record both blob encodings go through.
///
/// Field order is part of the binary format. Version fields are wider than the values a [`Blob`]
/// accepts so that payloads from newer or corrupted writers are caught by a range check
/// instead of being truncated.
///
/// In the text form byte fields are base64, and zero versions and an absent signer are left out
/// of the document. Missing fields decode to their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BlobRecord {
    #[serde(default, deserialize_with = "serde_base64_bytes::deserialize")]
    pub namespace_id: Vec<u8>,
    #[serde(default, deserialize_with = "serde_base64_bytes::deserialize")]
    pub data: Vec<u8>,
    #[serde(default)]
    pub share_version: u32,
    #[serde(default)]
    pub namespace_version: u32,
    #[serde(default, deserialize_with = "serde_base64_bytes_opt::deserialize")]
    pub signer: Option<Vec<u8>>,
}

impl Serialize for BlobRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Binary formats are positional, every field is written there.
        let omit_empty = serializer.is_human_readable();
        let mut state = serializer.serialize_struct("BlobRecord", 5)?;
        state.serialize_field("namespace_id", &Base64Bytes(&self.namespace_id))?;
        state.serialize_field("data", &Base64Bytes(&self.data))?;
        for (key, version) in [
            ("share_version", self.share_version),
            ("namespace_version", self.namespace_version),
        ] {
            if omit_empty && version == 0 {
                state.skip_field(key)?;
            } else {
                state.serialize_field(key, &version)?;
            }
        }
        if omit_empty && self.signer.is_none() {
            state.skip_field("signer")?;
        } else {
            state.serialize_field("signer", &self.signer.as_deref().map(Base64Bytes))?;
        }
        state.end()
    }
}

impl From<&Blob> for BlobRecord {
    fn from(blob: &Blob) -> Self {
        Self {
            namespace_id: blob.namespace().id().to_vec(),
            data: blob.data().to_vec(),
            share_version: u32::from(blob.share_version()),
            namespace_version: u32::from(blob.namespace().version()),
            signer: blob.signer().map(<[u8]>::to_vec),
        }
    }
}

impl From<Blob> for BlobRecord {
    fn from(blob: Blob) -> Self {
        Self::from(&blob)
    }
}

impl TryFrom<BlobRecord> for Blob {
    type Error = BlobError;

    fn try_from(record: BlobRecord) -> Result<Self, Self::Error> {
        if record.namespace_version > u32::from(NAMESPACE_VERSION_MAX) {
            return Err(BlobError::NamespaceVersionRange(record.namespace_version));
        }
        if record.share_version > u32::from(MAX_SHARE_VERSION) {
            return Err(BlobError::ShareVersionRange(record.share_version));
        }
        // Both fit a u8 after the range checks
        let namespace = Namespace::new(record.namespace_version as u8, &record.namespace_id)?;
        Blob::new(
            namespace,
            record.data,
            record.share_version as u8,
            record.signer,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NAMESPACE_ID_SIZE;
    use crate::wire;
    use crate::share::{SHARE_VERSION_ONE, SIGNER_SIZE};

    fn record() -> BlobRecord {
        let namespace = Namespace::new_v0(b"record").unwrap();
        BlobRecord {
            namespace_id: namespace.id().to_vec(),
            data: b"payload".to_vec(),
            share_version: 0,
            namespace_version: 0,
            signer: None,
        }
    }

    #[test]
    fn valid_record_builds_blob() {
        let blob = Blob::try_from(record()).unwrap();
        assert_eq!(blob.data(), b"payload");
        assert_eq!(BlobRecord::from(&blob), record());
    }

    #[test]
    fn namespace_version_out_of_range() {
        let record = BlobRecord {
            namespace_version: u32::from(NAMESPACE_VERSION_MAX) + 1,
            ..record()
        };
        assert!(matches!(
            Blob::try_from(record),
            Err(BlobError::NamespaceVersionRange(256))
        ));
    }

    #[test]
    fn share_version_out_of_range() {
        for share_version in [u32::from(MAX_SHARE_VERSION) + 1, u32::MAX] {
            let record = BlobRecord {
                share_version,
                ..record()
            };
            assert!(matches!(
                Blob::try_from(record),
                Err(BlobError::ShareVersionRange(v)) if v == share_version
            ));
        }
    }

    #[test]
    fn range_checks_run_before_validation() {
        // Empty data would fail validation, the range check has to win.
        let record = BlobRecord {
            share_version: 200,
            data: vec![],
            ..record()
        };
        assert!(matches!(
            Blob::try_from(record),
            Err(BlobError::ShareVersionRange(200))
        ));
    }

    #[test]
    fn in_range_but_unsupported_versions() {
        let sv_record = BlobRecord {
            share_version: u32::from(MAX_SHARE_VERSION),
            ..record()
        };
        assert!(matches!(
            Blob::try_from(sv_record),
            Err(BlobError::UnsupportedShareVersion(MAX_SHARE_VERSION))
        ));

        let record = BlobRecord {
            namespace_version: u32::from(NAMESPACE_VERSION_MAX),
            namespace_id: vec![0xFF; NAMESPACE_ID_SIZE],
            ..record()
        };
        assert!(matches!(
            Blob::try_from(record),
            Err(BlobError::UnsupportedNamespaceVersion {
                expected: 0,
                actual: NAMESPACE_VERSION_MAX
            })
        ));
    }

    #[test]
    fn malformed_namespace_id() {
        let record = BlobRecord {
            namespace_id: vec![0; 3],
            ..record()
        };
        assert!(matches!(
            Blob::try_from(record),
            Err(BlobError::InvalidNamespace(_))
        ));
    }

    #[test]
    fn signer_is_validated_through_the_record() {
        let record = BlobRecord {
            share_version: u32::from(SHARE_VERSION_ONE),
            signer: Some(vec![1; SIGNER_SIZE - 1]),
            ..record()
        };
        assert!(matches!(
            Blob::try_from(record),
            Err(BlobError::SignerSize { .. })
        ));
    }

    #[test]
    fn text_form_omits_empty_fields() {
        let text = wire::text::serialize(&record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["data", "namespace_id"]);
        assert_eq!(value["data"], "cGF5bG9hZA==");
        assert_eq!(wire::text::deserialize::<BlobRecord>(&text).unwrap(), record());
    }

    #[test]
    fn text_form_keeps_set_fields() {
        let record = BlobRecord {
            share_version: 1,
            namespace_version: 3,
            signer: Some(vec![1, 2]),
            ..record()
        };
        let text = wire::text::serialize(&record).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["share_version"], 1);
        assert_eq!(value["namespace_version"], 3);
        assert_eq!(value["signer"], "AQI=");
        assert_eq!(wire::text::deserialize::<BlobRecord>(&text).unwrap(), record);
    }

    #[test]
    fn binary_form_writes_every_field() {
        for signer in [None, Some(vec![1, 2])] {
            let record = BlobRecord { signer, ..record() };
            let bytes = wire::serialize(&record).unwrap();
            assert_eq!(wire::deserialize::<BlobRecord>(&bytes).unwrap(), record);
        }
    }
}
