pub mod errors;
pub mod record;

// std
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::str::FromStr;
// crates
use bytes::Bytes;
use serde::{Deserialize, Serialize};
// internal
use crate::namespace::{Namespace, NAMESPACE_VERSION_ZERO};
use crate::share::{
    Share, ShareError, ShareSplitter, SparseShareSplitter, SHARE_VERSION_ONE, SHARE_VERSION_ZERO,
    SIGNER_SIZE,
};
use crate::wire;
pub use errors::BlobError;
pub use record::BlobRecord;

/// User data submitted to the network alongside its namespace and, depending on the share
/// version, the signer that submitted it.
///
/// Values are only built through [`Blob::new`] (directly or through one of the decoders), so
/// every non default blob upholds the validation rules. The default value is the degenerate
/// empty blob, see [`Blob::is_empty`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BlobRecord", into = "BlobRecord")]
pub struct Blob {
    namespace: Namespace,
    data: Bytes,
    share_version: u8,
    signer: Option<Vec<u8>>,
}

/// How a share version treats the signer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignerPolicy {
    Forbidden,
    Required(usize),
}

impl SignerPolicy {
    const fn for_share_version(share_version: u8) -> Option<Self> {
        match share_version {
            SHARE_VERSION_ZERO => Some(Self::Forbidden),
            SHARE_VERSION_ONE => Some(Self::Required(SIGNER_SIZE)),
            _ => None,
        }
    }

    fn check(self, share_version: u8, signer: Option<&[u8]>) -> Result<(), BlobError> {
        match (self, signer) {
            (Self::Forbidden, None) => Ok(()),
            (Self::Forbidden, Some(_)) => Err(BlobError::SignerNotAllowed(share_version)),
            (Self::Required(size), Some(signer)) if signer.len() == size => Ok(()),
            (Self::Required(size), signer) => Err(BlobError::SignerSize {
                share_version,
                expected: size,
                actual: signer.map(<[u8]>::len),
            }),
        }
    }
}

impl Blob {
    /// Builds a blob after the stateless checks: data and namespace must be non empty, the
    /// namespace must be version zero and the signer must match what the share version expects.
    pub fn new(
        namespace: Namespace,
        data: impl Into<Bytes>,
        share_version: u8,
        signer: Option<Vec<u8>>,
    ) -> Result<Self, BlobError> {
        let data = data.into();
        if data.is_empty() {
            return Err(BlobError::EmptyData);
        }
        if namespace.is_empty() {
            return Err(BlobError::EmptyNamespace);
        }
        if namespace.version() != NAMESPACE_VERSION_ZERO {
            return Err(BlobError::UnsupportedNamespaceVersion {
                expected: NAMESPACE_VERSION_ZERO,
                actual: namespace.version(),
            });
        }
        SignerPolicy::for_share_version(share_version)
            .ok_or(BlobError::UnsupportedShareVersion(share_version))?
            .check(share_version, signer.as_deref())?;
        Ok(Self {
            namespace,
            data,
            share_version,
            signer,
        })
    }

    pub fn new_v0(namespace: Namespace, data: impl Into<Bytes>) -> Result<Self, BlobError> {
        Self::new(namespace, data, SHARE_VERSION_ZERO, None)
    }

    pub fn new_v1(
        namespace: Namespace,
        data: impl Into<Bytes>,
        signer: Vec<u8>,
    ) -> Result<Self, BlobError> {
        Self::new(namespace, data, SHARE_VERSION_ONE, Some(signer))
    }

    /// Binary wire encoding of the blob.
    pub fn marshal(&self) -> Result<Vec<u8>, BlobError> {
        wire::serialize(&BlobRecord::from(self)).map_err(BlobError::Encode)
    }

    pub fn unmarshal(bytes: &[u8]) -> Result<Self, BlobError> {
        let record = wire::deserialize::<BlobRecord>(bytes).map_err(|e| {
            tracing::debug!("rejecting binary blob payload of {} bytes: {e}", bytes.len());
            BlobError::Decode(e)
        })?;
        Self::try_from(record)
    }

    /// Text wire encoding of the blob, see [`wire::text`].
    pub fn marshal_text(&self) -> Result<String, BlobError> {
        wire::text::serialize(&BlobRecord::from(self)).map_err(BlobError::Encode)
    }

    pub fn unmarshal_text(text: &str) -> Result<Self, BlobError> {
        let record = wire::text::deserialize::<BlobRecord>(text).map_err(|e| {
            tracing::debug!("rejecting text blob payload: {e}");
            BlobError::Decode(e)
        })?;
        Self::try_from(record)
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn share_version(&self) -> u8 {
        self.share_version
    }

    pub fn signer(&self) -> Option<&[u8]> {
        self.signer.as_deref()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Orders blobs by namespace only.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.namespace.compare(&other.namespace)
    }

    /// Only the default value is empty, no constructor accepts empty data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Splits the blob into its own sequence of sparse shares.
    pub fn to_shares(&self) -> Result<Vec<Share>, ShareError> {
        let mut splitter = SparseShareSplitter::new();
        splitter.write(self)?;
        Ok(splitter.export())
    }
}

impl FromStr for Blob {
    type Err = BlobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::unmarshal_text(s)
    }
}

/// Stable sort by namespace: blobs sharing a namespace keep their relative order.
pub fn sort_blobs<B: Borrow<Blob>>(blobs: &mut [B]) {
    blobs.sort_by(|a, b| a.borrow().compare(b.borrow()));
}
