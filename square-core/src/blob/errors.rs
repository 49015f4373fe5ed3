// internal
use crate::namespace::{NamespaceError, NAMESPACE_VERSION_MAX};
use crate::share::{MAX_SHARE_VERSION, SHARE_VERSION_ONE, SHARE_VERSION_ZERO};
use crate::wire;

#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("data can not be empty")]
    EmptyData,
    #[error("namespace can not be empty")]
    EmptyNamespace,
    #[error("namespace version must be {expected} got {actual}")]
    UnsupportedNamespaceVersion { expected: u8, actual: u8 },
    #[error(
        "namespace version {0} can not be greater than {max}",
        max = NAMESPACE_VERSION_MAX
    )]
    NamespaceVersionRange(u32),
    #[error(
        "share version {0} not supported. Please use {zero} or {one}",
        zero = SHARE_VERSION_ZERO,
        one = SHARE_VERSION_ONE
    )]
    UnsupportedShareVersion(u8),
    #[error(
        "share version {0} can not be greater than {max}",
        max = MAX_SHARE_VERSION
    )]
    ShareVersionRange(u32),
    #[error("share version {0} does not support signer")]
    SignerNotAllowed(u8),
    #[error(
        "share version {share_version} requires signer of size {expected} bytes, got {actual:?}"
    )]
    SignerSize {
        share_version: u8,
        expected: usize,
        actual: Option<usize>,
    },
    #[error("invalid namespace: {0}")]
    InvalidNamespace(#[from] NamespaceError),
    #[error("failed to marshal blob: {0}")]
    Encode(#[source] wire::Error),
    #[error("failed to unmarshal blob: {0}")]
    Decode(#[source] wire::Error),
}
