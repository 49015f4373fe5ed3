//! Blob value type of a data availability square: validation, wire encodings, ordering and the
//! conversion of a blob into shares.
pub mod blob;
pub mod namespace;
pub mod share;
mod utils;
pub mod wire;

pub use blob::{sort_blobs, Blob, BlobError, BlobRecord};
pub use namespace::{Namespace, NamespaceError, NAMESPACE_VERSION_MAX, NAMESPACE_VERSION_ZERO};
pub use share::{
    Share, ShareError, ShareSplitter, SparseShareSplitter, MAX_SHARE_VERSION, SHARE_VERSION_ONE,
    SHARE_VERSION_ZERO, SIGNER_SIZE,
};
