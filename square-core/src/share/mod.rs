pub mod builder;
pub mod splitter;

// std
use std::fmt;
// internal
use crate::namespace::{Namespace, NAMESPACE_SIZE};
pub use builder::{namespace_padding_share, namespace_padding_shares, ShareBuilder};
pub use splitter::{ShareSplitter, SparseShareSplitter};

pub const SHARE_SIZE: usize = 512;
pub const SHARE_INFO_BYTES: usize = 1;
pub const SEQUENCE_LEN_BYTES: usize = 4;

pub const SHARE_VERSION_ZERO: u8 = 0;
/// Share version carrying a signer in the first share of a sequence.
pub const SHARE_VERSION_ONE: u8 = 1;
/// Upper bound of the share version range, the info byte reserves one bit for the sequence start.
pub const MAX_SHARE_VERSION: u8 = 127;
pub const SUPPORTED_SHARE_VERSIONS: [u8; 2] = [SHARE_VERSION_ZERO, SHARE_VERSION_ONE];

pub const SIGNER_SIZE: usize = 20;

pub const FIRST_SPARSE_SHARE_CONTENT_SIZE: usize =
    SHARE_SIZE - NAMESPACE_SIZE - SHARE_INFO_BYTES - SEQUENCE_LEN_BYTES;
pub const CONTINUATION_SPARSE_SHARE_CONTENT_SIZE: usize =
    SHARE_SIZE - NAMESPACE_SIZE - SHARE_INFO_BYTES;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    #[error("share must be {expected} bytes, got {0}", expected = SHARE_SIZE)]
    InvalidSize(usize),
    #[error("unsupported share version {0}")]
    UnsupportedShareVersion(u8),
    #[error("share version {0} is greater than {max}", max = MAX_SHARE_VERSION)]
    ShareVersionRange(u8),
    #[error("signer must be {expected} bytes, got {0}", expected = SIGNER_SIZE)]
    InvalidSignerSize(usize),
    #[error("share namespace must be {expected} bytes, got {0}", expected = NAMESPACE_SIZE)]
    InvalidNamespace(usize),
    #[error("sequence metadata can only be written to the first share of a sequence")]
    NotSequenceStart,
    #[error("sequence of {0} bytes does not fit the sequence length field")]
    SequenceTooLong(usize),
    #[error("cannot write namespace padding shares to an empty splitter")]
    EmptySplitter,
}

/// Share version and sequence start flag packed as `version << 1 | sequence_start`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoByte(u8);

impl InfoByte {
    pub fn new(version: u8, is_sequence_start: bool) -> Result<Self, ShareError> {
        if version > MAX_SHARE_VERSION {
            return Err(ShareError::ShareVersionRange(version));
        }
        Ok(Self((version << 1) | u8::from(is_sequence_start)))
    }

    pub const fn version(self) -> u8 {
        self.0 >> 1
    }

    pub const fn is_sequence_start(self) -> bool {
        self.0 & 1 == 1
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for InfoByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfoByte")
            .field("version", &self.version())
            .field("is_sequence_start", &self.is_sequence_start())
            .finish()
    }
}

/// Fixed size transport unit: namespace, info byte, optional sequence metadata and content.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Share(Vec<u8>);

impl Share {
    pub fn new(data: Vec<u8>) -> Result<Self, ShareError> {
        if data.len() != SHARE_SIZE {
            return Err(ShareError::InvalidSize(data.len()));
        }
        Ok(Self(data))
    }

    /// Namespace prefix as written, not validated against the supported versions.
    pub fn namespace(&self) -> Namespace {
        Namespace::from_raw(self.0[0], &self.0[1..NAMESPACE_SIZE])
    }

    pub fn info_byte(&self) -> InfoByte {
        InfoByte(self.0[NAMESPACE_SIZE])
    }

    pub fn version(&self) -> u8 {
        self.info_byte().version()
    }

    pub fn is_sequence_start(&self) -> bool {
        self.info_byte().is_sequence_start()
    }

    /// Total length of the sequence this share starts, zero for continuation shares.
    pub fn sequence_len(&self) -> u32 {
        if !self.is_sequence_start() {
            return 0;
        }
        let start = NAMESPACE_SIZE + SHARE_INFO_BYTES;
        let mut len = [0u8; SEQUENCE_LEN_BYTES];
        len.copy_from_slice(&self.0[start..start + SEQUENCE_LEN_BYTES]);
        u32::from_be_bytes(len)
    }

    pub fn signer(&self) -> Option<&[u8]> {
        if !self.has_signer() {
            return None;
        }
        let start = NAMESPACE_SIZE + SHARE_INFO_BYTES + SEQUENCE_LEN_BYTES;
        Some(&self.0[start..start + SIGNER_SIZE])
    }

    /// Content bytes of the share, trailing zero padding included.
    pub fn raw_data(&self) -> &[u8] {
        let mut start = NAMESPACE_SIZE + SHARE_INFO_BYTES;
        if self.is_sequence_start() {
            start += SEQUENCE_LEN_BYTES;
        }
        if self.has_signer() {
            start += SIGNER_SIZE;
        }
        &self.0[start..]
    }

    /// Padding shares start a sequence of length zero.
    pub fn is_padding(&self) -> bool {
        self.is_sequence_start() && self.sequence_len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn has_signer(&self) -> bool {
        self.is_sequence_start() && self.version() == SHARE_VERSION_ONE
    }
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("namespace", &self.namespace())
            .field("info", &self.info_byte())
            .field("sequence_len", &self.sequence_len())
            .finish_non_exhaustive()
    }
}
