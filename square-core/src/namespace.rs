// std
use std::cmp::Ordering;
use std::fmt;

pub const NAMESPACE_VERSION_SIZE: usize = 1;
pub const NAMESPACE_ID_SIZE: usize = 28;
pub const NAMESPACE_SIZE: usize = NAMESPACE_VERSION_SIZE + NAMESPACE_ID_SIZE;

pub const NAMESPACE_VERSION_ZERO: u8 = 0;
/// Largest representable namespace version, reserved for protocol namespaces.
pub const NAMESPACE_VERSION_MAX: u8 = u8::MAX;

/// Leading zero bytes every version zero id carries.
pub const NAMESPACE_VERSION_ZERO_PREFIX_SIZE: usize = 18;
/// User controlled bytes of a version zero id.
pub const NAMESPACE_VERSION_ZERO_ID_SIZE: usize =
    NAMESPACE_ID_SIZE - NAMESPACE_VERSION_ZERO_PREFIX_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamespaceError {
    #[error("namespace must be {expected} bytes, got {0}", expected = NAMESPACE_SIZE)]
    InvalidSize(usize),
    #[error("unsupported namespace version {0}")]
    UnsupportedVersion(u8),
    #[error("namespace id must be {expected} bytes, got {0}", expected = NAMESPACE_ID_SIZE)]
    InvalidIdSize(usize),
    #[error(
        "version zero namespace id must start with {prefix} zero bytes",
        prefix = NAMESPACE_VERSION_ZERO_PREFIX_SIZE
    )]
    InvalidV0Prefix,
    #[error(
        "version zero sub id can be at most {max} bytes, got {0}",
        max = NAMESPACE_VERSION_ZERO_ID_SIZE
    )]
    SubIdTooLong(usize),
}

/// Versioned identifier partitioning blob data: one version byte followed by the id.
///
/// The default value is the empty namespace, which no constructor produces.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Namespace(Vec<u8>);

impl Namespace {
    pub fn new(version: u8, id: &[u8]) -> Result<Self, NamespaceError> {
        if version != NAMESPACE_VERSION_ZERO && version != NAMESPACE_VERSION_MAX {
            return Err(NamespaceError::UnsupportedVersion(version));
        }
        if id.len() != NAMESPACE_ID_SIZE {
            return Err(NamespaceError::InvalidIdSize(id.len()));
        }
        if version == NAMESPACE_VERSION_ZERO
            && id[..NAMESPACE_VERSION_ZERO_PREFIX_SIZE]
                .iter()
                .any(|b| *b != 0)
        {
            return Err(NamespaceError::InvalidV0Prefix);
        }
        Ok(Self::from_raw(version, id))
    }

    /// Version zero namespace from a sub id of at most [`NAMESPACE_VERSION_ZERO_ID_SIZE`] bytes.
    /// Shorter sub ids are left padded with zeros.
    pub fn new_v0(sub_id: &[u8]) -> Result<Self, NamespaceError> {
        if sub_id.len() > NAMESPACE_VERSION_ZERO_ID_SIZE {
            return Err(NamespaceError::SubIdTooLong(sub_id.len()));
        }
        let mut id = [0u8; NAMESPACE_ID_SIZE];
        id[NAMESPACE_ID_SIZE - sub_id.len()..].copy_from_slice(sub_id);
        Ok(Self::from_raw(NAMESPACE_VERSION_ZERO, &id))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NamespaceError> {
        if bytes.len() != NAMESPACE_SIZE {
            return Err(NamespaceError::InvalidSize(bytes.len()));
        }
        Self::new(bytes[0], &bytes[NAMESPACE_VERSION_SIZE..])
    }

    /// Namespace used to pad the gap between blobs of the same namespace holder.
    pub fn primary_reserved_padding() -> Self {
        let mut id = [0u8; NAMESPACE_ID_SIZE];
        id[NAMESPACE_ID_SIZE - 1] = 0xFF;
        Self::from_raw(NAMESPACE_VERSION_ZERO, &id)
    }

    /// Namespace of the shares filling the square after the last blob.
    pub fn tail_padding() -> Self {
        let mut id = [0xFFu8; NAMESPACE_ID_SIZE];
        id[NAMESPACE_ID_SIZE - 1] = 0xFE;
        Self::from_raw(NAMESPACE_VERSION_MAX, &id)
    }

    pub(crate) fn from_raw(version: u8, id: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(NAMESPACE_VERSION_SIZE + id.len());
        bytes.push(version);
        bytes.extend_from_slice(id);
        Self(bytes)
    }

    pub fn version(&self) -> u8 {
        self.0.first().copied().unwrap_or_default()
    }

    pub fn id(&self) -> &[u8] {
        self.0.get(NAMESPACE_VERSION_SIZE..).unwrap_or(&[])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn compare(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    pub fn is_primary_reserved_padding(&self) -> bool {
        *self == Self::primary_reserved_padding()
    }

    pub fn is_tail_padding(&self) -> bool {
        *self == Self::tail_padding()
    }
}

impl TryFrom<&[u8]> for Namespace {
    type Error = NamespaceError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(value)
    }
}

impl AsRef<[u8]> for Namespace {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty>");
        }
        write!(f, "v{}/0x{}", self.version(), const_hex::encode(self.id()))
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({self})")
    }
}
