// internal
use super::builder::{namespace_padding_shares, ShareBuilder};
use super::{Share, ShareError, SHARE_VERSION_ONE, SUPPORTED_SHARE_VERSIONS};
use crate::blob::Blob;

/// Turns blobs into an ordered sequence of shares.
pub trait ShareSplitter {
    fn write(&mut self, blob: &Blob) -> Result<(), ShareError>;

    fn export(self) -> Vec<Share>
    where
        Self: Sized;
}

/// Lays out each blob as its own sequence of sparse shares, starting on a fresh share.
#[derive(Debug, Clone, Default)]
pub struct SparseShareSplitter {
    shares: Vec<Share>,
}

impl SparseShareSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` padding shares carrying the namespace and version of the last written
    /// share.
    pub fn write_namespace_padding_shares(&mut self, count: usize) -> Result<(), ShareError> {
        if count == 0 {
            return Ok(());
        }
        let last = self.shares.last().ok_or(ShareError::EmptySplitter)?;
        let padding = namespace_padding_shares(&last.namespace(), last.version(), count)?;
        self.shares.extend(padding);
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.shares.len()
    }
}

impl ShareSplitter for SparseShareSplitter {
    fn write(&mut self, blob: &Blob) -> Result<(), ShareError> {
        let share_version = blob.share_version();
        if !SUPPORTED_SHARE_VERSIONS.contains(&share_version) {
            return Err(ShareError::UnsupportedShareVersion(share_version));
        }
        let sequence_len = u32::try_from(blob.data_len())
            .map_err(|_| ShareError::SequenceTooLong(blob.data_len()))?;
        let namespace = blob.namespace();

        let mut builder = ShareBuilder::new(namespace, share_version, true)?;
        builder.write_sequence_len(sequence_len)?;
        if share_version == SHARE_VERSION_ONE {
            builder.write_signer(blob.signer().unwrap_or_default())?;
        }

        let start = self.shares.len();
        let mut remaining = blob.data();
        loop {
            let left_over = builder.add_data(remaining);
            if left_over.is_none() {
                builder.zero_pad_if_necessary();
            }
            self.shares.push(builder.build()?);
            match left_over {
                Some(rest) => {
                    remaining = rest;
                    builder = ShareBuilder::new(namespace, share_version, false)?;
                }
                None => break,
            }
        }

        tracing::trace!(
            "blob of {} bytes in namespace {} split into {} shares",
            blob.data_len(),
            namespace,
            self.shares.len() - start
        );
        Ok(())
    }

    fn export(self) -> Vec<Share> {
        self.shares
    }
}
