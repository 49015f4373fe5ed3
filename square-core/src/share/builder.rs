// internal
use super::{
    InfoByte, Share, ShareError, SEQUENCE_LEN_BYTES, SHARE_INFO_BYTES, SHARE_SIZE,
    SHARE_VERSION_ONE, SIGNER_SIZE,
};
use crate::namespace::{Namespace, NAMESPACE_SIZE};

/// Accumulates the bytes of a single share, in wire order.
#[derive(Debug, Clone)]
pub struct ShareBuilder {
    is_first_share: bool,
    raw_share_data: Vec<u8>,
}

impl ShareBuilder {
    pub fn new(
        namespace: &Namespace,
        share_version: u8,
        is_first_share: bool,
    ) -> Result<Self, ShareError> {
        if namespace.as_bytes().len() != NAMESPACE_SIZE {
            return Err(ShareError::InvalidNamespace(namespace.as_bytes().len()));
        }
        let info = InfoByte::new(share_version, is_first_share)?;
        let mut raw_share_data = Vec::with_capacity(SHARE_SIZE);
        raw_share_data.extend_from_slice(namespace.as_bytes());
        raw_share_data.push(info.as_u8());
        Ok(Self {
            is_first_share,
            raw_share_data,
        })
    }

    pub fn write_sequence_len(&mut self, sequence_len: u32) -> Result<(), ShareError> {
        let expected_len = NAMESPACE_SIZE + SHARE_INFO_BYTES;
        if !self.is_first_share || self.raw_share_data.len() != expected_len {
            return Err(ShareError::NotSequenceStart);
        }
        self.raw_share_data
            .extend_from_slice(&sequence_len.to_be_bytes());
        Ok(())
    }

    /// Signers follow the sequence length, so this must be called right after
    /// [`Self::write_sequence_len`].
    pub fn write_signer(&mut self, signer: &[u8]) -> Result<(), ShareError> {
        if signer.len() != SIGNER_SIZE {
            return Err(ShareError::InvalidSignerSize(signer.len()));
        }
        let expected_len = NAMESPACE_SIZE + SHARE_INFO_BYTES + SEQUENCE_LEN_BYTES;
        if !self.is_first_share || self.raw_share_data.len() != expected_len {
            return Err(ShareError::NotSequenceStart);
        }
        self.raw_share_data.extend_from_slice(signer);
        Ok(())
    }

    /// Appends as much of `data` as fits and returns what is left, if anything.
    pub fn add_data<'d>(&mut self, data: &'d [u8]) -> Option<&'d [u8]> {
        let available = self.available_bytes();
        if data.len() <= available {
            self.raw_share_data.extend_from_slice(data);
            return None;
        }
        let (chunk, left_over) = data.split_at(available);
        self.raw_share_data.extend_from_slice(chunk);
        Some(left_over)
    }

    pub fn available_bytes(&self) -> usize {
        SHARE_SIZE - self.raw_share_data.len()
    }

    /// Fills the rest of the share with zeros, returning how many were written.
    pub fn zero_pad_if_necessary(&mut self) -> usize {
        let padding = self.available_bytes();
        self.raw_share_data.resize(SHARE_SIZE, 0);
        padding
    }

    pub fn build(self) -> Result<Share, ShareError> {
        Share::new(self.raw_share_data)
    }
}

/// First share of an empty sequence, used to pad a namespace up to an alignment boundary.
pub fn namespace_padding_share(
    namespace: &Namespace,
    share_version: u8,
) -> Result<Share, ShareError> {
    let mut builder = ShareBuilder::new(namespace, share_version, true)?;
    builder.write_sequence_len(0)?;
    if share_version == SHARE_VERSION_ONE {
        builder.write_signer(&[0; SIGNER_SIZE])?;
    }
    builder.zero_pad_if_necessary();
    builder.build()
}

pub fn namespace_padding_shares(
    namespace: &Namespace,
    share_version: u8,
    count: usize,
) -> Result<Vec<Share>, ShareError> {
    let share = namespace_padding_share(namespace, share_version)?;
    Ok(vec![share; count])
}
