#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to serialize binary payload: {0}")]
    Serialize(bincode::Error),
    #[error("Failed to deserialize binary payload: {0}")]
    Deserialize(bincode::Error),
    #[error("Failed to serialize text payload: {0}")]
    SerializeText(serde_json::Error),
    #[error("Failed to deserialize text payload: {0}")]
    DeserializeText(serde_json::Error),
}

impl Error {
    /// Whether the failure happened while reading a payload, as opposed to writing one.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Deserialize(_) | Self::DeserializeText(_))
    }
}
