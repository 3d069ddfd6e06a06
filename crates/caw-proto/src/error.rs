//! Error types for the caw-proto crate.

use thiserror::Error;

/// Errors that can occur while packing or unpacking payloads.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtoError {
    /// Failed to encode a message.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Failed to decode a message.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// The payload carries a different schema than the one expected.
    #[error("payload type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Full name of the expected schema.
        expected: String,
        /// Type URL found in the payload.
        actual: String,
    },

    /// Unknown event type value.
    #[error("unknown event type: {0}")]
    UnknownEventType(i32),

    /// Frame was produced by a newer protocol revision.
    #[error("unsupported wire version: {found} (max supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the frame.
        found: u32,
        /// Highest version this build understands.
        supported: u32,
    },
}

impl From<prost::DecodeError> for ProtoError {
    fn from(err: prost::DecodeError) -> Self {
        Self::Decoding(err.to_string())
    }
}

impl From<prost::EncodeError> for ProtoError {
    fn from(err: prost::EncodeError) -> Self {
        Self::Encoding(err.to_string())
    }
}
