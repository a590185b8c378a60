//! Error types shared across the workspace.
//!
//! Each layer defines its own typed errors; the domain only knows about
//! form validation and live-frame decoding.

/// A form failed its presence checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required field was left empty.
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// A live-channel frame could not be turned into a [`LiveMessage`](crate::live::LiveMessage).
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The frame carried a `type` tag this client does not handle.
    #[error("unknown live message type `{0}`")]
    UnknownType(String),

    /// The frame was not valid JSON or lacked required fields.
    #[error("malformed live message")]
    Malformed(#[source] serde_json::Error),
}
