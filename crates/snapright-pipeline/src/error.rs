//! Failure taxonomy for the conversion pipeline.

use snapright_core::{ConstraintError, DecodeError, EncodeError};
use thiserror::Error;

/// Errors from the image acquisition surface.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// The host offers no acquisition capability.
    #[error("Image acquisition is not supported by this host")]
    Unsupported,

    /// The prompt completed without producing any input.
    #[error("No input was obtained")]
    NoInput,

    /// A newer acquisition superseded this session; its result is
    /// discarded rather than delivered.
    #[error("Acquisition superseded by a newer request")]
    Superseded,

    /// The host capability failed outright.
    #[error("Acquisition failed: {0}")]
    Failed(String),
}

/// A single conversion's failure, as recorded in its batch slot.
///
/// Metadata read failures never appear here: the orientation resolver
/// maps them to the identity orientation instead of surfacing them.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Acquisition(#[from] AcquireError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
