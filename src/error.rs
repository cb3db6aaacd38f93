//! Error types for the frame analysis pipeline

use thiserror::Error;

/// Errors raised while building, meshing, assembling, or solving a frame model.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("duplicate uid '{0}'")]
    DuplicateUid(String),

    #[error("unknown uid '{0}'")]
    UnknownUid(String),

    #[error("beam '{0}' has fewer than two named nodes")]
    InsufficientSupport(String),

    #[error("zero-length segment between consecutive named nodes on beam '{0}'")]
    ZeroSegment(String),

    #[error("element on beam '{beam}' between {from} and {to} is missing {property}")]
    MissingProperty {
        beam: String,
        from: String,
        to: String,
        property: &'static str,
    },

    #[error("orientation 'up' vector is parallel to the element axis on beam '{0}'")]
    DegenerateOrientation(String),

    #[error("uid range is misordered: '{from}' does not precede '{to}' on beam '{beam}'")]
    MisorderedRange {
        beam: String,
        from: String,
        to: String,
    },

    #[error("internal dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("constrained system is singular: {0}")]
    SingularSystem(String),
}

/// Result type for frame analysis operations.
pub type FrameResult<T> = Result<T, FrameError>;
