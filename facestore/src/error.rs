use thiserror::Error;

use crate::IdentityId;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("facestore: invalid input: {0}")]
    InvalidInput(String),

    #[error("facestore: identity {0} already exists")]
    DuplicateIdentity(IdentityId),

    #[error("facestore: identity {0} not found")]
    NotFound(IdentityId),

    #[error("facestore: dimension mismatch: got {got}, want {want}")]
    DimensionMismatch { got: usize, want: usize },

    #[error("facestore: no embeddings supplied")]
    EmptyEmbedding,

    #[error("facestore: corrupt snapshot: {0}")]
    Corrupt(String),

    #[error("facestore: {0}")]
    Io(String),

    #[error("facestore: invalid format: {0}")]
    InvalidFormat(String),
}
