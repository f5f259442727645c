use thiserror::Error;

use poslens_facestore::StoreError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("engine: {0}")]
    Store(#[from] StoreError),

    #[error("engine: invalid input: {0}")]
    InvalidInput(String),

    #[error("engine: source yielded no usable embeddings")]
    EmptyEmbedding,

    #[error("engine: face provider: {0}")]
    Provider(String),

    #[error("engine: identity catalog: {0}")]
    Catalog(String),

    #[error("engine: media library: {0}")]
    Media(String),

    #[error("engine: audit sink: {0}")]
    Audit(String),
}
