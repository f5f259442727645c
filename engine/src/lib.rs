pub mod engine;
pub mod error;
pub mod ports;
pub mod types;

mod merge;
mod rebuild;

pub use engine::{Collaborators, Recognizer, RecognizerConfig};
pub use error::EngineError;
pub use ports::{
    AuditSink, CustomerRecord, Detection, FaceProvider, IdentityCatalog, MediaExtractor,
    MediaLibrary, MediaSource, OrderHistory, OrderSummary,
};
pub use types::{
    FrameResponse, MatchEntry, MergeRecord, RebuildReport, RebuiltIdentity, Registration,
    SkippedFolder,
};

#[cfg(test)]
mod tests;
