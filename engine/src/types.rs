use chrono::{DateTime, Utc};
use serde::Serialize;

use poslens_facestore::IdentityId;

use crate::ports::{CustomerRecord, OrderSummary};

/// One nearest-neighbor answer for one detected face in a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEntry {
    pub identity_id: IdentityId,
    pub name: String,
    pub distance: f32,
    /// Whether the distance is within the recognition threshold.
    pub recognized: bool,
}

/// Terminal-facing answer for one submitted frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameResponse {
    pub matches: Vec<MatchEntry>,
    pub active_customer: Option<CustomerRecord>,
    pub purchase_history: Vec<OrderSummary>,
    pub timestamp: DateTime<Utc>,
}

/// Result of registering a new identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub identity: IdentityId,
    pub embeddings_added: usize,
}

/// Confirmation returned by a completed merge. Transient; not persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeRecord {
    pub primary: IdentityId,
    pub duplicate: IdentityId,
    /// Embeddings re-derived from the duplicate's media and moved to the
    /// primary identity.
    pub moved: usize,
}

/// One identity successfully rebuilt from a media folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebuiltIdentity {
    pub identity: IdentityId,
    pub name: String,
    pub embeddings: usize,
}

/// One folder skipped during a rebuild, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFolder {
    pub folder: String,
    pub reason: String,
}

/// Wholesale summary of a best-effort rebuild.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RebuildReport {
    pub succeeded: Vec<RebuiltIdentity>,
    pub skipped: Vec<SkippedFolder>,
}
