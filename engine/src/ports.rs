//! Collaborator seams consumed by the engine.
//!
//! Everything behind these traits is external to the identity resolution
//! core: the face detection model, the customer CRUD layer, the audit and
//! order stores, and the raw media filesystem. Implementations must be
//! safe for concurrent use (`Send + Sync`).

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use poslens_facestore::IdentityId;

use crate::error::EngineError;

/// One detected face in a frame.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Fixed-dimension embedding vector.
    pub embedding: Vec<f32>,
    /// Bounding box as `[x, y, width, height]` in frame coordinates.
    pub bbox: [f32; 4],
}

/// Face detection and embedding extraction over a single encoded image.
///
/// Purely functional; the engine retains nothing across calls.
pub trait FaceProvider: Send + Sync {
    /// Zero or more detections per call. A decode failure is an error;
    /// the engine degrades it to "no detections" on the recognition path.
    fn detect(&self, image: &[u8]) -> Result<Vec<Detection>, EngineError>;
}

/// A raw media source embeddings can be derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// A recorded clip; frames are sampled and each detected face
    /// contributes an embedding.
    Video(PathBuf),
    /// A folder of still images.
    ImageFolder(PathBuf),
}

/// Bulk embedding derivation from a media source.
pub trait MediaExtractor: Send + Sync {
    fn extract(&self, source: &MediaSource) -> Result<Vec<Vec<f32>>, EngineError>;
}

/// Raw media groupings kept per identity, keyed by `(id, name)`.
pub trait MediaLibrary: Send + Sync {
    /// Every media source currently filed under the identity.
    fn sources(&self, identity: IdentityId, name: &str) -> Result<Vec<MediaSource>, EngineError>;

    /// Move the identity's groupings from the old name to the new one.
    fn retarget(&self, identity: IdentityId, old_name: &str, new_name: &str)
    -> Result<(), EngineError>;

    /// Drop the identity's raw media entirely.
    fn discard(&self, identity: IdentityId, name: &str) -> Result<(), EngineError>;
}

/// External customer metadata linked to an identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerRecord {
    /// Customer document id in the external store.
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    /// The linked face identity, if any.
    pub identity: Option<IdentityId>,
}

/// Customer metadata store keyed by identity id.
pub trait IdentityCatalog: Send + Sync {
    fn lookup_by_identity(&self, identity: IdentityId)
    -> Result<Option<CustomerRecord>, EngineError>;

    /// Point an existing customer record at a (different) identity.
    fn relink(&self, identity: IdentityId, customer_id: &str) -> Result<(), EngineError>;

    /// Detach any customer record linked to the identity.
    fn unlink(&self, identity: IdentityId) -> Result<(), EngineError>;

    /// Fold the duplicate customer record into the primary one. Order
    /// history and past recognition events must be re-pointed, never
    /// dropped.
    fn merge_customer_records(
        &self,
        primary_customer_id: &str,
        duplicate_customer_id: &str,
    ) -> Result<(), EngineError>;
}

/// Durable recognition audit trail.
pub trait AuditSink: Send + Sync {
    fn record_recognition(
        &self,
        customer_id: &str,
        confidence: f32,
        at: DateTime<Utc>,
    ) -> Result<(), EngineError>;
}

/// A past order, summarized for the terminal UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub order_number: String,
    pub created_at: DateTime<Utc>,
    pub total_amount: f64,
}

/// Read access to a customer's order history.
pub trait OrderHistory: Send + Sync {
    fn recent_orders(
        &self,
        customer_id: &str,
        limit: usize,
    ) -> Result<Vec<OrderSummary>, EngineError>;
}
