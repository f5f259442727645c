//! Duplicate-identity reconciliation.
//!
//! A customer registered twice ends up with two identities, two embedding
//! sets and possibly two customer records. The merge re-derives the
//! duplicate's embeddings from its raw media, moves them under the primary
//! identity, removes the duplicate, and re-points the customer metadata.

use tracing::{info, warn};

use poslens_facestore::{IdentityId, StoreError};

use crate::engine::Recognizer;
use crate::error::EngineError;
use crate::types::MergeRecord;

impl Recognizer {
    /// Fold `duplicate` into `primary`.
    ///
    /// Embedding extraction and the append both happen before the
    /// duplicate is touched; any failure aborts the merge with the store
    /// and the duplicate's media intact. Order history is conserved:
    /// customer records are re-pointed or merged, never dropped.
    pub fn merge(
        &self,
        primary: IdentityId,
        duplicate: IdentityId,
    ) -> Result<MergeRecord, EngineError> {
        if primary == duplicate {
            return Err(EngineError::InvalidInput(
                "primary and duplicate must differ".into(),
            ));
        }

        let _guard = self.admin.lock().unwrap();
        let store = self.store();
        store
            .name_of(primary)
            .ok_or(StoreError::NotFound(primary))?;
        let duplicate_name = store
            .name_of(duplicate)
            .map(str::to_string)
            .ok_or(StoreError::NotFound(duplicate))?;

        // Re-derive everything first; an extraction failure must not
        // leave a half-moved identity.
        let sources = self.ports.media.sources(duplicate, &duplicate_name)?;
        let mut moved_vectors: Vec<Vec<f32>> = Vec::new();
        for source in &sources {
            moved_vectors.extend(self.ports.extractor.extract(source)?);
        }
        let moved = moved_vectors.len();

        let mut next = (*store).clone();
        if moved > 0 {
            next.append(primary, &moved_vectors)?;
        }
        next.remove(duplicate)?;
        self.commit(next);

        // Customer reconciliation: never drop metadata silently.
        let primary_customer = self.ports.catalog.lookup_by_identity(primary)?;
        let duplicate_customer = self.ports.catalog.lookup_by_identity(duplicate)?;
        match (primary_customer, duplicate_customer) {
            (Some(p), Some(d)) => {
                self.ports.catalog.merge_customer_records(&p.id, &d.id)?;
            }
            (None, Some(d)) => {
                self.ports.catalog.relink(primary, &d.id)?;
            }
            // Only the primary is linked, or neither: nothing to do.
            _ => {}
        }

        // The embeddings were already moved; the duplicate's raw media is
        // no longer a source of truth.
        if let Err(e) = self.ports.media.discard(duplicate, &duplicate_name) {
            warn!(duplicate, error = %e, "duplicate media discard failed");
        }

        info!(primary, duplicate, moved, "merged identities");
        Ok(MergeRecord {
            primary,
            duplicate,
            moved,
        })
    }
}
