use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use poslens_facestore::{FaceStore, IdentityId, StoreConfig, StoreError};
use poslens_session::{Candidate, SessionConfig, SessionRegistry};

use crate::error::EngineError;
use crate::ports::{
    AuditSink, CustomerRecord, FaceProvider, IdentityCatalog, MediaExtractor, MediaLibrary,
    MediaSource, OrderHistory,
};
use crate::types::{FrameResponse, MatchEntry, Registration};

/// Configuration for a [`Recognizer`].
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    pub store: StoreConfig,
    pub session: SessionConfig,
    /// Orders returned with an active customer. Default: 5.
    pub history_limit: usize,
}

impl RecognizerConfig {
    pub fn new(store: StoreConfig) -> Self {
        Self {
            store,
            session: SessionConfig::default(),
            history_limit: 5,
        }
    }

    fn with_defaults(mut self) -> Self {
        if self.history_limit == 0 {
            self.history_limit = 5;
        }
        self
    }
}

/// External collaborators the recognizer delegates to.
pub struct Collaborators {
    pub provider: Arc<dyn FaceProvider>,
    pub extractor: Arc<dyn MediaExtractor>,
    pub media: Arc<dyn MediaLibrary>,
    pub catalog: Arc<dyn IdentityCatalog>,
    pub audit: Arc<dyn AuditSink>,
    pub orders: Arc<dyn OrderHistory>,
}

/// Identity resolution service for a set of POS terminals.
///
/// Owns the serving [`FaceStore`] handle and the per-terminal session
/// registry. Reads go through a shared immutable store instance;
/// administrative mutations are serialized, applied to a private clone,
/// persisted, and committed by swapping the handle — an in-flight query
/// sees either the pre- or the post-mutation store, never a torn one.
pub struct Recognizer {
    pub(crate) cfg: RecognizerConfig,
    pub(crate) store: RwLock<Arc<FaceStore>>,
    pub(crate) sessions: SessionRegistry,
    pub(crate) admin: Mutex<()>,
    pub(crate) ports: Collaborators,
}

impl Recognizer {
    /// Open the store from its snapshot and build the service.
    pub fn open(cfg: RecognizerConfig, ports: Collaborators) -> Result<Self, EngineError> {
        let cfg = cfg.with_defaults();
        let store = FaceStore::open(cfg.store.clone())?;
        let sessions = SessionRegistry::new(cfg.session.clone());
        Ok(Self {
            cfg,
            store: RwLock::new(Arc::new(store)),
            sessions,
            admin: Mutex::new(()),
            ports,
        })
    }

    /// The current serving store instance.
    pub fn store(&self) -> Arc<FaceStore> {
        self.store.read().unwrap().clone()
    }

    /// Swap in a mutated store instance. Callers hold the admin lock.
    pub(crate) fn commit(&self, next: FaceStore) {
        *self.store.write().unwrap() = Arc::new(next);
    }

    /// All registered identities as `(id, name)`.
    pub fn identities(&self) -> Vec<(IdentityId, String)> {
        self.store().identities()
    }

    // -----------------------------------------------------------------
    // Terminal-facing API
    // -----------------------------------------------------------------

    /// Evaluate one camera frame for a terminal at the current instant.
    pub fn submit_frame(&self, session_key: &str, image: &[u8]) -> Result<FrameResponse, EngineError> {
        self.submit_frame_at(session_key, image, Utc::now())
    }

    /// Evaluate one camera frame at an explicit instant.
    ///
    /// Only a malformed request is an error. A frame the provider cannot
    /// decode, zero detected faces, and sub-threshold matches all resolve
    /// to "no qualifying match" and feed the session's hysteresis.
    pub fn submit_frame_at(
        &self,
        session_key: &str,
        image: &[u8],
        now: DateTime<Utc>,
    ) -> Result<FrameResponse, EngineError> {
        if session_key.is_empty() {
            return Err(EngineError::InvalidInput("session key must not be empty".into()));
        }
        if image.is_empty() {
            return Err(EngineError::InvalidInput("empty frame payload".into()));
        }

        let detections = match self.ports.provider.detect(image) {
            Ok(d) => d,
            Err(e) => {
                warn!(error = %e, "frame not decodable, treating as no detections");
                Vec::new()
            }
        };

        let store = self.store();
        let mut matches: Vec<MatchEntry> = Vec::new();
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut resolved: HashMap<IdentityId, CustomerRecord> = HashMap::new();

        if !detections.is_empty() {
            let queries: Vec<&[f32]> = detections.iter().map(|d| d.embedding.as_slice()).collect();
            let hits = store.search(&queries).map_err(dimension_to_invalid)?;

            for hit in hits.into_iter().flatten() {
                let recognized = hit.distance <= self.cfg.session.recognition_threshold;
                matches.push(MatchEntry {
                    identity_id: hit.identity,
                    name: hit.name,
                    distance: hit.distance,
                    recognized,
                });
                if !recognized {
                    continue;
                }
                // An identity with no linked customer record is never
                // promoted to active.
                match self.ports.catalog.lookup_by_identity(hit.identity) {
                    Ok(Some(customer)) => {
                        resolved.insert(hit.identity, customer);
                        candidates.push(Candidate {
                            identity: hit.identity,
                            distance: hit.distance,
                        });
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(identity = hit.identity, error = %e, "catalog lookup failed, match not promoted");
                    }
                }
            }
        }

        let outcome = self.sessions.observe_at(session_key, &candidates, now);

        if let Some(due) = outcome.audit {
            // Resolved above; a candidate always has a customer record.
            if let Some(customer) = resolved.get(&due.identity) {
                if let Err(e) =
                    self.ports.audit.record_recognition(&customer.id, due.distance, now)
                {
                    warn!(identity = due.identity, error = %e, "audit write failed");
                }
            }
        }

        let mut active_customer = None;
        let mut purchase_history = Vec::new();
        if let Some(identity) = self.sessions.active(session_key) {
            let customer = match resolved.remove(&identity) {
                Some(c) => Some(c),
                // Tracked through the hysteresis window without a
                // qualifying match this frame: resolve it now.
                None => match self.ports.catalog.lookup_by_identity(identity) {
                    Ok(c) => c,
                    Err(e) => {
                        warn!(identity, error = %e, "catalog lookup failed for active customer");
                        None
                    }
                },
            };
            if let Some(customer) = customer {
                match self.ports.orders.recent_orders(&customer.id, self.cfg.history_limit) {
                    Ok(orders) => purchase_history = orders,
                    Err(e) => warn!(customer = %customer.id, error = %e, "order history unavailable"),
                }
                active_customer = Some(customer);
            }
        }

        Ok(FrameResponse {
            matches,
            active_customer,
            purchase_history,
            timestamp: now,
        })
    }

    /// Clear the terminal's active customer and debounce cache.
    pub fn reset_session(&self, session_key: &str) {
        self.sessions.reset(session_key);
    }

    // -----------------------------------------------------------------
    // Administrative API
    // -----------------------------------------------------------------

    /// Register a new identity from a media source and allocate its id.
    pub fn register(&self, name: &str, source: &MediaSource) -> Result<Registration, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput("customer name must not be empty".into()));
        }

        let embeddings = self.ports.extractor.extract(source)?;
        if embeddings.is_empty() {
            return Err(EngineError::EmptyEmbedding);
        }

        let _guard = self.admin.lock().unwrap();
        let mut next = (*self.store()).clone();
        let identity = next.next_id();
        let added = next.insert_new(identity, name, &embeddings)?;
        self.commit(next);

        info!(identity, name, added, "registered identity");
        Ok(Registration {
            identity,
            embeddings_added: added,
        })
    }

    /// Add embeddings from a media source to an existing identity.
    pub fn append(&self, identity: IdentityId, source: &MediaSource) -> Result<usize, EngineError> {
        let embeddings = self.ports.extractor.extract(source)?;
        if embeddings.is_empty() {
            return Err(EngineError::EmptyEmbedding);
        }

        let _guard = self.admin.lock().unwrap();
        let mut next = (*self.store()).clone();
        let added = next.append(identity, &embeddings)?;
        self.commit(next);

        info!(identity, added, "appended embeddings");
        Ok(added)
    }

    /// Rename an identity and retarget its raw media groupings.
    pub fn rename(&self, identity: IdentityId, new_name: &str) -> Result<(), EngineError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(EngineError::InvalidInput("name must not be empty".into()));
        }

        let _guard = self.admin.lock().unwrap();
        let mut next = (*self.store()).clone();
        let old_name = next
            .name_of(identity)
            .map(str::to_string)
            .ok_or(StoreError::NotFound(identity))?;
        if old_name == new_name {
            return Ok(());
        }
        next.rename(identity, new_name)?;
        self.commit(next);

        // Media groupings are keyed by (id, name); the id linkage stays
        // authoritative if the folder move fails.
        if let Err(e) = self.ports.media.retarget(identity, &old_name, new_name) {
            warn!(identity, error = %e, "media retarget failed");
        }

        info!(identity, old_name, new_name, "renamed identity");
        Ok(())
    }

    /// Remove an identity: every vector, its name, and (best effort) its
    /// customer link and raw media. Returns the number of vectors removed.
    pub fn remove(&self, identity: IdentityId) -> Result<usize, EngineError> {
        let _guard = self.admin.lock().unwrap();
        let mut next = (*self.store()).clone();
        let name = next
            .name_of(identity)
            .map(str::to_string)
            .ok_or(StoreError::NotFound(identity))?;
        let removed = next.remove(identity)?;
        self.commit(next);

        // The store mutation is already committed; collaborator cleanup is
        // best effort and must not turn a completed removal into an error.
        if let Err(e) = self.ports.catalog.unlink(identity) {
            warn!(identity, error = %e, "catalog unlink failed");
        }
        if let Err(e) = self.ports.media.discard(identity, &name) {
            warn!(identity, error = %e, "media discard failed");
        }

        info!(identity, name, removed, "removed identity");
        Ok(removed)
    }
}

fn dimension_to_invalid(e: StoreError) -> EngineError {
    match e {
        StoreError::DimensionMismatch { got, want } => {
            EngineError::InvalidInput(format!("embedding dimension {got}, want {want}"))
        }
        other => other.into(),
    }
}
