use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use poslens_facestore::{FaceStore, IdentityId, Metric, StoreConfig};

use crate::engine::{Collaborators, Recognizer, RecognizerConfig};
use crate::error::EngineError;
use crate::ports::{
    AuditSink, CustomerRecord, Detection, FaceProvider, IdentityCatalog, MediaExtractor,
    MediaLibrary, MediaSource, OrderHistory, OrderSummary,
};

// ---------------------------------------------------------------------------
// Mock collaborators
// ---------------------------------------------------------------------------

/// Provider fed with a queue of pre-baked frames. `None` simulates an
/// undecodable frame.
struct QueueProvider {
    frames: Mutex<VecDeque<Option<Vec<Detection>>>>,
}

impl QueueProvider {
    fn new() -> Self {
        Self {
            frames: Mutex::new(VecDeque::new()),
        }
    }

    fn push_faces(&self, embeddings: &[Vec<f32>]) {
        let detections = embeddings
            .iter()
            .map(|e| Detection {
                embedding: e.clone(),
                bbox: [0.0, 0.0, 64.0, 64.0],
            })
            .collect();
        self.frames.lock().unwrap().push_back(Some(detections));
    }

    fn push_undecodable(&self) {
        self.frames.lock().unwrap().push_back(None);
    }
}

impl FaceProvider for QueueProvider {
    fn detect(&self, _image: &[u8]) -> Result<Vec<Detection>, EngineError> {
        match self.frames.lock().unwrap().pop_front() {
            Some(Some(detections)) => Ok(detections),
            Some(None) => Err(EngineError::Provider("cannot decode frame".into())),
            None => Ok(Vec::new()),
        }
    }
}

/// Extractor keyed by the source's final path component.
struct MapExtractor {
    by_label: Mutex<HashMap<String, Vec<Vec<f32>>>>,
    failing: Mutex<HashSet<String>>,
}

impl MapExtractor {
    fn new() -> Self {
        Self {
            by_label: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    fn set(&self, label: &str, embeddings: Vec<Vec<f32>>) {
        self.by_label.lock().unwrap().insert(label.to_string(), embeddings);
    }

    fn fail(&self, label: &str) {
        self.failing.lock().unwrap().insert(label.to_string());
    }
}

fn source_label(source: &MediaSource) -> String {
    let path = match source {
        MediaSource::Video(p) | MediaSource::ImageFolder(p) => p,
    };
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}

impl MediaExtractor for MapExtractor {
    fn extract(&self, source: &MediaSource) -> Result<Vec<Vec<f32>>, EngineError> {
        let label = source_label(source);
        if self.failing.lock().unwrap().contains(&label) {
            return Err(EngineError::Media(format!("unreadable source {label}")));
        }
        Ok(self.by_label.lock().unwrap().get(&label).cloned().unwrap_or_default())
    }
}

/// In-memory media library recording retargets and discards.
struct MemoryMedia {
    sources: Mutex<HashMap<IdentityId, Vec<MediaSource>>>,
    retargets: Mutex<Vec<(IdentityId, String, String)>>,
    discarded: Mutex<Vec<IdentityId>>,
}

impl MemoryMedia {
    fn new() -> Self {
        Self {
            sources: Mutex::new(HashMap::new()),
            retargets: Mutex::new(Vec::new()),
            discarded: Mutex::new(Vec::new()),
        }
    }

    fn file(&self, identity: IdentityId, source: MediaSource) {
        self.sources.lock().unwrap().entry(identity).or_default().push(source);
    }
}

impl MediaLibrary for MemoryMedia {
    fn sources(&self, identity: IdentityId, _name: &str) -> Result<Vec<MediaSource>, EngineError> {
        Ok(self.sources.lock().unwrap().get(&identity).cloned().unwrap_or_default())
    }

    fn retarget(
        &self,
        identity: IdentityId,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), EngineError> {
        self.retargets
            .lock()
            .unwrap()
            .push((identity, old_name.to_string(), new_name.to_string()));
        Ok(())
    }

    fn discard(&self, identity: IdentityId, _name: &str) -> Result<(), EngineError> {
        self.sources.lock().unwrap().remove(&identity);
        self.discarded.lock().unwrap().push(identity);
        Ok(())
    }
}

/// Catalog over a plain map, recording every reconciliation call.
struct MapCatalog {
    by_identity: Mutex<HashMap<IdentityId, CustomerRecord>>,
    merged: Mutex<Vec<(String, String)>>,
    relinked: Mutex<Vec<(IdentityId, String)>>,
    unlinked: Mutex<Vec<IdentityId>>,
    fail_unlink: Mutex<bool>,
}

impl MapCatalog {
    fn new() -> Self {
        Self {
            by_identity: Mutex::new(HashMap::new()),
            merged: Mutex::new(Vec::new()),
            relinked: Mutex::new(Vec::new()),
            unlinked: Mutex::new(Vec::new()),
            fail_unlink: Mutex::new(false),
        }
    }

    fn link(&self, identity: IdentityId, customer_id: &str, full_name: &str) {
        self.by_identity.lock().unwrap().insert(
            identity,
            CustomerRecord {
                id: customer_id.to_string(),
                full_name: full_name.to_string(),
                phone: String::new(),
                email: String::new(),
                identity: Some(identity),
            },
        );
    }
}

impl IdentityCatalog for MapCatalog {
    fn lookup_by_identity(
        &self,
        identity: IdentityId,
    ) -> Result<Option<CustomerRecord>, EngineError> {
        Ok(self.by_identity.lock().unwrap().get(&identity).cloned())
    }

    fn relink(&self, identity: IdentityId, customer_id: &str) -> Result<(), EngineError> {
        let mut map = self.by_identity.lock().unwrap();
        let old_key = map
            .iter()
            .find(|(_, c)| c.id == customer_id)
            .map(|(k, _)| *k);
        if let Some(old_key) = old_key {
            let mut record = map.remove(&old_key).unwrap();
            record.identity = Some(identity);
            map.insert(identity, record);
        }
        self.relinked.lock().unwrap().push((identity, customer_id.to_string()));
        Ok(())
    }

    fn unlink(&self, identity: IdentityId) -> Result<(), EngineError> {
        if *self.fail_unlink.lock().unwrap() {
            return Err(EngineError::Catalog("customer store unavailable".into()));
        }
        self.by_identity.lock().unwrap().remove(&identity);
        self.unlinked.lock().unwrap().push(identity);
        Ok(())
    }

    fn merge_customer_records(
        &self,
        primary_customer_id: &str,
        duplicate_customer_id: &str,
    ) -> Result<(), EngineError> {
        let mut map = self.by_identity.lock().unwrap();
        map.retain(|_, c| c.id != duplicate_customer_id);
        self.merged
            .lock()
            .unwrap()
            .push((primary_customer_id.to_string(), duplicate_customer_id.to_string()));
        Ok(())
    }
}

struct RecordingAudit {
    writes: Mutex<Vec<(String, f32, DateTime<Utc>)>>,
}

impl RecordingAudit {
    fn new() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
        }
    }

    fn count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

impl AuditSink for RecordingAudit {
    fn record_recognition(
        &self,
        customer_id: &str,
        confidence: f32,
        at: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        self.writes.lock().unwrap().push((customer_id.to_string(), confidence, at));
        Ok(())
    }
}

struct StaticOrders {
    by_customer: Mutex<HashMap<String, Vec<OrderSummary>>>,
}

impl StaticOrders {
    fn new() -> Self {
        Self {
            by_customer: Mutex::new(HashMap::new()),
        }
    }

    fn set(&self, customer_id: &str, orders: Vec<OrderSummary>) {
        self.by_customer.lock().unwrap().insert(customer_id.to_string(), orders);
    }
}

impl OrderHistory for StaticOrders {
    fn recent_orders(
        &self,
        customer_id: &str,
        limit: usize,
    ) -> Result<Vec<OrderSummary>, EngineError> {
        let mut orders = self
            .by_customer
            .lock()
            .unwrap()
            .get(customer_id)
            .cloned()
            .unwrap_or_default();
        orders.truncate(limit);
        Ok(orders)
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Rig {
    recognizer: Recognizer,
    provider: Arc<QueueProvider>,
    extractor: Arc<MapExtractor>,
    media: Arc<MemoryMedia>,
    catalog: Arc<MapCatalog>,
    audit: Arc<RecordingAudit>,
    orders: Arc<StaticOrders>,
    _tmp: tempfile::TempDir,
}

fn rig() -> Rig {
    let tmp = tempfile::tempdir().unwrap();
    let provider = Arc::new(QueueProvider::new());
    let extractor = Arc::new(MapExtractor::new());
    let media = Arc::new(MemoryMedia::new());
    let catalog = Arc::new(MapCatalog::new());
    let audit = Arc::new(RecordingAudit::new());
    let orders = Arc::new(StaticOrders::new());

    let cfg = RecognizerConfig::new(StoreConfig {
        dir: tmp.path().join("store"),
        dim: 4,
        metric: Metric::Euclidean,
    });

    let recognizer = Recognizer::open(
        cfg,
        Collaborators {
            provider: provider.clone(),
            extractor: extractor.clone(),
            media: media.clone(),
            catalog: catalog.clone(),
            audit: audit.clone(),
            orders: orders.clone(),
        },
    )
    .unwrap();

    Rig {
        recognizer,
        provider,
        extractor,
        media,
        catalog,
        audit,
        orders,
        _tmp: tmp,
    }
}

fn t(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
}

fn e1() -> Vec<f32> {
    vec![1.0, 0.0, 0.0, 0.0]
}

fn e2() -> Vec<f32> {
    vec![0.0, 1.0, 0.0, 0.0]
}

fn video(name: &str) -> MediaSource {
    MediaSource::Video(Path::new(name).to_path_buf())
}

fn order(number: &str, amount: f64) -> OrderSummary {
    OrderSummary {
        order_number: number.to_string(),
        created_at: t(0),
        total_amount: amount,
    }
}

/// Register an identity backed by the given embeddings and optionally a
/// linked customer record.
fn register_customer(
    r: &Rig,
    name: &str,
    embeddings: Vec<Vec<f32>>,
    customer_id: Option<&str>,
) -> IdentityId {
    let label = format!("{name}.mp4");
    r.extractor.set(&label, embeddings);
    let registration = r.recognizer.register(name, &video(&label)).unwrap();
    r.media.file(registration.identity, video(&label));
    if let Some(customer_id) = customer_id {
        r.catalog.link(registration.identity, customer_id, name);
    }
    registration.identity
}

// ---------------------------------------------------------------------------
// Terminal flow
// ---------------------------------------------------------------------------

#[test]
fn frame_scenario_recognize_track_and_hold() {
    let r = rig();
    let id = register_customer(&r, "Anh", vec![e1()], Some("c-1"));
    r.orders.set("c-1", vec![order("ORD-1", 120.0), order("ORD-2", 80.0)]);

    // Frame 1: exact hit. Idle -> Tracking, audit written, history shown.
    r.provider.push_faces(&[e1()]);
    let resp = r.recognizer.submit_frame_at("till-1", b"frame", t(0)).unwrap();
    assert_eq!(resp.matches.len(), 1);
    assert_eq!(resp.matches[0].identity_id, id);
    assert!(resp.matches[0].recognized);
    assert!(resp.matches[0].distance.abs() < 1e-6);
    assert_eq!(resp.active_customer.as_ref().unwrap().id, "c-1");
    assert_eq!(resp.purchase_history.len(), 2);
    assert_eq!(r.audit.count(), 1);

    // Frame 2: same face drifts out of threshold. Within the hysteresis
    // window the customer must not be demoted.
    r.provider.push_faces(&[e2()]);
    let resp = r.recognizer.submit_frame_at("till-1", b"frame", t(2)).unwrap();
    assert!(!resp.matches[0].recognized);
    assert_eq!(resp.active_customer.as_ref().unwrap().id, "c-1");

    // Frame 3: still nothing, past the 5s window. Customer cleared.
    r.provider.push_faces(&[]);
    let resp = r.recognizer.submit_frame_at("till-1", b"frame", t(8)).unwrap();
    assert!(resp.active_customer.is_none());
    assert!(resp.purchase_history.is_empty());
}

#[test]
fn audit_writes_are_debounced() {
    let r = rig();
    register_customer(&r, "Anh", vec![e1()], Some("c-1"));

    for secs in [0, 3, 9] {
        r.provider.push_faces(&[e1()]);
        r.recognizer.submit_frame_at("till-1", b"frame", t(secs)).unwrap();
    }
    assert_eq!(r.audit.count(), 1, "10s interval admits exactly one write");

    r.provider.push_faces(&[e1()]);
    r.recognizer.submit_frame_at("till-1", b"frame", t(11)).unwrap();
    assert_eq!(r.audit.count(), 2);
}

#[test]
fn unlinked_identity_is_never_promoted() {
    let r = rig();
    register_customer(&r, "Anh", vec![e1()], None);

    r.provider.push_faces(&[e1()]);
    let resp = r.recognizer.submit_frame_at("till-1", b"frame", t(0)).unwrap();

    assert!(resp.matches[0].recognized, "the match itself is reported");
    assert!(resp.active_customer.is_none());
    assert_eq!(r.audit.count(), 0);
}

#[test]
fn undecodable_frame_degrades_to_no_detections() {
    let r = rig();
    register_customer(&r, "Anh", vec![e1()], Some("c-1"));

    r.provider.push_undecodable();
    let resp = r.recognizer.submit_frame_at("till-1", b"frame", t(0)).unwrap();
    assert!(resp.matches.is_empty());
    assert!(resp.active_customer.is_none());
}

#[test]
fn empty_payload_is_rejected() {
    let r = rig();
    assert!(matches!(
        r.recognizer.submit_frame_at("till-1", b"", t(0)),
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        r.recognizer.submit_frame_at("", b"frame", t(0)),
        Err(EngineError::InvalidInput(_))
    ));
}

#[test]
fn reset_session_clears_active_customer() {
    let r = rig();
    register_customer(&r, "Anh", vec![e1()], Some("c-1"));

    r.provider.push_faces(&[e1()]);
    r.recognizer.submit_frame_at("till-1", b"frame", t(0)).unwrap();

    r.recognizer.reset_session("till-1");

    r.provider.push_faces(&[]);
    let resp = r.recognizer.submit_frame_at("till-1", b"frame", t(1)).unwrap();
    assert!(resp.active_customer.is_none());
}

#[test]
fn frame_response_serializes() {
    let r = rig();
    register_customer(&r, "Anh", vec![e1()], Some("c-1"));

    r.provider.push_faces(&[e1()]);
    let resp = r.recognizer.submit_frame_at("till-1", b"frame", t(0)).unwrap();

    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["matches"][0]["recognized"], serde_json::json!(true));
    assert_eq!(json["active_customer"]["id"], serde_json::json!("c-1"));
}

// ---------------------------------------------------------------------------
// Administration
// ---------------------------------------------------------------------------

#[test]
fn register_allocates_sequential_ids() {
    let r = rig();
    let a = register_customer(&r, "Anh", vec![e1()], None);
    let b = register_customer(&r, "Binh", vec![e2()], None);
    assert_eq!(a, 1);
    assert_eq!(b, 2);
    assert_eq!(r.recognizer.identities().len(), 2);
}

#[test]
fn register_rejects_empty_yield_and_blank_name() {
    let r = rig();
    r.extractor.set("empty.mp4", vec![]);
    assert!(matches!(
        r.recognizer.register("Anh", &video("empty.mp4")),
        Err(EngineError::EmptyEmbedding)
    ));
    assert!(matches!(
        r.recognizer.register("   ", &video("empty.mp4")),
        Err(EngineError::InvalidInput(_))
    ));
}

#[test]
fn append_grows_an_existing_identity() {
    let r = rig();
    let id = register_customer(&r, "Anh", vec![e1()], None);

    r.extractor.set("more.mp4", vec![e2()]);
    let added = r.recognizer.append(id, &video("more.mp4")).unwrap();
    assert_eq!(added, 1);
    assert_eq!(r.recognizer.store().count_for(id), 2);

    assert!(matches!(
        r.recognizer.append(99, &video("more.mp4")),
        Err(EngineError::Store(_))
    ));
}

#[test]
fn rename_updates_store_and_retargets_media() {
    let r = rig();
    let id = register_customer(&r, "Anh", vec![e1()], None);

    r.recognizer.rename(id, "Anh Tran").unwrap();
    assert_eq!(r.recognizer.store().name_of(id), Some("Anh Tran"));
    assert_eq!(
        r.media.retargets.lock().unwrap().as_slice(),
        &[(id, "Anh".to_string(), "Anh Tran".to_string())]
    );
}

#[test]
fn remove_survives_catalog_outage() {
    let r = rig();
    let id = register_customer(&r, "Anh", vec![e1()], Some("c-1"));
    *r.catalog.fail_unlink.lock().unwrap() = true;

    // The store mutation is already committed when the unlink runs; a
    // catalog outage must not report the removal as failed.
    let removed = r.recognizer.remove(id).unwrap();
    assert_eq!(removed, 1);
    assert!(!r.recognizer.store().contains(id));
    assert!(r.catalog.unlinked.lock().unwrap().is_empty());
}

#[test]
fn remove_unlinks_customer_and_discards_media() {
    let r = rig();
    let id = register_customer(&r, "Anh", vec![e1(), e2()], Some("c-1"));

    let removed = r.recognizer.remove(id).unwrap();
    assert_eq!(removed, 2);
    assert!(!r.recognizer.store().contains(id));
    assert_eq!(r.catalog.unlinked.lock().unwrap().as_slice(), &[id]);
    assert_eq!(r.media.discarded.lock().unwrap().as_slice(), &[id]);

    assert!(matches!(r.recognizer.remove(id), Err(EngineError::Store(_))));
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

#[test]
fn merge_conserves_embeddings_and_removes_duplicate() {
    let r = rig();
    let primary = register_customer(&r, "Anh", vec![e1(), e2()], Some("c-1"));
    let duplicate = register_customer(&r, "Anh D", vec![vec![0.0, 0.0, 1.0, 0.0]], Some("c-2"));

    // The duplicate's raw media re-derives two embeddings.
    r.extractor.set(
        "dup-extra",
        vec![vec![0.0, 0.0, 0.9, 0.1], vec![0.0, 0.0, 0.8, 0.2]],
    );
    r.media.file(duplicate, MediaSource::ImageFolder(Path::new("dup-extra").to_path_buf()));

    let record = r.recognizer.merge(primary, duplicate).unwrap();
    // Both filed sources contribute: the registration video (1) plus the
    // extra folder (2).
    assert_eq!(record.moved, 3);

    let store = r.recognizer.store();
    assert_eq!(store.count_for(primary), 5, "m + n vectors after the merge");
    assert!(!store.contains(duplicate));

    // Both sides were linked: the customer records are merged.
    assert_eq!(
        r.catalog.merged.lock().unwrap().as_slice(),
        &[("c-1".to_string(), "c-2".to_string())]
    );
    assert_eq!(r.media.discarded.lock().unwrap().as_slice(), &[duplicate]);
}

#[test]
fn merge_relinks_when_only_duplicate_has_customer() {
    let r = rig();
    let primary = register_customer(&r, "Anh", vec![e1()], None);
    let duplicate = register_customer(&r, "Anh D", vec![e2()], Some("c-2"));

    r.recognizer.merge(primary, duplicate).unwrap();

    assert_eq!(
        r.catalog.relinked.lock().unwrap().as_slice(),
        &[(primary, "c-2".to_string())]
    );
    let relinked = r.catalog.lookup_by_identity(primary).unwrap().unwrap();
    assert_eq!(relinked.id, "c-2");
}

#[test]
fn merge_aborts_without_touching_the_duplicate() {
    let r = rig();
    let primary = register_customer(&r, "Anh", vec![e1()], None);
    let duplicate = register_customer(&r, "Anh D", vec![e2()], None);

    r.extractor.fail("bad-folder");
    r.media.file(duplicate, MediaSource::ImageFolder(Path::new("bad-folder").to_path_buf()));

    assert!(r.recognizer.merge(primary, duplicate).is_err());

    let store = r.recognizer.store();
    assert!(store.contains(duplicate), "failed merge must not delete the duplicate");
    assert_eq!(store.count_for(primary), 1);
    assert!(r.media.discarded.lock().unwrap().is_empty());
}

#[test]
fn merge_rejects_equal_and_unknown_ids() {
    let r = rig();
    let id = register_customer(&r, "Anh", vec![e1()], None);

    assert!(matches!(
        r.recognizer.merge(id, id),
        Err(EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        r.recognizer.merge(id, 42),
        Err(EngineError::Store(_))
    ));
}

// ---------------------------------------------------------------------------
// Rebuild
// ---------------------------------------------------------------------------

#[test]
fn rebuild_is_best_effort_per_folder() {
    let r = rig();
    let root = r._tmp.path().join("media");
    for folder in ["1_Alice", "2_Bob", "3_Carol", "notes"] {
        fs::create_dir_all(root.join(folder)).unwrap();
    }

    r.extractor.set("1_Alice", vec![e1()]);
    r.extractor.set("2_Bob", vec![e2(), vec![0.1, 0.9, 0.0, 0.0]]);
    r.extractor.fail("3_Carol");

    let report = r.recognizer.rebuild(&root, true).unwrap();

    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(report.succeeded[0].identity, 1);
    assert_eq!(report.succeeded[0].name, "Alice");
    assert_eq!(report.succeeded[1].embeddings, 2);

    // "3_Carol" failed extraction, "notes" does not parse.
    assert_eq!(report.skipped.len(), 2);

    let store = r.recognizer.store();
    assert_eq!(store.identities().len(), 2);
    assert_eq!(store.count_for(2), 2);
}

#[test]
fn rebuild_reinit_drops_previous_identities() {
    let r = rig();
    let stale = register_customer(&r, "Stale", vec![e1()], None);

    let root = r._tmp.path().join("media");
    fs::create_dir_all(root.join("5_Fresh")).unwrap();
    r.extractor.set("5_Fresh", vec![e2()]);

    let report = r.recognizer.rebuild(&root, true).unwrap();
    assert_eq!(report.succeeded.len(), 1);

    let store = r.recognizer.store();
    assert!(!store.contains(stale));
    assert!(store.contains(5));
}

#[test]
fn rebuild_without_reinit_appends_to_existing_ids() {
    let r = rig();
    let id = register_customer(&r, "Anh", vec![e1()], None);
    assert_eq!(id, 1);

    let root = r._tmp.path().join("media");
    fs::create_dir_all(root.join("1_Anh")).unwrap();
    r.extractor.set("1_Anh", vec![e2()]);

    r.recognizer.rebuild(&root, false).unwrap();

    let store = r.recognizer.store();
    assert_eq!(store.count_for(1), 2);
    assert_eq!(store.name_of(1), Some("Anh"));
}

#[test]
fn rebuild_missing_root_is_invalid_input() {
    let r = rig();
    let missing = r._tmp.path().join("nowhere");
    assert!(matches!(
        r.recognizer.rebuild(&missing, false),
        Err(EngineError::InvalidInput(_))
    ));
}

#[test]
fn failed_reinit_rebuild_preserves_snapshot() {
    let r = rig();
    let id = register_customer(&r, "Anh", vec![e1()], None);

    let missing = r._tmp.path().join("nowhere");
    assert!(r.recognizer.rebuild(&missing, true).is_err());

    assert!(r.recognizer.store().contains(id));

    // The durable snapshot must survive too: a fresh open after the failed
    // rebuild still serves the identity.
    let reopened = FaceStore::open(StoreConfig {
        dir: r._tmp.path().join("store"),
        dim: 4,
        metric: Metric::Euclidean,
    })
    .unwrap();
    assert!(reopened.contains(id));
    assert_eq!(reopened.count_for(id), 1);
}
