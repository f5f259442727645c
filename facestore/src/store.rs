use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::IdentityId;
use crate::error::StoreError;
use crate::flat::FlatIndex;
use crate::metric::Metric;
use crate::snapshot;

const INDEX_FILE: &str = "embeddings.idx";
const NAMES_FILE: &str = "identities.json";

/// Configuration for opening a [`FaceStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the snapshot artifacts.
    pub dir: PathBuf,
    /// Embedding dimension, fixed for the lifetime of the store.
    pub dim: usize,
    /// Distance metric for nearest-neighbor queries.
    pub metric: Metric,
}

/// One nearest-neighbor answer for one query vector.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub identity: IdentityId,
    pub name: String,
    pub distance: f32,
}

/// Face-embedding store: an exact nearest-neighbor index keyed by integer
/// identity plus the id→name map, persisted together as one unit of
/// consistency.
///
/// Every mutating operation persists synchronously before reporting
/// success. The store itself is a plain value; concurrent serving is done
/// by cloning, mutating the clone, and swapping the handle (see the engine
/// crate), so readers never observe a half-applied mutation.
#[derive(Debug, Clone)]
pub struct FaceStore {
    cfg: StoreConfig,
    index: FlatIndex,
    names: BTreeMap<IdentityId, String>,
}

impl FaceStore {
    /// Open the store from its snapshot directory, creating an empty store
    /// when no snapshot exists.
    ///
    /// The id sets of the index and the name map must match; divergence is
    /// reported as [`StoreError::Corrupt`] instead of being served.
    pub fn open(cfg: StoreConfig) -> Result<Self, StoreError> {
        if cfg.dim == 0 {
            return Err(StoreError::InvalidInput(
                "embedding dimension must be positive".into(),
            ));
        }
        fs::create_dir_all(&cfg.dir).map_err(|e| StoreError::Io(e.to_string()))?;

        let index_path = cfg.dir.join(INDEX_FILE);
        let index = if index_path.exists() {
            let mut f = fs::File::open(&index_path).map_err(|e| StoreError::Io(e.to_string()))?;
            snapshot::load_index(&mut f, cfg.dim, cfg.metric)?
        } else {
            FlatIndex::new(cfg.dim, cfg.metric)
        };

        let names_path = cfg.dir.join(NAMES_FILE);
        let names = if names_path.exists() {
            let mut f = fs::File::open(&names_path).map_err(|e| StoreError::Io(e.to_string()))?;
            snapshot::load_names(&mut f)?
        } else {
            BTreeMap::new()
        };

        let store = Self { cfg, index, names };
        store.check_integrity()?;
        Ok(store)
    }

    fn check_integrity(&self) -> Result<(), StoreError> {
        let index_ids = self.index.identities();
        let name_ids: std::collections::BTreeSet<IdentityId> =
            self.names.keys().copied().collect();
        if index_ids != name_ids {
            let only_index: Vec<_> = index_ids.difference(&name_ids).collect();
            let only_names: Vec<_> = name_ids.difference(&index_ids).collect();
            return Err(StoreError::Corrupt(format!(
                "index/name id sets diverge: index-only {only_index:?}, name-only {only_names:?}"
            )));
        }
        Ok(())
    }

    /// 1-nearest-neighbor for each query vector. Pure read.
    ///
    /// Each entry is `None` when the index holds no vectors.
    pub fn search(&self, queries: &[&[f32]]) -> Result<Vec<Option<SearchHit>>, StoreError> {
        let mut out = Vec::with_capacity(queries.len());
        for q in queries {
            let hit = match self.index.nearest(q)? {
                None => None,
                Some((distance, identity)) => Some(SearchHit {
                    identity,
                    name: self
                        .names
                        .get(&identity)
                        .cloned()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    distance,
                }),
            };
            out.push(hit);
        }
        Ok(out)
    }

    /// Convenience wrapper for a single query.
    pub fn search_one(&self, query: &[f32]) -> Result<Option<SearchHit>, StoreError> {
        Ok(self.search(&[query])?.pop().flatten())
    }

    /// Register a brand-new identity with its initial vectors.
    ///
    /// Fails with [`StoreError::DuplicateIdentity`] if the id is already
    /// present and with [`StoreError::EmptyEmbedding`] when no vectors are
    /// supplied (an identity with zero vectors must never exist).
    pub fn insert_new(
        &mut self,
        identity: IdentityId,
        name: &str,
        vectors: &[Vec<f32>],
    ) -> Result<usize, StoreError> {
        if self.names.contains_key(&identity) {
            return Err(StoreError::DuplicateIdentity(identity));
        }
        if vectors.is_empty() {
            return Err(StoreError::EmptyEmbedding);
        }
        self.index.add(identity, vectors)?;
        self.names.insert(identity, name.to_string());
        self.persist()?;
        Ok(vectors.len())
    }

    /// Add vectors to an existing identity.
    ///
    /// An append with no matching name-map entry would leave the index and
    /// the map inconsistent, so an absent id is [`StoreError::NotFound`].
    pub fn append(&mut self, identity: IdentityId, vectors: &[Vec<f32>]) -> Result<usize, StoreError> {
        if !self.names.contains_key(&identity) {
            return Err(StoreError::NotFound(identity));
        }
        if vectors.is_empty() {
            return Err(StoreError::EmptyEmbedding);
        }
        self.index.add(identity, vectors)?;
        self.persist()?;
        Ok(vectors.len())
    }

    /// Delete every vector tagged with the identity plus its name-map
    /// entry. Removing an absent identity reports [`StoreError::NotFound`]
    /// so callers can tell "nothing to do" from "did it".
    pub fn remove(&mut self, identity: IdentityId) -> Result<usize, StoreError> {
        if !self.names.contains_key(&identity) {
            return Err(StoreError::NotFound(identity));
        }
        let removed = self.index.remove(identity);
        self.names.remove(&identity);
        self.persist()?;
        Ok(removed)
    }

    /// Update the display name for an identity. Name map only.
    pub fn rename(&mut self, identity: IdentityId, new_name: &str) -> Result<(), StoreError> {
        match self.names.get_mut(&identity) {
            None => return Err(StoreError::NotFound(identity)),
            Some(slot) => *slot = new_name.to_string(),
        }
        self.persist()?;
        Ok(())
    }

    /// Durable snapshot of index + name map.
    ///
    /// Each artifact is written to a temp file and atomically renamed into
    /// place. A crash between the two renames is detected at the next
    /// `open()` by the id-set integrity check.
    pub fn persist(&self) -> Result<(), StoreError> {
        let mut index_buf = Vec::new();
        snapshot::save_index(&self.index, &mut index_buf)?;
        write_atomic(&self.cfg.dir.join(INDEX_FILE), &index_buf)?;

        let mut names_buf = Vec::new();
        snapshot::save_names(&self.names, &mut names_buf)?;
        write_atomic(&self.cfg.dir.join(NAMES_FILE), &names_buf)?;
        Ok(())
    }

    /// Discard all in-memory and persisted state, leaving an empty store.
    pub fn reinitialize(&mut self) -> Result<(), StoreError> {
        self.index.clear();
        self.names.clear();
        self.persist()
    }

    /// Next free identity id: `max(existing) + 1`, or 1 when empty.
    pub fn next_id(&self) -> IdentityId {
        self.names.keys().next_back().map_or(1, |max| max + 1)
    }

    /// All registered identities as `(id, name)` in ascending id order.
    pub fn identities(&self) -> Vec<(IdentityId, String)> {
        self.names.iter().map(|(id, n)| (*id, n.clone())).collect()
    }

    pub fn name_of(&self, identity: IdentityId) -> Option<&str> {
        self.names.get(&identity).map(String::as_str)
    }

    pub fn contains(&self, identity: IdentityId) -> bool {
        self.names.contains_key(&identity)
    }

    /// Number of vectors held for the identity.
    pub fn count_for(&self, identity: IdentityId) -> usize {
        self.index.count_for(identity)
    }

    /// Total number of vectors in the index.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    pub fn dim(&self) -> usize {
        self.cfg.dim
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("tmp");
    let io_err = |e: std::io::Error| StoreError::Io(e.to_string());

    let mut f = fs::File::create(&tmp).map_err(io_err)?;
    f.write_all(bytes).map_err(io_err)?;
    f.sync_all().map_err(io_err)?;
    fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
