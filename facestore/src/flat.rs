use std::collections::BTreeSet;

use crate::IdentityId;
use crate::error::StoreError;
use crate::metric::Metric;

/// One embedding held in the index, tagged with the identity it belongs to.
/// Many records may share an identity.
#[derive(Debug, Clone)]
pub(crate) struct Record {
    pub(crate) identity: IdentityId,
    pub(crate) vector: Vec<f32>,
}

/// Exact brute-force nearest-neighbor index over identity-tagged vectors.
///
/// Intended for populations bounded by registered customers times a handful
/// of captured angles each, where exactness matters more than speed.
#[derive(Debug, Clone)]
pub(crate) struct FlatIndex {
    dim: usize,
    metric: Metric,
    records: Vec<Record>,
}

impl FlatIndex {
    /// Create an empty index. Callers validate `dim` at the store boundary.
    pub(crate) fn new(dim: usize, metric: Metric) -> Self {
        debug_assert!(dim > 0);
        Self {
            dim,
            metric,
            records: Vec::new(),
        }
    }

    pub(crate) fn from_parts(dim: usize, metric: Metric, records: Vec<Record>) -> Self {
        Self { dim, metric, records }
    }

    pub(crate) fn dim(&self) -> usize {
        self.dim
    }

    pub(crate) fn metric(&self) -> Metric {
        self.metric
    }

    pub(crate) fn records(&self) -> &[Record] {
        &self.records
    }

    /// Add every vector under the given identity. All dimensions are
    /// validated before the first record is appended, so a failed call
    /// leaves the index unchanged.
    pub(crate) fn add(&mut self, identity: IdentityId, vectors: &[Vec<f32>]) -> Result<(), StoreError> {
        for v in vectors {
            if v.len() != self.dim {
                return Err(StoreError::DimensionMismatch {
                    got: v.len(),
                    want: self.dim,
                });
            }
        }
        for v in vectors {
            self.records.push(Record {
                identity,
                vector: v.clone(),
            });
        }
        Ok(())
    }

    /// Remove every record tagged with the identity.
    /// Returns the number of records removed.
    pub(crate) fn remove(&mut self, identity: IdentityId) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.identity != identity);
        before - self.records.len()
    }

    /// 1-nearest-neighbor under the configured metric.
    ///
    /// Ties are broken deterministically: smallest distance first, then
    /// smallest identity id. Returns `None` when the index is empty.
    pub(crate) fn nearest(&self, query: &[f32]) -> Result<Option<(f32, IdentityId)>, StoreError> {
        if query.len() != self.dim {
            return Err(StoreError::DimensionMismatch {
                got: query.len(),
                want: self.dim,
            });
        }

        let mut best: Option<(f32, IdentityId)> = None;
        for r in &self.records {
            let d = self.metric.distance(query, &r.vector);
            let better = match best {
                None => true,
                Some((bd, bid)) => d < bd || (d == bd && r.identity < bid),
            };
            if better {
                best = Some((d, r.identity));
            }
        }
        Ok(best)
    }

    /// The set of identities with at least one record.
    pub(crate) fn identities(&self) -> BTreeSet<IdentityId> {
        self.records.iter().map(|r| r.identity).collect()
    }

    /// Number of records tagged with the identity.
    pub(crate) fn count_for(&self, identity: IdentityId) -> usize {
        self.records.iter().filter(|r| r.identity == identity).count()
    }

    /// Total number of records.
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}
