//! Bulk re-derivation of the store from per-identity media folders.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use poslens_facestore::IdentityId;

use crate::engine::Recognizer;
use crate::error::EngineError;
use crate::ports::MediaSource;
use crate::types::{RebuildReport, RebuiltIdentity, SkippedFolder};

impl Recognizer {
    /// Rebuild the store from subfolders of `root` named `<id>_<name>`.
    ///
    /// Best-effort: a folder that fails to parse, fails extraction or
    /// yields nothing is recorded as skipped and never aborts the rest.
    /// With `reinit` the store is emptied first; otherwise folders for
    /// existing identities append to them.
    pub fn rebuild(&self, root: &Path, reinit: bool) -> Result<RebuildReport, EngineError> {
        let _guard = self.admin.lock().unwrap();

        // Validate the root before reinitializing: an unreadable root must
        // not leave an emptied snapshot behind.
        let mut folders: Vec<_> = fs::read_dir(root)
            .map_err(|e| EngineError::InvalidInput(format!("cannot read {}: {e}", root.display())))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.path())
            .collect();
        // Sorted walk keeps the report (and id collisions) deterministic.
        folders.sort();

        let mut next = (*self.store()).clone();
        if reinit {
            next.reinitialize()?;
        }

        let mut report = RebuildReport::default();
        for folder in folders {
            let folder_label = folder
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let (identity, name) = match parse_identity_folder(&folder_label) {
                Some(parsed) => parsed,
                None => {
                    warn!(folder = %folder_label, "skipping folder without <id>_<name> form");
                    report.skipped.push(SkippedFolder {
                        folder: folder_label,
                        reason: "not in <id>_<name> form".into(),
                    });
                    continue;
                }
            };

            let embeddings = match self
                .ports
                .extractor
                .extract(&MediaSource::ImageFolder(folder.clone()))
            {
                Ok(e) => e,
                Err(e) => {
                    warn!(folder = %folder_label, error = %e, "skipping folder, extraction failed");
                    report.skipped.push(SkippedFolder {
                        folder: folder_label,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };
            if embeddings.is_empty() {
                warn!(folder = %folder_label, "skipping folder, no usable embeddings");
                report.skipped.push(SkippedFolder {
                    folder: folder_label,
                    reason: "no usable embeddings".into(),
                });
                continue;
            }

            let result = if next.contains(identity) {
                next.append(identity, &embeddings)
            } else {
                next.insert_new(identity, &name, &embeddings)
            };
            match result {
                Ok(added) => report.succeeded.push(RebuiltIdentity {
                    identity,
                    name,
                    embeddings: added,
                }),
                Err(e) => {
                    warn!(identity, folder = %folder_label, error = %e, "skipping folder, store rejected it");
                    report.skipped.push(SkippedFolder {
                        folder: folder_label,
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.commit(next);
        info!(
            succeeded = report.succeeded.len(),
            skipped = report.skipped.len(),
            reinit,
            "rebuild finished"
        );
        Ok(report)
    }
}

/// Parse a folder name of the form `<id>_<name>`; the name itself may
/// contain underscores.
fn parse_identity_folder(label: &str) -> Option<(IdentityId, String)> {
    let (id_part, name) = label.split_once('_')?;
    let identity = id_part.parse().ok()?;
    if name.is_empty() {
        return None;
    }
    Some((identity, name.to_string()))
}
