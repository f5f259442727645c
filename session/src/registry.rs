use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::IdentityId;
use crate::session::{Candidate, Outcome, RecognitionSession, SessionConfig};

/// Holds one independent [`RecognitionSession`] per terminal key.
///
/// Sessions are created on first use. Frames for one terminal arrive
/// strictly sequentially, so the registry's lock only arbitrates between
/// terminals, never within one.
pub struct SessionRegistry {
    cfg: SessionConfig,
    sessions: Mutex<HashMap<String, RecognitionSession>>,
}

impl SessionRegistry {
    pub fn new(cfg: SessionConfig) -> Self {
        Self {
            cfg,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Evaluate one frame for the given terminal.
    pub fn observe_at(&self, key: &str, candidates: &[Candidate], now: DateTime<Utc>) -> Outcome {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .entry(key.to_string())
            .or_insert_with(|| RecognitionSession::new(self.cfg.clone()));
        session.observe_at(candidates, now)
    }

    /// The tracked identity for the terminal, if any.
    pub fn active(&self, key: &str) -> Option<IdentityId> {
        let sessions = self.sessions.lock().unwrap();
        sessions.get(key).and_then(|s| s.active())
    }

    /// Force the terminal back to idle and clear its debounce cache.
    /// Unknown keys are a no-op.
    pub fn reset(&self, key: &str) {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get_mut(key) {
            session.reset();
        }
    }

    /// Drop every session, forcing all terminals back to idle.
    pub fn reset_all(&self) {
        self.sessions.lock().unwrap().clear();
    }

    /// Number of terminals with session state.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
