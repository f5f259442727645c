use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::IdentityId;

/// Controls session behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum nearest-neighbor distance for a match to qualify.
    /// Default: 0.6.
    pub recognition_threshold: f32,

    /// Minimum spacing between audit writes for the same identity.
    /// Default: 10 seconds.
    pub debounce: Duration,

    /// Grace period before the active identity is cleared after detection
    /// stops qualifying. Default: 5 seconds.
    pub hysteresis: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            recognition_threshold: 0.6,
            debounce: Duration::seconds(10),
            hysteresis: Duration::seconds(5),
        }
    }
}

/// One per-frame nearest-neighbor match for a detected face.
///
/// Callers must only pass candidates whose identity resolves to a known
/// customer record; the session applies the distance threshold itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub identity: IdentityId,
    pub distance: f32,
}

/// Session phase for one terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Tracking {
        identity: IdentityId,
        since: DateTime<Utc>,
        last_seen: DateTime<Utc>,
    },
}

/// State change produced by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A customer became the active identity.
    Entered(IdentityId),
    /// The active identity was seen again; no identity change.
    Refreshed(IdentityId),
    /// The active identity has not qualified for longer than the
    /// hysteresis timeout and was cleared.
    Left(IdentityId),
}

/// Pending audit write, gated by the debounce interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuditDue {
    pub identity: IdentityId,
    pub distance: f32,
}

/// Everything one frame produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub event: Option<SessionEvent>,
    pub audit: Option<AuditDue>,
}

/// Temporal state machine turning noisy per-frame matches into stable
/// "active customer" transitions for one terminal.
///
/// Frames for one terminal are processed strictly sequentially, so the
/// session holds no internal locking. All timeout logic compares the
/// caller-supplied `now` against stored timestamps; there are no timers.
#[derive(Debug, Clone)]
pub struct RecognitionSession {
    cfg: SessionConfig,
    phase: Phase,
    // identity -> time of the last audit write. Entries are only touched
    // when a write happens, so the gap check below stays monotone.
    audit_seen: HashMap<IdentityId, DateTime<Utc>>,
}

impl RecognitionSession {
    pub fn new(cfg: SessionConfig) -> Self {
        Self {
            cfg,
            phase: Phase::Idle,
            audit_seen: HashMap::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The tracked identity, if any.
    pub fn active(&self) -> Option<IdentityId> {
        match self.phase {
            Phase::Idle => None,
            Phase::Tracking { identity, .. } => Some(identity),
        }
    }

    /// Evaluate one frame's candidates at the given instant.
    pub fn observe_at(&mut self, candidates: &[Candidate], now: DateTime<Utc>) -> Outcome {
        match self.select_qualifying(candidates) {
            Some(c) => self.observe_qualifying(c, now),
            None => self.observe_absence(now),
        }
    }

    /// Deterministically pick at most one qualifying candidate:
    /// smallest distance wins, equal distances resolve to the smallest id.
    fn select_qualifying(&self, candidates: &[Candidate]) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for c in candidates {
            if !(c.distance <= self.cfg.recognition_threshold) {
                continue;
            }
            let better = match best {
                None => true,
                Some(b) => c.distance < b.distance
                    || (c.distance == b.distance && c.identity < b.identity),
            };
            if better {
                best = Some(*c);
            }
        }
        best
    }

    fn observe_qualifying(&mut self, c: Candidate, now: DateTime<Utc>) -> Outcome {
        let event = match self.phase {
            Phase::Tracking { identity, since, .. } if identity == c.identity => {
                self.phase = Phase::Tracking {
                    identity,
                    since,
                    last_seen: now,
                };
                SessionEvent::Refreshed(identity)
            }
            // Idle, or tracking a different identity: the new customer
            // takes over immediately.
            _ => {
                self.phase = Phase::Tracking {
                    identity: c.identity,
                    since: now,
                    last_seen: now,
                };
                SessionEvent::Entered(c.identity)
            }
        };

        let audit = if self.audit_due(c.identity, now) {
            self.audit_seen.insert(c.identity, now);
            Some(AuditDue {
                identity: c.identity,
                distance: c.distance,
            })
        } else {
            None
        };

        Outcome {
            event: Some(event),
            audit,
        }
    }

    fn audit_due(&self, identity: IdentityId, now: DateTime<Utc>) -> bool {
        match self.audit_seen.get(&identity) {
            None => true,
            Some(last) => now - *last > self.cfg.debounce,
        }
    }

    fn observe_absence(&mut self, now: DateTime<Utc>) -> Outcome {
        let event = match self.phase {
            Phase::Tracking { identity, last_seen, .. }
                if now - last_seen > self.cfg.hysteresis =>
            {
                self.phase = Phase::Idle;
                Some(SessionEvent::Left(identity))
            }
            // Within the grace period (or already idle): tolerate the
            // missed detection.
            _ => None,
        };
        Outcome { event, audit: None }
    }

    /// Force `Idle` and clear the debounce cache, independent of timers.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.audit_seen.clear();
    }
}
