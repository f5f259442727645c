mod registry;
mod session;

/// Durable integer key for one registered face. Interchangeable with the
/// alias of the same name in the store crate.
pub type IdentityId = u32;

pub use registry::SessionRegistry;
pub use session::{AuditDue, Candidate, Outcome, Phase, RecognitionSession, SessionConfig, SessionEvent};
