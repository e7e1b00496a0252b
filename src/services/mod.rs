pub mod normalizer;
pub mod policy_engine;
pub mod reconciler;
pub mod session_cache;

pub use normalizer::normalize;
pub use policy_engine::{AuthorshipDecision, AuthorshipPrompt, NameDecision, PolicyEngine};
pub use reconciler::{HaltSignal, ReconcileOutcome, ReconcileStatus, Reconciler};
pub use session_cache::SessionCache;
