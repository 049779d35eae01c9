//! Error types
//!
//! Nothing here is ever surfaced to the visitor. The worst outcome of any
//! of these is a missing animation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteError {
    /// A targeted DOM node does not exist; the affected step is skipped.
    #[error("element `{0}` not found")]
    MissingElement(String),
    /// A header/footer fragment never arrived; startup falls back to the timeout path.
    #[error("fragment `{name}` failed to load: {reason}")]
    FragmentLoad { name: String, reason: String },
    /// Two reveal bindings on one target disagree on replay policy.
    #[error("conflicting replay policies for reveal target `{target}`")]
    ReplayConflict { target: String },
    #[error("invalid site config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;
