//! Evaluation-specific error types.

use thiserror::Error;

/// Errors that can occur while building the engine from a rule store.
///
/// Matching itself never fails: unknown operators degrade to `is`,
/// absent fields are a non-match, and unconfigured event types classify
/// to `none`.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A rule with no conditions can never match and indicates a broken
    /// store.
    #[error("rule with no conditions under {event_type}/{match_type}")]
    EmptyRule {
        event_type: String,
        match_type: String,
    },
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, EvalError>;
