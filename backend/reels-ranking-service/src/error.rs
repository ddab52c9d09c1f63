use thiserror::Error;

/// Request-scoped lookup failures.
///
/// Malformed relational fields never reach this type: they are recovered as
/// empty collections while the index is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    #[error("User not found: {0}")]
    UnknownUser(String),

    #[error("Reel not found: {0}")]
    UnknownReel(String),
}

pub type Result<T> = std::result::Result<T, RankingError>;
