//! Error types for the engine

use thiserror::Error;

/// Hard errors surfaced to callers.
///
/// Soft conditions — unresolved cards, depth exhaustion — are not errors;
/// they are reported through `matchup::Outcome` and `search::SearchStats`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid deck size: {actual} cards (expected 1 to {max})")]
    InvalidDeckSize { actual: usize, max: usize },

    #[error("invalid card data: {0}")]
    InvalidCardData(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
