//! Three-Card Blind combat engine
//!
//! A deterministic game-tree solver for the "Three-Card Blind" format:
//! oracle text is lifted into a structured ability set, combat is resolved
//! with full evergreen-keyword interactions, and matchups are decided by
//! exhaustive alpha-beta search over both players' choices.
//!
//! The crate is a pure library: no I/O, no clock, no randomness. Callers
//! supply fully materialized [`core::Card`] values (see [`parser`] for
//! lifting printed text) and receive a [`matchup::Outcome`].

pub mod core;
pub mod error;
pub mod game;
pub mod matchup;
pub mod parser;
pub mod search;

pub use error::{EngineError, Result};
