//! Game state, combat, and the legal-action model

pub mod actions;
pub mod combat;
pub mod permanent;
pub mod phase;
pub mod state;
pub mod state_hash;

pub use actions::{apply_action, enumerate_legal_actions, Action};
pub use combat::{enumerate_block_assignments, BlockAssignment, CombatState};
pub use permanent::{Permanent, PermanentId};
pub use phase::Phase;
pub use state::{GameState, PlayerState, STARTING_LIFE};
pub use state_hash::hash_state;
