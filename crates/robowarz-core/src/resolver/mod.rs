//! Resolvers turn a robot's decisions into arena mutations.
//!
//! - [`MovementResolver`]: walks a robot across the grid, applying pit and
//!   flamethrower rules, and commits the new position
//! - [`ShotResolver`]: the seam for weapon adjudication; [`UnresolvedShots`]
//!   is the shipped implementation
//!
//! # Invariants
//!
//! - A rejected request leaves the arena unchanged
//! - All randomness comes from the arena RNG, so resolution is reproducible
//!   for a given seed

mod combat;
mod movement;

pub use combat::{ShotOutcome, ShotResolver, UnresolvedShots};
pub use movement::{
    Burn, BurnCause, MoveReport, MovementResolver, StopReason, FLAME_DAMAGE_MAX, FLAME_DAMAGE_MIN,
};
