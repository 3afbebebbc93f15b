//! Shot resolution.
//!
//! Shots go through the [`ShotResolver`] trait so a weapon model can be
//! swapped in without touching the turn loop. The shipped
//! [`UnresolvedShots`] adjudicates nothing: every shot from a known robot
//! comes back [`ShotOutcome::NotResolved`], which keeps "fired but not
//! adjudicated" distinguishable from "did not fire".

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::arena::{Arena, RobotId};
use crate::geometry::Cell;

/// Result of a shot request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    /// The shot was adjudicated and hit.
    Hit,
    /// The shot was adjudicated and missed.
    Miss,
    /// The shot was accepted but no weapon model judged it.
    NotResolved,
    /// The shooter is not in the roster.
    Rejected,
}

impl ShotOutcome {
    /// True only for an adjudicated hit.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// Adjudicates shots.
///
/// Implementations may mutate the arena (apply damage, spend ammunition) but
/// must not move robots.
pub trait ShotResolver {
    /// Resolves a shot from `shooter` at `target`.
    fn resolve_shot(&mut self, arena: &mut Arena, shooter: RobotId, target: Cell) -> ShotOutcome;
}

/// Shot resolver that accepts every shot and adjudicates none.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnresolvedShots;

impl UnresolvedShots {
    /// Creates the stub resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ShotResolver for UnresolvedShots {
    fn resolve_shot(&mut self, arena: &mut Arena, shooter: RobotId, target: Cell) -> ShotOutcome {
        if arena.robot(shooter).is_none() {
            return ShotOutcome::Rejected;
        }
        info!(%shooter, %target, "shot requested, resolution not implemented");
        ShotOutcome::NotResolved
    }
}
