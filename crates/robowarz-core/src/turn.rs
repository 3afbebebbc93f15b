//! One robot's turn: radar, decision, then a shot or a move.
//!
//! The [`TurnOrchestrator`] drives a single combatant through
//!
//! ```text
//! Idle -> RadarRequested -> RadarScanned -> DecisionMade -> ShotAttempted -> Done
//!                                                        \-> MoveAttempted -/
//! ```
//!
//! and reports what happened as a [`TurnReport`]. A shot replaces the move
//! for that turn. A move with direction 0 is a deliberate pass and visits
//! neither attempt phase.
//!
//! The orchestrator does not check health. Skipping dead robots is the
//! match loop's job.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::arena::{Arena, RobotId};
use crate::error::MoveRejection;
use crate::geometry::Cell;
use crate::radar;
use crate::resolver::{MoveReport, MovementResolver, ShotOutcome, ShotResolver, UnresolvedShots};

/// Phases of a turn, in the order they are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Before anything was asked of the combatant.
    Idle,
    /// The combatant chose a radar direction.
    RadarRequested,
    /// Scan results were handed back.
    RadarScanned,
    /// The combatant chose between shooting and moving.
    DecisionMade,
    /// A shot went to the shot resolver.
    ShotAttempted,
    /// A move went to the movement resolver.
    MoveAttempted,
    /// The turn is over.
    Done,
}

/// What the robot did with its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    /// Fired at `target`.
    Shot {
        /// Requested target cell.
        target: Cell,
        /// Resolver verdict.
        outcome: ShotOutcome,
    },
    /// Asked to move; accepted or rejected.
    Move(Result<MoveReport, MoveRejection>),
    /// Neither shot nor moved.
    Idle,
}

/// Record of one completed turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Acting robot.
    pub robot: RobotId,
    /// Round the turn belongs to.
    pub round: u32,
    /// Radar code the combatant asked for, as given.
    pub radar_direction: i32,
    /// Number of scan entries returned.
    pub radar_hits: usize,
    /// The action taken.
    pub action: TurnAction,
    /// Phases visited, `Idle` first and `Done` last.
    pub phases: Vec<TurnPhase>,
}

impl TurnReport {
    /// True if the robot ended the turn on a different cell.
    #[must_use]
    pub fn moved(&self) -> bool {
        matches!(&self.action, TurnAction::Move(Ok(report)) if report.moved())
    }
}

/// Sequences a single robot's turn against the arena.
pub struct TurnOrchestrator {
    movement: MovementResolver,
    shots: Box<dyn ShotResolver>,
}

impl TurnOrchestrator {
    /// Orchestrator with the stub shot resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::with_shot_resolver(Box::new(UnresolvedShots::new()))
    }

    /// Orchestrator with a custom shot resolver.
    #[must_use]
    pub fn with_shot_resolver(shots: Box<dyn ShotResolver>) -> Self {
        Self {
            movement: MovementResolver::new(),
            shots,
        }
    }

    /// Runs one turn for robot `id`.
    ///
    /// Returns `None`, touching nothing, if `id` is not in the roster.
    pub fn process_robot_turn(
        &mut self,
        arena: &mut Arena,
        id: RobotId,
        round: u32,
    ) -> Option<TurnReport> {
        let mut phases = vec![TurnPhase::Idle];

        let radar_direction = arena.robot_mut(id)?.combatant_mut().radar_direction();
        phases.push(TurnPhase::RadarRequested);

        let results = radar::scan(arena, id, radar_direction);
        arena
            .robot_mut(id)?
            .combatant_mut()
            .process_radar_results(&results);
        phases.push(TurnPhase::RadarScanned);

        let shot = arena.robot_mut(id)?.combatant_mut().shot_location();
        let action = if let Some(target) = shot {
            phases.push(TurnPhase::DecisionMade);
            phases.push(TurnPhase::ShotAttempted);
            let outcome = self.shots.resolve_shot(arena, id, target);
            debug!(%id, %target, ?outcome, "shot");
            TurnAction::Shot { target, outcome }
        } else {
            let (direction, distance) = arena.robot_mut(id)?.combatant_mut().move_direction();
            phases.push(TurnPhase::DecisionMade);
            if direction == 0 {
                debug!(%id, "holding position");
                TurnAction::Idle
            } else {
                phases.push(TurnPhase::MoveAttempted);
                let result = self.movement.resolve(arena, id, direction, distance);
                if let Err(rejection) = &result {
                    warn!(%id, direction, distance, %rejection, "move rejected");
                }
                TurnAction::Move(result)
            }
        };
        phases.push(TurnPhase::Done);

        debug!(%id, round, radar_direction, hits = results.len(), "turn complete");
        Some(TurnReport {
            robot: id,
            round,
            radar_direction,
            radar_hits: results.len(),
            action,
            phases,
        })
    }
}

impl Default for TurnOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TurnOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnOrchestrator")
            .field("movement", &self.movement)
            .finish_non_exhaustive()
    }
}
