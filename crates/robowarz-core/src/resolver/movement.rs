//! Movement resolver: walks a robot across the grid and commits the result.
//!
//! # Terrain Rules
//!
//! A move advances one cell at a time, up to `min(distance, move_speed)`
//! cells:
//!
//! | Next cell     | Effect                                              |
//! |---------------|-----------------------------------------------------|
//! | off the grid  | stop, keep the steps taken                          |
//! | mound, robot  | stop before the cell                                |
//! | pit           | enter, movement disabled for good, stop (flag kept) |
//! | flamethrower  | enter, take 30-50 damage, keep going                |
//! | empty         | enter, keep going                                   |
//!
//! A robot that starts its move on a flamethrower is burned once more before
//! its first step, even when it then fails to move.
//!
//! # Commit
//!
//! If at least one step was taken, the vacated cell gets its terrain back
//! (flamethrower or empty) and the new position is committed through
//! [`Arena::update_robot_position`]. A move of zero steps leaves the grid
//! untouched.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::arena::{Arena, RobotId, Tile};
use crate::error::MoveRejection;
use crate::geometry::{Cell, Direction};

/// Smallest flamethrower burn.
pub const FLAME_DAMAGE_MIN: i32 = 30;
/// Largest flamethrower burn.
pub const FLAME_DAMAGE_MAX: i32 = 50;

/// Why a move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Every allowed step was taken.
    DistanceReached,
    /// The next cell was off the grid.
    Edge,
    /// The next cell held a mound or a robot.
    Blocked(Tile),
    /// The robot fell into a pit.
    Pit,
}

/// What caused a burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurnCause {
    /// The robot started its move standing on a flamethrower.
    Lingering,
    /// The robot stepped onto a flamethrower.
    Stepped,
}

/// One flamethrower damage application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Burn {
    /// Lingering or stepped.
    pub cause: BurnCause,
    /// The flamethrower cell.
    pub cell: Cell,
    /// Damage dealt.
    pub amount: i32,
}

/// Result of an accepted move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    /// The robot that moved.
    pub robot: RobotId,
    /// Requested direction.
    pub direction: Direction,
    /// Steps allowed after capping at move speed.
    pub allowed: i32,
    /// Position before the move.
    pub from: Cell,
    /// Position after the move.
    pub to: Cell,
    /// Cells actually advanced.
    pub steps: i32,
    /// Why the walk ended.
    pub stop: StopReason,
    /// Burns taken during this move, in order.
    pub burns: Vec<Burn>,
    /// Flamethrower flag after the move.
    pub on_flamethrower: bool,
}

impl MoveReport {
    /// True if the robot changed cell.
    #[must_use]
    pub const fn moved(&self) -> bool {
        self.steps > 0
    }

    /// Total burn damage taken during the move.
    #[must_use]
    pub fn damage_taken(&self) -> i32 {
        self.burns.iter().map(|burn| burn.amount).sum()
    }
}

/// Resolves move requests against the grid.
///
/// ```
/// use robowarz_core::resolver::MovementResolver;
/// use robowarz_core::arena::{Arena, RobotId};
/// use robowarz_core::error::MoveRejection;
///
/// let mut arena = Arena::empty(3, 3, 1).unwrap();
/// let result = MovementResolver::new().resolve(&mut arena, RobotId::new(0), 3, 1);
/// assert_eq!(result, Err(MoveRejection::UnknownRobot(RobotId::new(0))));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MovementResolver;

impl MovementResolver {
    /// Creates a movement resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Moves robot `id` up to `distance` cells in direction `code`.
    ///
    /// # Errors
    ///
    /// Rejected requests leave the arena and the combatant untouched:
    /// - [`MoveRejection::UnknownRobot`] for an id outside the roster
    /// - [`MoveRejection::Immobilized`] if move speed is zero
    /// - [`MoveRejection::InvalidDirection`] for a code outside 1-8
    pub fn resolve(
        &self,
        arena: &mut Arena,
        id: RobotId,
        code: i32,
        distance: i32,
    ) -> Result<MoveReport, MoveRejection> {
        let record = arena.robot(id).ok_or(MoveRejection::UnknownRobot(id))?;
        let speed = record.combatant().move_speed();
        if speed <= 0 {
            debug!(%id, "robot in pit, cannot move");
            return Err(MoveRejection::Immobilized(id));
        }
        let direction = Direction::from_code(code).ok_or(MoveRejection::InvalidDirection(code))?;

        let allowed = distance.min(speed);
        let from = record.position();
        let started_on_flame = record.on_flamethrower();
        debug!(%id, %direction, distance, allowed, "processing move");

        let mut burns = Vec::new();
        if started_on_flame {
            burns.push(Self::burn(arena, id, from, BurnCause::Lingering));
        }

        let mut current = from;
        let mut on_flame = started_on_flame;
        let mut steps = 0;
        let mut stop = StopReason::DistanceReached;

        for step in 1..=allowed {
            let next = current.step(direction);
            let Some(tile) = arena.get_cell(next) else {
                stop = StopReason::Edge;
                break;
            };
            match tile {
                Tile::Empty => {
                    current = next;
                    on_flame = false;
                    steps = step;
                }
                Tile::Flamethrower => {
                    current = next;
                    on_flame = true;
                    steps = step;
                    burns.push(Self::burn(arena, id, next, BurnCause::Stepped));
                }
                Tile::Pit => {
                    // The flamethrower flag carries into the pit.
                    current = next;
                    steps = step;
                    if let Some(record) = arena.robot_mut(id) {
                        record.combatant_mut().disable_movement();
                    }
                    info!(%id, cell = %next, "robot fell into a pit");
                    stop = StopReason::Pit;
                    break;
                }
                Tile::Mound | Tile::Robot(_) => {
                    stop = StopReason::Blocked(tile);
                    break;
                }
            }
        }

        if steps > 0 {
            let terrain = if started_on_flame {
                Tile::Flamethrower
            } else {
                Tile::Empty
            };
            arena.set_cell(from, terrain);
            arena.update_robot_position(id, current, on_flame);
            debug!(%id, %from, to = %current, steps, on_flame, "moved");
        }

        Ok(MoveReport {
            robot: id,
            direction,
            allowed,
            from,
            to: current,
            steps,
            stop,
            burns,
            on_flamethrower: on_flame,
        })
    }

    fn burn(arena: &mut Arena, id: RobotId, cell: Cell, cause: BurnCause) -> Burn {
        let amount = arena
            .rng_mut()
            .gen_range(FLAME_DAMAGE_MIN..=FLAME_DAMAGE_MAX);
        if let Some(record) = arena.robot_mut(id) {
            record.combatant_mut().take_damage(amount);
        }
        info!(%id, %cell, amount, ?cause, "flamethrower burn");
        Burn {
            cause,
            cell,
            amount,
        }
    }
}
