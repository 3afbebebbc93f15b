//! Error types for arena setup and movement requests.
//!
//! Setup errors ([`ConfigError`], [`ArenaError`]) are fatal for the match: the
//! arena cannot be built. [`MoveRejection`] is recoverable and only tells the
//! caller why a single move request was ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arena::RobotId;
use crate::geometry::Cell;

/// Configuration values that can never produce a playable arena.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One of the grid dimensions is zero.
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    ZeroDimension {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// A grid dimension is beyond what a cell coordinate can address, or
    /// the grid is too large to allocate.
    #[error("grid {rows}x{cols} is too large")]
    TooLarge {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// Obstacles plus spawn points exceed the number of cells.
    #[error("{required} cells required for obstacles and robots, grid only has {capacity}")]
    Overcrowded {
        /// Cells needed for every obstacle and every robot.
        required: usize,
        /// Total cells in the grid.
        capacity: usize,
    },
}

/// Fatal arena construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The configuration itself is unusable.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// No free cell is left for a placement.
    #[error("cannot place {requested} {what}: only {available} free cells")]
    Saturated {
        /// What was being placed (`"mounds"`, `"robot"`, ...).
        what: &'static str,
        /// How many were requested.
        requested: usize,
        /// How many empty cells remained.
        available: usize,
    },

    /// A chosen spawn cell is off the grid or already taken.
    #[error("cell {cell} is not an empty grid cell")]
    CellUnavailable {
        /// The requested cell.
        cell: Cell,
    },

    /// A combatant symbol is not an uppercase ASCII letter.
    #[error("robot '{name}' uses symbol {symbol:?}; symbols must be uppercase letters A-Z")]
    InvalidSymbol {
        /// Display name of the offending combatant.
        name: String,
        /// The rejected symbol.
        symbol: char,
    },

    /// Two combatants share a symbol.
    #[error("symbol {symbol:?} is used by more than one robot")]
    DuplicateSymbol {
        /// The repeated symbol.
        symbol: char,
    },
}

/// Why a move request was ignored without touching the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The robot id is not in the roster.
    #[error("no robot with id {0}")]
    UnknownRobot(RobotId),

    /// The robot's move speed is zero (trapped in a pit).
    #[error("robot {0} cannot move")]
    Immobilized(RobotId),

    /// Direction code outside 1-8.
    #[error("invalid move direction {0}")]
    InvalidDirection(i32),
}

/// A roster entry names a combatant nobody registered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no combatant registered under the name '{name}'")]
pub struct UnknownCombatant {
    /// The requested name.
    pub name: String,
}
