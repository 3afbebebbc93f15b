//! # RoboWarz Core
//!
//! Turn-based robot battle simulation on a bounded grid with hazards.
//!
//! ## Architecture
//!
//! - **Arena**: the grid, obstacle layout and robot roster ([`arena`])
//! - **Combatants**: the capability every robot implements ([`combatant`])
//! - **Radar**: read-only directional scans ([`radar`])
//! - **Resolvers**: movement against terrain, and the shot seam ([`resolver`])
//! - **Turns**: radar, decision, then a shot or a move ([`turn`])
//! - **Match**: round loop and win detection ([`simulation`])
//!
//! ## Usage
//!
//! ```
//! use robowarz_core::{Arena, Battle, GameConfig};
//!
//! let config = GameConfig::for_grid(10, 10);
//! let arena = Arena::new(&config, Vec::new(), 42).unwrap();
//! let outcome = Battle::new(arena, config.max_rounds).run();
//! println!("{outcome}");
//! ```
//!
//! ## Determinism
//!
//! Every random draw (obstacles, spawn cells, hazard damage) comes from the
//! arena's seeded RNG. The same seed, config and combatants replay the same
//! match.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod combatant;
pub mod config;
pub mod error;
pub mod geometry;
pub mod radar;
pub mod render;
pub mod resolver;
pub mod simulation;
pub mod turn;

pub use arena::{Arena, RobotId, Tile};
pub use combatant::{Chassis, Combatant, CombatantFactory, CombatantRegistry, Weapon};
pub use config::GameConfig;
pub use error::{ArenaError, ConfigError, MoveRejection};
pub use geometry::{Cell, Direction};
pub use simulation::{Battle, MatchOutcome, RoundSummary};

#[cfg(test)]
mod tests;
