//! Match controller: the round loop and termination.
//!
//! A [`Battle`] owns the arena and plays rounds until at most one robot is
//! alive or the round limit runs out. The win check runs after each completed
//! round, so a match always plays at least one round when the limit allows.
//! Within a round robots act in roster order, and every robot sees the moves
//! of those that acted before it.
//!
//! # Example
//!
//! ```
//! use robowarz_core::arena::Arena;
//! use robowarz_core::config::GameConfig;
//! use robowarz_core::simulation::{Battle, MatchOutcome};
//!
//! let config = GameConfig::for_grid(8, 8);
//! let arena = Arena::new(&config, Vec::new(), 7).unwrap();
//! let mut battle = Battle::new(arena, config.max_rounds);
//!
//! // Nobody to fight: one empty round, then the win check ends it.
//! assert_eq!(battle.run(), MatchOutcome::Draw);
//! assert_eq!(battle.round(), 1);
//! ```
//!
//! # Skipping The Dead
//!
//! Health is checked when a robot's turn comes up, not at the start of the
//! round. A robot killed earlier in the same round does not act.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::arena::{Arena, RobotId};
use crate::turn::{TurnOrchestrator, TurnReport};

/// How a match ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Exactly one robot survived.
    Winner {
        /// Surviving robot.
        id: RobotId,
        /// Its display name.
        name: String,
    },
    /// Nobody survived.
    Draw,
    /// The round limit was reached with several robots alive.
    Timeout {
        /// Survivors, in roster order.
        alive: Vec<RobotId>,
    },
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner { name, .. } => write!(f, "{name} wins"),
            Self::Draw => f.write_str("no robots survived"),
            Self::Timeout { alive } => {
                write!(f, "round limit reached with {} robots alive", alive.len())
            }
        }
    }
}

/// What happened in one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    /// One-based round number.
    pub round: u32,
    /// Turns taken, in roster order. Dead robots have no entry.
    pub turns: Vec<TurnReport>,
    /// Robots alive after the round.
    pub alive: usize,
    /// True if at most one robot is alive.
    pub finished: bool,
}

/// A match in progress.
pub struct Battle {
    arena: Arena,
    orchestrator: TurnOrchestrator,
    max_rounds: u32,
    round: u32,
}

impl Battle {
    /// A battle using the stub shot resolver.
    #[must_use]
    pub fn new(arena: Arena, max_rounds: u32) -> Self {
        Self::with_orchestrator(arena, TurnOrchestrator::new(), max_rounds)
    }

    /// A battle with a custom orchestrator.
    #[must_use]
    pub fn with_orchestrator(arena: Arena, orchestrator: TurnOrchestrator, max_rounds: u32) -> Self {
        Self {
            arena,
            orchestrator,
            max_rounds,
            round: 0,
        }
    }

    /// The arena.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// The arena, mutably.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// Rounds played so far.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Round limit.
    #[must_use]
    pub const fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// True once the round limit is reached, or a completed round left at
    /// most one robot alive.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.round >= self.max_rounds || (self.round > 0 && self.arena.has_winner())
    }

    /// Plays one full round: every robot alive at its turn acts once.
    pub fn play_round(&mut self) -> RoundSummary {
        self.round += 1;
        let round = self.round;
        debug!(round, "round start");

        let ids: Vec<RobotId> = self.arena.robot_ids().collect();
        let mut turns = Vec::with_capacity(ids.len());
        for id in ids {
            let alive = self.arena.robot(id).is_some_and(|record| record.is_alive());
            if !alive {
                continue;
            }
            if let Some(report) = self
                .orchestrator
                .process_robot_turn(&mut self.arena, id, round)
            {
                turns.push(report);
            }
        }

        let alive = self.arena.count_alive();
        let finished = self.arena.has_winner();
        debug!(round, alive, finished, "round complete");
        RoundSummary {
            round,
            turns,
            alive,
            finished,
        }
    }

    /// Plays until the match is over.
    pub fn run(&mut self) -> MatchOutcome {
        self.run_with(|_, _| {})
    }

    /// Plays until the match is over, calling `observer` after each round.
    pub fn run_with<F>(&mut self, mut observer: F) -> MatchOutcome
    where
        F: FnMut(&RoundSummary, &Arena),
    {
        info!(
            robots = self.arena.robot_count(),
            max_rounds = self.max_rounds,
            seed = self.arena.seed(),
            "match start"
        );
        while !self.is_over() {
            let summary = self.play_round();
            observer(&summary, &self.arena);
        }
        let outcome = self.outcome();
        info!(rounds = self.round, %outcome, "match over");
        outcome
    }

    /// Outcome as of now.
    #[must_use]
    pub fn outcome(&self) -> MatchOutcome {
        let alive: Vec<RobotId> = self
            .arena
            .robots()
            .filter(|record| record.is_alive())
            .map(|record| record.id())
            .collect();
        match alive.as_slice() {
            [] => MatchOutcome::Draw,
            [id] => MatchOutcome::Winner {
                id: *id,
                name: self
                    .arena
                    .robot(*id)
                    .map(|record| record.name().to_string())
                    .unwrap_or_default(),
            },
            _ => MatchOutcome::Timeout { alive },
        }
    }
}

impl fmt::Debug for Battle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Battle")
            .field("arena", &self.arena)
            .field("max_rounds", &self.max_rounds)
            .field("round", &self.round)
            .finish_non_exhaustive()
    }
}
