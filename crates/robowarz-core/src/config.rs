//! Match configuration.
//!
//! [`GameConfig`] carries the grid size, obstacle counts, round limit and the
//! cosmetic display settings. Every field has a default, so a JSON file only
//! needs to name the values it overrides:
//!
//! ```
//! use robowarz_core::config::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{ "max_rounds": 20 }"#).unwrap();
//! assert_eq!(config.max_rounds, 20);
//! assert_eq!(config.rows, 30);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default grid height.
pub const DEFAULT_ROWS: usize = 30;
/// Default grid width.
pub const DEFAULT_COLS: usize = 30;
/// Default round limit.
pub const DEFAULT_MAX_ROUNDS: u32 = 100;
/// Default pause between rounds when watching live.
pub const DEFAULT_TURN_DELAY_MS: u64 = 500;

/// Largest row or column count a [`Cell`](crate::geometry::Cell) can
/// address (`i32::MAX`).
pub const MAX_DIMENSION: usize = 0x7FFF_FFFF;

/// Percentage of the grid area covered by mounds.
pub const MOUND_PERCENT: usize = 5;
/// Percentage of the grid area covered by pits.
pub const PIT_PERCENT: usize = 2;
/// Percentage of the grid area covered by flamethrowers.
pub const FLAMETHROWER_PERCENT: usize = 1;

/// Settings for one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid height.
    pub rows: usize,
    /// Grid width.
    pub cols: usize,
    /// Rounds played before the match is called a timeout.
    pub max_rounds: u32,
    /// Print the arena after every round and pause between rounds.
    pub watch_live: bool,
    /// Pause between rounds in milliseconds. Cosmetic only.
    pub turn_delay_ms: u64,
    /// Number of mound cells.
    pub mounds: usize,
    /// Number of pit cells.
    pub pits: usize,
    /// Number of flamethrower cells.
    pub flamethrowers: usize,
    /// Print row/column numbers around the grid.
    pub show_grid_numbers: bool,
    /// Log every turn at debug level.
    pub verbose_logging: bool,
    /// Seed for the arena RNG. Drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Names of the combatants to enter, looked up in the runner's registry.
    /// Empty means "everything registered".
    pub roster: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_grid(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl GameConfig {
    /// Default settings for a `rows` x `cols` grid, with obstacle counts
    /// derived from the area fractions.
    #[must_use]
    pub fn for_grid(rows: usize, cols: usize) -> Self {
        let area = rows.saturating_mul(cols);
        Self {
            rows,
            cols,
            max_rounds: DEFAULT_MAX_ROUNDS,
            watch_live: true,
            turn_delay_ms: DEFAULT_TURN_DELAY_MS,
            mounds: area.saturating_mul(MOUND_PERCENT) / 100,
            pits: area.saturating_mul(PIT_PERCENT) / 100,
            flamethrowers: area.saturating_mul(FLAMETHROWER_PERCENT) / 100,
            show_grid_numbers: true,
            verbose_logging: false,
            seed: None,
            roster: Vec::new(),
        }
    }

    /// Same grid, no obstacles. Handy for scripted scenarios.
    #[must_use]
    pub fn without_obstacles(mut self) -> Self {
        self.mounds = 0;
        self.pits = 0;
        self.flamethrowers = 0;
        self
    }

    /// Total number of cells, or `None` if it overflows `usize`.
    #[must_use]
    pub const fn area(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// Total number of obstacle cells, saturating at `usize::MAX`.
    #[must_use]
    pub const fn obstacle_count(&self) -> usize {
        self.mounds
            .saturating_add(self.pits)
            .saturating_add(self.flamethrowers)
    }

    /// Checks that the grid is non-empty, addressable, and can hold every
    /// obstacle plus `robot_count` spawn cells.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroDimension`], [`ConfigError::TooLarge`] or
    /// [`ConfigError::Overcrowded`].
    pub fn validate(&self, robot_count: usize) -> Result<(), ConfigError> {
        let capacity = grid_area(self.rows, self.cols)?;
        let required = self.obstacle_count().saturating_add(robot_count);
        if required > capacity {
            return Err(ConfigError::Overcrowded { required, capacity });
        }
        Ok(())
    }
}

/// Cell count of a `rows` x `cols` grid.
///
/// # Errors
///
/// [`ConfigError::ZeroDimension`] if either side is zero,
/// [`ConfigError::TooLarge`] if either side exceeds [`MAX_DIMENSION`] or the
/// product overflows.
pub fn grid_area(rows: usize, cols: usize) -> Result<usize, ConfigError> {
    if rows == 0 || cols == 0 {
        return Err(ConfigError::ZeroDimension { rows, cols });
    }
    if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
        return Err(ConfigError::TooLarge { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(ConfigError::TooLarge { rows, cols })
}
