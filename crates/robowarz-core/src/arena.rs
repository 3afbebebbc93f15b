//! The arena: grid cells, obstacle layout and the robot roster.
//!
//! The [`Arena`] is the single authority for what sits in each cell and where
//! each robot stands. It provides:
//! - Cell inspection and mutation ([`Arena::get_cell`], [`Arena::set_cell`])
//! - Obstacle scattering and robot placement at construction
//! - Position commits for the movement resolver ([`Arena::update_robot_position`])
//! - Win detection over the roster ([`Arena::count_alive`], [`Arena::has_winner`])
//!
//! # Cell Writes
//!
//! Every cell write goes through one private path, so the grid always holds
//! the last committed value for a cell. [`Arena::update_robot_position`]
//! writes the robot's symbol into its new cell but does **not** clear the old
//! one: only the caller knows whether the vacated cell was a flamethrower that
//! has to be restored.
//!
//! ```
//! use robowarz_core::arena::{Arena, Tile};
//! use robowarz_core::geometry::Cell;
//!
//! let mut arena = Arena::empty(5, 5, 42).unwrap();
//! assert!(arena.set_cell(Cell::new(1, 2), Tile::Mound));
//! assert_eq!(arena.get_cell(Cell::new(1, 2)), Some(Tile::Mound));
//! assert_eq!(arena.get_cell(Cell::new(9, 9)), None);
//! ```
//!
//! # Randomness
//!
//! The arena owns a `ChaCha8Rng` seeded from an explicit `u64`. Obstacle
//! layout, spawn cells and hazard damage all draw from it, so two arenas built
//! from the same seed, config and roster play out identically.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combatant::Combatant;
use crate::config::{grid_area, GameConfig};
use crate::error::{ArenaError, ConfigError};
use crate::geometry::Cell;

// =============================================================================
// Tile
// =============================================================================

/// Content of one grid cell.
///
/// The character encoding is fixed: `.` empty, `M` mound, `P` pit,
/// `F` flamethrower, `A`-`Z` robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Open ground.
    Empty,
    /// Impassable, permanent.
    Mound,
    /// Traps whoever steps in.
    Pit,
    /// Burns whoever steps on, does not block.
    Flamethrower,
    /// A robot, alive or dead, by symbol.
    Robot(char),
}

impl Tile {
    /// The grid character for this tile.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Mound => 'M',
            Self::Pit => 'P',
            Self::Flamethrower => 'F',
            Self::Robot(symbol) => symbol,
        }
    }

    /// Decodes a grid character.
    ///
    /// Returns `None` for anything that is neither a terrain character nor an
    /// uppercase ASCII letter.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Self::Empty),
            'M' => Some(Self::Mound),
            'P' => Some(Self::Pit),
            'F' => Some(Self::Flamethrower),
            'A'..='Z' => Some(Self::Robot(symbol)),
            _ => None,
        }
    }

    /// True for robot tiles.
    #[must_use]
    pub const fn is_robot(self) -> bool {
        matches!(self, Self::Robot(_))
    }

    /// True if `symbol` may identify a robot: an uppercase ASCII letter other
    /// than the reserved terrain letters.
    #[must_use]
    pub const fn is_robot_symbol(symbol: char) -> bool {
        symbol.is_ascii_uppercase() && !matches!(symbol, 'M' | 'P' | 'F')
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// =============================================================================
// Robot records
// =============================================================================

/// Stable roster index of a robot.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RobotId(usize);

impl RobotId {
    /// Wraps a roster index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The roster index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RobotId({})", self.0)
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Condition of a robot, derived from its stats and arena tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RobotState {
    /// Alive and free to move.
    Active,
    /// Alive, stuck in a pit.
    Trapped,
    /// Alive, standing on a flamethrower.
    Burning,
    /// Health at or below zero.
    Dead,
}

/// A roster entry: identity, arena-tracked position and the combatant itself.
pub struct RobotRecord {
    id: RobotId,
    name: String,
    symbol: char,
    position: Cell,
    on_flamethrower: bool,
    combatant: Box<dyn Combatant>,
}

impl RobotRecord {
    /// Roster index.
    #[must_use]
    pub const fn id(&self) -> RobotId {
        self.id
    }

    /// Display name captured at placement.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grid symbol.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Committed position.
    #[must_use]
    pub const fn position(&self) -> Cell {
        self.position
    }

    /// True if the robot's last committed move left it on a flamethrower.
    #[must_use]
    pub const fn on_flamethrower(&self) -> bool {
        self.on_flamethrower
    }

    /// The combatant.
    #[must_use]
    pub fn combatant(&self) -> &dyn Combatant {
        self.combatant.as_ref()
    }

    /// The combatant, mutably.
    pub fn combatant_mut(&mut self) -> &mut dyn Combatant {
        self.combatant.as_mut()
    }

    /// True while the combatant's health is positive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.combatant.health() > 0
    }

    /// Current condition. Dead wins over trapped, trapped over burning.
    #[must_use]
    pub fn state(&self) -> RobotState {
        if !self.is_alive() {
            RobotState::Dead
        } else if self.combatant.move_speed() <= 0 {
            RobotState::Trapped
        } else if self.on_flamethrower {
            RobotState::Burning
        } else {
            RobotState::Active
        }
    }
}

impl fmt::Debug for RobotRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobotRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("symbol", &self.symbol)
            .field("position", &self.position)
            .field("on_flamethrower", &self.on_flamethrower)
            .field("health", &self.combatant.health())
            .finish_non_exhaustive()
    }
}

/// Obstacle counts for one arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Obstacles {
    /// Mound cells.
    pub mounds: usize,
    /// Pit cells.
    pub pits: usize,
    /// Flamethrower cells.
    pub flamethrowers: usize,
}

impl From<&GameConfig> for Obstacles {
    fn from(config: &GameConfig) -> Self {
        Self {
            mounds: config.mounds,
            pits: config.pits,
            flamethrowers: config.flamethrowers,
        }
    }
}

// =============================================================================
// Arena
// =============================================================================

/// The grid and its roster.
pub struct Arena {
    rows: usize,
    cols: usize,
    /// Row-major cell storage.
    cells: Vec<Tile>,
    /// Roster, indexed by `RobotId`.
    robots: Vec<RobotRecord>,
    rng: ChaCha8Rng,
    seed: u64,
}

impl Arena {
    /// Builds a match arena: scatters obstacles, then places every combatant
    /// on a random empty cell in roster order.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::Config`] if the grid is empty or cannot hold every
    ///   obstacle plus one cell per combatant
    /// - [`ArenaError::InvalidSymbol`] / [`ArenaError::DuplicateSymbol`] for
    ///   unusable combatant symbols
    pub fn new(
        config: &GameConfig,
        combatants: Vec<Box<dyn Combatant>>,
        seed: u64,
    ) -> Result<Self, ArenaError> {
        config.validate(combatants.len())?;

        let mut arena = Self::empty(config.rows, config.cols, seed)?;
        info!(rows = arena.rows, cols = arena.cols, seed, "initializing arena");

        arena.place_obstacles(Obstacles::from(config))?;
        for combatant in combatants {
            arena.place(combatant)?;
        }
        Ok(arena)
    }

    /// An all-empty grid with no robots.
    ///
    /// # Errors
    ///
    /// [`ArenaError::Config`] if either dimension is zero, exceeds
    /// [`MAX_DIMENSION`](crate::config::MAX_DIMENSION), or the grid cannot be
    /// allocated.
    pub fn empty(rows: usize, cols: usize, seed: u64) -> Result<Self, ArenaError> {
        let area = grid_area(rows, cols)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(area)
            .map_err(|_| ConfigError::TooLarge { rows, cols })?;
        cells.resize(area, Tile::Empty);
        Ok(Self {
            rows,
            cols,
            cells,
            robots: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        })
    }

    /// Grid height.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Grid width.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Seed the arena RNG was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// The arena RNG. Hazard damage rolls draw from here.
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// True if `cell` lies on the grid.
    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        self.index_of(cell).is_some()
    }

    fn index_of(&self, cell: Cell) -> Option<usize> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        (row < self.rows && col < self.cols).then_some(row * self.cols + col)
    }

    // -------------------------------------------------------------------------
    // Cells
    // -------------------------------------------------------------------------

    /// Content of `cell`, or `None` off the grid.
    #[must_use]
    pub fn get_cell(&self, cell: Cell) -> Option<Tile> {
        self.index_of(cell).map(|index| self.cells[index])
    }

    /// Overwrites `cell`. Returns false, writing nothing, off the grid.
    ///
    /// The caller keeps the grid consistent with the roster; this does not
    /// check for robots.
    pub fn set_cell(&mut self, cell: Cell, tile: Tile) -> bool {
        match self.index_of(cell) {
            Some(index) => {
                self.write(index, tile);
                true
            }
            None => false,
        }
    }

    fn write(&mut self, index: usize, tile: Tile) {
        self.cells[index] = tile;
    }

    /// Number of cells holding exactly `tile`.
    #[must_use]
    pub fn count_tiles(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    fn free_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| **tile == Tile::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    // Both sides are capped at `MAX_DIMENSION`, so the conversions hold.
    fn cell_at(&self, index: usize) -> Cell {
        let row = i32::try_from(index / self.cols).unwrap_or(i32::MAX);
        let col = i32::try_from(index % self.cols).unwrap_or(i32::MAX);
        Cell::new(row, col)
    }

    /// Scatters mounds, then pits, then flamethrowers onto distinct empty
    /// cells.
    ///
    /// # Errors
    ///
    /// [`ArenaError::Saturated`] if a batch is larger than the number of empty
    /// cells left. Batches placed before the failing one stay on the grid.
    pub fn place_obstacles(&mut self, obstacles: Obstacles) -> Result<(), ArenaError> {
        info!(
            mounds = obstacles.mounds,
            pits = obstacles.pits,
            flamethrowers = obstacles.flamethrowers,
            "generating obstacles"
        );
        self.scatter("mounds", Tile::Mound, obstacles.mounds)?;
        self.scatter("pits", Tile::Pit, obstacles.pits)?;
        self.scatter("flamethrowers", Tile::Flamethrower, obstacles.flamethrowers)
    }

    fn scatter(&mut self, what: &'static str, tile: Tile, count: usize) -> Result<(), ArenaError> {
        let mut free = self.free_cells();
        if count > free.len() {
            return Err(ArenaError::Saturated {
                what,
                requested: count,
                available: free.len(),
            });
        }
        // Partial Fisher-Yates: the first `count` slots end up a uniform
        // sample of distinct free cells.
        for i in 0..count {
            let j = self.rng.gen_range(i..free.len());
            free.swap(i, j);
            self.write(free[i], tile);
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Roster
    // -------------------------------------------------------------------------

    /// Places a combatant on a uniformly random empty cell.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidSymbol`] / [`ArenaError::DuplicateSymbol`]
    /// - [`ArenaError::Saturated`] if no empty cell is left
    pub fn place(&mut self, combatant: Box<dyn Combatant>) -> Result<RobotId, ArenaError> {
        self.check_symbol(combatant.as_ref())?;
        let free = self.free_cells();
        if free.is_empty() {
            return Err(ArenaError::Saturated {
                what: "robot",
                requested: 1,
                available: 0,
            });
        }
        let index = free[self.rng.gen_range(0..free.len())];
        let cell = self.cell_at(index);
        Ok(self.register(combatant, cell))
    }

    /// Places a combatant on a chosen cell.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::InvalidSymbol`] / [`ArenaError::DuplicateSymbol`]
    /// - [`ArenaError::CellUnavailable`] if `cell` is off the grid or not empty
    pub fn place_at(
        &mut self,
        combatant: Box<dyn Combatant>,
        cell: Cell,
    ) -> Result<RobotId, ArenaError> {
        self.check_symbol(combatant.as_ref())?;
        if self.get_cell(cell) != Some(Tile::Empty) {
            return Err(ArenaError::CellUnavailable { cell });
        }
        Ok(self.register(combatant, cell))
    }

    fn check_symbol(&self, combatant: &dyn Combatant) -> Result<(), ArenaError> {
        let symbol = combatant.symbol();
        if !Tile::is_robot_symbol(symbol) {
            return Err(ArenaError::InvalidSymbol {
                name: combatant.name().to_string(),
                symbol,
            });
        }
        if self.robots.iter().any(|r| r.symbol == symbol) {
            return Err(ArenaError::DuplicateSymbol { symbol });
        }
        Ok(())
    }

    fn register(&mut self, mut combatant: Box<dyn Combatant>, cell: Cell) -> RobotId {
        let id = RobotId::new(self.robots.len());
        combatant.set_boundaries(self.rows, self.cols);
        combatant.move_to(cell);
        let symbol = combatant.symbol();
        let name = combatant.name().to_string();
        info!(%id, name = %name, %symbol, %cell, "placed robot");

        self.set_cell(cell, Tile::Robot(symbol));
        self.robots.push(RobotRecord {
            id,
            name,
            symbol,
            position: cell,
            on_flamethrower: false,
            combatant,
        });
        id
    }

    /// Number of robots in the roster, dead or alive.
    #[must_use]
    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    /// Roster entry for `id`.
    #[must_use]
    pub fn robot(&self, id: RobotId) -> Option<&RobotRecord> {
        self.robots.get(id.index())
    }

    /// Mutable roster entry for `id`.
    pub fn robot_mut(&mut self, id: RobotId) -> Option<&mut RobotRecord> {
        self.robots.get_mut(id.index())
    }

    /// Roster in id order.
    pub fn robots(&self) -> impl Iterator<Item = &RobotRecord> + '_ {
        self.robots.iter()
    }

    /// Roster ids in order.
    pub fn robot_ids(&self) -> impl Iterator<Item = RobotId> {
        (0..self.robots.len()).map(RobotId::new)
    }

    /// Committed position of robot `id`.
    #[must_use]
    pub fn position(&self, id: RobotId) -> Option<Cell> {
        self.robot(id).map(RobotRecord::position)
    }

    /// Flamethrower flag of robot `id`; false for an unknown id.
    #[must_use]
    pub fn is_on_flamethrower(&self, id: RobotId) -> bool {
        self.robot(id).is_some_and(RobotRecord::on_flamethrower)
    }

    /// Robot whose committed position is `cell`.
    #[must_use]
    pub fn robot_at(&self, cell: Cell) -> Option<&RobotRecord> {
        self.robots.iter().find(|r| r.position == cell)
    }

    /// Commits a robot's new position and flamethrower flag, tells the
    /// combatant where it is, and writes its symbol into the new cell.
    ///
    /// The old cell is left as is. Returns false, changing nothing, for an
    /// unknown id or an off-grid target.
    pub fn update_robot_position(&mut self, id: RobotId, cell: Cell, on_flamethrower: bool) -> bool {
        let Some(index) = self.index_of(cell) else {
            return false;
        };
        let Some(record) = self.robots.get_mut(id.index()) else {
            return false;
        };
        record.combatant.move_to(cell);
        record.position = cell;
        record.on_flamethrower = on_flamethrower;
        let symbol = record.symbol;
        debug!(%id, %cell, on_flamethrower, "robot position committed");
        self.write(index, Tile::Robot(symbol));
        true
    }

    // -------------------------------------------------------------------------
    // Win detection
    // -------------------------------------------------------------------------

    /// Number of robots with health above zero.
    #[must_use]
    pub fn count_alive(&self) -> usize {
        self.robots.iter().filter(|r| r.is_alive()).count()
    }

    /// True once at most one robot is alive.
    #[must_use]
    pub fn has_winner(&self) -> bool {
        self.count_alive() <= 1
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("robots", &self.robots)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::{scripted, ScriptedBot};

    fn bot(symbol: char) -> Box<dyn Combatant> {
        Box::new(ScriptedBot::new(symbol))
    }

    mod tile_tests {
        use super::*;

        #[test]
        fn symbol_encoding_is_fixed() {
            assert_eq!(Tile::Empty.symbol(), '.');
            assert_eq!(Tile::Mound.symbol(), 'M');
            assert_eq!(Tile::Pit.symbol(), 'P');
            assert_eq!(Tile::Flamethrower.symbol(), 'F');
            assert_eq!(Tile::Robot('Q').symbol(), 'Q');
        }

        #[test]
        fn from_symbol_decodes_every_tile() {
            for tile in [Tile::Empty, Tile::Mound, Tile::Pit, Tile::Flamethrower, Tile::Robot('Z')] {
                assert_eq!(Tile::from_symbol(tile.symbol()), Some(tile));
            }
            assert_eq!(Tile::from_symbol('#'), None);
            assert_eq!(Tile::from_symbol('a'), None);
        }

        #[test]
        fn reserved_letters_are_not_robot_symbols() {
            assert!(Tile::is_robot_symbol('A'));
            for reserved in ['M', 'P', 'F', '.', 'a', '1'] {
                assert!(!Tile::is_robot_symbol(reserved), "{reserved}");
            }
        }
    }

    mod cell_tests {
        use super::*;

        #[test]
        fn set_then_get_round_trips() {
            let mut arena = Arena::empty(4, 6, 1).unwrap();
            let cell = Cell::new(3, 5);
            assert!(arena.set_cell(cell, Tile::Pit));
            assert_eq!(arena.get_cell(cell), Some(Tile::Pit));
            assert!(arena.set_cell(cell, Tile::Robot('K')));
            assert_eq!(arena.get_cell(cell), Some(Tile::Robot('K')));
        }

        #[test]
        fn off_grid_access_is_rejected() {
            let mut arena = Arena::empty(4, 6, 1).unwrap();
            for cell in [Cell::new(-1, 0), Cell::new(0, -1), Cell::new(4, 0), Cell::new(0, 6)] {
                assert_eq!(arena.get_cell(cell), None);
                assert!(!arena.set_cell(cell, Tile::Mound));
            }
            assert_eq!(arena.count_tiles(Tile::Empty), 24);
        }

        #[test]
        fn zero_dimension_is_config_error() {
            assert!(matches!(
                Arena::empty(0, 3, 1),
                Err(ArenaError::Config(_))
            ));
        }

        #[test]
        fn oversized_grid_is_config_error() {
            assert!(matches!(
                Arena::empty(usize::MAX, 2, 0),
                Err(ArenaError::Config(ConfigError::TooLarge { .. }))
            ));
            // Addressable sides, but far more cells than can be allocated.
            assert!(matches!(
                Arena::empty(crate::config::MAX_DIMENSION, crate::config::MAX_DIMENSION, 0),
                Err(ArenaError::Config(ConfigError::TooLarge { .. }))
            ));

            let config = GameConfig {
                rows: usize::MAX,
                cols: 2,
                ..GameConfig::default()
            };
            assert!(matches!(
                Arena::new(&config, vec![bot('A')], 0),
                Err(ArenaError::Config(ConfigError::TooLarge { .. }))
            ));
        }
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn obstacle_counts_match_config() {
            let config = GameConfig::default();
            let arena = Arena::new(&config, vec![bot('A'), bot('B')], 7).unwrap();
            assert_eq!(arena.count_tiles(Tile::Mound), config.mounds);
            assert_eq!(arena.count_tiles(Tile::Pit), config.pits);
            assert_eq!(arena.count_tiles(Tile::Flamethrower), config.flamethrowers);
            assert_eq!(arena.robot_count(), 2);
        }

        #[test]
        fn robots_spawn_on_their_symbol() {
            let config = GameConfig::for_grid(10, 10);
            let arena = Arena::new(&config, vec![bot('A'), bot('B'), bot('C')], 3).unwrap();
            for record in arena.robots() {
                assert_eq!(arena.get_cell(record.position()), Some(Tile::Robot(record.symbol())));
                assert_eq!(record.combatant().location(), record.position());
                assert_eq!(record.combatant().chassis().bounds(), (10, 10));
                assert!(!record.on_flamethrower());
            }
        }

        #[test]
        fn full_grid_is_exactly_fillable() {
            let mut config = GameConfig::for_grid(2, 2).without_obstacles();
            config.mounds = 2;
            config.pits = 1;
            let arena = Arena::new(&config, vec![bot('A')], 11).unwrap();
            assert_eq!(arena.count_tiles(Tile::Empty), 0);
        }

        #[test]
        fn overcrowded_config_fails_fast() {
            let mut config = GameConfig::for_grid(2, 2).without_obstacles();
            config.mounds = 4;
            let result = Arena::new(&config, vec![bot('A')], 11);
            assert!(matches!(result, Err(ArenaError::Config(_))));
        }

        #[test]
        fn saturated_grid_rejects_placement() {
            let mut arena = Arena::empty(1, 2, 5).unwrap();
            arena.place(bot('A')).unwrap();
            arena.place(bot('B')).unwrap();
            let err = arena.place(bot('C')).unwrap_err();
            assert_eq!(
                err,
                ArenaError::Saturated {
                    what: "robot",
                    requested: 1,
                    available: 0
                }
            );
        }

        #[test]
        fn saturated_obstacles_are_rejected() {
            let mut arena = Arena::empty(2, 2, 5).unwrap();
            let err = arena
                .place_obstacles(Obstacles {
                    mounds: 2,
                    pits: 3,
                    flamethrowers: 0,
                })
                .unwrap_err();
            assert_eq!(
                err,
                ArenaError::Saturated {
                    what: "pits",
                    requested: 3,
                    available: 2
                }
            );
        }

        #[test]
        fn invalid_and_duplicate_symbols_are_rejected() {
            let config = GameConfig::for_grid(5, 5);
            assert!(matches!(
                Arena::new(&config, vec![bot('M')], 1),
                Err(ArenaError::InvalidSymbol { symbol: 'M', .. })
            ));
            assert!(matches!(
                Arena::new(&config, vec![bot('A'), bot('A')], 1),
                Err(ArenaError::DuplicateSymbol { symbol: 'A' })
            ));
        }

        #[test]
        fn place_at_requires_empty_cell() {
            let mut arena = Arena::empty(3, 3, 1).unwrap();
            arena.set_cell(Cell::new(1, 1), Tile::Mound);
            assert_eq!(
                arena.place_at(bot('A'), Cell::new(1, 1)).unwrap_err(),
                ArenaError::CellUnavailable { cell: Cell::new(1, 1) }
            );
            assert!(arena.place_at(bot('A'), Cell::new(5, 5)).is_err());
            let id = arena.place_at(bot('A'), Cell::new(0, 2)).unwrap();
            assert_eq!(arena.robot(id).unwrap().position(), Cell::new(0, 2));
        }
    }

    mod position_tests {
        use super::*;

        #[test]
        fn update_moves_record_and_writes_symbol() {
            let mut arena = Arena::empty(5, 5, 1).unwrap();
            let id = arena.place_at(bot('A'), Cell::new(0, 0)).unwrap();

            assert!(arena.update_robot_position(id, Cell::new(2, 3), true));

            let record = arena.robot(id).unwrap();
            assert_eq!(record.position(), Cell::new(2, 3));
            assert!(record.on_flamethrower());
            assert_eq!(record.combatant().location(), Cell::new(2, 3));
            assert_eq!(arena.get_cell(Cell::new(2, 3)), Some(Tile::Robot('A')));
            // Old cell is the caller's job.
            assert_eq!(arena.get_cell(Cell::new(0, 0)), Some(Tile::Robot('A')));
        }

        #[test]
        fn update_with_bad_input_changes_nothing() {
            let mut arena = Arena::empty(5, 5, 1).unwrap();
            let id = arena.place_at(bot('A'), Cell::new(1, 1)).unwrap();
            let before: Vec<_> = (0..5)
                .flat_map(|r| (0..5).map(move |c| Cell::new(r, c)))
                .map(|cell| arena.get_cell(cell))
                .collect();

            assert!(!arena.update_robot_position(RobotId::new(3), Cell::new(2, 2), false));
            assert!(!arena.update_robot_position(id, Cell::new(5, 0), false));
            assert!(!arena.update_robot_position(id, Cell::new(0, -1), false));

            let after: Vec<_> = (0..5)
                .flat_map(|r| (0..5).map(move |c| Cell::new(r, c)))
                .map(|cell| arena.get_cell(cell))
                .collect();
            assert_eq!(before, after);
            assert_eq!(arena.robot(id).unwrap().position(), Cell::new(1, 1));
        }
    }

    mod winner_tests {
        use super::*;

        #[test]
        fn four_robots_three_dead_has_winner() {
            let mut arena = Arena::empty(4, 4, 1).unwrap();
            for (i, symbol) in ['A', 'B', 'C', 'D'].into_iter().enumerate() {
                #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
                let cell = Cell::new(i as i32, 0);
                arena.place_at(bot(symbol), cell).unwrap();
            }
            assert_eq!(arena.count_alive(), 4);
            assert!(!arena.has_winner());

            for index in 1..4 {
                arena
                    .robot_mut(RobotId::new(index))
                    .unwrap()
                    .combatant_mut()
                    .take_damage(1000);
            }
            assert_eq!(arena.count_alive(), 1);
            assert!(arena.has_winner());
        }

        #[test]
        fn no_robots_alive_is_still_a_finished_match() {
            let mut arena = Arena::empty(2, 2, 1).unwrap();
            arena.place_at(scripted('A').with_health(0).boxed(), Cell::new(0, 0)).unwrap();
            assert_eq!(arena.count_alive(), 0);
            assert!(arena.has_winner());
        }

        #[test]
        fn state_reflects_hazards() {
            let mut arena = Arena::empty(3, 3, 1).unwrap();
            let id = arena.place_at(bot('A'), Cell::new(0, 0)).unwrap();
            assert_eq!(arena.robot(id).unwrap().state(), RobotState::Active);

            arena.update_robot_position(id, Cell::new(0, 1), true);
            assert_eq!(arena.robot(id).unwrap().state(), RobotState::Burning);

            arena.robot_mut(id).unwrap().combatant_mut().disable_movement();
            assert_eq!(arena.robot(id).unwrap().state(), RobotState::Trapped);

            arena.robot_mut(id).unwrap().combatant_mut().take_damage(500);
            assert_eq!(arena.robot(id).unwrap().state(), RobotState::Dead);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::for_grid(12, 12);
        let a = Arena::new(&config, vec![bot('A'), bot('B')], 99).unwrap();
        let b = Arena::new(&config, vec![bot('A'), bot('B')], 99).unwrap();
        for row in 0..12 {
            for col in 0..12 {
                let cell = Cell::new(row, col);
                assert_eq!(a.get_cell(cell), b.get_cell(cell));
            }
        }
        assert_eq!(a.seed(), 99);
    }
}
