//! Test doubles and setup shortcuts.

use std::cell::RefCell;
use std::rc::Rc;

use crate::arena::{Arena, RobotId, Tile};
use crate::combatant::{Chassis, Combatant, Weapon};
use crate::geometry::Cell;
use crate::radar::RadarObject;

// =============================================================================
// ScriptedBot
// =============================================================================

/// Every scan a [`ScriptedBot`] received, in turn order.
pub type ScanLog = Rc<RefCell<Vec<Vec<RadarObject>>>>;

/// A combatant that repeats the same decisions every turn.
///
/// Defaults: radar 0, no shot, no move, 100 health, speed 2, hammer.
pub struct ScriptedBot {
    chassis: Chassis,
    radar: i32,
    shot: Option<Cell>,
    movement: (i32, i32),
    scans: ScanLog,
}

impl ScriptedBot {
    /// A bot named `Bot <symbol>`.
    pub fn new(symbol: char) -> Self {
        Self {
            chassis: Chassis::new(format!("Bot {symbol}"), symbol, Weapon::Hammer),
            radar: 0,
            shot: None,
            movement: (0, 0),
            scans: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.chassis = self.chassis.with_health(health);
        self
    }

    pub fn with_move_speed(mut self, speed: i32) -> Self {
        self.chassis = self.chassis.with_move_speed(speed);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        let chassis = Chassis::new(self.chassis.name(), self.chassis.symbol(), weapon)
            .with_health(self.chassis.health())
            .with_move_speed(self.chassis.move_speed())
            .with_armor(self.chassis.armor());
        self.chassis = chassis;
        self
    }

    /// Radar code to request every turn.
    pub fn radar(mut self, code: i32) -> Self {
        self.radar = code;
        self
    }

    /// Fire at `target` every turn.
    pub fn shooting(mut self, target: Cell) -> Self {
        self.shot = Some(target);
        self
    }

    /// Request `(direction, distance)` every turn.
    pub fn moving(mut self, direction: i32, distance: i32) -> Self {
        self.movement = (direction, distance);
        self
    }

    /// Shared handle to the scans this bot will receive.
    pub fn scan_log(&self) -> ScanLog {
        Rc::clone(&self.scans)
    }

    pub fn boxed(self) -> Box<dyn Combatant> {
        Box::new(self)
    }
}

impl Combatant for ScriptedBot {
    fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    fn chassis_mut(&mut self) -> &mut Chassis {
        &mut self.chassis
    }

    fn radar_direction(&mut self) -> i32 {
        self.radar
    }

    fn process_radar_results(&mut self, results: &[RadarObject]) {
        self.scans.borrow_mut().push(results.to_vec());
    }

    fn shot_location(&mut self) -> Option<Cell> {
        self.shot
    }

    fn move_direction(&mut self) -> (i32, i32) {
        self.movement
    }
}

/// Shorthand for [`ScriptedBot::new`].
pub fn scripted(symbol: char) -> ScriptedBot {
    ScriptedBot::new(symbol)
}

// =============================================================================
// Arena setup
// =============================================================================

/// An obstacle-free arena with a default bot `A` at `at`.
pub fn arena_with_robot_at(rows: usize, cols: usize, at: Cell) -> (Arena, RobotId) {
    let mut arena = Arena::empty(rows, cols, 17).expect("non-zero grid");
    let id = arena
        .place_at(scripted('A').boxed(), at)
        .expect("spawn cell on the grid");
    (arena, id)
}

/// Current health of robot `id`.
pub fn health_of(arena: &Arena, id: RobotId) -> i32 {
    arena
        .robot(id)
        .map(|record| record.combatant().health())
        .expect("robot in roster")
}

/// Every cell of the grid in row-major order.
pub fn snapshot(arena: &Arena) -> Vec<char> {
    let mut cells = Vec::with_capacity(arena.rows() * arena.cols());
    for row in 0..arena.rows() {
        for col in 0..arena.cols() {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let cell = Cell::new(row as i32, col as i32);
            cells.push(arena.get_cell(cell).map_or('?', |tile| tile.symbol()));
        }
    }
    cells
}

// =============================================================================
// CyclingBot
// =============================================================================

/// A combatant that sweeps radar and moves clockwise through all eight
/// directions, one per turn, at full speed.
pub struct CyclingBot {
    chassis: Chassis,
    turn: i32,
}

impl CyclingBot {
    pub fn new(symbol: char) -> Self {
        Self {
            chassis: Chassis::new(format!("Cycler {symbol}"), symbol, Weapon::Railgun),
            turn: 0,
        }
    }

    pub fn boxed(self) -> Box<dyn Combatant> {
        Box::new(self)
    }
}

impl Combatant for CyclingBot {
    fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    fn chassis_mut(&mut self) -> &mut Chassis {
        &mut self.chassis
    }

    fn radar_direction(&mut self) -> i32 {
        self.turn % 9
    }

    fn process_radar_results(&mut self, _results: &[RadarObject]) {}

    fn shot_location(&mut self) -> Option<Cell> {
        None
    }

    fn move_direction(&mut self) -> (i32, i32) {
        self.turn += 1;
        ((self.turn - 1) % 8 + 1, self.chassis.move_speed())
    }
}

/// `count` cycling bots with symbols from `A`, skipping reserved letters.
pub fn cyclers(count: usize) -> Vec<Box<dyn Combatant>> {
    ('A'..='Z')
        .filter(|&symbol| Tile::is_robot_symbol(symbol))
        .take(count)
        .map(|symbol| CyclingBot::new(symbol).boxed())
        .collect()
}
