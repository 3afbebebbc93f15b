//! Built-in demonstration combatants.
//!
//! These stand in for externally authored robots so a match can run out of
//! the box. Each one is deterministic given the match seed and its own
//! inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use robowarz_core::combatant::{Chassis, Combatant, CombatantRegistry, Weapon};
use robowarz_core::radar::RadarObject;
use robowarz_core::{Cell, Direction, Tile};

/// Registry of every built-in combatant, in default roster order.
pub fn registry() -> CombatantRegistry {
    let mut registry = CombatantRegistry::new();
    registry.register("hunter", hunter);
    registry.register("wanderer", wanderer);
    registry.register("sprinter", sprinter);
    registry.register("turtle", turtle);
    registry
}

fn hunter() -> Box<dyn Combatant> {
    Box::new(Hunter::new())
}

fn wanderer() -> Box<dyn Combatant> {
    Box::new(Wanderer::new())
}

fn sprinter() -> Box<dyn Combatant> {
    Box::new(Sprinter::new())
}

fn turtle() -> Box<dyn Combatant> {
    Box::new(Turtle::new())
}

/// Direction code that steps from `from` towards `to`, or 0 if equal.
fn heading(from: Cell, to: Cell) -> i32 {
    let dr = (to.row - from.row).signum();
    let dc = (to.col - from.col).signum();
    Direction::ALL
        .iter()
        .find(|d| d.delta() == (dr, dc))
        .map_or(0, |d| d.code())
}

fn chebyshev(a: Cell, b: Cell) -> i32 {
    (a.row - b.row).abs().max((a.col - b.col).abs())
}

// =============================================================================
// Hunter
// =============================================================================

/// Sweeps the radar clockwise and closes in on the nearest robot it sees.
/// Fires once adjacent.
struct Hunter {
    chassis: Chassis,
    sweep: i32,
    target: Option<Cell>,
}

impl Hunter {
    fn new() -> Self {
        Self {
            chassis: Chassis::new("Hunter", 'H', Weapon::Hammer).with_armor(2),
            sweep: 0,
            target: None,
        }
    }
}

impl Combatant for Hunter {
    fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    fn chassis_mut(&mut self) -> &mut Chassis {
        &mut self.chassis
    }

    fn radar_direction(&mut self) -> i32 {
        if self.target.is_some() {
            return 0;
        }
        self.sweep = self.sweep % 8 + 1;
        self.sweep
    }

    fn process_radar_results(&mut self, results: &[RadarObject]) {
        let me = self.location();
        self.target = results
            .iter()
            .filter(|object| object.tile.is_robot() && object.cell != me)
            .map(|object| object.cell)
            .min_by_key(|&cell| chebyshev(me, cell));
    }

    fn shot_location(&mut self) -> Option<Cell> {
        self.target
            .filter(|&target| chebyshev(self.location(), target) == 1)
    }

    fn move_direction(&mut self) -> (i32, i32) {
        match self.target {
            Some(target) => (heading(self.location(), target), self.move_speed()),
            None => (0, 0),
        }
    }
}

// =============================================================================
// Wanderer
// =============================================================================

/// Walks in random directions and steers around hazards it can see.
struct Wanderer {
    chassis: Chassis,
    rng: StdRng,
    hazards: Vec<Cell>,
}

impl Wanderer {
    const SEED: u64 = 0x5EED_0F_0A_57;

    fn new() -> Self {
        Self {
            chassis: Chassis::new("Wanderer", 'W', Weapon::Flamethrower),
            rng: StdRng::seed_from_u64(Self::SEED),
            hazards: Vec::new(),
        }
    }
}

impl Combatant for Wanderer {
    fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    fn chassis_mut(&mut self) -> &mut Chassis {
        &mut self.chassis
    }

    fn radar_direction(&mut self) -> i32 {
        0
    }

    fn process_radar_results(&mut self, results: &[RadarObject]) {
        self.hazards = results
            .iter()
            .filter(|object| matches!(object.tile, Tile::Pit | Tile::Flamethrower))
            .map(|object| object.cell)
            .collect();
    }

    fn shot_location(&mut self) -> Option<Cell> {
        None
    }

    fn move_direction(&mut self) -> (i32, i32) {
        let here = self.location();
        let safe: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| !self.hazards.contains(&here.step(d)))
            .collect();
        if safe.is_empty() {
            return (0, 0);
        }
        let direction = safe[self.rng.gen_range(0..safe.len())];
        (direction.code(), 1)
    }
}

// =============================================================================
// Sprinter
// =============================================================================

/// Runs flat out in a straight line and turns clockwise when it stops short.
struct Sprinter {
    chassis: Chassis,
    direction: Direction,
    last: Option<Cell>,
}

impl Sprinter {
    fn new() -> Self {
        Self {
            chassis: Chassis::new("Sprinter", 'S', Weapon::Railgun).with_move_speed(4),
            direction: Direction::East,
            last: None,
        }
    }

    fn turn_clockwise(&mut self) {
        let next = self.direction.code() % 8 + 1;
        if let Some(direction) = Direction::from_code(next) {
            self.direction = direction;
        }
    }
}

impl Combatant for Sprinter {
    fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    fn chassis_mut(&mut self) -> &mut Chassis {
        &mut self.chassis
    }

    fn radar_direction(&mut self) -> i32 {
        self.direction.code()
    }

    fn process_radar_results(&mut self, _results: &[RadarObject]) {}

    fn shot_location(&mut self) -> Option<Cell> {
        None
    }

    fn move_direction(&mut self) -> (i32, i32) {
        let here = self.location();
        if self.last == Some(here) {
            self.turn_clockwise();
        }
        self.last = Some(here);
        (self.direction.code(), self.move_speed())
    }
}

// =============================================================================
// Turtle
// =============================================================================

/// Never moves. Fires at anything that comes adjacent.
struct Turtle {
    chassis: Chassis,
    neighbour: Option<Cell>,
}

impl Turtle {
    fn new() -> Self {
        Self {
            chassis: Chassis::new("Turtle", 'T', Weapon::Grenade)
                .with_armor(5)
                .with_move_speed(1),
            neighbour: None,
        }
    }
}

impl Combatant for Turtle {
    fn chassis(&self) -> &Chassis {
        &self.chassis
    }

    fn chassis_mut(&mut self) -> &mut Chassis {
        &mut self.chassis
    }

    fn radar_direction(&mut self) -> i32 {
        0
    }

    fn process_radar_results(&mut self, results: &[RadarObject]) {
        self.neighbour = results
            .iter()
            .find(|object| object.tile.is_robot())
            .map(|object| object.cell);
    }

    fn shot_location(&mut self) -> Option<Cell> {
        self.neighbour
    }

    fn move_direction(&mut self) -> (i32, i32) {
        (0, 0)
    }
}
