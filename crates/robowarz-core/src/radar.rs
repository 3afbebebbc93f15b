//! Radar scans: read-only views of the grid around a robot.
//!
//! A scan never mutates the arena and never fails. Direction 0 returns the
//! eight neighbouring cells; directions 1-8 cast a three-cell-wide beam to
//! the edge of the grid. Beams see through everything: mounds, hazards and
//! other robots are reported, and the beam carries on past them.
//!
//! # Beam Shape
//!
//! Each beam is three parallel rays. Every ray starts at
//! `robot + direction + offset` and steps by `direction` until it leaves the
//! grid:
//!
//! | Direction   | Offsets                        |
//! |-------------|--------------------------------|
//! | E, W        | `(-1,0)`, `(0,0)`, `(1,0)`     |
//! | N, S        | `(0,-1)`, `(0,0)`, `(0,1)`     |
//! | diagonals   | `(-1,-1)`, `(0,0)`, `(1,1)`    |
//!
//! For NW and SE the diagonal offsets lie along the beam itself, so the rays
//! overlap and cells may be reported more than once. The scanning robot's own
//! cell is always skipped.

use serde::{Deserialize, Serialize};

use crate::arena::{Arena, RobotId, Tile};
use crate::geometry::{Cell, Direction};

/// Direction code for the eight surrounding cells.
pub const SURROUNDINGS: i32 = 0;

/// One scanned cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RadarObject {
    /// What the cell holds.
    pub tile: Tile,
    /// Where it is.
    pub cell: Cell,
}

impl RadarObject {
    /// Creates a scan entry.
    #[must_use]
    pub const fn new(tile: Tile, cell: Cell) -> Self {
        Self { tile, cell }
    }
}

/// Scans from robot `id` in direction `code`.
///
/// Returns an empty list for an unknown robot or a code outside 0-8.
///
/// ```
/// use robowarz_core::arena::Arena;
/// use robowarz_core::geometry::Cell;
/// use robowarz_core::radar::scan;
/// # use robowarz_core::combatant::{Chassis, Combatant, Weapon};
/// # use robowarz_core::radar::RadarObject;
/// # struct Idle(Chassis);
/// # impl Combatant for Idle {
/// #     fn chassis(&self) -> &Chassis { &self.0 }
/// #     fn chassis_mut(&mut self) -> &mut Chassis { &mut self.0 }
/// #     fn radar_direction(&mut self) -> i32 { 0 }
/// #     fn process_radar_results(&mut self, _: &[RadarObject]) {}
/// #     fn shot_location(&mut self) -> Option<Cell> { None }
/// #     fn move_direction(&mut self) -> (i32, i32) { (0, 0) }
/// # }
///
/// let mut arena = Arena::empty(5, 5, 1).unwrap();
/// let id = arena
///     .place_at(Box::new(Idle(Chassis::new("Idle", 'I', Weapon::Hammer))), Cell::new(0, 0))
///     .unwrap();
///
/// assert_eq!(scan(&arena, id, 0).len(), 3); // corner
/// assert!(scan(&arena, id, 9).is_empty());
/// ```
#[must_use]
pub fn scan(arena: &Arena, id: RobotId, code: i32) -> Vec<RadarObject> {
    let Some(origin) = arena.robot(id).map(|record| record.position()) else {
        return Vec::new();
    };
    if code == SURROUNDINGS {
        return surroundings(arena, origin);
    }
    match Direction::from_code(code) {
        Some(direction) => beam(arena, origin, direction),
        None => Vec::new(),
    }
}

/// The up-to-eight cells around `origin`, row-major.
fn surroundings(arena: &Arena, origin: Cell) -> Vec<RadarObject> {
    let mut results = Vec::with_capacity(8);
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let cell = origin.offset(dr, dc);
            if let Some(tile) = arena.get_cell(cell) {
                results.push(RadarObject::new(tile, cell));
            }
        }
    }
    results
}

const fn beam_offsets(direction: Direction) -> [(i32, i32); 3] {
    let (dr, _) = direction.delta();
    if direction.is_diagonal() {
        [(-1, -1), (0, 0), (1, 1)]
    } else if dr == 0 {
        [(-1, 0), (0, 0), (1, 0)]
    } else {
        [(0, -1), (0, 0), (0, 1)]
    }
}

/// Three parallel rays from `origin` to the grid edge.
fn beam(arena: &Arena, origin: Cell, direction: Direction) -> Vec<RadarObject> {
    let mut results = Vec::new();
    for (or, oc) in beam_offsets(direction) {
        let mut cell = origin.step(direction).offset(or, oc);
        while let Some(tile) = arena.get_cell(cell) {
            if cell != origin {
                results.push(RadarObject::new(tile, cell));
            }
            cell = cell.step(direction);
        }
    }
    results
}
