//! Text rendering of the arena and the roster.
//!
//! Robots are drawn three characters wide so their state is visible at a
//! glance:
//!
//! | Marker | Meaning                        |
//! |--------|--------------------------------|
//! | `<A>`  | alive                          |
//! | `fAf`  | alive, flamethrower flag set   |
//! | `xAx`  | dead                           |
//! | ` M `  | any other cell, by its symbol  |

use std::fmt::{self, Write as _};

use crate::arena::{Arena, RobotRecord, RobotState};
use crate::geometry::Cell;

/// `Display` adapter that draws the grid.
///
/// ```
/// use robowarz_core::arena::{Arena, Tile};
/// use robowarz_core::geometry::Cell;
/// use robowarz_core::render::ArenaView;
///
/// let mut arena = Arena::empty(2, 3, 1).unwrap();
/// arena.set_cell(Cell::new(0, 1), Tile::Mound);
///
/// let text = ArenaView::new(&arena).grid_numbers(false).to_string();
/// assert_eq!(text, "+---------+\n| .  M  . |\n| .  .  . |\n+---------+\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ArenaView<'a> {
    arena: &'a Arena,
    show_grid_numbers: bool,
}

impl<'a> ArenaView<'a> {
    /// A view with row and column numbers.
    #[must_use]
    pub const fn new(arena: &'a Arena) -> Self {
        Self {
            arena,
            show_grid_numbers: true,
        }
    }

    /// Turns the row and column numbers on or off.
    #[must_use]
    pub const fn grid_numbers(mut self, show: bool) -> Self {
        self.show_grid_numbers = show;
        self
    }

    fn header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("  ")?;
        for col in 0..self.arena.cols() {
            write!(f, "{col:>3}")?;
        }
        f.write_char('\n')
    }

    fn border(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.show_grid_numbers {
            f.write_str("  ")?;
        }
        writeln!(f, "+{}+", "---".repeat(self.arena.cols()))
    }

    fn marker(&self, cell: Cell) -> String {
        let Some(tile) = self.arena.get_cell(cell) else {
            return "   ".to_string();
        };
        let symbol = tile.symbol();
        if !tile.is_robot() {
            return format!(" {symbol} ");
        }
        // Fire shows through every live state, trapped included.
        match self.arena.robot_at(cell) {
            Some(record) if !record.is_alive() => format!("x{symbol}x"),
            Some(record) if record.on_flamethrower() => format!("f{symbol}f"),
            Some(_) => format!("<{symbol}>"),
            None => format!(" {symbol} "),
        }
    }
}

impl fmt::Display for ArenaView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.show_grid_numbers {
            self.header(f)?;
        }
        self.border(f)?;
        for row in 0..self.arena.rows() {
            if self.show_grid_numbers {
                write!(f, "{row:>2}")?;
            }
            f.write_char('|')?;
            for col in 0..self.arena.cols() {
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                let cell = Cell::new(row as i32, col as i32);
                f.write_str(&self.marker(cell))?;
            }
            f.write_char('|')?;
            if self.show_grid_numbers {
                write!(f, "{row}")?;
            }
            f.write_char('\n')?;
        }
        self.border(f)?;
        if self.show_grid_numbers {
            self.header(f)?;
        }
        Ok(())
    }
}

/// One-line summary of a robot's stats and condition.
#[must_use]
pub fn status_line(record: &RobotRecord) -> String {
    let bot = record.combatant();
    let mut line = format!(
        "{} '{}' | H:{} A:{} M:{} W:{}",
        record.name(),
        record.symbol(),
        bot.health(),
        bot.armor(),
        bot.move_speed(),
        bot.weapon(),
    );
    if bot.grenades() > 0 {
        let _ = write!(line, " G:{}", bot.grenades());
    }
    let _ = write!(line, " @{}", record.position());
    match record.state() {
        RobotState::Dead => line.push_str(" [DEAD]"),
        RobotState::Trapped => line.push_str(" [TRAPPED IN PIT]"),
        RobotState::Burning => line.push_str(" [ON FLAMETHROWER]"),
        RobotState::Active => {}
    }
    line
}

/// Status lines for the whole roster, one per line.
#[must_use]
pub fn roster_status(arena: &Arena) -> String {
    arena.robots().fold(String::new(), |mut out, record| {
        let _ = writeln!(out, "{}: {}", record.id(), status_line(record));
        out
    })
}
