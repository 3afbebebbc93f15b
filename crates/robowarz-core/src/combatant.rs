//! The combatant capability and the registry that produces combatants.
//!
//! The arena never looks inside a combatant. It talks to it through the
//! [`Combatant`] trait: a handful of accessors and mutators over the robot's
//! own stats, plus four decision callbacks invoked once per turn:
//!
//! 1. [`Combatant::radar_direction`]
//! 2. [`Combatant::process_radar_results`]
//! 3. [`Combatant::shot_location`]
//! 4. [`Combatant::move_direction`] (only when no shot was requested)
//!
//! Stats live in a [`Chassis`] that every combatant embeds. The accessor and
//! mutator methods have default implementations over the chassis, so an
//! author only writes the decisions:
//!
//! ```
//! use robowarz_core::combatant::{Chassis, Combatant, Weapon};
//! use robowarz_core::geometry::Cell;
//! use robowarz_core::radar::RadarObject;
//!
//! struct Turtle {
//!     chassis: Chassis,
//! }
//!
//! impl Combatant for Turtle {
//!     fn chassis(&self) -> &Chassis {
//!         &self.chassis
//!     }
//!     fn chassis_mut(&mut self) -> &mut Chassis {
//!         &mut self.chassis
//!     }
//!     fn radar_direction(&mut self) -> i32 {
//!         0
//!     }
//!     fn process_radar_results(&mut self, _results: &[RadarObject]) {}
//!     fn shot_location(&mut self) -> Option<Cell> {
//!         None
//!     }
//!     fn move_direction(&mut self) -> (i32, i32) {
//!         (0, 0)
//!     }
//! }
//!
//! let turtle = Turtle { chassis: Chassis::new("Turtle", 'T', Weapon::Hammer) };
//! assert_eq!(turtle.health(), 100);
//! ```
//!
//! # Registry
//!
//! Combatants are built by [`CombatantFactory`] functions. The
//! [`CombatantRegistry`] keeps them by name in registration order, which is
//! also the roster order a runner hands to the arena.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::UnknownCombatant;
use crate::geometry::Cell;
use crate::radar::RadarObject;

/// Starting health for a fresh chassis.
pub const DEFAULT_HEALTH: i32 = 100;
/// Starting move speed for a fresh chassis.
pub const DEFAULT_MOVE_SPEED: i32 = 2;
/// Grenades issued to a grenade-armed chassis.
pub const DEFAULT_GRENADES: u32 = 10;

// =============================================================================
// Weapon
// =============================================================================

/// Weapon a combatant carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weapon {
    /// Short-range cone.
    Flamethrower,
    /// Long straight line.
    Railgun,
    /// Area burst, limited ammunition.
    Grenade,
    /// Adjacent cell only.
    Hammer,
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flamethrower => "flamethrower",
            Self::Railgun => "railgun",
            Self::Grenade => "grenade",
            Self::Hammer => "hammer",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Chassis
// =============================================================================

/// A combatant's own stats and last known position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chassis {
    name: String,
    symbol: char,
    health: i32,
    armor: i32,
    move_speed: i32,
    weapon: Weapon,
    grenades: u32,
    position: Cell,
    bounds: (usize, usize),
}

impl Chassis {
    /// Creates a chassis with default health and speed.
    #[must_use]
    pub fn new(name: impl Into<String>, symbol: char, weapon: Weapon) -> Self {
        Self {
            name: name.into(),
            symbol,
            health: DEFAULT_HEALTH,
            armor: 0,
            move_speed: DEFAULT_MOVE_SPEED,
            weapon,
            grenades: if weapon == Weapon::Grenade {
                DEFAULT_GRENADES
            } else {
                0
            },
            position: Cell::default(),
            bounds: (0, 0),
        }
    }

    /// Sets the armor rating.
    #[must_use]
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    /// Sets the move speed.
    #[must_use]
    pub fn with_move_speed(mut self, move_speed: i32) -> Self {
        self.move_speed = move_speed;
        self
    }

    /// Sets the starting health.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grid symbol.
    #[must_use]
    pub const fn symbol(&self) -> char {
        self.symbol
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Armor rating.
    #[must_use]
    pub const fn armor(&self) -> i32 {
        self.armor
    }

    /// Cells per turn. Zero once trapped.
    #[must_use]
    pub const fn move_speed(&self) -> i32 {
        self.move_speed
    }

    /// Carried weapon.
    #[must_use]
    pub const fn weapon(&self) -> Weapon {
        self.weapon
    }

    /// Grenades left.
    #[must_use]
    pub const fn grenades(&self) -> u32 {
        self.grenades
    }

    /// Last position reported by the arena.
    #[must_use]
    pub const fn position(&self) -> Cell {
        self.position
    }

    /// Arena `(rows, cols)` as bound at placement.
    #[must_use]
    pub const fn bounds(&self) -> (usize, usize) {
        self.bounds
    }

    /// Records the arena size.
    pub fn set_boundaries(&mut self, rows: usize, cols: usize) {
        self.bounds = (rows, cols);
    }

    /// Records a new absolute position.
    pub fn move_to(&mut self, cell: Cell) {
        self.position = cell;
    }

    /// Subtracts `amount` from health, stopping at zero. Negative amounts are
    /// ignored.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount.max(0)).max(0);
    }

    /// Zeroes move speed for the rest of the match.
    pub fn disable_movement(&mut self) {
        self.move_speed = 0;
    }

    /// Spends one grenade. Returns false when none are left.
    pub fn use_grenade(&mut self) -> bool {
        if self.grenades == 0 {
            return false;
        }
        self.grenades -= 1;
        true
    }
}

// =============================================================================
// Combatant
// =============================================================================

/// The capability the arena needs from a battling agent.
///
/// Decision callbacks return raw codes. Anything out of range is treated as a
/// no-op by the arena, so a faulty combatant can never corrupt the match.
pub trait Combatant {
    /// The embedded stat block.
    fn chassis(&self) -> &Chassis;

    /// Mutable access to the embedded stat block.
    fn chassis_mut(&mut self) -> &mut Chassis;

    /// Radar direction for this turn: 0 for the surrounding cells, 1-8 for a ray.
    fn radar_direction(&mut self) -> i32;

    /// Receives the scan for the direction returned by [`Self::radar_direction`].
    fn process_radar_results(&mut self, results: &[RadarObject]);

    /// Cell to shoot at this turn, if any. A shot replaces the move.
    fn shot_location(&mut self) -> Option<Cell>;

    /// `(direction, distance)` for this turn. Direction 0 means stay put.
    fn move_direction(&mut self) -> (i32, i32);

    /// Display name.
    fn name(&self) -> &str {
        self.chassis().name()
    }

    /// Grid symbol, an uppercase letter unique within the match.
    fn symbol(&self) -> char {
        self.chassis().symbol()
    }

    /// Remaining health. Zero or below means dead.
    fn health(&self) -> i32 {
        self.chassis().health()
    }

    /// Armor rating.
    fn armor(&self) -> i32 {
        self.chassis().armor()
    }

    /// Cells this combatant may move per turn.
    fn move_speed(&self) -> i32 {
        self.chassis().move_speed()
    }

    /// Carried weapon.
    fn weapon(&self) -> Weapon {
        self.chassis().weapon()
    }

    /// Grenades left.
    fn grenades(&self) -> u32 {
        self.chassis().grenades()
    }

    /// Position as last reported by the arena.
    fn location(&self) -> Cell {
        self.chassis().position()
    }

    /// Called once at placement with the arena size.
    fn set_boundaries(&mut self, rows: usize, cols: usize) {
        self.chassis_mut().set_boundaries(rows, cols);
    }

    /// Called whenever the arena commits a new position.
    fn move_to(&mut self, cell: Cell) {
        self.chassis_mut().move_to(cell);
    }

    /// Applies hazard or weapon damage.
    fn take_damage(&mut self, amount: i32) {
        self.chassis_mut().take_damage(amount);
    }

    /// Traps the combatant for the rest of the match.
    fn disable_movement(&mut self) {
        self.chassis_mut().disable_movement();
    }

    /// True while health is positive.
    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Entry point that produces a fresh combatant.
pub type CombatantFactory = fn() -> Box<dyn Combatant>;

/// Named combatant factories in registration order.
///
/// ```
/// # use robowarz_core::combatant::{Chassis, Combatant, CombatantRegistry, Weapon};
/// # use robowarz_core::geometry::Cell;
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
/// fn idle() -> Box<dyn Combatant> {
///     Box::new(Idle(Chassis::new("Idle", 'I', Weapon::Hammer)))
/// }
///
/// let mut registry = CombatantRegistry::new();
/// registry.register("idle", idle);
/// assert_eq!(registry.names().collect::<Vec<_>>(), vec!["idle"]);
/// assert_eq!(registry.build("idle").unwrap().symbol(), 'I');
/// ```
#[derive(Default)]
pub struct CombatantRegistry {
    factories: Vec<(String, CombatantFactory)>,
}

impl CombatantRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Registers `factory` under `name`, replacing an earlier entry with the
    /// same name in place.
    pub fn register(&mut self, name: impl Into<String>, factory: CombatantFactory) {
        let name = name.into();
        if let Some(slot) = self.factories.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = factory;
        } else {
            self.factories.push((name, factory));
        }
    }

    /// The factory registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<CombatantFactory> {
        self.factories
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, factory)| *factory)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.factories.iter().map(|(name, _)| name.as_str())
    }

    /// Number of registered factories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Builds one combatant by name.
    #[must_use]
    pub fn build(&self, name: &str) -> Option<Box<dyn Combatant>> {
        self.get(name).map(|factory| factory())
    }

    /// Builds one of every registered combatant.
    #[must_use]
    pub fn build_all(&self) -> Vec<Box<dyn Combatant>> {
        self.factories.iter().map(|(_, factory)| factory()).collect()
    }

    /// Builds the named combatants in the given order.
    ///
    /// # Errors
    ///
    /// [`UnknownCombatant`] for the first name that is not registered.
    pub fn build_roster<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<Box<dyn Combatant>>, UnknownCombatant> {
        names
            .iter()
            .map(|name| {
                self.build(name.as_ref()).ok_or_else(|| UnknownCombatant {
                    name: name.as_ref().to_string(),
                })
            })
            .collect()
    }
}

impl fmt::Debug for CombatantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombatantRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy(Chassis);

    impl Combatant for Dummy {
        fn chassis(&self) -> &Chassis {
            &self.0
        }
        fn chassis_mut(&mut self) -> &mut Chassis {
            &mut self.0
        }
        fn radar_direction(&mut self) -> i32 {
            0
        }
        fn process_radar_results(&mut self, _results: &[RadarObject]) {}
        fn shot_location(&mut self) -> Option<Cell> {
            None
        }
        fn move_direction(&mut self) -> (i32, i32) {
            (0, 0)
        }
    }

    fn alpha() -> Box<dyn Combatant> {
        Box::new(Dummy(Chassis::new("Alpha", 'A', Weapon::Railgun)))
    }

    fn bravo() -> Box<dyn Combatant> {
        Box::new(Dummy(Chassis::new("Bravo", 'B', Weapon::Grenade)))
    }

    mod chassis_tests {
        use super::*;

        #[test]
        fn new_chassis_has_defaults() {
            let chassis = Chassis::new("Alpha", 'A', Weapon::Railgun);
            assert_eq!(chassis.health(), DEFAULT_HEALTH);
            assert_eq!(chassis.move_speed(), DEFAULT_MOVE_SPEED);
            assert_eq!(chassis.grenades(), 0);
            assert_eq!(chassis.position(), Cell::new(0, 0));
        }

        #[test]
        fn grenade_chassis_is_issued_grenades() {
            let mut chassis = Chassis::new("Bravo", 'B', Weapon::Grenade);
            assert_eq!(chassis.grenades(), DEFAULT_GRENADES);
            assert!(chassis.use_grenade());
            assert_eq!(chassis.grenades(), DEFAULT_GRENADES - 1);
        }

        #[test]
        fn damage_floors_at_zero() {
            let mut chassis = Chassis::new("Alpha", 'A', Weapon::Railgun).with_health(40);
            chassis.take_damage(30);
            assert_eq!(chassis.health(), 10);
            chassis.take_damage(50);
            assert_eq!(chassis.health(), 0);
            chassis.take_damage(-20);
            assert_eq!(chassis.health(), 0);
        }

        #[test]
        fn disable_movement_is_permanent() {
            let mut chassis = Chassis::new("Alpha", 'A', Weapon::Railgun).with_move_speed(4);
            chassis.disable_movement();
            assert_eq!(chassis.move_speed(), 0);
        }
    }

    mod trait_tests {
        use super::*;

        #[test]
        fn default_methods_delegate_to_chassis() {
            let mut bot = alpha();
            bot.set_boundaries(10, 12);
            bot.move_to(Cell::new(3, 4));
            bot.take_damage(100);
            assert_eq!(bot.chassis().bounds(), (10, 12));
            assert_eq!(bot.location(), Cell::new(3, 4));
            assert!(!bot.is_alive());
            assert_eq!(bot.weapon(), Weapon::Railgun);
        }

        #[test]
        fn combatant_is_object_safe() {
            fn _accepts_boxed(_combatant: Box<dyn Combatant>) {}
        }
    }

    mod registry_tests {
        use super::*;

        #[test]
        fn registration_order_is_roster_order() {
            let mut registry = CombatantRegistry::new();
            registry.register("bravo", bravo);
            registry.register("alpha", alpha);
            let symbols: Vec<char> = registry.build_all().iter().map(|c| c.symbol()).collect();
            assert_eq!(symbols, vec!['B', 'A']);
        }

        #[test]
        fn re_registering_replaces_in_place() {
            let mut registry = CombatantRegistry::new();
            registry.register("x", alpha);
            registry.register("y", bravo);
            registry.register("x", bravo);
            assert_eq!(registry.len(), 2);
            assert_eq!(registry.build("x").unwrap().symbol(), 'B');
            assert_eq!(registry.names().collect::<Vec<_>>(), vec!["x", "y"]);
        }

        #[test]
        fn build_roster_reports_unknown_names() {
            let mut registry = CombatantRegistry::new();
            registry.register("alpha", alpha);
            let err = registry
                .build_roster(&["alpha", "ghost"])
                .err()
                .unwrap();
            assert_eq!(err.name, "ghost");
        }

        #[test]
        fn empty_registry() {
            let registry = CombatantRegistry::new();
            assert!(registry.is_empty());
            assert!(registry.build("alpha").is_none());
            assert!(registry.build_all().is_empty());
        }
    }
}
