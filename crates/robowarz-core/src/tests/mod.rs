//! Crate-level scenario tests.
//!
//! - `helpers.rs`: the scripted test combatant and arena setup shortcuts
//! - `integration.rs`: full turns and matches through the public API
//! - `determinism.rs`: seed reproducibility and property tests

pub mod helpers;
