//! Utility helpers for tests.
//!
//! Scripted input sources and small world builders shared by the
//! integration suites.

pub mod input;
pub mod world;

pub use input::ScriptedInput;
pub use world::{
    floor_level, fresh_simulation, resting_y, spawn_test_actor, spawn_test_solid, ActorSnapshot,
    FLOOR_TOP,
};
