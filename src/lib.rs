#![cfg_attr(docsrs, feature(doc_cfg))]
//! Deterministic movement core for a 2D tile platformer.
//!
//! Actors move through whole-number space against static solids. Each fixed
//! tick probes contacts, runs the jump state machine and ability hooks,
//! applies gravity and walking, then resolves motion in sub-steps. The
//! [`Simulation`] harness drives it headlessly; [`PlatformerPlugin`] embeds
//! it in any Bevy [`App`](bevy::app::App).
pub mod ability;
pub mod character;
pub mod clock;
pub mod components;
pub mod config;
pub mod constants;
pub mod contact;
pub mod error;
pub mod geometry;
pub mod gravity;
pub mod input;
pub mod jump;
pub mod logging;
pub mod numeric;
pub mod plugin;
pub mod resolver;
pub mod simulation;
pub mod spawn_world;
pub mod walk;
pub use constants::*;

// Re-export commonly used items
pub use ability::{AbilityHook, AbilitySlot, AbilitySlots};
pub use character::{CharacterKind, CharacterProfile, PlayerCharacters};
pub use clock::FixedTimestep;
pub use config::{InputBindings, InputCode, SimulationConfig};
pub use error::SetupError;
pub use geometry::{overlaps, penetration, Aabb};
pub use input::{FrameInput, InputSource, PlayerInput};
pub use logging::init as init_logging;
pub use plugin::{FixedTick, PlatformerPlugin};
pub use simulation::Simulation;
pub use spawn_world::{LevelDescriptor, PlayerDescriptor, TileDescriptor};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use coyote::prelude::*;
    //! ```

    pub use crate::components::{
        Actor, CollisionBounds, OnCeiling, OnGround, OnWall, Player, Position, Solid, Velocity,
    };
    pub use crate::CharacterKind;
    pub use crate::InputCode;
    pub use crate::LevelDescriptor;
    pub use crate::Simulation;
    pub use crate::SimulationConfig;
}
