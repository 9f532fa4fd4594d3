//! World builders for collision and timing scenarios.

use bevy::prelude::*;
use coyote::components::{
    Actor, CollisionBounds, OnCeiling, OnGround, OnWall, Position, Solid, Velocity,
};
use coyote::{
    CharacterKind, LevelDescriptor, PlayerDescriptor, Simulation, SimulationConfig,
    TileDescriptor, LEVEL_FORMAT_VERSION,
};

/// Top edge of the floor built by [`floor_level`].
pub const FLOOR_TOP: i32 = 75;

/// A simulation with the default configuration.
///
/// # Panics
/// Panics if the default configuration is rejected.
#[must_use]
pub fn fresh_simulation() -> Simulation {
    Simulation::new(SimulationConfig::default())
        .unwrap_or_else(|e| panic!("default config rejected: {e}"))
}

/// A level with one floor tile, `half_width` wide on each side of x = 0,
/// and the player at `(x, y)` using `characters`.
#[must_use]
pub fn floor_level(half_width: i32, characters: &[CharacterKind], x: i32, y: i32) -> LevelDescriptor {
    LevelDescriptor {
        version: LEVEL_FORMAT_VERSION.to_owned(),
        tiles: vec![TileDescriptor::new(0, FLOOR_TOP + 25, half_width, 25)],
        player: PlayerDescriptor {
            x,
            y,
            characters: characters.to_vec(),
            character_index: 0,
        },
    }
}

/// Y at which a character of the given half height rests on the floor.
#[must_use]
pub const fn resting_y(half_height: i32) -> i32 {
    FLOOR_TOP - half_height
}

/// Spawns a bare actor: no player intents, no gravity.
pub fn spawn_test_actor(
    world: &mut World,
    position: (i32, i32),
    bounds: (i32, i32),
    velocity: (i32, i32),
) -> Entity {
    world
        .spawn((
            Actor,
            Position::new(position.0, position.1),
            CollisionBounds::new(bounds.0, bounds.1),
            Velocity::new(velocity.0, velocity.1),
        ))
        .id()
}

/// Spawns a static solid box.
pub fn spawn_test_solid(world: &mut World, position: (i32, i32), bounds: (i32, i32)) -> Entity {
    world
        .spawn((
            Solid,
            Position::new(position.0, position.1),
            CollisionBounds::new(bounds.0, bounds.1),
        ))
        .id()
}

/// Motion and contact state of one actor, for comparing runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorSnapshot {
    /// Position after the tick.
    pub position: Position,
    /// Velocity after the tick.
    pub velocity: Velocity,
    /// `OnGround` present.
    pub grounded: bool,
    /// `OnCeiling` present.
    pub on_ceiling: bool,
    /// `OnWall` present.
    pub on_wall: bool,
}

impl ActorSnapshot {
    /// Reads `entity`'s state, or `None` if it lacks a position or velocity.
    #[must_use]
    pub fn of(world: &World, entity: Entity) -> Option<Self> {
        Some(Self {
            position: *world.get::<Position>(entity)?,
            velocity: *world.get::<Velocity>(entity)?,
            grounded: world.get::<OnGround>(entity).is_some(),
            on_ceiling: world.get::<OnCeiling>(entity).is_some(),
            on_wall: world.get::<OnWall>(entity).is_some(),
        })
    }
}
