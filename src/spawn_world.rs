//! Level descriptors and the spawners that turn them into entities.
//!
//! Descriptors are flat serde types a save/load layer can read and write;
//! the library itself never touches files.

use bevy::prelude::*;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::character::{apply_character, CharacterKind, PlayerCharacters};
use crate::components::{
    Actor, CollisionBounds, JumpData, Player, Position, Render, Solid, Sprite, SpriteColor,
    Velocity,
};
use crate::error::SetupError;
use crate::LEVEL_FORMAT_VERSION;

/// Where a player starts and which characters it may use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDescriptor {
    /// Starting x.
    pub x: i32,
    /// Starting y.
    pub y: i32,
    /// Character roster.
    pub characters: Vec<CharacterKind>,
    /// Index of the starting character.
    pub character_index: usize,
}

impl Default for PlayerDescriptor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            characters: vec![CharacterKind::Base],
            character_index: 0,
        }
    }
}

/// A single solid tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileDescriptor {
    /// Centre x.
    pub x: i32,
    /// Centre y.
    pub y: i32,
    /// Half extent along x.
    #[serde(rename = "width")]
    pub half_width: i32,
    /// Half extent along y.
    #[serde(rename = "height")]
    pub half_height: i32,
}

impl Default for TileDescriptor {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            half_width: 16,
            half_height: 16,
        }
    }
}

impl TileDescriptor {
    /// Tile centred at `(x, y)` with the given half extents.
    #[must_use]
    pub const fn new(x: i32, y: i32, half_width: i32, half_height: i32) -> Self {
        Self {
            x,
            y,
            half_width,
            half_height,
        }
    }

    const fn bounds(&self) -> CollisionBounds {
        CollisionBounds::new(self.half_width, self.half_height)
    }
}

/// A whole level: its tiles and the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Format version string.
    pub version: String,
    /// Solid geometry.
    pub tiles: Vec<TileDescriptor>,
    /// The player.
    pub player: PlayerDescriptor,
}

impl LevelDescriptor {
    /// A small level with a floor, a block and every character unlocked.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            version: LEVEL_FORMAT_VERSION.to_owned(),
            tiles: vec![
                TileDescriptor::new(100, 0, 16, 16),
                TileDescriptor::new(0, 100, 1000, 25),
            ],
            player: PlayerDescriptor {
                characters: CharacterKind::ALL.to_vec(),
                ..PlayerDescriptor::default()
            },
        }
    }
}

/// Spawns a player actor with its starting character applied.
///
/// # Errors
/// Fails if the roster is empty or the index does not address it.
pub fn spawn_player(world: &mut World, desc: &PlayerDescriptor) -> Result<Entity, SetupError> {
    let characters = PlayerCharacters::new(desc.characters.clone(), desc.character_index)?;
    let kind = characters
        .current()
        .ok_or(SetupError::CharacterIndexOutOfRange {
            index: desc.character_index,
            len: desc.characters.len(),
        })?;

    let entity = world
        .spawn((
            Player,
            Actor,
            Position::new(desc.x, desc.y),
            Velocity::default(),
            JumpData::default(),
            Render::default(),
            characters,
        ))
        .id();
    apply_character(world, entity, kind);
    debug!("spawned {kind:?} player {entity} at ({}, {})", desc.x, desc.y);
    Ok(entity)
}

/// Spawns one solid tile.
///
/// # Errors
/// Fails if either half extent is not positive.
pub fn spawn_tile(world: &mut World, desc: &TileDescriptor) -> Result<Entity, SetupError> {
    let bounds = validated_bounds(desc)?;
    let entity = world
        .spawn((
            Solid,
            Position::new(desc.x, desc.y),
            bounds,
            Sprite {
                color: SpriteColor::Green,
                size: bounds,
            },
            Render::default(),
        ))
        .id();
    Ok(entity)
}

/// Spawns every tile and then the player, returning the player entity.
///
/// The whole descriptor is validated before anything is spawned.
///
/// # Errors
/// Fails on the first invalid tile or an invalid player roster.
pub fn spawn_level(world: &mut World, level: &LevelDescriptor) -> Result<Entity, SetupError> {
    if level.version != LEVEL_FORMAT_VERSION {
        warn!(
            "level format {} differs from supported {LEVEL_FORMAT_VERSION}",
            level.version
        );
    }
    for tile in &level.tiles {
        validated_bounds(tile)?;
    }
    PlayerCharacters::new(level.player.characters.clone(), level.player.character_index)?;

    for tile in &level.tiles {
        spawn_tile(world, tile)?;
    }
    debug!("loaded {} solids", level.tiles.len());
    spawn_player(world, &level.player)
}

/// Flattens a player entity back into a descriptor.
#[must_use]
pub fn describe_player(world: &World, entity: Entity) -> Option<PlayerDescriptor> {
    let pos = world.get::<Position>(entity)?;
    let characters = world.get::<PlayerCharacters>(entity)?;
    Some(PlayerDescriptor {
        x: pos.x,
        y: pos.y,
        characters: characters.available.clone(),
        character_index: characters.current_index,
    })
}

/// Flattens the current world into a level descriptor.
///
/// Returns `None` if the world has no player.
pub fn describe_level(world: &mut World) -> Option<LevelDescriptor> {
    let tiles = world
        .query_filtered::<(&Position, &CollisionBounds), With<Solid>>()
        .iter(world)
        .map(|(pos, bounds)| TileDescriptor::new(pos.x, pos.y, bounds.half_width, bounds.half_height))
        .collect();
    let player = world
        .query_filtered::<Entity, With<Player>>()
        .iter(world)
        .next()?;
    Some(LevelDescriptor {
        version: LEVEL_FORMAT_VERSION.to_owned(),
        tiles,
        player: describe_player(world, player)?,
    })
}

fn validated_bounds(desc: &TileDescriptor) -> Result<CollisionBounds, SetupError> {
    let bounds = desc.bounds();
    if bounds.is_positive() {
        Ok(bounds)
    } else {
        Err(SetupError::NonPositiveBounds {
            half_width: desc.half_width,
            half_height: desc.half_height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Glide, WalkSpeed};
    use rstest::{fixture, rstest};

    #[fixture]
    fn world() -> World {
        World::new()
    }

    #[rstest]
    fn player_gets_starting_profile(mut world: World) {
        let desc = PlayerDescriptor {
            x: 5,
            y: -7,
            characters: vec![CharacterKind::Base, CharacterKind::Avian],
            character_index: 1,
        };
        let entity = spawn_player(&mut world, &desc).expect("valid player");

        assert!(world.get::<Glide>(entity).is_some());
        assert_eq!(world.get::<WalkSpeed>(entity).map(|w| w.accel), Some(2400));
        assert_eq!(describe_player(&world, entity), Some(desc));
    }

    #[rstest]
    fn bad_roster_is_rejected(mut world: World) {
        let desc = PlayerDescriptor {
            characters: Vec::new(),
            ..PlayerDescriptor::default()
        };
        assert_eq!(spawn_player(&mut world, &desc), Err(SetupError::EmptyCharacterList));
    }

    #[rstest]
    #[case(TileDescriptor::new(0, 0, 0, 16))]
    #[case(TileDescriptor::new(0, 0, 16, -1))]
    fn flat_tiles_are_rejected(mut world: World, #[case] tile: TileDescriptor) {
        assert!(matches!(
            spawn_tile(&mut world, &tile),
            Err(SetupError::NonPositiveBounds { .. })
        ));
    }

    #[rstest]
    fn invalid_level_spawns_nothing(mut world: World) {
        let mut level = LevelDescriptor::demo();
        level.tiles.push(TileDescriptor::new(0, 0, 4, 0));
        assert!(spawn_level(&mut world, &level).is_err());
        assert_eq!(world.entities().len(), 0);
    }

    #[rstest]
    fn level_describes_itself(mut world: World) {
        let level = LevelDescriptor::demo();
        spawn_level(&mut world, &level).expect("demo level is valid");
        assert_eq!(describe_level(&mut world), Some(level));
    }

    #[rstest]
    fn tile_json_uses_save_field_names() {
        let tile: TileDescriptor =
            serde_json::from_str(r#"{"x": 3, "y": 4, "width": 8}"#).expect("tile json");
        assert_eq!(tile, TileDescriptor::new(3, 4, 8, 16));
    }
}
