//! Character roster and the switch controller.
//!
//! A character is nothing more than a [`CharacterProfile`]: baseline
//! component values plus the two ability slot bindings. Switching swaps
//! those components in place on the same entity; position, velocity and
//! contact tags stay untouched so a mid-air switch keeps its momentum.

use bevy::prelude::*;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::ability::{dash_pressed, glide_held, glide_released, AbilitySlot, AbilitySlots};
use crate::clock::FixedTimestep;
use crate::components::{
    CollisionBounds, Dash, Glide, Gravity, Jump, MultiJump, Player, Sprite, SpriteColor, WalkSpeed,
};
use crate::error::SetupError;
use crate::input::PlayerInput;
use crate::DEFAULT_SWITCH_COOLDOWN;

/// Playable characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    /// Plain walker with a single jump.
    Base,
    /// Floaty double jumper that can glide.
    Avian,
    /// Base movement plus a directional dash.
    Celeste,
}

/// Component values and ability bindings that make up a character.
#[derive(Debug, Clone, Copy)]
pub struct CharacterProfile {
    /// Horizontal tuning.
    pub walk: WalkSpeed,
    /// Jump tuning with cleared state flags.
    pub jump: Jump,
    /// Fall tuning.
    pub gravity: Gravity,
    /// Collision box, also used as the sprite size.
    pub bounds: CollisionBounds,
    /// Sprite colour.
    pub color: SpriteColor,
    /// Extra jumps, if any.
    pub multi_jump: Option<MultiJump>,
    /// Glide capability, if any.
    pub glide: Option<Glide>,
    /// Dash capability, if any.
    pub dash: Option<Dash>,
    /// Hooks bound to the two ability buttons.
    pub abilities: AbilitySlots,
}

const BASE_WALK: WalkSpeed = WalkSpeed {
    accel: 2200,
    deaccel: 2600,
    max_walk_speed: 400,
};
const BASE_GRAVITY: Gravity = Gravity {
    fall_speed: 2000,
    max_fall_speed: 800,
};
const BASE_BOUNDS: CollisionBounds = CollisionBounds::new(25, 32);

impl CharacterKind {
    /// Every character, in roster order.
    pub const ALL: [Self; 3] = [Self::Base, Self::Avian, Self::Celeste];

    /// Baseline profile of this character.
    #[must_use]
    pub const fn profile(self) -> CharacterProfile {
        let base = CharacterProfile {
            walk: BASE_WALK,
            jump: Jump::with_impulse(-800),
            gravity: BASE_GRAVITY,
            bounds: BASE_BOUNDS,
            color: SpriteColor::Red,
            multi_jump: None,
            glide: None,
            dash: None,
            abilities: AbilitySlots {
                primary: AbilitySlot::EMPTY,
                secondary: AbilitySlot::EMPTY,
            },
        };
        match self {
            Self::Base => base,
            Self::Avian => CharacterProfile {
                walk: WalkSpeed {
                    accel: 2400,
                    deaccel: 2000,
                    max_walk_speed: 400,
                },
                jump: Jump::with_impulse(-1000),
                gravity: Gravity {
                    fall_speed: 2000,
                    max_fall_speed: 700,
                },
                bounds: CollisionBounds::new(20, 36),
                color: SpriteColor::Green,
                multi_jump: Some(MultiJump { max_jumps: 2 }),
                glide: Some(Glide {
                    fall_speed: 2000,
                    max_fall_speed: 300,
                    active: false,
                }),
                abilities: AbilitySlots {
                    primary: AbilitySlot {
                        pressed: None,
                        held: Some(glide_held),
                        released: Some(glide_released),
                    },
                    secondary: AbilitySlot::EMPTY,
                },
                ..base
            },
            Self::Celeste => CharacterProfile {
                dash: Some(Dash {
                    power: 800,
                    cooldown: 0.0,
                    cooldown_size: 0.2,
                    charges: 1,
                    max_charges: 1,
                    default_max_walk_speed: BASE_WALK.max_walk_speed,
                }),
                abilities: AbilitySlots {
                    primary: AbilitySlot {
                        pressed: Some(dash_pressed),
                        held: None,
                        released: None,
                    },
                    secondary: AbilitySlot::EMPTY,
                },
                ..base
            },
        }
    }
}

/// The characters a player can cycle through and the switch cooldown.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerCharacters {
    /// Roster, in switch order.
    pub available: Vec<CharacterKind>,
    /// Index of the active character.
    pub current_index: usize,
    /// Minimum time between switches.
    pub switch_cooldown: f64,
    /// Time of the last successful switch; `None` before the first.
    pub switch_time: Option<f64>,
}

impl PlayerCharacters {
    /// Validates the roster and selects the character at `current_index`.
    ///
    /// # Errors
    /// Returns [`SetupError::EmptyCharacterList`] for an empty roster and
    /// [`SetupError::CharacterIndexOutOfRange`] for a bad index.
    pub fn new(available: Vec<CharacterKind>, current_index: usize) -> Result<Self, SetupError> {
        if available.is_empty() {
            return Err(SetupError::EmptyCharacterList);
        }
        if current_index >= available.len() {
            return Err(SetupError::CharacterIndexOutOfRange {
                index: current_index,
                len: available.len(),
            });
        }
        Ok(Self {
            available,
            current_index,
            switch_cooldown: DEFAULT_SWITCH_COOLDOWN,
            switch_time: None,
        })
    }

    /// The active character.
    #[must_use]
    pub fn current(&self) -> Option<CharacterKind> {
        self.available.get(self.current_index).copied()
    }

    /// Whether a switch would be honoured at `now`.
    #[must_use]
    pub fn can_switch(&self, now: f64) -> bool {
        self.available.len() > 1
            && self
                .switch_time
                .is_none_or(|last| now >= last + self.switch_cooldown)
    }
}

/// Replaces `entity`'s character components with `kind`'s profile.
///
/// Capabilities of the previous character are removed first. Returns
/// `false` if the entity does not exist.
pub fn apply_character(world: &mut World, entity: Entity, kind: CharacterKind) -> bool {
    let Ok(mut target) = world.get_entity_mut(entity) else {
        return false;
    };
    let profile = kind.profile();

    target.remove::<(MultiJump, Glide, Dash, AbilitySlots)>();
    target.insert((
        profile.walk,
        profile.jump,
        profile.gravity,
        profile.bounds,
        Sprite {
            color: profile.color,
            size: profile.bounds,
        },
        profile.abilities,
    ));
    if let Some(multi_jump) = profile.multi_jump {
        target.insert(multi_jump);
    }
    if let Some(glide) = profile.glide {
        target.insert(glide);
    }
    if let Some(dash) = profile.dash {
        target.insert(dash);
    }
    true
}

/// Advances `entity` to its next character if the cooldown allows.
///
/// Returns whether a switch happened.
pub fn request_switch(world: &mut World, entity: Entity) -> bool {
    let now = world.resource::<FixedTimestep>().elapsed;
    let next = {
        let Some(mut characters) = world.get_mut::<PlayerCharacters>(entity) else {
            return false;
        };
        if !characters.can_switch(now) {
            return false;
        }
        characters.switch_time = Some(now);
        characters.current_index = (characters.current_index + 1) % characters.available.len();
        characters.current()
    };
    let Some(next) = next else {
        return false;
    };

    debug!("{entity} switched to {next:?} at t={now:.3}");
    apply_character(world, entity, next)
}

/// Honours a latched switch press for every player.
pub fn handle_character_switch(world: &mut World) {
    if !world.resource::<PlayerInput>().switch_pressed {
        return;
    }
    let players: Vec<Entity> = world
        .query_filtered::<Entity, (With<Player>, With<PlayerCharacters>)>()
        .iter(world)
        .collect();
    for entity in players {
        request_switch(world, entity);
    }
}
