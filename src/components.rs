//! ECS component types used by the simulation.
//!
//! Positions, velocities and extents are whole-number quantities so a tick
//! is bit-reproducible. Optional capabilities (multi-jump, glide, dash) are
//! separate components; an entity without one simply lacks the feature.
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_COYOTE_TIME, DEFAULT_FALL_MULTIPLIER, DEFAULT_JUMP_BUFFER};

/// Centre of an entity's box in world units. +y points down.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate, increasing downward.
    pub y: i32,
}

impl Position {
    /// Creates a position from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Velocity in world units per second.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Velocity {
    /// Horizontal speed; positive moves right.
    pub x: i32,
    /// Vertical speed; negative moves up.
    pub y: i32,
}

impl Velocity {
    /// Creates a velocity from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Half extents of an axis-aligned box centred on [`Position`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CollisionBounds {
    /// Half of the box width.
    pub half_width: i32,
    /// Half of the box height.
    pub half_height: i32,
}

impl CollisionBounds {
    /// Creates bounds from half extents.
    #[must_use]
    pub const fn new(half_width: i32, half_height: i32) -> Self {
        Self {
            half_width,
            half_height,
        }
    }

    /// Whether both extents are strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.half_width > 0 && self.half_height > 0
    }
}

/// Static, immovable world geometry.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Solid;

/// Dynamic entity that collides against every [`Solid`].
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Actor;

/// Actor driven by [`crate::input::PlayerInput`].
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Player;

/// Horizontal movement tuning.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkSpeed {
    /// Rate used while pushing in the current direction of travel.
    pub accel: i32,
    /// Rate used while stopping or turning around.
    pub deaccel: i32,
    /// Target speed with full input.
    pub max_walk_speed: i32,
}

/// Jump tuning plus the transient eligibility flags of the jump state
/// machine.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Jump {
    /// Vertical velocity applied on take-off (negative is up).
    pub impulse: i32,
    /// Grace window after leaving the ground.
    pub coyote_time: f64,
    /// Window during which an early press is remembered.
    pub jump_buffer: f64,
    /// Gravity multiplier while rising after an early release.
    pub fall_multiplier: f64,
    /// A coyote jump may still be taken since the last landing.
    pub coyote_usable: bool,
    /// A buffered press may still be honoured since the last landing.
    pub buffered_jump_usable: bool,
    /// The jump input was released while rising.
    pub ended_early: bool,
}

impl Jump {
    /// Jump with the given impulse and default timing windows.
    #[must_use]
    pub const fn with_impulse(impulse: i32) -> Self {
        Self {
            impulse,
            coyote_time: DEFAULT_COYOTE_TIME,
            jump_buffer: DEFAULT_JUMP_BUFFER,
            fall_multiplier: DEFAULT_FALL_MULTIPLIER,
            coyote_usable: false,
            buffered_jump_usable: false,
            ended_early: false,
        }
    }
}

/// Mutable jump counters, kept apart from the static tuning in [`Jump`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpData {
    /// Jumps taken since the last landing.
    pub jumps_used: u32,
    /// Simulation time at which ground contact was last lost.
    pub time_left_ground: Option<f64>,
}

/// Fall tuning.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gravity {
    /// Downward acceleration.
    pub fall_speed: i32,
    /// Terminal downward velocity.
    pub max_fall_speed: i32,
}

/// Grants extra airborne jumps.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiJump {
    /// Total jumps allowed between landings.
    pub max_jumps: u32,
}

/// Slow-fall ability overriding [`Gravity`] while active and falling.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glide {
    /// Downward acceleration while gliding.
    pub fall_speed: i32,
    /// Terminal velocity while gliding.
    pub max_fall_speed: i32,
    /// Set while the bound ability input is held.
    pub active: bool,
}

/// Directional burst ability.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    /// Speed of the burst.
    pub power: i32,
    /// Remaining time before the next dash; gravity is off while positive.
    pub cooldown: f64,
    /// Cooldown applied after each dash.
    pub cooldown_size: f64,
    /// Dashes left before the next landing.
    pub charges: u32,
    /// Charges restored on landing.
    pub max_charges: u32,
    /// Walk speed restored once the cooldown expires.
    pub default_max_walk_speed: i32,
}

impl Dash {
    /// Whether a dash is currently in progress.
    #[must_use]
    pub fn is_dashing(&self) -> bool {
        self.cooldown > 0.0
    }

    /// Restores all charges. Returns `true` if any were missing.
    pub const fn refill(&mut self) -> bool {
        let refilled = self.charges < self.max_charges;
        self.charges = self.max_charges;
        refilled
    }
}

/// Present while the actor touches ground.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnGround {
    /// True only on the first tick of contact.
    pub just_started: bool,
}

/// Present while the actor touches a ceiling.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnCeiling {
    /// True only on the first tick of contact.
    pub just_started: bool,
}

/// Present while the actor touches a wall on either side.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnWall {
    /// A solid touches the actor's left side.
    pub left: bool,
    /// A solid touches the actor's right side.
    pub right: bool,
    /// True only on the first tick of contact.
    pub just_started: bool,
}

/// Flat colour a renderer uses for an entity's rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteColor {
    /// Default player colour.
    Red,
    /// Avian and terrain colour.
    Green,
    /// Spent-dash colour.
    Blue,
}

/// Presentation data kept current by the core.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    /// Fill colour.
    pub color: SpriteColor,
    /// Half extents of the drawn rectangle.
    pub size: CollisionBounds,
}

/// Whether the renderer should draw the entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Render {
    /// Draw flag.
    pub visible: bool,
}

impl Default for Render {
    fn default() -> Self {
        Self { visible: true }
    }
}
