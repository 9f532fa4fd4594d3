//! Jump state machine.
//!
//! The states (grounded, coyote window, buffered press, airborne, rising,
//! ended early) are not an enum: they are encoded by the contact tags and
//! the flags in [`Jump`] and [`JumpData`]. The eligibility rules live in
//! small pure functions so the timing windows can be tested without a
//! world.

use bevy::prelude::*;
use log::debug;

use crate::clock::FixedTimestep;
use crate::components::{
    Dash, Jump, JumpData, MultiJump, OnCeiling, OnGround, Player, Sprite, SpriteColor, Velocity,
};
use crate::input::PlayerInput;

/// True while a press is recent enough to be honoured on landing.
///
/// # Examples
/// ```
/// use coyote::components::Jump;
/// use coyote::jump::has_buffered_jump;
/// let mut jump = Jump::with_impulse(-800);
/// jump.buffered_jump_usable = true;
/// assert!(has_buffered_jump(&jump, Some(1.0), 1.05));
/// assert!(!has_buffered_jump(&jump, Some(1.0), 1.15));
/// ```
#[must_use]
pub fn has_buffered_jump(jump: &Jump, time_jump_pressed: Option<f64>, now: f64) -> bool {
    jump.buffered_jump_usable
        && time_jump_pressed.is_some_and(|pressed| now < pressed + jump.jump_buffer)
}

/// True while an airborne actor may still jump as if grounded.
#[must_use]
pub fn can_coyote_jump(jump: &Jump, data: Option<&JumpData>, grounded: bool, now: f64) -> bool {
    jump.coyote_usable
        && !grounded
        && data
            .and_then(|data| data.time_left_ground)
            .is_some_and(|left| now < left + jump.coyote_time)
}

/// True if a multi-jump quota has room for another jump.
#[must_use]
pub fn has_spare_jump(data: Option<&JumpData>, multi: Option<&MultiJump>) -> bool {
    match (data, multi) {
        (Some(data), Some(multi)) => data.jumps_used < multi.max_jumps,
        _ => false,
    }
}

/// Whether a jump executes this tick.
///
/// Requires an intent (a press this tick or a live buffered press) and
/// support (ground, the coyote window, or spare multi-jump quota).
#[must_use]
pub fn should_jump(
    jump: &Jump,
    data: Option<&JumpData>,
    multi: Option<&MultiJump>,
    input: &PlayerInput,
    grounded: bool,
    now: f64,
) -> bool {
    let wants_jump = input.jump_pressed || has_buffered_jump(jump, input.time_jump_pressed, now);
    let supported =
        grounded || can_coyote_jump(jump, data, grounded, now) || has_spare_jump(data, multi);
    wants_jump && supported
}

/// Reacts to this tick's contact tags.
///
/// Touching ground re-arms coyote and buffered jumps, clears the early
/// release flag, resets the jump count and refills dash charges. Touching a
/// ceiling cancels upward velocity.
pub fn examine_contacts(
    mut players: Query<
        (
            Entity,
            &mut Velocity,
            Option<&mut Jump>,
            Option<&mut JumpData>,
            Option<&mut Dash>,
            Option<&mut Sprite>,
            Has<OnGround>,
            Has<OnCeiling>,
        ),
        With<Player>,
    >,
) {
    for (entity, mut velocity, jump, jump_data, dash, sprite, grounded, on_ceiling) in &mut players {
        if on_ceiling {
            velocity.y = velocity.y.max(0);
        }
        if !grounded {
            continue;
        }

        if let Some(mut jump) = jump {
            jump.coyote_usable = true;
            jump.buffered_jump_usable = true;
            jump.ended_early = false;
        }
        if let Some(mut data) = jump_data {
            data.jumps_used = 0;
        }
        if let Some(mut dash) = dash {
            if dash.refill() {
                debug!("{entity} dash charges refilled");
                if let Some(mut sprite) = sprite {
                    sprite.color = SpriteColor::Red;
                }
            }
        }
    }
}

/// Samples early release and executes eligible jumps.
pub fn handle_jump(
    clock: Res<FixedTimestep>,
    mut input: ResMut<PlayerInput>,
    mut players: Query<
        (
            Entity,
            &mut Velocity,
            &mut Jump,
            Option<&mut JumpData>,
            Option<&MultiJump>,
            Has<OnGround>,
        ),
        With<Player>,
    >,
) {
    let now = clock.elapsed;
    for (entity, mut velocity, mut jump, mut jump_data, multi, grounded) in &mut players {
        if !jump.ended_early && !grounded && !input.jump_held && velocity.y < 0 {
            jump.ended_early = true;
        }

        if !should_jump(&jump, jump_data.as_deref(), multi, &input, grounded, now) {
            continue;
        }

        velocity.y = jump.impulse;
        jump.ended_early = false;
        jump.buffered_jump_usable = false;
        jump.coyote_usable = false;
        input.jump_pressed = false;
        input.time_jump_pressed = None;
        if let Some(data) = jump_data.as_mut() {
            data.jumps_used += 1;
        }
        debug!(
            "{entity} jumped at t={now:.3} (grounded={grounded}, jumps_used={})",
            jump_data.as_deref().map_or(0, |data| data.jumps_used)
        );
    }
}
