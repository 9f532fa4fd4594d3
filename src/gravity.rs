//! Effective downward acceleration per tick.

use bevy::prelude::*;

use crate::clock::FixedTimestep;
use crate::components::{Dash, Glide, Gravity, Jump, OnGround, Player, Velocity};
use crate::numeric::{istep, scale_by_dt, scale_rate};
use crate::GROUNDING_FORCE;

/// Capability state the modulator consults besides [`Gravity`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FallModifiers<'a> {
    /// Jump tuning, for the early-release multiplier.
    pub jump: Option<&'a Jump>,
    /// Glide ability, if equipped.
    pub glide: Option<&'a Glide>,
    /// Dash ability, if equipped.
    pub dash: Option<&'a Dash>,
}

/// Vertical velocity after one tick of gravity.
///
/// Overrides, first match wins:
/// 1. grounded and not rising: snap to [`GROUNDING_FORCE`];
/// 2. dashing: velocity is left alone;
/// 3. gliding while falling: ramp toward the glide's terminal velocity;
/// 4. otherwise ramp toward `max_fall_speed`, with `fall_speed` scaled by
///    the jump's `fall_multiplier` while rising after an early release.
#[must_use]
pub fn next_fall_velocity(
    velocity_y: i32,
    gravity: &Gravity,
    modifiers: FallModifiers<'_>,
    grounded: bool,
    dt: f64,
) -> i32 {
    if grounded && velocity_y >= 0 {
        return GROUNDING_FORCE;
    }
    if modifiers.dash.is_some_and(Dash::is_dashing) {
        return velocity_y;
    }
    if let Some(glide) = modifiers.glide.filter(|glide| glide.active && velocity_y >= 0) {
        return istep(
            velocity_y,
            glide.max_fall_speed,
            scale_by_dt(glide.fall_speed, dt),
        );
    }

    let rate = match modifiers.jump {
        Some(jump) if jump.ended_early && velocity_y < 0 => {
            scale_by_dt(scale_rate(gravity.fall_speed, jump.fall_multiplier), dt)
        }
        _ => scale_by_dt(gravity.fall_speed, dt),
    };
    istep(velocity_y, gravity.max_fall_speed, rate)
}

/// Applies [`next_fall_velocity`] to every player.
pub fn apply_gravity(
    clock: Res<FixedTimestep>,
    mut players: Query<
        (
            &mut Velocity,
            &Gravity,
            Option<&Jump>,
            Option<&Glide>,
            Option<&Dash>,
            Has<OnGround>,
        ),
        With<Player>,
    >,
) {
    for (mut velocity, gravity, jump, glide, dash, grounded) in &mut players {
        let modifiers = FallModifiers { jump, glide, dash };
        velocity.y = next_fall_velocity(velocity.y, gravity, modifiers, grounded, clock.timestep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const GRAVITY: Gravity = Gravity {
        fall_speed: 2000,
        max_fall_speed: 800,
    };
    const DT: f64 = 1.0 / 60.0;

    #[rstest]
    #[case::resting(0)]
    #[case::sinking(40)]
    fn grounded_actor_gets_grounding_force(#[case] velocity_y: i32) {
        let next = next_fall_velocity(velocity_y, &GRAVITY, FallModifiers::default(), true, DT);
        assert_eq!(next, GROUNDING_FORCE);
    }

    #[rstest]
    fn take_off_tick_is_not_snapped() {
        let next = next_fall_velocity(-800, &GRAVITY, FallModifiers::default(), true, DT);
        assert_eq!(next, -767);
    }

    #[rstest]
    #[case::ramps(0, 33)]
    #[case::clamps(790, 800)]
    fn default_fall_ramps_toward_terminal(#[case] velocity_y: i32, #[case] expected: i32) {
        let next = next_fall_velocity(velocity_y, &GRAVITY, FallModifiers::default(), false, DT);
        assert_eq!(next, expected);
    }

    #[rstest]
    fn early_release_multiplies_only_while_rising() {
        let jump = Jump {
            ended_early: true,
            ..Jump::with_impulse(-800)
        };
        let modifiers = FallModifiers {
            jump: Some(&jump),
            ..FallModifiers::default()
        };
        assert_eq!(next_fall_velocity(-400, &GRAVITY, modifiers, false, DT), -300);
        assert_eq!(next_fall_velocity(10, &GRAVITY, modifiers, false, DT), 43);
    }

    #[rstest]
    fn glide_replaces_default_terminal_velocity() {
        let glide = Glide {
            fall_speed: 2000,
            max_fall_speed: 300,
            active: true,
        };
        let modifiers = FallModifiers {
            glide: Some(&glide),
            ..FallModifiers::default()
        };
        assert_eq!(next_fall_velocity(290, &GRAVITY, modifiers, false, DT), 300);
        assert_eq!(next_fall_velocity(600, &GRAVITY, modifiers, false, DT), 567);
        // Rising glides fall back to normal gravity.
        assert_eq!(next_fall_velocity(-100, &GRAVITY, modifiers, false, DT), -67);
    }

    #[rstest]
    fn inactive_glide_is_ignored() {
        let glide = Glide {
            fall_speed: 2000,
            max_fall_speed: 300,
            active: false,
        };
        let modifiers = FallModifiers {
            glide: Some(&glide),
            ..FallModifiers::default()
        };
        assert_eq!(next_fall_velocity(790, &GRAVITY, modifiers, false, DT), 800);
    }

    #[rstest]
    fn dash_suspends_gravity() {
        let dash = Dash {
            power: 800,
            cooldown: 0.1,
            cooldown_size: 0.2,
            charges: 0,
            max_charges: 1,
            default_max_walk_speed: 400,
        };
        let modifiers = FallModifiers {
            dash: Some(&dash),
            ..FallModifiers::default()
        };
        assert_eq!(next_fall_velocity(-566, &GRAVITY, modifiers, false, DT), -566);
    }
}
