//! Horizontal walk velocity.

use bevy::prelude::*;

use crate::clock::FixedTimestep;
use crate::components::{Player, Velocity, WalkSpeed};
use crate::input::PlayerInput;
use crate::numeric::{istep, scale_by_dt, sign_or_positive};

/// Next horizontal velocity for a walk input of `x_dir`.
///
/// Pushing in the direction of travel accelerates with `accel`; releasing
/// the input or turning around uses `deaccel`.
///
/// # Examples
/// ```
/// use coyote::components::WalkSpeed;
/// use coyote::walk::walk_velocity;
/// let walk = WalkSpeed { accel: 2200, deaccel: 2600, max_walk_speed: 400 };
/// assert_eq!(walk_velocity(0, 1, &walk, 1.0 / 60.0), 36);
/// assert_eq!(walk_velocity(100, 0, &walk, 1.0 / 60.0), 57);
/// ```
#[must_use]
pub fn walk_velocity(current: i32, x_dir: i32, walk: &WalkSpeed, dt: f64) -> i32 {
    let target = x_dir * walk.max_walk_speed;
    let rate = if x_dir == 0 || sign_or_positive(target) != sign_or_positive(current) {
        walk.deaccel
    } else {
        walk.accel
    };
    istep(current, target, scale_by_dt(rate, dt))
}

/// Steps each player's horizontal velocity toward the walk target.
pub fn handle_walk(
    clock: Res<FixedTimestep>,
    input: Res<PlayerInput>,
    mut players: Query<(&mut Velocity, &WalkSpeed), With<Player>>,
) {
    for (mut velocity, walk) in &mut players {
        velocity.x = walk_velocity(velocity.x, input.x_dir, walk, clock.timestep);
    }
}
