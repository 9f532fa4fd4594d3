//! Integer stepping helpers used across the simulation.
//!
//! Positions and velocities are whole numbers. These helpers are the only
//! places where the fixed timestep (a float) meets integer state, so the
//! rounding rules live here and nowhere else.

/// Scales a per-second rate by `dt`, truncating toward zero.
///
/// Used for rates (acceleration, gravity) where the fractional remainder is
/// deliberately dropped every tick.
///
/// # Examples
/// ```
/// use coyote::numeric::scale_by_dt;
/// assert_eq!(scale_by_dt(2000, 1.0 / 60.0), 33);
/// assert_eq!(scale_by_dt(-2000, 1.0 / 60.0), -33);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "Truncation toward zero is the intended rounding for rates."
)]
#[must_use]
pub fn scale_by_dt(rate: i32, dt: f64) -> i32 {
    debug_assert!(dt.is_finite(), "expected finite timestep");
    (f64::from(rate) * dt) as i32
}

/// Multiplies an integer rate by a tuning factor, truncating toward zero.
///
/// # Examples
/// ```
/// use coyote::numeric::scale_rate;
/// assert_eq!(scale_rate(2000, 3.0), 6000);
/// assert_eq!(scale_rate(7, 0.5), 3);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "Truncation toward zero is the intended rounding for rates."
)]
#[must_use]
pub fn scale_rate(rate: i32, factor: f64) -> i32 {
    (f64::from(rate) * factor) as i32
}

/// Converts a velocity into the whole-unit displacement for one tick,
/// rounding half away from zero.
///
/// # Examples
/// ```
/// use coyote::numeric::displacement;
/// assert_eq!(displacement(500, 1.0 / 60.0), 8);
/// assert_eq!(displacement(-800, 1.0 / 60.0), -13);
/// ```
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is rounded before conversion and bounded by velocity."
)]
#[must_use]
pub fn displacement(velocity: i32, dt: f64) -> i32 {
    (f64::from(velocity) * dt).round() as i32
}

/// Moves `value` toward `target` by at most `step`, never overshooting.
///
/// # Examples
/// ```
/// use coyote::numeric::istep;
/// assert_eq!(istep(0, 100, 30), 30);
/// assert_eq!(istep(90, 100, 30), 100);
/// assert_eq!(istep(0, -100, 30), -30);
/// ```
#[must_use]
pub fn istep(value: i32, target: i32, step: i32) -> i32 {
    if target < value {
        value.saturating_sub(step).max(target)
    } else {
        value.saturating_add(step).min(target)
    }
}

/// Returns the share of `total` moved during sub-step `index` of `steps`.
///
/// The shares always sum to `total`, spreading any remainder across the
/// later sub-steps.
///
/// # Examples
/// ```
/// use coyote::numeric::substep_share;
/// let shares: Vec<i32> = (0..4).map(|i| substep_share(10, 4, i)).collect();
/// assert_eq!(shares, vec![2, 3, 2, 3]);
/// assert_eq!(shares.iter().sum::<i32>(), 10);
/// ```
#[must_use]
pub fn substep_share(total: i32, steps: i32, index: i32) -> i32 {
    debug_assert!(steps > 0, "sub-step count must be positive");
    let (total, steps, index) = (i64::from(total), i64::from(steps), i64::from(index));
    let share = total * (index + 1) / steps - total * index / steps;
    // A share never exceeds the total in magnitude.
    i32::try_from(share).unwrap_or_default()
}

/// Sign of `value` where zero counts as positive.
#[must_use]
pub const fn sign_or_positive(value: i32) -> i32 {
    if value < 0 {
        -1
    } else {
        1
    }
}
