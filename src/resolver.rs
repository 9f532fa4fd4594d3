//! Sub-stepped, axis-separated movement against static solids.
//!
//! A tick's displacement is split into [`SUB_STEPS`] passes. Each pass moves
//! along X and resolves, then along Y and resolves; X always goes first so
//! actors sliding along a floor do not catch on tile seams. An axis that
//! registers one-sided contact is snapped flush, has its velocity zeroed and
//! stops moving for the rest of the tick.
//!
//! An axis pass only corrects against solids that its own advance pushed the
//! actor into. Overlap already present when the tick starts (a character
//! switch that grew the box, say) is first pushed out along whichever axis
//! is shallower, so a wide floor never throws an actor sideways.
//!
//! Contact from both sides of an axis in the same pass (a squish) is left
//! uncorrected.

use bevy::prelude::*;
use log::trace;

use crate::clock::FixedTimestep;
use crate::components::{Actor, CollisionBounds, Position, Solid, Velocity};
use crate::geometry::{penetration_x, penetration_y, Aabb};
use crate::numeric::{displacement, substep_share};
use crate::SUB_STEPS;

/// Largest corrections found for one axis in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisNudge {
    /// Most negative correction (push toward -axis).
    pub negative: i32,
    /// Most positive correction (push toward +axis).
    pub positive: i32,
}

impl AxisNudge {
    /// Folds one signed penetration into the running extremes.
    pub fn record(&mut self, depth: i32) {
        if depth > 0 {
            self.positive = self.positive.max(depth);
        } else if depth < 0 {
            self.negative = self.negative.min(depth);
        }
    }

    /// The single-sided correction to apply, if any.
    #[must_use]
    pub const fn correction(&self) -> Option<i32> {
        match (self.negative != 0, self.positive != 0) {
            (true, false) => Some(self.negative),
            (false, true) => Some(self.positive),
            _ => None,
        }
    }

    /// Whether both sides registered contact.
    #[must_use]
    pub const fn is_squish(&self) -> bool {
        self.negative != 0 && self.positive != 0
    }
}

/// Which sides were hit while resolving a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hits {
    /// Pushed right out of a solid on the left.
    pub left: bool,
    /// Pushed left out of a solid on the right.
    pub right: bool,
    /// Pushed up out of a solid below.
    pub below: bool,
    /// Pushed down out of a solid above.
    pub above: bool,
}

/// Outcome of moving one actor for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Final position.
    pub position: Position,
    /// Velocity with contacted axes zeroed.
    pub velocity: Velocity,
    /// Sides that forced a correction.
    pub hits: Hits,
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn nudge_along(axis: Axis, before: &Aabb, actor: &Aabb, solids: &[Aabb]) -> AxisNudge {
    let mut nudge = AxisNudge::default();
    for solid in solids
        .iter()
        .filter(|solid| actor.overlaps(solid) && !before.overlaps(solid))
    {
        let depth = match axis {
            Axis::X => penetration_x(actor, solid),
            Axis::Y => penetration_y(actor, solid),
        };
        nudge.record(depth);
    }
    nudge
}

/// Pushes `actor` out of solids it already overlaps before any motion.
///
/// Each overlapping solid votes for its shallower axis; ties go to Y so a
/// box sunk into a floor is lifted rather than slid. Velocity is untouched:
/// the sub-steps that follow register the contact as usual.
fn depenetrate(actor: &mut Aabb, solids: &[Aabb]) {
    let mut along_x = AxisNudge::default();
    let mut along_y = AxisNudge::default();
    for solid in solids.iter().filter(|solid| actor.overlaps(solid)) {
        let dx = penetration_x(actor, solid);
        let dy = penetration_y(actor, solid);
        if dy.unsigned_abs() <= dx.unsigned_abs() {
            along_y.record(dy);
        } else {
            along_x.record(dx);
        }
    }
    if let Some(correction) = along_x.correction() {
        trace!("embedded: x push-out {correction}");
        actor.pos.x += correction;
    }
    if let Some(correction) = along_y.correction() {
        trace!("embedded: y push-out {correction}");
        actor.pos.y += correction;
    }
}

/// Moves a box through `solids` for one tick of length `dt`.
#[must_use]
pub fn resolve(
    position: Position,
    velocity: Velocity,
    bounds: CollisionBounds,
    solids: &[Aabb],
    dt: f64,
) -> Resolution {
    let total_x = displacement(velocity.x, dt);
    let total_y = displacement(velocity.y, dt);

    let mut actor = Aabb::new(position, bounds);
    let mut velocity = velocity;
    let mut hits = Hits::default();
    let mut moving_x = true;
    let mut moving_y = true;

    depenetrate(&mut actor, solids);

    for step in 0..SUB_STEPS {
        if moving_x {
            let before = actor;
            actor.pos.x += substep_share(total_x, SUB_STEPS, step);
            let nudge = nudge_along(Axis::X, &before, &actor, solids);
            if let Some(correction) = nudge.correction() {
                trace!("substep {step}: x nudge {correction}");
                actor.pos.x += correction;
                velocity.x = 0;
                moving_x = false;
                if correction > 0 {
                    hits.left = true;
                } else {
                    hits.right = true;
                }
            } else if nudge.is_squish() {
                trace!("substep {step}: squished on x, no correction");
            }
        }

        if moving_y {
            let before = actor;
            actor.pos.y += substep_share(total_y, SUB_STEPS, step);
            let nudge = nudge_along(Axis::Y, &before, &actor, solids);
            if let Some(correction) = nudge.correction() {
                trace!("substep {step}: y nudge {correction}");
                actor.pos.y += correction;
                velocity.y = 0;
                moving_y = false;
                if correction < 0 {
                    hits.below = true;
                } else {
                    hits.above = true;
                }
            } else if nudge.is_squish() {
                trace!("substep {step}: squished on y, no correction");
            }
        }
    }

    Resolution {
        position: actor.pos,
        velocity,
        hits,
    }
}

/// Integrates every actor's velocity into its position against all solids.
pub fn resolve_actor_motion(
    clock: Res<FixedTimestep>,
    mut actors: Query<(&mut Position, &mut Velocity, &CollisionBounds), (With<Actor>, Without<Solid>)>,
    solids: Query<(&Position, &CollisionBounds), (With<Solid>, Without<Actor>)>,
) {
    let solid_boxes: Vec<Aabb> = solids
        .iter()
        .map(|(pos, bounds)| Aabb::new(*pos, *bounds))
        .collect();

    for (mut position, mut velocity, bounds) in &mut actors {
        let resolution = resolve(*position, *velocity, *bounds, &solid_boxes, clock.timestep);
        if *position != resolution.position {
            *position = resolution.position;
        }
        if *velocity != resolution.velocity {
            *velocity = resolution.velocity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DT: f64 = 1.0 / 60.0;

    fn boxed(x: i32, y: i32, hw: i32, hh: i32) -> Aabb {
        Aabb::new(Position::new(x, y), CollisionBounds::new(hw, hh))
    }

    #[rstest]
    fn free_fall_moves_full_displacement() {
        let res = resolve(
            Position::new(0, 0),
            Velocity::new(120, 500),
            CollisionBounds::new(16, 16),
            &[],
            DT,
        );
        assert_eq!(res.position, Position::new(2, 8));
        assert_eq!(res.velocity, Velocity::new(120, 500));
        assert_eq!(res.hits, Hits::default());
    }

    #[rstest]
    fn landing_snaps_flush_and_zeroes_vertical_velocity() {
        let floor = boxed(0, 64, 1000, 16);
        let res = resolve(
            Position::new(0, 30),
            Velocity::new(0, 500),
            CollisionBounds::new(16, 16),
            &[floor],
            DT,
        );
        assert_eq!(res.position, Position::new(0, 32));
        assert_eq!(res.velocity.y, 0);
        assert!(res.hits.below);
        assert!(!Aabb::new(res.position, CollisionBounds::new(16, 16)).overlaps(&floor));
    }

    #[rstest]
    fn wall_stops_horizontal_motion_only() {
        let wall = boxed(40, 0, 16, 100);
        let res = resolve(
            Position::new(0, 0),
            Velocity::new(1200, -60),
            CollisionBounds::new(16, 16),
            &[wall],
            DT,
        );
        assert_eq!(res.position.x, 8);
        assert_eq!(res.position.y, -1);
        assert_eq!(res.velocity, Velocity::new(0, -60));
        assert!(res.hits.right);
    }

    #[rstest]
    fn sliding_across_tile_seam_does_not_catch() {
        let tiles = [boxed(0, 64, 16, 16), boxed(32, 64, 16, 16), boxed(64, 64, 16, 16)];
        let res = resolve(
            Position::new(0, 32),
            Velocity::new(1800, 100),
            CollisionBounds::new(16, 16),
            &tiles,
            DT,
        );
        assert_eq!(res.position, Position::new(30, 32));
        assert_eq!(res.velocity.x, 1800);
        assert_eq!(res.velocity.y, 0);
    }

    #[rstest]
    fn squish_is_left_uncorrected() {
        let left = boxed(-20, -30, 8, 100);
        let right = boxed(20, 30, 8, 100);
        let res = resolve(
            Position::new(0, 0),
            Velocity::new(0, 0),
            CollisionBounds::new(16, 16),
            &[left, right],
            DT,
        );
        assert_eq!(res.position, Position::new(0, 0));
        assert_eq!(res.hits, Hits::default());
    }

    #[rstest]
    fn box_grown_into_a_floor_is_lifted_not_slid() {
        let floor = boxed(0, 100, 1000, 25);
        let bounds = CollisionBounds::new(20, 36);
        let res = resolve(
            Position::new(0, 43),
            Velocity::new(0, 100),
            bounds,
            &[floor],
            DT,
        );
        assert_eq!(res.position, Position::new(0, 39));
        assert_eq!(res.velocity.y, 0);
        assert!(res.hits.below);
        assert!(!Aabb::new(res.position, bounds).overlaps(&floor));
    }

    #[rstest]
    fn box_grown_into_a_wall_steps_back_by_the_overlap() {
        let wall = boxed(50, 0, 16, 100);
        let res = resolve(
            Position::new(5, 0),
            Velocity::default(),
            CollisionBounds::new(25, 16),
            &[wall],
            DT,
        );
        assert_eq!(res.position, Position::new(1, 0));
    }

    #[rstest]
    fn squished_walls_do_not_push_vertically() {
        let left = boxed(-20, 0, 8, 100);
        let right = boxed(20, 0, 8, 100);
        let res = resolve(
            Position::new(0, 0),
            Velocity::new(0, 600),
            CollisionBounds::new(16, 16),
            &[left, right],
            DT,
        );
        assert_eq!(res.position, Position::new(0, 10));
        assert_eq!(res.velocity, Velocity::new(0, 600));
        assert_eq!(res.hits, Hits::default());
    }

    #[rstest]
    #[case::none(&[], None, false)]
    #[case::positive(&[3, 5, 1], Some(5), false)]
    #[case::negative(&[-2, -7], Some(-7), false)]
    #[case::both(&[-2, 4], None, true)]
    fn nudge_bookkeeping(#[case] depths: &[i32], #[case] correction: Option<i32>, #[case] squish: bool) {
        let mut nudge = AxisNudge::default();
        for depth in depths {
            nudge.record(*depth);
        }
        assert_eq!(nudge.correction(), correction);
        assert_eq!(nudge.is_squish(), squish);
    }
}
