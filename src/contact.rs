//! Per-tick ground, ceiling and wall classification.
//!
//! The prober is independent of the resolver: the resolver only knows it had
//! to stop an actor, the prober reports which sides touch a solid right now.
//! It is the only place contact tags are added or removed.

use bevy::prelude::*;
use log::debug;

use crate::clock::FixedTimestep;
use crate::components::{
    Actor, CollisionBounds, JumpData, OnCeiling, OnGround, OnWall, Position, Solid,
};
use crate::geometry::{penetration_x, penetration_y, Aabb};
use crate::PROBE_MARGIN;

/// Sides of an actor touching a solid this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContactProbe {
    /// A solid lies directly below.
    pub ground: bool,
    /// A solid lies directly above.
    pub ceiling: bool,
    /// A solid lies directly to the left.
    pub wall_left: bool,
    /// A solid lies directly to the right.
    pub wall_right: bool,
}

impl ContactProbe {
    /// Whether either side touches a wall.
    #[must_use]
    pub const fn on_wall(&self) -> bool {
        self.wall_left || self.wall_right
    }
}

/// Classifies contact between `actor` and `solids`.
///
/// The vertical probe grows the actor's half height by [`PROBE_MARGIN`];
/// the horizontal probe grows its half width. Negative penetration means the
/// actor sits above (or left of) the solid.
#[must_use]
pub fn probe(actor: &Aabb, solids: &[Aabb]) -> ContactProbe {
    let vertical = Aabb::new(
        actor.pos,
        CollisionBounds::new(
            actor.bounds.half_width,
            actor.bounds.half_height + PROBE_MARGIN,
        ),
    );
    let horizontal = Aabb::new(
        actor.pos,
        CollisionBounds::new(
            actor.bounds.half_width + PROBE_MARGIN,
            actor.bounds.half_height,
        ),
    );

    let mut contacts = ContactProbe::default();
    for solid in solids {
        if vertical.overlaps(solid) {
            if penetration_y(&vertical, solid) < 0 {
                contacts.ground = true;
            } else {
                contacts.ceiling = true;
            }
        }
        if horizontal.overlaps(solid) {
            if penetration_x(&horizontal, solid) < 0 {
                contacts.wall_right = true;
            } else {
                contacts.wall_left = true;
            }
        }
    }
    contacts
}

type ProbedActor<'w> = (
    Entity,
    &'w Position,
    &'w CollisionBounds,
    Option<&'w mut OnGround>,
    Option<&'w mut OnCeiling>,
    Option<&'w mut OnWall>,
    Option<&'w mut JumpData>,
);

/// Adds, refreshes or removes contact tags to match this tick's probe.
///
/// Losing ground contact stamps [`JumpData::time_left_ground`] before the
/// tag is removed; that stamp anchors coyote time.
pub fn probe_contacts(
    mut commands: Commands,
    clock: Res<FixedTimestep>,
    mut actors: Query<ProbedActor<'_>, (With<Actor>, Without<Solid>)>,
    solids: Query<(&Position, &CollisionBounds), With<Solid>>,
) {
    let solid_boxes: Vec<Aabb> = solids
        .iter()
        .map(|(pos, bounds)| Aabb::new(*pos, *bounds))
        .collect();

    for (entity, pos, bounds, ground, ceiling, wall, jump_data) in &mut actors {
        let contacts = probe(&Aabb::new(*pos, *bounds), &solid_boxes);

        match (contacts.ground, ground) {
            (true, Some(mut tag)) => tag.just_started = false,
            (true, None) => {
                debug!("{entity} landed at ({}, {})", pos.x, pos.y);
                commands.entity(entity).insert(OnGround { just_started: true });
            }
            (false, Some(_)) => {
                if let Some(mut data) = jump_data {
                    data.time_left_ground = Some(clock.elapsed);
                }
                debug!("{entity} left the ground at t={:.3}", clock.elapsed);
                commands.entity(entity).remove::<OnGround>();
            }
            (false, None) => {}
        }

        match (contacts.ceiling, ceiling) {
            (true, Some(mut tag)) => tag.just_started = false,
            (true, None) => {
                commands
                    .entity(entity)
                    .insert(OnCeiling { just_started: true });
            }
            (false, Some(_)) => {
                commands.entity(entity).remove::<OnCeiling>();
            }
            (false, None) => {}
        }

        match (contacts.on_wall(), wall) {
            (true, Some(mut tag)) => {
                tag.left = contacts.wall_left;
                tag.right = contacts.wall_right;
                tag.just_started = false;
            }
            (true, None) => {
                commands.entity(entity).insert(OnWall {
                    left: contacts.wall_left,
                    right: contacts.wall_right,
                    just_started: true,
                });
            }
            (false, Some(_)) => {
                commands.entity(entity).remove::<OnWall>();
            }
            (false, None) => {}
        }
    }
}
