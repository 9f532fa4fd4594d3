//! Axis-aligned box overlap queries.
//!
//! Boxes are described by a centre [`Position`] and half extents
//! ([`CollisionBounds`]). Touching edges do not count as overlap.

use crate::components::{CollisionBounds, Position};

/// A box snapshot used when scanning solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aabb {
    /// Centre of the box.
    pub pos: Position,
    /// Half extents of the box.
    pub bounds: CollisionBounds,
}

impl Aabb {
    /// Creates a box from its centre and half extents.
    #[must_use]
    pub const fn new(pos: Position, bounds: CollisionBounds) -> Self {
        Self { pos, bounds }
    }

    /// Whether this box overlaps `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        overlaps(self.pos, self.bounds, other.pos, other.bounds)
    }
}

/// True iff the two boxes' intervals overlap strictly on both axes.
///
/// # Examples
/// ```
/// use coyote::components::{CollisionBounds, Position};
/// use coyote::geometry::overlaps;
/// let b = CollisionBounds::new(16, 16);
/// assert!(overlaps(Position::new(0, 0), b, Position::new(31, 0), b));
/// assert!(!overlaps(Position::new(0, 0), b, Position::new(32, 0), b));
/// ```
#[must_use]
pub fn overlaps(
    pos_a: Position,
    bounds_a: CollisionBounds,
    pos_b: Position,
    bounds_b: CollisionBounds,
) -> bool {
    interval_overlaps(pos_a.x, bounds_a.half_width, pos_b.x, bounds_b.half_width)
        && interval_overlaps(pos_a.y, bounds_a.half_height, pos_b.y, bounds_b.half_height)
}

fn interval_overlaps(centre_a: i32, half_a: i32, centre_b: i32, half_b: i32) -> bool {
    (i64::from(centre_a) - i64::from(centre_b)).abs() < i64::from(half_a) + i64::from(half_b)
}

/// Signed one-axis penetration of box 1 into box 2.
///
/// The magnitude is `(size1 + size2) - |pos1 - pos2|`; the sign is the sign
/// of `pos1 - pos2` with coincident centres counting as positive. Returns
/// zero when the intervals do not overlap.
///
/// # Examples
/// ```
/// use coyote::geometry::penetration;
/// // Box 1 sits above box 2 (smaller y) and sinks 2 units into it.
/// assert_eq!(penetration(34, 16, 64, 16), -2);
/// assert_eq!(penetration(94, 16, 64, 16), 2);
/// assert_eq!(penetration(0, 16, 64, 16), 0);
/// ```
#[must_use]
pub fn penetration(pos1: i32, size1: i32, pos2: i32, size2: i32) -> i32 {
    let delta = i64::from(pos1) - i64::from(pos2);
    let depth = i64::from(size1) + i64::from(size2) - delta.abs();
    if depth <= 0 {
        return 0;
    }
    let depth = i32::try_from(depth).unwrap_or(i32::MAX);
    if delta < 0 {
        -depth
    } else {
        depth
    }
}

/// Horizontal penetration of box 1 into box 2.
#[must_use]
pub fn penetration_x(a: &Aabb, b: &Aabb) -> i32 {
    penetration(a.pos.x, a.bounds.half_width, b.pos.x, b.bounds.half_width)
}

/// Vertical penetration of box 1 into box 2.
#[must_use]
pub fn penetration_y(a: &Aabb, b: &Aabb) -> i32 {
    penetration(a.pos.y, a.bounds.half_height, b.pos.y, b.bounds.half_height)
}
