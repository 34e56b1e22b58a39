//! Axis-aligned collision detection
//!
//! Pure overlap tests between rectangles and between the ball and a
//! rectangle, with face classification so the resolver knows which axis to
//! reflect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::BodyState;

/// Which face of a rectangle the ball struck
///
/// The playfield is y-down screen space; `Up` means the ball sits above the
/// rectangle and struck its top face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Up,
    Right,
    Down,
    Left,
}

/// Compass order doubles as the tie-break order: the first direction
/// reaching the maximum projection wins
const COMPASS: [(Side, Vec2); 4] = [
    (Side::Up, Vec2::new(0.0, 1.0)),
    (Side::Right, Vec2::new(1.0, 0.0)),
    (Side::Down, Vec2::new(0.0, -1.0)),
    (Side::Left, Vec2::new(-1.0, 0.0)),
];

fn vector_side(target: Vec2) -> Side {
    let dir = target.normalize_or_zero();

    let mut best = Side::Up;
    let mut max = 0.0;
    for (side, axis) in COMPASS {
        let dot = dir.dot(axis);
        if dot > max {
            max = dot;
            best = side;
        }
    }

    best
}

/// Result of a ball-vs-rectangle check
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub overlapped: bool,
    /// Face of the rectangle that was struck
    pub side: Side,
    /// Vector from the closest point on the rectangle to the ball center
    pub penetration: Vec2,
}

/// Inclusive AABB overlap on both axes
pub fn rect_overlap(a: &BodyState, b: &BodyState) -> bool {
    let on_x = a.position.x + a.size.x >= b.position.x && b.position.x + b.size.x >= a.position.x;
    let on_y = a.position.y + a.size.y >= b.position.y && b.position.y + b.size.y >= a.position.y;
    on_x && on_y
}

/// Ball-vs-rectangle overlap via the closest point on the AABB
///
/// The struck face is classified by projecting the negated penetration
/// vector onto the compass directions.
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &BodyState) -> Contact {
    let half_extents = rect.size / 2.0;
    let rect_center = rect.position + half_extents;

    let difference = center - rect_center;
    let clamped = difference.clamp(-half_extents, half_extents);
    let closest = rect_center + clamped;

    let penetration = center - closest;

    Contact {
        overlapped: penetration.length() <= radius,
        side: vector_side(-penetration),
        penetration,
    }
}
