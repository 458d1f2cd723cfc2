//! Playfield edge handling
//!
//! Left, right and top edges reflect the ball. The bottom edge is open: a
//! ball crossing it is lost, never bounced.

use serde::{Deserialize, Serialize};

use super::state::{Ball, Playfield};

/// Which wall the ball was corrected against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Reflect and clamp the ball against the playfield walls.
///
/// Side walls are checked before the top; only the first correction is made.
/// The reflected component always points back into the playfield, so a ball
/// resting against a wall is never sent into it.
pub fn resolve_walls(ball: &mut Ball, field: &Playfield) -> Option<Wall> {
    let r = ball.radius();

    if ball.pos.x - r <= 0.0 {
        ball.vel.x = ball.vel.x.abs();
        ball.pos.x = ball.pos.x.max(r);
        return Some(Wall::Left);
    }

    if ball.pos.x + r >= field.width() {
        ball.vel.x = -ball.vel.x.abs();
        ball.pos.x = ball.pos.x.min(field.width() - r);
        return Some(Wall::Right);
    }

    if ball.pos.y + r >= field.height() {
        ball.vel.y = -ball.vel.y.abs();
        ball.pos.y = field.height() - r;
        return Some(Wall::Top);
    }

    None
}

/// Ball has dropped past the bottom edge
pub fn is_out_of_bounds(ball: &Ball) -> bool {
    ball.pos.y - ball.radius() < 0.0
}
