//! Paddle laser bolts
//!
//! Thin rectangles that rise from the paddle and break on the first live
//! brick they overlap. Damage goes through the normal hit counter; an
//! explosive brick destroyed by a bolt detonates like any other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::explosion::{DestroyedBrick, propagate_explosion};
use super::geometry::Rect;
use super::state::{Brick, Paddle, Playfield};
use crate::consts::{LASER_HEIGHT, LASER_SPEED, LASER_WIDTH};

/// A laser bolt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    rect: Rect,
    active: bool,
}

impl Laser {
    /// Bolt centered horizontally on `x`, bottom edge at `y`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x - LASER_WIDTH / 2.0, y, LASER_WIDTH, LASER_HEIGHT),
            active: true,
        }
    }

    /// Twin bolts from a quarter and three quarters across the paddle
    pub fn fire_pair(paddle: &Paddle) -> [Laser; 2] {
        let y = paddle.top();
        [
            Laser::new(paddle.x() + paddle.width() * 0.25, y),
            Laser::new(paddle.x() + paddle.width() * 0.75, y),
        ]
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vec2 {
        self.rect.min
    }

    /// Bolt has left the top of the playfield
    pub fn is_out_of_bounds(&self, field: &Playfield) -> bool {
        self.rect.min.y > field.height()
    }
}

/// A bolt striking a brick
#[derive(Debug, Clone, PartialEq)]
pub struct LaserHit {
    pub index: usize,
    pub destroyed: bool,
    pub points: u32,
    /// Bricks taken out by the resulting blast, if the brick was explosive
    pub chain: Vec<DestroyedBrick>,
}

/// Move a bolt up by one step and resolve it against the bricks.
///
/// The first live brick overlapped absorbs the bolt, which is deactivated.
/// Inactive bolts don't move.
pub fn advance_laser(
    laser: &mut Laser,
    dt: f32,
    bricks: &mut [Brick],
    blast_radius: f32,
) -> Option<LaserHit> {
    if !laser.active {
        return None;
    }
    laser.rect.min.y += LASER_SPEED * dt;

    let index = bricks
        .iter()
        .position(|b| !b.is_destroyed() && laser.rect.overlaps(b.rect()))?;
    laser.active = false;

    let brick = &mut bricks[index];
    let destroyed = brick.hit();
    let points = if destroyed { brick.score() } else { 0 };
    let explode_at = (destroyed && brick.is_explosive()).then(|| brick.center());

    let chain = match explode_at {
        Some(center) => propagate_explosion(bricks, center, blast_radius),
        None => Vec::new(),
    };

    Some(LaserHit {
        index,
        destroyed,
        points,
        chain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EXPLOSION_RADIUS;
    use crate::sim::state::BrickKind;

    #[test]
    fn test_fire_pair_positions() {
        let paddle = Paddle::new(350.0, 30.0, 100.0, 15.0).unwrap();
        let [left, right] = Laser::fire_pair(&paddle);
        assert_eq!(left.rect().center().x, 375.0);
        assert_eq!(right.rect().center().x, 425.0);
        assert_eq!(left.position().y, 45.0);
        assert!(left.is_active() && right.is_active());
    }

    #[test]
    fn test_laser_rises_and_hits_first_brick() {
        let mut bricks = vec![
            Brick::new(360.0, 100.0, 40.0, 20.0, 2, BrickKind::Normal).unwrap(),
            Brick::normal(360.0, 130.0, 40.0, 20.0).unwrap(),
        ];
        let mut laser = Laser::new(375.0, 45.0);

        let mut hit = None;
        for _ in 0..30 {
            hit = advance_laser(&mut laser, 1.0 / 60.0, &mut bricks, EXPLOSION_RADIUS);
            if hit.is_some() {
                break;
            }
        }

        let hit = hit.expect("bolt should reach the brick");
        assert_eq!(hit.index, 0);
        assert!(!hit.destroyed);
        assert_eq!(hit.points, 0);
        assert_eq!(bricks[0].hits(), 1);
        assert!(!laser.is_active());

        // Spent bolts stay put
        let y = laser.position().y;
        assert!(advance_laser(&mut laser, 1.0, &mut bricks, EXPLOSION_RADIUS).is_none());
        assert_eq!(laser.position().y, y);
    }

    #[test]
    fn test_laser_detonates_explosive_brick() {
        let mut bricks = vec![
            Brick::new(360.0, 50.0, 40.0, 20.0, 1, BrickKind::Explosive).unwrap(),
            Brick::normal(402.0, 50.0, 40.0, 20.0).unwrap(),
        ];
        let mut laser = Laser::new(375.0, 45.0);
        let hit = advance_laser(&mut laser, 1.0 / 60.0, &mut bricks, EXPLOSION_RADIUS).unwrap();
        assert!(hit.destroyed);
        assert_eq!(hit.points, 10);
        assert_eq!(hit.chain.len(), 1);
        assert_eq!(hit.chain[0].index, 1);
        assert!(bricks.iter().all(|b| b.is_destroyed()));
    }

    #[test]
    fn test_laser_leaves_playfield() {
        let field = Playfield::new(800.0, 600.0).unwrap();
        let mut laser = Laser::new(100.0, 590.0);
        assert!(!laser.is_out_of_bounds(&field));
        assert!(advance_laser(&mut laser, 0.1, &mut [], EXPLOSION_RADIUS).is_none());
        assert!(laser.is_out_of_bounds(&field));
    }
}
