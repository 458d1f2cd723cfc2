//! Explosive brick chain reactions
//!
//! A detonation destroys every live destructible brick whose center lies within
//! the blast radius, bypassing the hit counter. Explosive bricks caught in the
//! blast detonate in turn from their own centers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Brick;

/// A brick destroyed by a blast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DestroyedBrick {
    /// Index into the brick slice passed to [`propagate_explosion`]
    pub index: usize,
    pub center: Vec2,
    pub points: u32,
    /// True if this brick set off its own blast
    pub explosive: bool,
}

/// Detonate at `center`, returning every brick destroyed by the chain.
///
/// The brick that triggered the blast is expected to be destroyed already, so
/// it is skipped like any other dead brick. Each brick is marked destroyed
/// before its own blast recurses, so nothing is destroyed twice.
pub fn propagate_explosion(bricks: &mut [Brick], center: Vec2, radius: f32) -> Vec<DestroyedBrick> {
    let mut destroyed = Vec::new();
    detonate(bricks, center, radius, &mut destroyed);
    if !destroyed.is_empty() {
        log::debug!(
            "Blast at ({:.1}, {:.1}) destroyed {} bricks",
            center.x,
            center.y,
            destroyed.len()
        );
    }
    destroyed
}

fn detonate(bricks: &mut [Brick], center: Vec2, radius: f32, out: &mut Vec<DestroyedBrick>) {
    for index in 0..bricks.len() {
        let brick = &mut bricks[index];
        if brick.is_destroyed() || brick.is_indestructible() {
            continue;
        }

        let brick_center = brick.center();
        if brick_center.distance(center) > radius {
            continue;
        }

        let points = brick.score();
        let explosive = brick.is_explosive();
        brick.destroy();
        out.push(DestroyedBrick {
            index,
            center: brick_center,
            points,
            explosive,
        });

        if explosive {
            detonate(bricks, brick_center, radius, out);
        }
    }
}

/// Total points from a chain
pub fn chain_score(chain: &[DestroyedBrick]) -> u32 {
    chain.iter().map(|b| b.points).sum()
}
