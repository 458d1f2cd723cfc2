//! Ball-vs-brick collision engines
//!
//! Three interchangeable strategies share one contract,
//! `resolve_brick(mode, ball, brick, previous_position)`:
//!
//! - `Discrete`: overlap test at the current position, reflect the axis with
//!   the smaller penetration. Fast balls can skip through thin bricks.
//! - `Continuous`: swept test of the previous-to-current segment against the
//!   brick expanded by the ball radius; reflect the face component(s) hit.
//! - `Robust`: swept test with true outward normals, falling back to
//!   minimum-translation push-out when the ball already overlaps the brick.
//!
//! All three finish the same way: the brick takes a hit and, if that destroyed
//! it, its score is reported.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect, reflect, sign};
use super::state::{Ball, Brick};
use super::sweep::{FaceAxis, sweep_circle};
use crate::consts::{BACKOFF_DISTANCE, CORNER_TIME_EPSILON, SEPARATION_EPSILON};

/// Brick collision strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionMode {
    Discrete,
    #[default]
    Continuous,
    Robust,
}

impl CollisionMode {
    pub const ALL: [CollisionMode; 3] = [
        CollisionMode::Discrete,
        CollisionMode::Continuous,
        CollisionMode::Robust,
    ];

    /// Next mode in toggle order (wraps around)
    pub fn next(self) -> Self {
        match self {
            CollisionMode::Discrete => CollisionMode::Continuous,
            CollisionMode::Continuous => CollisionMode::Robust,
            CollisionMode::Robust => CollisionMode::Discrete,
        }
    }

    /// Advance to the next mode in place
    pub fn cycle(&mut self) {
        *self = self.next();
        log::info!("Collision mode: {}", self.label());
    }

    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            CollisionMode::Discrete => "DISCRETE (OLD)",
            CollisionMode::Continuous => "CONTINUOUS (CCD)",
            CollisionMode::Robust => "ROBUST (HYBRID)",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionMode::Discrete => "discrete",
            CollisionMode::Continuous => "continuous",
            CollisionMode::Robust => "robust",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "discrete" | "old" => Some(CollisionMode::Discrete),
            "continuous" | "ccd" | "swept" => Some(CollisionMode::Continuous),
            "robust" | "hybrid" => Some(CollisionMode::Robust),
            _ => None,
        }
    }
}

/// A resolved ball-brick contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Ball position after resolution
    pub position: Vec2,
    /// Unit surface normal, pointing from the brick toward the ball
    pub normal: Vec2,
    /// Whether this hit destroyed the brick
    pub destroyed: bool,
    /// Points scored by this hit (0 unless destroyed)
    pub points: u32,
}

/// Result of a brick collision query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionOutcome {
    NoContact,
    Hit(Contact),
}

impl CollisionOutcome {
    pub fn miss() -> Self {
        CollisionOutcome::NoContact
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CollisionOutcome::Hit(_))
    }

    pub fn contact(&self) -> Option<&Contact> {
        match self {
            CollisionOutcome::Hit(contact) => Some(contact),
            CollisionOutcome::NoContact => None,
        }
    }

    pub fn points(&self) -> u32 {
        self.contact().map_or(0, |c| c.points)
    }
}

/// Geometric part of a contact, before damage is applied
#[derive(Debug, Clone, Copy)]
struct Resolution {
    position: Vec2,
    normal: Vec2,
}

/// Resolve one ball against one brick using the selected strategy.
///
/// `prev` is where the ball was before the latest displacement. Destroyed
/// bricks never collide. Indestructible bricks reflect the ball but take no
/// damage and score nothing.
pub fn resolve_brick(
    mode: CollisionMode,
    ball: &mut Ball,
    brick: &mut Brick,
    prev: Vec2,
) -> CollisionOutcome {
    if brick.is_destroyed() {
        return CollisionOutcome::miss();
    }

    let rect = *brick.rect();
    let resolution = match mode {
        CollisionMode::Discrete => resolve_discrete(ball, &rect),
        CollisionMode::Continuous => resolve_swept(ball, &rect, prev),
        CollisionMode::Robust => resolve_robust(ball, &rect, prev),
    };
    let Some(resolution) = resolution else {
        return CollisionOutcome::miss();
    };

    let destroyed = brick.hit();
    let points = if destroyed { brick.score() } else { 0 };
    CollisionOutcome::Hit(Contact {
        position: resolution.position,
        normal: resolution.normal,
        destroyed,
        points,
    })
}

/// Overlap at the current position only; flip the shallower axis.
///
/// Ties flip Y. The position is left untouched.
fn resolve_discrete(ball: &mut Ball, rect: &Rect) -> Option<Resolution> {
    if !ball.circle().overlaps_rect(rect) {
        return None;
    }

    let delta = ball.pos - rect.center();
    let half = rect.half_extents();
    let overlap_x = half.x + ball.radius() - delta.x.abs();
    let overlap_y = half.y + ball.radius() - delta.y.abs();

    let normal = if overlap_x < overlap_y {
        ball.reverse_x();
        Vec2::new(sign(delta.x), 0.0)
    } else {
        ball.reverse_y();
        Vec2::new(0.0, sign(delta.y))
    };

    Some(Resolution {
        position: ball.pos,
        normal,
    })
}

/// Swept test; flip the component(s) of the face hit and park at the contact
fn resolve_swept(ball: &mut Ball, rect: &Rect, prev: Vec2) -> Option<Resolution> {
    let hit = sweep_circle(prev, ball.pos, ball.radius(), rect)?;

    match hit.axis {
        FaceAxis::Vertical => ball.reverse_x(),
        FaceAxis::Horizontal => ball.reverse_y(),
        FaceAxis::Corner => {
            ball.reverse_x();
            ball.reverse_y();
        }
    }

    let travel = (ball.pos - prev).normalize_or_zero();
    ball.pos = hit.point - travel * BACKOFF_DISTANCE;

    Some(Resolution {
        position: ball.pos,
        normal: hit.normal,
    })
}

/// Swept test with true normals, then static push-out as a fallback
fn resolve_robust(ball: &mut Ball, rect: &Rect, prev: Vec2) -> Option<Resolution> {
    let radius = ball.radius();

    if let Some(hit) = sweep_circle(prev, ball.pos, radius, rect) {
        let delta = ball.pos - prev;
        let normal = if (hit.entry.x - hit.entry.y).abs() < CORNER_TIME_EPSILON {
            // Both slabs entered together: corner region
            (hit.point - rect.center()).normalize_or_zero()
        } else if hit.entry.x > hit.entry.y {
            Vec2::new(-sign(delta.x), 0.0)
        } else {
            Vec2::new(0.0, -sign(delta.y))
        };

        ball.pos = hit.point - delta.normalize_or_zero() * BACKOFF_DISTANCE;
        bounce(ball, normal);
        return Some(Resolution {
            position: ball.pos,
            normal,
        });
    }

    // Sweep can't see a ball that started the step already overlapping
    let (normal, depth) = penetration(ball.pos, radius, rect)?;
    ball.pos += normal * (depth + SEPARATION_EPSILON);
    bounce(ball, normal);
    Some(Resolution {
        position: ball.pos,
        normal,
    })
}

/// Reflect only when moving into the surface
fn bounce(ball: &mut Ball, normal: Vec2) {
    if ball.vel.dot(normal) < 0.0 {
        ball.vel = reflect(ball.vel, normal);
    }
}

/// Minimum translation out of `rect` for a circle at `pos`.
///
/// Returns the outward normal and depth of the shallowest face of the
/// radius-expanded box, or `None` if the circle doesn't overlap. Ties go to
/// the earlier face in left, right, bottom, top order.
pub fn penetration(pos: Vec2, radius: f32, rect: &Rect) -> Option<(Vec2, f32)> {
    if !Circle::new(pos, radius).overlaps_rect(rect) {
        return None;
    }

    let expanded = rect.expand(radius);
    let max = expanded.max();
    let faces = [
        (pos.x - expanded.min.x, Vec2::NEG_X),
        (max.x - pos.x, Vec2::X),
        (pos.y - expanded.min.y, Vec2::NEG_Y),
        (max.y - pos.y, Vec2::Y),
    ];

    faces
        .into_iter()
        .filter(|(depth, _)| *depth > 0.0)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(depth, normal)| (normal, depth))
}
