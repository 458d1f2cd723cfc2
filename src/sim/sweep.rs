//! Swept point-vs-AABB (slab method)
//!
//! A moving circle against a box is the same as a moving point against the
//! box expanded by the circle's radius. The segment from the previous to the
//! current position is clipped against the X and Y slabs independently and
//! the two parametric intervals are intersected.

use glam::Vec2;

use super::geometry::Rect;
use crate::consts::{CORNER_EPSILON, PARALLEL_EPSILON, SWEEP_EPSILON, ZERO_LENGTH_EPSILON};

/// Which face set the contact point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceAxis {
    /// Left or right face
    Vertical,
    /// Top or bottom face
    Horizontal,
    /// Both within `CORNER_EPSILON`
    Corner,
}

/// First crossing of a segment into a box
#[derive(Debug, Clone, Copy)]
pub struct SweepHit {
    /// Parametric entry time along the segment, in `(SWEEP_EPSILON, 1]`
    pub time: f32,
    /// Per-axis entry times (`-inf` when the segment is parallel to that slab)
    pub entry: Vec2,
    /// Contact point on the expanded box
    pub point: Vec2,
    /// Face classification by distance to the expanded edges
    pub axis: FaceAxis,
    /// Outward unit normal of the touched face (normalized diagonal for corners)
    pub normal: Vec2,
}

/// Entry/exit times for one axis, or `None` if the segment can never be inside
fn slab(start: f32, delta: f32, min: f32, max: f32) -> Option<(f32, f32)> {
    if delta.abs() < PARALLEL_EPSILON {
        // Parallel to this slab: inside for all t or never
        if start >= min && start <= max {
            return Some((f32::NEG_INFINITY, f32::INFINITY));
        }
        return None;
    }
    let t1 = (min - start) / delta;
    let t2 = (max - start) / delta;
    Some((t1.min(t2), t1.max(t2)))
}

/// Sweep a point from `start` to `end` against `rect`.
///
/// Returns `None` for a zero-length segment, a miss, an entry outside the
/// segment, or an entry at (or just after) `t = 0`, which means the point is
/// already on the surface and separating.
pub fn sweep_point(start: Vec2, end: Vec2, rect: &Rect) -> Option<SweepHit> {
    let delta = end - start;
    if delta.length_squared() < ZERO_LENGTH_EPSILON {
        return None;
    }

    let max = rect.max();
    let (enter_x, exit_x) = slab(start.x, delta.x, rect.min.x, max.x)?;
    let (enter_y, exit_y) = slab(start.y, delta.y, rect.min.y, max.y)?;

    let t_entry = enter_x.max(enter_y);
    let t_exit = exit_x.min(exit_y);
    if t_entry > t_exit || t_entry > 1.0 || t_entry < SWEEP_EPSILON {
        return None;
    }

    let point = start + delta * t_entry;
    let to_left = (point.x - rect.min.x).abs();
    let to_right = (point.x - max.x).abs();
    let to_bottom = (point.y - rect.min.y).abs();
    let to_top = (point.y - max.y).abs();
    let dist_x = to_left.min(to_right);
    let dist_y = to_bottom.min(to_top);
    let nx = if to_left <= to_right { -1.0 } else { 1.0 };
    let ny = if to_bottom <= to_top { -1.0 } else { 1.0 };

    let (axis, normal) = if dist_x < CORNER_EPSILON && dist_y < CORNER_EPSILON {
        (FaceAxis::Corner, Vec2::new(nx, ny).normalize())
    } else if dist_x <= dist_y {
        (FaceAxis::Vertical, Vec2::new(nx, 0.0))
    } else {
        (FaceAxis::Horizontal, Vec2::new(0.0, ny))
    };

    Some(SweepHit {
        time: t_entry,
        entry: Vec2::new(enter_x, enter_y),
        point,
        axis,
        normal,
    })
}

/// Sweep a circle of `radius` against `rect`
pub fn sweep_circle(start: Vec2, end: Vec2, radius: f32, rect: &Rect) -> Option<SweepHit> {
    sweep_point(start, end, &rect.expand(radius))
}
