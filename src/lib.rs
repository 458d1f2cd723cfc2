//! Brick Bounce - Breakout-style ball, paddle and brick physics
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, substepping, collision engines)
//! - `settings`: Data-driven physics tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{PhysicsSettings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame timestep (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Speed used when releasing a held ball or spawning a stationary one
    pub const BALL_RELEASE_SPEED: f32 = 300.0;
    /// Serve launch velocity (up and to the right)
    pub const SERVE_VELOCITY: (f32, f32) = (200.0, 200.0);

    /// Paddle defaults - sits near the bottom edge
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_Y: f32 = 30.0;
    /// Maximum deflection from vertical for paddle bounces and sticky release (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 60.0;

    /// Blast radius of an explosive brick (center to center)
    pub const EXPLOSION_RADIUS: f32 = 80.0;

    /// Entry times below this are treated as "already separating"
    pub const SWEEP_EPSILON: f32 = 1e-4;
    /// Slab divisors smaller than this are treated as a parallel ray
    pub const PARALLEL_EPSILON: f32 = 1e-6;
    /// Squared displacement below which a sweep is skipped
    pub const ZERO_LENGTH_EPSILON: f32 = 1e-10;
    /// Contact within this distance of both expanded edges counts as a corner
    pub const CORNER_EPSILON: f32 = 0.01;
    /// Axis entry times closer than this resolve as a corner hit
    pub const CORNER_TIME_EPSILON: f32 = 1e-3;
    /// Distance a swept contact is pulled back along the direction of travel
    pub const BACKOFF_DISTANCE: f32 = 0.01;
    /// Extra push applied after penetration resolution
    pub const SEPARATION_EPSILON: f32 = 0.01;

    /// Laser bolt geometry and speed
    pub const LASER_WIDTH: f32 = 2.0;
    pub const LASER_HEIGHT: f32 = 10.0;
    pub const LASER_SPEED: f32 = 400.0;
    /// Minimum time between laser volleys (seconds)
    pub const LASER_COOLDOWN: f32 = 0.3;

    /// Multi-ball launch angles from +X (degrees), jittered by up to the given amount
    pub const MULTI_BALL_ANGLES_DEG: [f32; 2] = [60.0, 120.0];
    pub const MULTI_BALL_JITTER_DEG: f32 = 10.0;
    /// Paddle resize factors and the smallest width shrinking may reach
    pub const LARGE_PADDLE_SCALE: f32 = 1.5;
    pub const SMALL_PADDLE_SCALE: f32 = 0.7;
    pub const MIN_PADDLE_WIDTH: f32 = 40.0;
    /// Ball velocity factors
    pub const SPEED_UP_SCALE: f32 = 1.2;
    pub const SPEED_DOWN_SCALE: f32 = 0.8;
}

/// Unit vector at `degrees` from vertical, positive angles leaning right
#[inline]
pub fn from_vertical(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.sin(), rad.cos())
}

/// Angle of `v` from vertical in degrees (positive to the right)
#[inline]
pub fn angle_from_vertical(v: Vec2) -> f32 {
    v.x.atan2(v.y).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vertical_roundtrip_angles() {
        let up = from_vertical(0.0);
        assert!(up.x.abs() < 1e-6);
        assert!((up.y - 1.0).abs() < 1e-6);

        let right = from_vertical(60.0);
        assert!((angle_from_vertical(right) - 60.0).abs() < 1e-3);
        assert!(right.x > 0.0 && right.y > 0.0);
    }
}
