//! Physics settings
//!
//! Tunable playfield and ball parameters, loaded from JSON. Missing fields
//! fall back to the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Ball, CollisionMode, Paddle, Playfield, ShapeError, release_velocity};

/// Failure to load or validate settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting: {0}")]
    Invalid(String),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// Physics tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Speed of a ball released from a sticky paddle
    pub launch_speed: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Bottom edge of the paddle
    pub paddle_y: f32,
    /// Maximum release angle from vertical for held balls (degrees)
    pub max_release_angle_deg: f32,

    // === Bricks ===
    pub collision_mode: CollisionMode,
    pub explosion_radius: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            ball_radius: BALL_RADIUS,
            launch_speed: BALL_RELEASE_SPEED,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y: PADDLE_Y,
            max_release_angle_deg: MAX_BOUNCE_ANGLE_DEG,

            collision_mode: CollisionMode::default(),
            explosion_radius: EXPLOSION_RADIUS,
        }
    }
}

impl PhysicsSettings {
    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check the values that can't be caught by shape construction alone
    pub fn validate(&self) -> Result<(), SettingsError> {
        let field = self.playfield()?;
        self.paddle()?;
        Ball::new(Vec2::ZERO, self.ball_radius)?;

        if !(self.launch_speed.is_finite() && self.launch_speed > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "launch_speed must be positive, got {}",
                self.launch_speed
            )));
        }
        if !(self.explosion_radius.is_finite() && self.explosion_radius >= 0.0) {
            return Err(SettingsError::Invalid(format!(
                "explosion_radius must not be negative, got {}",
                self.explosion_radius
            )));
        }
        if !(0.0..90.0).contains(&self.max_release_angle_deg) {
            return Err(SettingsError::Invalid(format!(
                "max_release_angle_deg must be in [0, 90), got {}",
                self.max_release_angle_deg
            )));
        }
        if self.paddle_width > field.width() {
            return Err(SettingsError::Invalid(format!(
                "paddle ({}) is wider than the playfield ({})",
                self.paddle_width,
                field.width()
            )));
        }
        if self.paddle_y + self.paddle_height + 2.0 * self.ball_radius > field.height() {
            return Err(SettingsError::Invalid(
                "no room above the paddle for the ball".to_string(),
            ));
        }
        Ok(())
    }

    pub fn playfield(&self) -> Result<Playfield, ShapeError> {
        Playfield::new(self.playfield_width, self.playfield_height)
    }

    /// Paddle centered horizontally
    pub fn paddle(&self) -> Result<Paddle, ShapeError> {
        let x = (self.playfield_width - self.paddle_width) / 2.0;
        Paddle::new(x, self.paddle_y, self.paddle_width, self.paddle_height)
    }

    /// Stationary ball resting on the center of `paddle`
    pub fn serve_ball(&self, paddle: &Paddle) -> Result<Ball, ShapeError> {
        let pos = Vec2::new(paddle.center_x(), paddle.top() + self.ball_radius);
        Ball::new(pos, self.ball_radius)
    }

    /// Launch velocity for a ball held at `ball_x` on `paddle`
    pub fn launch_velocity(&self, ball_x: f32, paddle: &Paddle) -> Vec2 {
        release_velocity(ball_x, paddle, self.launch_speed, self.max_release_angle_deg)
    }
}
