//! Playfield entities: ball, paddle, bricks
//!
//! Shape invariants are checked once at construction. The resolvers never
//! re-validate radii or extents.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{Circle, Rect};

/// Rejected shape parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("ball radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("extent must be positive, got {width}x{height}")]
    NonPositiveExtent { width: f32, height: f32 },

    #[error("shape parameter is not finite")]
    NonFinite,

    #[error("brick max hits must be at least 1")]
    ZeroMaxHits,

    #[error("brick hit state is inconsistent: {hits}/{max_hits} hits, destroyed={destroyed}")]
    InconsistentHits {
        hits: u32,
        max_hits: u32,
        destroyed: bool,
    },
}

fn check_finite(values: &[f32]) -> Result<(), ShapeError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ShapeError::NonFinite)
    }
}

fn check_extent(width: f32, height: f32) -> Result<(), ShapeError> {
    check_finite(&[width, height])?;
    if width <= 0.0 || height <= 0.0 {
        return Err(ShapeError::NonPositiveExtent { width, height });
    }
    Ok(())
}

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BallData")]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in units per second
    pub vel: Vec2,
    radius: f32,
}

/// Unchecked wire form of [`Ball`]
#[derive(Deserialize)]
struct BallData {
    pos: Vec2,
    #[serde(default)]
    vel: Vec2,
    radius: f32,
}

impl TryFrom<BallData> for Ball {
    type Error = ShapeError;

    fn try_from(data: BallData) -> Result<Self, Self::Error> {
        check_finite(&[data.vel.x, data.vel.y])?;
        Ok(Ball::new(data.pos, data.radius)?.with_velocity(data.vel))
    }
}

impl Ball {
    /// Create a stationary ball
    pub fn new(pos: Vec2, radius: f32) -> Result<Self, ShapeError> {
        check_finite(&[pos.x, pos.y, radius])?;
        if radius <= 0.0 {
            return Err(ShapeError::NonPositiveRadius(radius));
        }
        Ok(Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        })
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn is_moving(&self) -> bool {
        self.vel.length_squared() > 0.0
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    pub fn reverse_x(&mut self) {
        self.vel.x = -self.vel.x;
    }

    pub fn reverse_y(&mut self) {
        self.vel.y = -self.vel.y;
    }
}

/// The player's paddle
///
/// Position and width change between ticks (input, power-ups); the collision
/// engine only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaddleData")]
pub struct Paddle {
    rect: Rect,
}

#[derive(Deserialize)]
struct PaddleData {
    rect: Rect,
}

impl TryFrom<PaddleData> for Paddle {
    type Error = ShapeError;

    fn try_from(data: PaddleData) -> Result<Self, Self::Error> {
        let Rect { min, size } = data.rect;
        Paddle::new(min.x, min.y, size.x, size.y)
    }
}

impl Paddle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, ShapeError> {
        check_finite(&[x, y])?;
        check_extent(width, height)?;
        Ok(Self {
            rect: Rect::new(x, y, width, height),
        })
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.rect.min.x
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    /// Y coordinate of the paddle's upper face
    #[inline]
    pub fn top(&self) -> f32 {
        self.rect.max().y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.rect.center().x
    }

    pub fn set_x(&mut self, x: f32) {
        self.rect.min.x = x;
    }

    /// Resize the paddle, keeping its left edge fixed
    pub fn set_width(&mut self, width: f32) -> Result<(), ShapeError> {
        check_extent(width, self.rect.height())?;
        self.rect.size.x = width;
        Ok(())
    }

    /// Center the paddle on `x`, keeping it inside `[0, field_width]`
    pub fn center_on(&mut self, x: f32, field_width: f32) {
        let max_x = (field_width - self.width()).max(0.0);
        self.rect.min.x = (x - self.width() / 2.0).clamp(0.0, max_x);
    }
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    #[default]
    Normal,
    /// Destroys nearby bricks when it breaks
    Explosive,
    /// Cannot be damaged, doesn't count for level clear
    Indestructible,
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BrickData")]
pub struct Brick {
    rect: Rect,
    kind: BrickKind,
    hits: u32,
    max_hits: u32,
    destroyed: bool,
}

#[derive(Deserialize)]
struct BrickData {
    rect: Rect,
    #[serde(default)]
    kind: BrickKind,
    #[serde(default)]
    hits: u32,
    max_hits: u32,
    #[serde(default)]
    destroyed: bool,
}

impl TryFrom<BrickData> for Brick {
    type Error = ShapeError;

    /// Restores a saved brick. Explosions destroy without filling the hit
    /// counter, so `destroyed` with spare hits is valid.
    fn try_from(data: BrickData) -> Result<Self, Self::Error> {
        let Rect { min, size } = data.rect;
        let mut brick = Brick::new(min.x, min.y, size.x, size.y, data.max_hits, data.kind)?;

        let indestructible_damaged =
            brick.is_indestructible() && (data.hits > 0 || data.destroyed);
        let counter_mismatch = data.hits > data.max_hits
            || (data.hits == data.max_hits && !data.destroyed && !brick.is_indestructible());
        if indestructible_damaged || counter_mismatch {
            return Err(ShapeError::InconsistentHits {
                hits: data.hits,
                max_hits: data.max_hits,
                destroyed: data.destroyed,
            });
        }

        brick.hits = data.hits;
        brick.destroyed = data.destroyed;
        Ok(brick)
    }
}

impl Brick {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        max_hits: u32,
        kind: BrickKind,
    ) -> Result<Self, ShapeError> {
        check_finite(&[x, y])?;
        check_extent(width, height)?;
        if max_hits == 0 {
            return Err(ShapeError::ZeroMaxHits);
        }
        Ok(Self {
            rect: Rect::new(x, y, width, height),
            kind,
            hits: 0,
            max_hits,
            destroyed: false,
        })
    }

    /// Single-hit normal brick
    pub fn normal(x: f32, y: f32, width: f32, height: f32) -> Result<Self, ShapeError> {
        Self::new(x, y, width, height, 1, BrickKind::Normal)
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    #[inline]
    pub fn kind(&self) -> BrickKind {
        self.kind
    }

    #[inline]
    pub fn hits(&self) -> u32 {
        self.hits
    }

    #[inline]
    pub fn max_hits(&self) -> u32 {
        self.max_hits
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_explosive(&self) -> bool {
        self.kind == BrickKind::Explosive
    }

    pub fn is_indestructible(&self) -> bool {
        self.kind == BrickKind::Indestructible
    }

    /// Register one hit. Returns true if this hit destroyed the brick.
    pub fn hit(&mut self) -> bool {
        if self.is_indestructible() || self.destroyed {
            return false;
        }
        self.hits += 1;
        if self.hits >= self.max_hits {
            self.destroyed = true;
        }
        self.destroyed
    }

    /// Destroy without going through the hit counter (explosions)
    pub fn destroy(&mut self) {
        if !self.is_indestructible() {
            self.destroyed = true;
        }
    }

    /// Points awarded for destroying this brick
    pub fn score(&self) -> u32 {
        match self.max_hits {
            1 => 10,
            2 => 20,
            3 => 30,
            _ => 50,
        }
    }

    /// Returns true if this brick must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        !self.is_indestructible()
    }
}

/// True once every destructible brick is gone
pub fn all_cleared(bricks: &[Brick]) -> bool {
    bricks
        .iter()
        .filter(|b| b.counts_for_clear())
        .all(|b| b.is_destroyed())
}

/// Playfield extents. Origin is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlayfieldData")]
pub struct Playfield {
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct PlayfieldData {
    width: f32,
    height: f32,
}

impl TryFrom<PlayfieldData> for Playfield {
    type Error = ShapeError;

    fn try_from(data: PlayfieldData) -> Result<Self, Self::Error> {
        Playfield::new(data.width, data.height)
    }
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Result<Self, ShapeError> {
        check_extent(width, height)?;
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }
}
