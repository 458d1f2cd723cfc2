//! Deterministic simulation module
//!
//! All ball physics lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (slice order of bricks)
//! - No rendering, audio or platform dependencies

pub mod bounds;
pub mod collision;
pub mod explosion;
pub mod geometry;
pub mod laser;
pub mod layout;
pub mod paddle;
pub mod powerup;
pub mod state;
pub mod sweep;
pub mod tick;

pub use bounds::{Wall, is_out_of_bounds, resolve_walls};
pub use collision::{CollisionMode, CollisionOutcome, Contact, penetration, resolve_brick};
pub use explosion::{DestroyedBrick, chain_score, propagate_explosion};
pub use geometry::{Circle, Rect, reflect};
pub use laser::{Laser, LaserHit, advance_laser};
pub use layout::{GridLayout, collision_test_layout};
pub use paddle::{
    PaddleContact, bounce_angle, follow_paddle, release_velocity, resolve_paddle, serve_velocity,
};
pub use powerup::{PowerUp, enlarge_paddle, scale_speed, shrink_paddle, spawn_multi_ball};
pub use state::{Ball, Brick, BrickKind, Paddle, Playfield, ShapeError, all_cleared};
pub use sweep::{FaceAxis, SweepHit, sweep_circle, sweep_point};
pub use tick::{Arena, ContactEvent, advance_ball, substep_count};
