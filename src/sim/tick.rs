//! Substepped ball integration
//!
//! One call advances one ball by one frame. The frame's displacement is split
//! so no substep moves further than the ball's radius, and after every
//! substep the walls, the paddle and the bricks are resolved in that order.
//! The first contact ends the ball's movement for the frame.

use glam::Vec2;

use super::bounds::{Wall, is_out_of_bounds, resolve_walls};
use super::collision::{CollisionMode, CollisionOutcome, Contact, resolve_brick};
use super::explosion::{DestroyedBrick, chain_score, propagate_explosion};
use super::paddle::{PaddleContact, resolve_paddle};
use super::state::{Ball, Brick, Paddle, Playfield};

/// Number of substeps needed so none moves further than `radius`
pub fn substep_count(speed: f32, dt: f32, radius: f32) -> u32 {
    let travel = speed * dt;
    ((travel / radius).ceil() as u32).max(1)
}

/// Everything a ball can touch during a frame
pub struct Arena<'a> {
    pub playfield: Playfield,
    pub paddle: &'a Paddle,
    /// Sticky paddle power-up is active
    pub sticky: bool,
    pub bricks: &'a mut [Brick],
    pub mode: CollisionMode,
    pub blast_radius: f32,
}

/// Something that happened to the ball during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum ContactEvent {
    Wall(Wall),
    Paddle(PaddleContact),
    Brick {
        index: usize,
        contact: Contact,
        /// Bricks destroyed by the blast, if this was an explosive brick
        chain: Vec<DestroyedBrick>,
    },
    /// Ball dropped past the bottom edge
    OutOfBounds,
}

impl ContactEvent {
    /// Points earned by this event, chain reaction included
    pub fn points(&self) -> u32 {
        match self {
            ContactEvent::Brick { contact, chain, .. } => contact.points + chain_score(chain),
            _ => 0,
        }
    }
}

/// Advance `ball` by `dt` seconds against the arena.
///
/// The substep size is fixed from the velocity at the start of the frame.
/// Returns at most one collision event, followed by [`ContactEvent::OutOfBounds`]
/// if the ball ends the frame below the playfield.
pub fn advance_ball(ball: &mut Ball, dt: f32, arena: &mut Arena<'_>) -> Vec<ContactEvent> {
    let mut events = Vec::new();

    let steps = substep_count(ball.speed(), dt, ball.radius());
    let step = ball.vel * (dt / steps as f32);

    for _ in 0..steps {
        let prev = ball.pos;
        ball.pos += step;

        if let Some(wall) = resolve_walls(ball, &arena.playfield) {
            events.push(ContactEvent::Wall(wall));
            break;
        }

        let paddle = resolve_paddle(ball, arena.paddle, arena.sticky);
        if paddle.is_contact() {
            events.push(ContactEvent::Paddle(paddle));
            break;
        }

        if let Some(event) = resolve_bricks(ball, prev, arena) {
            events.push(event);
            break;
        }
    }

    if is_out_of_bounds(ball) {
        log::debug!("Ball lost at x={:.1}", ball.pos.x);
        events.push(ContactEvent::OutOfBounds);
    }

    events
}

/// First brick hit in slice order, with any chain reaction it sets off
fn resolve_bricks(ball: &mut Ball, prev: Vec2, arena: &mut Arena<'_>) -> Option<ContactEvent> {
    for index in 0..arena.bricks.len() {
        let outcome = resolve_brick(arena.mode, ball, &mut arena.bricks[index], prev);
        let CollisionOutcome::Hit(contact) = outcome else {
            continue;
        };

        let brick = &arena.bricks[index];
        let explode_at = (contact.destroyed && brick.is_explosive()).then(|| brick.center());
        let chain = match explode_at {
            Some(center) => propagate_explosion(arena.bricks, center, arena.blast_radius),
            None => Vec::new(),
        };

        return Some(ContactEvent::Brick {
            index,
            contact,
            chain,
        });
    }
    None
}
