//! Ball-vs-paddle response
//!
//! The paddle doesn't reflect like a mirror. Where the ball lands across the
//! paddle's width picks the outgoing angle: left edge sends it steeply left,
//! center straight up, right edge steeply right. Sticky paddles catch falling
//! balls instead; the caller keeps those in a held list and later releases
//! them with [`release_velocity`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};
use crate::consts::{MAX_BOUNCE_ANGLE_DEG, SERVE_VELOCITY};
use crate::from_vertical;

/// What happened when the ball met the paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PaddleContact {
    None,
    /// Ball stopped on a sticky paddle. `offset` is ball x minus paddle center x.
    Caught { offset: f32 },
    /// Ball bounced; `angle` is degrees from vertical, positive to the right
    Bounced { angle: f32 },
}

impl PaddleContact {
    pub fn is_contact(&self) -> bool {
        !matches!(self, PaddleContact::None)
    }
}

/// Outgoing angle (degrees from vertical) for a hit at `hit_x`
pub fn bounce_angle(hit_x: f32, paddle: &Paddle) -> f32 {
    let hit_pos = ((hit_x - paddle.x()) / paddle.width()).clamp(0.0, 1.0);
    (hit_pos - 0.5) * 2.0 * MAX_BOUNCE_ANGLE_DEG
}

/// Resolve the ball against the paddle.
///
/// With `sticky` set, only a falling ball is caught; a rising ball still
/// bounces. A bounce keeps the pre-impact speed and always leaves upward.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle, sticky: bool) -> PaddleContact {
    if !ball.circle().overlaps_rect(paddle.rect()) {
        return PaddleContact::None;
    }

    let rest_y = paddle.top() + ball.radius();

    if sticky && ball.vel.y < 0.0 {
        ball.vel = Vec2::ZERO;
        ball.pos.y = rest_y;
        return PaddleContact::Caught {
            offset: ball.pos.x - paddle.center_x(),
        };
    }

    let angle = bounce_angle(ball.pos.x, paddle);
    let speed = ball.speed();
    let dir = from_vertical(angle);
    ball.vel = Vec2::new(speed * dir.x, (speed * dir.y).abs());
    ball.pos.y = rest_y;

    PaddleContact::Bounced { angle }
}

/// Keep a held ball riding on the paddle at `offset` from its center
pub fn follow_paddle(ball: &mut Ball, paddle: &Paddle, offset: f32) {
    ball.pos = Vec2::new(paddle.center_x() + offset, paddle.top() + ball.radius());
}

/// Launch velocity for a ball held at `ball_x` on a sticky paddle.
///
/// Angle from vertical scales with the offset from center, reaching
/// `max_angle_deg` at either edge.
pub fn release_velocity(ball_x: f32, paddle: &Paddle, speed: f32, max_angle_deg: f32) -> Vec2 {
    let half_width = paddle.width() / 2.0;
    let offset = ((ball_x - paddle.center_x()) / half_width).clamp(-1.0, 1.0);
    from_vertical(offset * max_angle_deg) * speed
}

/// Velocity for the initial serve from the paddle
pub fn serve_velocity() -> Vec2 {
    Vec2::new(SERVE_VELOCITY.0, SERVE_VELOCITY.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle_from_vertical;
    use proptest::prelude::*;

    fn paddle() -> Paddle {
        Paddle::new(350.0, 30.0, 100.0, 15.0).unwrap()
    }

    fn falling_ball(x: f32) -> Ball {
        Ball::new(Vec2::new(x, 50.0), 8.0)
            .unwrap()
            .with_velocity(Vec2::new(120.0, -160.0))
    }

    #[test]
    fn test_center_hit_goes_straight_up() {
        let mut ball = falling_ball(400.0);
        let contact = resolve_paddle(&mut ball, &paddle(), false);
        assert_eq!(contact, PaddleContact::Bounced { angle: 0.0 });
        assert!(ball.vel.x.abs() < 1e-3);
        assert!((ball.vel.y - 200.0).abs() < 1e-3);
        assert_eq!(ball.pos.y, 53.0);
    }

    #[test]
    fn test_edge_hits_deflect_sixty_degrees() {
        let mut ball = falling_ball(350.0);
        resolve_paddle(&mut ball, &paddle(), false);
        assert!((angle_from_vertical(ball.vel) + 60.0).abs() < 1e-3);

        let mut ball = falling_ball(450.0);
        resolve_paddle(&mut ball, &paddle(), false);
        assert!((angle_from_vertical(ball.vel) - 60.0).abs() < 1e-3);

        // Past the edge (still overlapping) clamps to the edge angle
        let mut ball = falling_ball(455.0);
        let contact = resolve_paddle(&mut ball, &paddle(), false);
        assert_eq!(contact, PaddleContact::Bounced { angle: 60.0 });
    }

    #[test]
    fn test_sticky_catches_falling_ball() {
        let mut ball = falling_ball(380.0);
        let contact = resolve_paddle(&mut ball, &paddle(), true);
        assert_eq!(contact, PaddleContact::Caught { offset: -20.0 });
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.pos, Vec2::new(380.0, 53.0));
    }

    #[test]
    fn test_sticky_still_bounces_rising_ball() {
        let mut ball = Ball::new(Vec2::new(400.0, 50.0), 8.0)
            .unwrap()
            .with_velocity(Vec2::new(0.0, 100.0));
        let contact = resolve_paddle(&mut ball, &paddle(), true);
        assert!(matches!(contact, PaddleContact::Bounced { .. }));
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_no_overlap_no_contact() {
        let mut ball = falling_ball(400.0);
        ball.pos.y = 60.0;
        assert_eq!(resolve_paddle(&mut ball, &paddle(), false), PaddleContact::None);
        assert_eq!(ball.vel, Vec2::new(120.0, -160.0));
    }

    #[test]
    fn test_follow_and_release() {
        let mut paddle = paddle();
        let mut ball = falling_ball(425.0);
        let PaddleContact::Caught { offset } = resolve_paddle(&mut ball, &paddle, true) else {
            panic!("expected catch");
        };

        paddle.set_x(100.0);
        follow_paddle(&mut ball, &paddle, offset);
        assert_eq!(ball.pos, Vec2::new(175.0, 53.0));

        // Halfway to the right edge: 30 degrees right of vertical
        let vel = release_velocity(ball.pos.x, &paddle, 300.0, MAX_BOUNCE_ANGLE_DEG);
        assert!((vel.length() - 300.0).abs() < 1e-3);
        assert!((angle_from_vertical(vel) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_serve_velocity() {
        assert_eq!(serve_velocity(), Vec2::new(200.0, 200.0));
    }

    proptest! {
        #[test]
        fn prop_bounce_preserves_speed_and_goes_up(
            x in 343.0f32..457.0,
            vx in -800.0f32..800.0,
            vy in -800.0f32..-1.0,
        ) {
            let mut ball = Ball::new(Vec2::new(x, 45.0), 8.0)
                .unwrap()
                .with_velocity(Vec2::new(vx, vy));
            let before = ball.speed();
            let contact = resolve_paddle(&mut ball, &paddle(), false);
            prop_assert!(
                matches!(contact, PaddleContact::Bounced { .. }),
                "expected bounce, got {:?}",
                contact
            );
            prop_assert!((ball.speed() - before).abs() <= before * 1e-4);
            prop_assert!(ball.vel.y > 0.0);
            let angle = angle_from_vertical(ball.vel);
            prop_assert!(angle.abs() <= MAX_BOUNCE_ANGLE_DEG + 1e-3);
        }
    }
}
