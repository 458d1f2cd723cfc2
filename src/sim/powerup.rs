//! Power-up effects
//!
//! Instant effects applied when the caller collects a power-up. Timed modes
//! (sticky, laser) and extra lives stay with the caller.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, Playfield, ShapeError};
use crate::consts::*;

/// Power-ups with an immediate effect on balls or the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUp {
    MultiBall,
    LargePaddle,
    SmallPaddle,
    SpeedUp,
    SpeedDown,
}

impl PowerUp {
    pub const ALL: [PowerUp; 5] = [
        PowerUp::MultiBall,
        PowerUp::LargePaddle,
        PowerUp::SmallPaddle,
        PowerUp::SpeedUp,
        PowerUp::SpeedDown,
    ];

    /// Apply the effect. Multi-ball splits off the first ball in `balls` and
    /// does nothing when there is none.
    pub fn apply<R: Rng>(
        self,
        balls: &mut Vec<Ball>,
        paddle: &mut Paddle,
        field: &Playfield,
        rng: &mut R,
    ) -> Result<(), ShapeError> {
        match self {
            PowerUp::MultiBall => {
                if let Some(first) = balls.first() {
                    let spawned = spawn_multi_ball(first, rng);
                    balls.extend(spawned);
                }
            }
            PowerUp::LargePaddle => enlarge_paddle(paddle, field)?,
            PowerUp::SmallPaddle => shrink_paddle(paddle, field)?,
            PowerUp::SpeedUp => scale_speed(balls, SPEED_UP_SCALE),
            PowerUp::SpeedDown => scale_speed(balls, SPEED_DOWN_SCALE),
        }
        Ok(())
    }
}

/// Two extra balls at `ball`'s position, launched up-right and up-left.
///
/// They keep the source ball's speed, or the release speed if it is at rest.
pub fn spawn_multi_ball<R: Rng>(ball: &Ball, rng: &mut R) -> [Ball; 2] {
    let speed = if ball.is_moving() {
        ball.speed()
    } else {
        BALL_RELEASE_SPEED
    };

    MULTI_BALL_ANGLES_DEG.map(|base| {
        let jitter = rng.random_range(-MULTI_BALL_JITTER_DEG..=MULTI_BALL_JITTER_DEG);
        let mut spawned = ball.clone();
        spawned.vel = Vec2::from_angle((base + jitter).to_radians()) * speed;
        spawned
    })
}

/// Widen the paddle around its center, kept inside the playfield
pub fn enlarge_paddle(paddle: &mut Paddle, field: &Playfield) -> Result<(), ShapeError> {
    resize_paddle(paddle, paddle.width() * LARGE_PADDLE_SCALE, field)
}

/// Narrow the paddle around its center, never below [`MIN_PADDLE_WIDTH`]
pub fn shrink_paddle(paddle: &mut Paddle, field: &Playfield) -> Result<(), ShapeError> {
    let width = (paddle.width() * SMALL_PADDLE_SCALE).max(MIN_PADDLE_WIDTH);
    resize_paddle(paddle, width, field)
}

fn resize_paddle(paddle: &mut Paddle, width: f32, field: &Playfield) -> Result<(), ShapeError> {
    let center = paddle.center_x();
    paddle.set_width(width)?;
    paddle.center_on(center, field.width());
    Ok(())
}

/// Multiply every ball's velocity by `factor`
pub fn scale_speed(balls: &mut [Ball], factor: f32) {
    for ball in balls {
        ball.vel *= factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Playfield {
        Playfield::new(800.0, 600.0).unwrap()
    }

    fn angle_deg(v: Vec2) -> f32 {
        v.y.atan2(v.x).to_degrees()
    }

    #[test]
    fn test_multi_ball_angles_and_speed() {
        let ball = Ball::new(Vec2::new(200.0, 300.0), 6.0)
            .unwrap()
            .with_velocity(Vec2::new(300.0, -400.0));
        let mut rng = Pcg32::seed_from_u64(9);

        for _ in 0..50 {
            let [right, left] = spawn_multi_ball(&ball, &mut rng);
            for spawned in [&right, &left] {
                assert_eq!(spawned.pos, ball.pos);
                assert_eq!(spawned.radius(), 6.0);
                assert!((spawned.speed() - 500.0).abs() < 1e-2);
            }
            let a = angle_deg(right.vel);
            let b = angle_deg(left.vel);
            assert!((50.0..=70.0).contains(&a), "right ball at {a}");
            assert!((110.0..=130.0).contains(&b), "left ball at {b}");
        }
    }

    #[test]
    fn test_multi_ball_from_resting_ball() {
        let ball = Ball::new(Vec2::new(400.0, 53.0), 8.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let spawned = spawn_multi_ball(&ball, &mut rng);
        for b in &spawned {
            assert!((b.speed() - BALL_RELEASE_SPEED).abs() < 1e-2);
            assert!(b.vel.y > 0.0);
        }
    }

    #[test]
    fn test_multi_ball_is_seed_deterministic() {
        let ball = Ball::new(Vec2::new(400.0, 300.0), 8.0)
            .unwrap()
            .with_velocity(Vec2::new(0.0, 300.0));
        let spawn = |seed| spawn_multi_ball(&ball, &mut Pcg32::seed_from_u64(seed));
        assert_eq!(spawn(77), spawn(77));
    }

    #[test]
    fn test_apply_multi_ball_uses_first_ball() {
        let mut paddle = Paddle::new(350.0, 30.0, 100.0, 15.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(5);

        let mut balls = Vec::new();
        PowerUp::MultiBall
            .apply(&mut balls, &mut paddle, &field(), &mut rng)
            .unwrap();
        assert!(balls.is_empty());

        balls.push(Ball::new(Vec2::new(100.0, 200.0), 8.0).unwrap());
        balls.push(Ball::new(Vec2::new(700.0, 200.0), 8.0).unwrap());
        PowerUp::MultiBall
            .apply(&mut balls, &mut paddle, &field(), &mut rng)
            .unwrap();
        assert_eq!(balls.len(), 4);
        assert!(balls[2..].iter().all(|b| b.pos == Vec2::new(100.0, 200.0)));
    }

    #[test]
    fn test_large_paddle_recenters() {
        let mut paddle = Paddle::new(350.0, 30.0, 100.0, 15.0).unwrap();
        enlarge_paddle(&mut paddle, &field()).unwrap();
        assert_eq!(paddle.width(), 150.0);
        assert_eq!(paddle.x(), 325.0);
        assert_eq!(paddle.center_x(), 400.0);
    }

    #[test]
    fn test_large_paddle_clamped_to_field() {
        let mut paddle = Paddle::new(0.0, 30.0, 100.0, 15.0).unwrap();
        enlarge_paddle(&mut paddle, &field()).unwrap();
        assert_eq!(paddle.x(), 0.0);
        assert_eq!(paddle.width(), 150.0);

        let mut paddle = Paddle::new(700.0, 30.0, 100.0, 15.0).unwrap();
        enlarge_paddle(&mut paddle, &field()).unwrap();
        assert_eq!(paddle.x(), 650.0);
        assert_eq!(paddle.x() + paddle.width(), 800.0);
    }

    #[test]
    fn test_small_paddle_shrinks_to_minimum() {
        let mut paddle = Paddle::new(350.0, 30.0, 100.0, 15.0).unwrap();
        shrink_paddle(&mut paddle, &field()).unwrap();
        assert!((paddle.width() - 70.0).abs() < 1e-4);
        assert!((paddle.center_x() - 400.0).abs() < 1e-4);

        shrink_paddle(&mut paddle, &field()).unwrap();
        assert!((paddle.width() - 49.0).abs() < 1e-4);
        shrink_paddle(&mut paddle, &field()).unwrap();
        assert_eq!(paddle.width(), MIN_PADDLE_WIDTH);
        assert!((paddle.center_x() - 400.0).abs() < 1e-4);
    }

    #[test]
    fn test_speed_up_and_down() {
        let mut paddle = Paddle::new(350.0, 30.0, 100.0, 15.0).unwrap();
        let mut rng = Pcg32::seed_from_u64(0);
        let mut balls = vec![
            Ball::new(Vec2::new(100.0, 200.0), 8.0)
                .unwrap()
                .with_velocity(Vec2::new(100.0, -200.0)),
            Ball::new(Vec2::new(300.0, 200.0), 8.0).unwrap(),
        ];

        PowerUp::SpeedUp
            .apply(&mut balls, &mut paddle, &field(), &mut rng)
            .unwrap();
        assert!((balls[0].vel - Vec2::new(120.0, -240.0)).length() < 1e-3);
        assert_eq!(balls[1].vel, Vec2::ZERO);

        PowerUp::SpeedDown
            .apply(&mut balls, &mut paddle, &field(), &mut rng)
            .unwrap();
        assert!((balls[0].vel - Vec2::new(96.0, -192.0)).length() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_resized_paddle_stays_in_field(
            x in 0.0f32..700.0,
            width in 40.0f32..100.0,
            picks in proptest::collection::vec(0usize..2, 1..8),
        ) {
            let field = field();
            let mut paddle = Paddle::new(x, 30.0, width, 15.0).unwrap();
            for pick in picks {
                if pick == 0 {
                    enlarge_paddle(&mut paddle, &field).unwrap();
                } else {
                    shrink_paddle(&mut paddle, &field).unwrap();
                }
                prop_assert!(paddle.width() >= MIN_PADDLE_WIDTH);
                if paddle.width() <= field.width() {
                    prop_assert!(paddle.x() >= 0.0);
                    prop_assert!(paddle.x() + paddle.width() <= field.width() + 1e-3);
                }
            }
        }
    }
}
