//! Collision lab
//!
//! Headless comparison of the brick collision modes. Every mode plays the same
//! seeded set of launches against the same layout with an auto-tracking
//! paddle, and the run reports how often balls ended a frame embedded in a
//! live brick.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use brick_bounce::consts::{FRAME_DT, LASER_COOLDOWN};
use brick_bounce::from_vertical;
use brick_bounce::sim::{
    Arena, Ball, Brick, CollisionMode, ContactEvent, GridLayout, Laser, Paddle, PaddleContact,
    Playfield, advance_ball, advance_laser, all_cleared, chain_score, collision_test_layout,
    follow_paddle, serve_velocity,
};
use brick_bounce::PhysicsSettings;

#[derive(Parser, Debug)]
#[command(about = "Compare brick collision modes on a fixed layout", version)]
struct Args {
    /// Physics settings JSON; defaults are used if it can't be loaded
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Seed for launch angles and grid bombs
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    /// Balls launched per mode
    #[arg(long, default_value_t = 32)]
    balls: usize,
    /// Frames simulated per ball
    #[arg(long, default_value_t = 1800)]
    frames: u32,
    /// Launch speed multiplier
    #[arg(long, default_value_t = 4.0)]
    speed_scale: f32,
    /// Run a single mode (discrete, continuous, robust)
    #[arg(long)]
    mode: Option<String>,
    /// Play the regular brick grid instead of the obstacle course
    #[arg(long)]
    grid: bool,
    /// Sticky paddle: caught balls are relaunched on the next frame
    #[arg(long)]
    sticky: bool,
    /// Fire paddle lasers whenever the cooldown allows
    #[arg(long)]
    lasers: bool,
}

#[derive(Debug, Default)]
struct ModeReport {
    wall_hits: u32,
    paddle_hits: u32,
    brick_hits: u32,
    bricks_destroyed: u32,
    laser_hits: u32,
    points: u32,
    balls_lost: u32,
    clears: u32,
    /// Frames that ended with the ball overlapping a live brick
    embedded_frames: u32,
}

struct Lab {
    args: Args,
    settings: PhysicsSettings,
    field: Playfield,
}

impl Lab {
    fn layout(&self, rng: &mut Pcg32) -> Result<Vec<Brick>> {
        let bricks = if self.args.grid {
            GridLayout::default().build(rng, &self.field)?
        } else {
            collision_test_layout(&self.field)?
        };
        Ok(bricks)
    }

    fn run_mode(&self, mode: CollisionMode) -> Result<ModeReport> {
        let mut report = ModeReport::default();
        let mut rng = Pcg32::seed_from_u64(self.args.seed);
        let speed = self.settings.launch_speed * self.args.speed_scale;
        let max_angle = self.settings.max_release_angle_deg;

        for i in 0..self.args.balls {
            let mut bricks = self.layout(&mut rng)?;
            let mut paddle = self.settings.paddle()?;
            let mut ball = self.settings.serve_ball(&paddle)?;
            ball.vel = if i == 0 {
                serve_velocity().normalize_or_zero() * speed
            } else {
                from_vertical(rng.random_range(-max_angle..=max_angle)) * speed
            };

            self.play_ball(mode, &mut ball, &mut paddle, &mut bricks, &mut report);
        }
        Ok(report)
    }

    fn play_ball(
        &self,
        mode: CollisionMode,
        ball: &mut Ball,
        paddle: &mut Paddle,
        bricks: &mut [Brick],
        report: &mut ModeReport,
    ) {
        let mut held: Option<f32> = None;
        let mut lasers: Vec<Laser> = Vec::new();
        let mut cooldown = 0.0;

        for _ in 0..self.args.frames {
            paddle.center_on(ball.pos.x, self.field.width());

            if let Some(offset) = held.take() {
                follow_paddle(ball, paddle, offset);
                ball.vel = self.settings.launch_velocity(ball.pos.x, paddle)
                    * self.args.speed_scale;
            }

            if self.args.lasers {
                cooldown -= FRAME_DT;
                if cooldown <= 0.0 {
                    lasers.extend(Laser::fire_pair(paddle));
                    cooldown = LASER_COOLDOWN;
                }
                for laser in &mut lasers {
                    if let Some(hit) =
                        advance_laser(laser, FRAME_DT, bricks, self.settings.explosion_radius)
                    {
                        report.laser_hits += 1;
                        report.bricks_destroyed += hit.destroyed as u32 + hit.chain.len() as u32;
                        report.points += hit.points + chain_score(&hit.chain);
                    }
                }
                lasers.retain(|l| l.is_active() && !l.is_out_of_bounds(&self.field));
            }

            let mut arena = Arena {
                playfield: self.field,
                paddle: &*paddle,
                sticky: self.args.sticky,
                bricks: &mut *bricks,
                mode,
                blast_radius: self.settings.explosion_radius,
            };
            let events = advance_ball(ball, FRAME_DT, &mut arena);

            let mut lost = false;
            for event in &events {
                match event {
                    ContactEvent::Wall(_) => report.wall_hits += 1,
                    ContactEvent::Paddle(contact) => {
                        report.paddle_hits += 1;
                        if let PaddleContact::Caught { offset } = contact {
                            held = Some(*offset);
                        }
                    }
                    ContactEvent::Brick { contact, chain, .. } => {
                        report.brick_hits += 1;
                        report.bricks_destroyed += contact.destroyed as u32 + chain.len() as u32;
                        report.points += event.points();
                    }
                    ContactEvent::OutOfBounds => lost = true,
                }
            }

            let circle = ball.circle();
            if bricks
                .iter()
                .any(|b| !b.is_destroyed() && circle.overlaps_rect(b.rect()))
            {
                report.embedded_frames += 1;
            }

            if lost {
                report.balls_lost += 1;
                return;
            }
            if all_cleared(bricks) {
                report.clears += 1;
                return;
            }
        }
    }
}

fn parse_modes(name: Option<&str>) -> Result<Vec<CollisionMode>> {
    match name {
        None => Ok(CollisionMode::ALL.to_vec()),
        Some(name) => CollisionMode::from_name(name)
            .map(|mode| vec![mode])
            .ok_or_else(|| anyhow::anyhow!("unknown collision mode: {name}")),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => PhysicsSettings::load_or_default(path),
        None => PhysicsSettings::default(),
    };
    settings.validate()?;
    let field = settings.playfield()?;
    let modes = parse_modes(args.mode.as_deref())?;

    log::info!(
        "Collision lab: {} balls x {} frames, seed {}, {}",
        args.balls,
        args.frames,
        args.seed,
        if args.grid { "grid layout" } else { "collision-test layout" }
    );

    let lab = Lab {
        args,
        settings,
        field,
    };

    println!(
        "{:<18} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7} {:>5} {:>6} {:>8}",
        "mode", "walls", "paddle", "bricks", "broken", "laser", "points", "lost", "clears",
        "embedded"
    );
    for mode in modes {
        let r = lab.run_mode(mode)?;
        println!(
            "{:<18} {:>6} {:>6} {:>6} {:>6} {:>6} {:>7} {:>5} {:>6} {:>8}",
            mode.label(),
            r.wall_hits,
            r.paddle_hits,
            r.brick_hits,
            r.bricks_destroyed,
            r.laser_hits,
            r.points,
            r.balls_lost,
            r.clears,
            r.embedded_frames
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_modes() {
        assert_eq!(parse_modes(None).unwrap().len(), 3);
        assert_eq!(parse_modes(Some("ccd")).unwrap(), vec![CollisionMode::Continuous]);
        assert!(parse_modes(Some("warp")).is_err());
    }

    #[test]
    fn test_lab_run_reports_contacts() {
        let args = Args::parse_from(["collision-lab", "--balls", "4", "--frames", "300"]);
        let settings = PhysicsSettings::default();
        let field = settings.playfield().unwrap();
        let lab = Lab {
            args,
            settings,
            field,
        };
        let report = lab.run_mode(CollisionMode::Robust).unwrap();
        assert!(report.wall_hits + report.paddle_hits + report.brick_hits > 0);
        assert!(report.balls_lost <= 4);
    }
}
