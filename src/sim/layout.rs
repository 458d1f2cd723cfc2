//! Brick layouts
//!
//! The collision-test layout is a fixed obstacle course of indestructible
//! shapes built to provoke tunneling and corner cases. The grid layout is the
//! regular play field, with explosive bricks scattered by a seeded RNG.

use rand::Rng;

use super::state::{Brick, BrickKind, Playfield, ShapeError};

const TEST_BRICK_HEIGHT: f32 = 20.0;
const TEST_SPACING: f32 = 2.0;

/// Obstacle course for comparing collision modes.
///
/// Everything is indestructible except two normal bricks near the bottom,
/// so the layout can still be cleared.
pub fn collision_test_layout(field: &Playfield) -> Result<Vec<Brick>, ShapeError> {
    let h = field.height();
    let wall = |x, y, w, bh| Brick::new(x, y, w, bh, 1, BrickKind::Indestructible);
    let mut bricks = Vec::new();

    // Corridor: two columns of stacked bricks with a 50-wide gap
    let corridor_width = 70.0;
    for i in 0..15 {
        let y = h - 100.0 - i as f32 * (TEST_BRICK_HEIGHT + TEST_SPACING);
        bricks.push(wall(50.0, y, corridor_width, TEST_BRICK_HEIGHT)?);
        bricks.push(wall(170.0, y, corridor_width, TEST_BRICK_HEIGHT)?);
    }

    // Spiral
    for i in 0..20 {
        let angle = i as f32 * 0.8;
        let radius = 30.0 + i as f32 * 8.0;
        let x = 400.0 + angle.cos() * radius;
        let y = 400.0 + angle.sin() * radius;
        bricks.push(wall(x, y, 30.0, TEST_BRICK_HEIGHT)?);
    }

    // Zigzag
    for i in 0..8 {
        let offset = if i % 2 == 0 { 0.0 } else { 30.0 };
        bricks.push(wall(100.0 + i as f32 * 60.0, 200.0 + offset, 50.0, TEST_BRICK_HEIGHT)?);
    }

    // L-shape: vertical leg and a foot along its lowest row
    let (corner_x, corner_y) = (600.0, h - 100.0);
    let row = TEST_BRICK_HEIGHT + TEST_SPACING;
    for i in 0..5 {
        bricks.push(wall(corner_x, corner_y - i as f32 * row, 60.0, TEST_BRICK_HEIGHT)?);
        bricks.push(wall(corner_x + i as f32 * 62.0, corner_y - 4.0 * row, 60.0, TEST_BRICK_HEIGHT)?);
    }

    // Narrow gap, 20 high
    bricks.push(wall(250.0, 300.0, 80.0, TEST_BRICK_HEIGHT)?);
    bricks.push(wall(250.0, 300.0 - (TEST_BRICK_HEIGHT + 20.0), 80.0, TEST_BRICK_HEIGHT)?);

    // Box trap: top, bottom, left, right
    let (box_x, box_y, size, t) = (500.0, 250.0, 80.0, TEST_BRICK_HEIGHT);
    bricks.push(wall(box_x, box_y + size, size, t)?);
    bricks.push(wall(box_x, box_y - t, size, t)?);
    bricks.push(wall(box_x - t, box_y, t, size)?);
    bricks.push(wall(box_x + size, box_y, t, size)?);

    bricks.push(Brick::normal(350.0, 150.0, 50.0, TEST_BRICK_HEIGHT)?);
    bricks.push(Brick::normal(420.0, 150.0, 50.0, TEST_BRICK_HEIGHT)?);

    Ok(bricks)
}

/// Parameters for the regular brick grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    /// Chance a brick on the third row from the bottom or higher is explosive
    pub bomb_chance: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 10,
            bomb_chance: 0.1,
        }
    }
}

impl GridLayout {
    /// Hit counts by difficulty, bottom row first
    const HIT_COUNTS: [u32; 6] = [1, 1, 2, 2, 3, 3];

    /// Build the grid, top row first.
    ///
    /// Rows start 100 below the top edge with a 50 margin on each side. The
    /// bottom two rows never hold explosive bricks and take no RNG draws.
    pub fn build<R: Rng>(&self, rng: &mut R, field: &Playfield) -> Result<Vec<Brick>, ShapeError> {
        let pitch = (field.width() - 100.0) / self.cols as f32;
        let height = 20.0;
        let start_y = field.height() - 100.0;
        let chance = if self.bomb_chance.is_nan() {
            0.0
        } else {
            self.bomb_chance.clamp(0.0, 1.0)
        };

        let mut bricks = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            let difficulty = self.rows - 1 - row;
            let max_hits = Self::HIT_COUNTS[difficulty % Self::HIT_COUNTS.len()];
            let y = start_y - row as f32 * (height + 2.0);

            for col in 0..self.cols {
                let x = 50.0 + col as f32 * pitch;
                let kind = if difficulty >= 2 && rng.random_bool(chance) {
                    BrickKind::Explosive
                } else {
                    BrickKind::Normal
                };
                bricks.push(Brick::new(x, y, pitch - 2.0, height, max_hits, kind)?);
            }
        }
        Ok(bricks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::all_cleared;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn field() -> Playfield {
        Playfield::new(800.0, 600.0).unwrap()
    }

    #[test]
    fn test_collision_layout_shape() {
        let bricks = collision_test_layout(&field()).unwrap();
        // 30 corridor + 20 spiral + 8 zigzag + 10 L + 2 gap + 4 box + 2 normal
        assert_eq!(bricks.len(), 76);

        let normal: Vec<&Brick> = bricks.iter().filter(|b| !b.is_indestructible()).collect();
        assert_eq!(normal.len(), 2);
        assert_eq!(normal[0].rect().min.x, 350.0);
        assert_eq!(normal[1].rect().min.x, 420.0);
        assert!(!all_cleared(&bricks));
    }

    #[test]
    fn test_collision_layout_clears_with_two_bricks() {
        let mut bricks = collision_test_layout(&field()).unwrap();
        let n = bricks.len();
        bricks[n - 1].hit();
        assert!(!all_cleared(&bricks));
        bricks[n - 2].hit();
        assert!(all_cleared(&bricks));
    }

    #[test]
    fn test_grid_rows_and_hit_counts() {
        let mut rng = Pcg32::seed_from_u64(7);
        let bricks = GridLayout::default().build(&mut rng, &field()).unwrap();
        assert_eq!(bricks.len(), 60);

        // Top row hardest, bottom row easiest
        assert_eq!(bricks[0].max_hits(), 3);
        assert_eq!(bricks[0].rect().min, glam::Vec2::new(50.0, 500.0));
        assert_eq!(bricks[0].rect().width(), 68.0);
        assert_eq!(bricks[59].max_hits(), 1);
        assert_eq!(bricks[59].rect().min.y, 500.0 - 5.0 * 22.0);
    }

    #[test]
    fn test_grid_bombs_stay_off_bottom_rows() {
        let layout = GridLayout {
            bomb_chance: 1.0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let bricks = layout.build(&mut rng, &field()).unwrap();

        for (i, brick) in bricks.iter().enumerate() {
            let row = i / layout.cols;
            assert_eq!(brick.is_explosive(), row < 4, "brick {i}");
        }
    }

    #[test]
    fn test_grid_is_seed_deterministic() {
        let build = |seed| {
            let mut rng = Pcg32::seed_from_u64(seed);
            GridLayout::default().build(&mut rng, &field()).unwrap()
        };
        assert_eq!(build(42), build(42));
    }

    #[test]
    fn test_grid_nan_bomb_chance_places_no_bombs() {
        let layout = GridLayout {
            bomb_chance: f64::NAN,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let bricks = layout.build(&mut rng, &field()).unwrap();
        assert_eq!(bricks.len(), 60);
        assert!(bricks.iter().all(|b| !b.is_explosive()));
    }

    #[test]
    fn test_grid_rejects_degenerate_columns() {
        let layout = GridLayout {
            cols: 400,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(0);
        assert!(layout.build(&mut rng, &field()).is_err());
    }
}
