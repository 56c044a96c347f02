//! Brick field generation
//!
//! Every layout sits on the same 6×8 grid; the pattern decides which cells
//! are filled. Durability is rolled per brick.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::state::{Brick, Rgb};
use crate::consts::*;

/// Row colors, top to bottom
pub const ROW_PALETTE: [Rgb; BRICK_ROWS] = [
    Rgb::RED,
    Rgb::ORANGE,
    Rgb::YELLOW,
    Rgb::GREEN,
    Rgb::BLUE,
    Rgb::PURPLE,
];

/// Cells filled by the scattered layout
pub const SCATTERED_CELLS: usize = 30;

/// Brick layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickPattern {
    /// Full grid
    Normal,
    /// Rows narrow by one column on each side going down
    Pyramid,
    /// Random subset of the grid with random colors
    Scattered,
    /// Staircase band sweeping down and to the left
    Diagonal,
}

impl BrickPattern {
    pub const ALL: [BrickPattern; 4] = [
        BrickPattern::Normal,
        BrickPattern::Pyramid,
        BrickPattern::Scattered,
        BrickPattern::Diagonal,
    ];

    /// Uniformly random layout
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Top-left corner of a grid cell
pub fn cell_origin(row: usize, col: usize) -> (f32, f32) {
    (
        col as f32 * (BRICK_WIDTH + BRICK_GUTTER) + BRICK_ORIGIN_X,
        row as f32 * (BRICK_HEIGHT + BRICK_GUTTER) + BRICK_ORIGIN_Y,
    )
}

/// Roll hits-required: 1, 2 or 3 with weights 0.7 / 0.2 / 0.1
pub fn roll_durability(rng: &mut impl Rng) -> u8 {
    let roll: f64 = rng.random();
    if roll < 0.7 {
        1
    } else if roll < 0.9 {
        2
    } else {
        3
    }
}

fn place(bricks: &mut Vec<Brick>, row: usize, col: usize, color: Rgb, rng: &mut impl Rng) {
    let (x, y) = cell_origin(row, col);
    let hits_required = roll_durability(rng);
    bricks.push(Brick::new(x, y, color, hits_required));
}

/// Build the brick field for `pattern`
pub fn generate(pattern: BrickPattern, rng: &mut impl Rng) -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);

    match pattern {
        BrickPattern::Normal => {
            for row in 0..BRICK_ROWS {
                for col in 0..BRICK_COLS {
                    place(&mut bricks, row, col, ROW_PALETTE[row], rng);
                }
            }
        }
        BrickPattern::Pyramid => {
            for row in 0..BRICK_ROWS {
                for col in row..BRICK_COLS.saturating_sub(row) {
                    place(&mut bricks, row, col, ROW_PALETTE[row], rng);
                }
            }
        }
        BrickPattern::Scattered => {
            let cells = index::sample(rng, BRICK_ROWS * BRICK_COLS, SCATTERED_CELLS);
            for cell in cells.iter() {
                let (row, col) = (cell / BRICK_COLS, cell % BRICK_COLS);
                let color = ROW_PALETTE[rng.random_range(0..ROW_PALETTE.len())];
                place(&mut bricks, row, col, color, rng);
            }
        }
        BrickPattern::Diagonal => {
            for i in 0..(BRICK_COLS + BRICK_ROWS - 2) {
                for row in 0..(i + 1).min(BRICK_ROWS) {
                    let col = i - row;
                    if col < BRICK_COLS {
                        place(&mut bricks, row, col, ROW_PALETTE[row], rng);
                    }
                }
            }
        }
    }

    log::info!("Generated {:?} field with {} bricks", pattern, bricks.len());
    bricks
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use super::*;

    fn cells(bricks: &[Brick]) -> HashSet<(i32, i32)> {
        bricks
            .iter()
            .map(|b| {
                let col = ((b.rect.pos.x - BRICK_ORIGIN_X) / (BRICK_WIDTH + BRICK_GUTTER)) as i32;
                let row = ((b.rect.pos.y - BRICK_ORIGIN_Y) / (BRICK_HEIGHT + BRICK_GUTTER)) as i32;
                (row, col)
            })
            .collect()
    }

    #[test]
    fn test_normal_fills_grid_with_row_colors() {
        let mut rng = Pcg32::seed_from_u64(1);
        let bricks = generate(BrickPattern::Normal, &mut rng);
        assert_eq!(bricks.len(), 48);
        assert_eq!(bricks[0].rect.pos.x, 45.0);
        assert_eq!(bricks[0].rect.pos.y, 50.0);
        assert_eq!(bricks[9].rect.pos.x, 127.0);
        assert_eq!(bricks[9].rect.pos.y, 82.0);
        for (i, brick) in bricks.iter().enumerate() {
            assert_eq!(brick.color, ROW_PALETTE[i / BRICK_COLS]);
        }
    }

    #[test]
    fn test_pyramid_shape() {
        let mut rng = Pcg32::seed_from_u64(2);
        let bricks = generate(BrickPattern::Pyramid, &mut rng);
        // 8 + 6 + 4 + 2 + 0 + 0
        assert_eq!(bricks.len(), 20);
        let cells = cells(&bricks);
        assert!(cells.contains(&(3, 3)) && cells.contains(&(3, 4)));
        assert!(!cells.contains(&(3, 2)));
        assert!(!cells.iter().any(|&(row, _)| row >= 4));
    }

    #[test]
    fn test_scattered_samples_distinct_cells() {
        let mut rng = Pcg32::seed_from_u64(3);
        let bricks = generate(BrickPattern::Scattered, &mut rng);
        assert_eq!(bricks.len(), SCATTERED_CELLS);
        let cells = cells(&bricks);
        assert_eq!(cells.len(), SCATTERED_CELLS);
        assert!(cells.iter().all(|&(r, c)| (0..6).contains(&r) && (0..8).contains(&c)));
    }

    #[test]
    fn test_diagonal_band() {
        let mut rng = Pcg32::seed_from_u64(4);
        let bricks = generate(BrickPattern::Diagonal, &mut rng);
        // Every cell with row + col <= 11, each placed once
        let cells = cells(&bricks);
        assert_eq!(cells.len(), bricks.len());
        assert_eq!(bricks.len(), 47);
        assert!(cells.contains(&(4, 7)));
        assert!(!cells.contains(&(5, 7)));
        // First diagonal is the top-left corner
        assert_eq!(bricks[0].rect.pos.x, 45.0);
        assert_eq!(bricks[0].rect.pos.y, 50.0);
    }

    #[test]
    fn test_durability_weights() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut counts = [0u32; 3];
        for _ in 0..10_000 {
            let d = roll_durability(&mut rng);
            counts[(d - 1) as usize] += 1;
        }
        assert!((6700..7300).contains(&counts[0]), "{counts:?}");
        assert!((1700..2300).contains(&counts[1]), "{counts:?}");
        assert!((800..1200).contains(&counts[2]), "{counts:?}");
    }

    #[test]
    fn test_same_seed_same_field() {
        let a = generate(BrickPattern::Scattered, &mut Pcg32::seed_from_u64(9));
        let b = generate(BrickPattern::Scattered, &mut Pcg32::seed_from_u64(9));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.rect, y.rect);
            assert_eq!(x.hits_required, y.hits_required);
        }
    }
}
