//! Seeded side-view terrain generation
//!
//! A surface line performs a bounded random walk across the columns. Land
//! columns get grass over a few rows of dirt over stone; columns that dip
//! below sea level get a sand floor under water. Trees are scattered on grass
//! in a second pass so neighbouring columns never overwrite them.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

use super::block::Block;
use super::grid::BlockGrid;

const TREE_CHANCE: f64 = 0.12;

#[derive(Debug, Clone, Copy)]
pub struct WorldGenerator {
    rows: usize,
    cols: usize,
}

impl WorldGenerator {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Highest and lowest row the surface may occupy.
    fn surface_bounds(&self) -> (usize, usize) {
        let highest = self.rows / 4;
        (highest, self.rows.saturating_sub(2).max(highest))
    }

    /// First row filled with water in columns whose surface lies below it.
    pub fn sea_level(&self) -> usize {
        let (highest, lowest) = self.surface_bounds();
        (self.rows * 3 / 5).clamp(highest, lowest)
    }

    /// Same seed string, same world.
    pub fn generate(&self, seed: &str) -> BlockGrid {
        let mut rng = StdRng::seed_from_u64(seed_from_str(seed));
        let mut grid = BlockGrid::new(self.rows, self.cols);
        if self.rows == 0 || self.cols == 0 {
            return grid;
        }

        let (highest, lowest) = self.surface_bounds();
        let sea_level = self.sea_level();

        let mut surface = rng.gen_range(highest..=lowest.min(sea_level));
        let mut surfaces = Vec::with_capacity(self.cols);

        for col in 0..self.cols {
            let step: i64 = rng.gen_range(-1..=1);
            surface = (surface as i64 + step).clamp(highest as i64, lowest as i64) as usize;
            surfaces.push(surface);

            let underwater = surface > sea_level;
            if underwater {
                for row in sea_level..surface {
                    grid.set(row, col, Block::Water);
                }
                grid.set(surface, col, Block::Sand);
            } else {
                grid.set(surface, col, Block::Grass);
            }

            let dirt_depth: usize = rng.gen_range(2..=3);
            for row in surface + 1..self.rows {
                let block = if row <= surface + dirt_depth && !underwater {
                    Block::Dirt
                } else if row <= surface + 1 && underwater {
                    Block::Sand
                } else {
                    Block::Stone
                };
                grid.set(row, col, block);
            }
        }

        for (col, &surface) in surfaces.iter().enumerate() {
            if grid.get(surface, col) == Some(Block::Grass) && rng.gen_bool(TREE_CHANCE) {
                plant_tree(&mut grid, surface, col);
            }
        }

        tracing::debug!(
            rows = self.rows,
            cols = self.cols,
            sea_level,
            "world.generated"
        );

        grid
    }
}

/// Two-block trunk above `surface` with a plus-shaped crown.
fn plant_tree(grid: &mut BlockGrid, surface: usize, col: usize) {
    if surface < 4 {
        return;
    }
    let top = surface - 3;

    place_if_free(grid, surface - 1, col, Block::Wood);
    place_if_free(grid, surface - 2, col, Block::Wood);
    place_if_free(grid, top, col, Block::Leaves);
    place_if_free(grid, top - 1, col, Block::Leaves);
    if col > 0 {
        place_if_free(grid, top, col - 1, Block::Leaves);
    }
    place_if_free(grid, top, col + 1, Block::Leaves);
}

fn place_if_free(grid: &mut BlockGrid, row: usize, col: usize, block: Block) {
    if grid.get(row, col).is_some_and(|b| b.is_replaceable()) {
        grid.set(row, col, block);
    }
}

/// First eight bytes of the SHA-256 of `seed`, little endian.
pub fn seed_from_str(seed: &str) -> u64 {
    let digest = Sha256::digest(seed.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
