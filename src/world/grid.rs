//! Fixed-size 2D block matrix

use super::block::Block;

/// `rows x cols` blocks in row-major order. Row 0 is the top of the world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Block>,
}

impl BlockGrid {
    /// A grid filled with air.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Block::Air; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Block> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Returns `false` and leaves the grid untouched when out of range.
    pub fn set(&mut self, row: usize, col: usize, block: Block) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = block;
                true
            }
            None => false,
        }
    }

    pub fn count(&self, block: Block) -> usize {
        self.cells.iter().filter(|&&b| b == block).count()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}
