//! Per-player cursor and block selection

use std::fmt;
use std::str::FromStr;

use super::block::Block;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown move direction: {}", self.0)
    }
}

impl std::error::Error for UnknownDirection {}

impl FromStr for CursorDirection {
    type Err = UnknownDirection;

    /// Accepts `up/down/left/right` and the compass names, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "north" => Ok(CursorDirection::Up),
            "down" | "south" => Ok(CursorDirection::Down),
            "left" | "west" => Ok(CursorDirection::Left),
            "right" | "east" => Ok(CursorDirection::Right),
            _ => Err(UnknownDirection(s.trim().to_string())),
        }
    }
}

/// `(row, col)`
pub type CursorPos = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    cursor: CursorPos,
    max_row: usize,
    max_col: usize,
    selected_block: Block,
}

impl PlayerState {
    /// `max_row`/`max_col` are inclusive bounds. The start position is clamped into them.
    pub fn new(start_row: usize, start_col: usize, max_row: usize, max_col: usize) -> Self {
        Self {
            cursor: (start_row.min(max_row), start_col.min(max_col)),
            max_row,
            max_col,
            selected_block: Block::Grass,
        }
    }

    pub fn cursor(&self) -> CursorPos {
        self.cursor
    }

    pub fn selected_block(&self) -> Block {
        self.selected_block
    }

    pub fn set_selected_block(&mut self, block: Block) {
        self.selected_block = block;
    }

    /// One step in `direction`, stopping at the grid edge.
    pub fn move_cursor(&mut self, direction: CursorDirection) {
        let (row, col) = self.cursor;
        self.cursor = match direction {
            CursorDirection::Up => (row.saturating_sub(1), col),
            CursorDirection::Down => ((row + 1).min(self.max_row), col),
            CursorDirection::Left => (row, col.saturating_sub(1)),
            CursorDirection::Right => (row, (col + 1).min(self.max_col)),
        };
    }
}
