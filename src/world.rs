//! World model for the reference server: blocks, the block grid, players and
//! seeded world generation.

pub mod block;
pub mod generator;
pub mod grid;
pub mod player;
pub mod state;

pub use block::{all_blocks_by_line, Block, Color, ColorProfile, UnknownBlock};
pub use generator::WorldGenerator;
pub use grid::BlockGrid;
pub use player::{CursorDirection, CursorPos, PlayerState, UnknownDirection};
pub use state::{GameState, PlayerId};
