//! Shared game state: the world grid plus every connected player

use parking_lot::RwLock;
use std::collections::BTreeMap;

use super::block::{Block, ColorProfile};
use super::generator::WorldGenerator;
use super::grid::BlockGrid;
use super::player::PlayerState;

pub type PlayerId = String;

/// Thread-safe; share it behind an `Arc`.
#[derive(Debug)]
pub struct GameState {
    grid: RwLock<BlockGrid>,
    color_profile: ColorProfile,
    players: RwLock<BTreeMap<PlayerId, PlayerState>>,
}

impl GameState {
    /// An empty (all air) world of `rows x cols` with no players.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: RwLock::new(BlockGrid::new(rows, cols)),
            color_profile: ColorProfile::default(),
            players: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.read().rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.read().cols()
    }

    /// Snapshot of the world grid.
    pub fn grid(&self) -> BlockGrid {
        self.grid.read().clone()
    }

    pub fn color_profile(&self) -> &ColorProfile {
        &self.color_profile
    }

    /// Replace the world with one generated from `seed`. Players keep their cursors.
    pub fn regenerate(&self, seed: &str) {
        let (rows, cols) = {
            let grid = self.grid.read();
            (grid.rows(), grid.cols())
        };
        let world = WorldGenerator::new(rows, cols).generate(seed);
        *self.grid.write() = world;
        tracing::info!(seed = %seed, "world.regenerated");
    }

    /// Add a player at the grid center. Returns `false` if the id is taken.
    pub fn add_player(&self, id: &str) -> bool {
        let (rows, cols) = (self.rows(), self.cols());
        let mut players = self.players.write();
        if players.contains_key(id) {
            return false;
        }
        let max_row = rows.saturating_sub(1);
        let max_col = cols.saturating_sub(1);
        players.insert(
            id.to_string(),
            PlayerState::new(rows / 2, cols / 2, max_row, max_col),
        );
        tracing::info!(player = %id, "player.joined");
        true
    }

    /// Returns `false` if no such player existed.
    pub fn remove_player(&self, id: &str) -> bool {
        let removed = self.players.write().remove(id).is_some();
        if removed {
            tracing::info!(player = %id, "player.left");
        }
        removed
    }

    /// Run `f` against the player's state, or return `None` if the player is unknown.
    pub fn with_player<R>(&self, id: &str, f: impl FnOnce(&mut PlayerState) -> R) -> Option<R> {
        self.players.write().get_mut(id).map(f)
    }

    /// Player ids in sorted order.
    pub fn players(&self) -> Vec<PlayerId> {
        self.players.read().keys().cloned().collect()
    }

    /// Write the player's selected block at their cursor.
    pub fn place_block(&self, id: &str) -> bool {
        let Some((cursor, block)) =
            self.with_player(id, |player| (player.cursor(), player.selected_block()))
        else {
            return false;
        };
        self.grid.write().set(cursor.0, cursor.1, block)
    }

    pub fn block_at(&self, row: usize, col: usize) -> Option<Block> {
        self.grid.read().get(row, col)
    }
}
