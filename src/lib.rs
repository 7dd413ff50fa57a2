//! Blockworld - a 2D imitation of multiplayer Minecraft driven over HTTP
//!
//! # Architecture
//!
//! ## Client
//! - [`client`] - Async client with one method per game endpoint
//! - [`routes`] - Endpoint table shared by client and server
//! - [`lines`] - Newline-delimited list bodies
//!
//! ## Game
//! - [`world`] - Blocks, colors, the block grid, players and world generation
//! - [`server`] - Reference HTTP server over the game state
//!
//! ## Configuration & Utilities
//! - [`config`] - Configuration management
//! - [`error`] - Error types

#![forbid(unsafe_code)]

// ============================================================================
// Client
// ============================================================================
pub mod client;
pub mod lines;
pub mod routes;

// ============================================================================
// Game
// ============================================================================
pub mod world;

#[cfg(feature = "server")]
pub mod server;

// ============================================================================
// Configuration & Utilities
// ============================================================================
pub mod config;
pub mod error;

pub use client::BlockworldClient;
pub use config::{ClientConfig, Config, ServerConfig};
pub use error::{ClientError, Result};
