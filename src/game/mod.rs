//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Each step returns the tiles that changed so a front-end can repaint only those.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod placement;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, LEVEL_UP, MIN_LENGTH};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::ConfigError;
pub use grid::{Board, Position, Rgb, Segment, Tile};
pub use placement::{place_fruit, place_gate, spawn_snake, Gate};
pub use snake::Snake;
pub use state::{DeathReason, GameState, Phase};
