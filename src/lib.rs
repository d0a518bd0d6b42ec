//! Gate Snake - classic Snake where every few fruit a gate opens to a faster level
//!
//! This library provides:
//! - Core game logic (game module), free of I/O
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive front-end (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
