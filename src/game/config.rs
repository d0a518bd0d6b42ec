use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::grid::{Board, Rgb};

/// Length of a freshly spawned snake
pub const MIN_LENGTH: usize = 5;
/// Fruit count at which the gate opens
pub const LEVEL_UP: u32 = 5;

/// Rows the gate reserves: the bracket plus the approach row below the entrance
pub const GATE_ROWS: i32 = 3;
/// Columns the gate bracket spans
pub const GATE_COLUMNS: i32 = 3;

/// Configuration for the game
///
/// These are the fixed constants of the game; `Default` is the only
/// configuration the binary uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in pixels
    pub board_width: i32,
    /// Height of the board in pixels
    pub board_height: i32,
    /// Side of one square grid cell in pixels
    pub cell_size: i32,
    /// Length of the snake at the start of a game
    pub min_length: usize,
    /// The gate opens every time the fruit counter reaches this value
    pub level_up: u32,

    // Pacing
    /// Delay between ticks at speed level 0
    pub base_tick_ms: u64,
    /// Delay removed per speed level
    pub tick_step_ms: u64,
    /// The delay never drops below this
    pub min_tick_ms: u64,

    // Colors
    pub snake_color: Rgb,
    pub fruit_color: Rgb,
    pub gate_color: Rgb,
    pub background_color: Rgb,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 1000,
            board_height: 700,
            cell_size: 20,
            min_length: MIN_LENGTH,
            level_up: LEVEL_UP,
            base_tick_ms: 70,
            tick_step_ms: 5,
            min_tick_ms: 20,
            snake_color: Rgb::RED,
            fruit_color: Rgb::GREEN,
            gate_color: Rgb::GATE_PURPLE,
            background_color: Rgb::BLACK,
        }
    }
}

impl GameConfig {
    pub fn board(&self) -> Board {
        Board::new(self.board_width, self.board_height, self.cell_size)
    }

    /// Delay between ticks at the given speed level
    pub fn tick_interval_ms(&self, speed_level: u32) -> u64 {
        self.base_tick_ms
            .saturating_sub(u64::from(speed_level) * self.tick_step_ms)
            .max(self.min_tick_ms)
    }

    /// Check that the board can hold a snake, a fruit and a gate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::NonPositiveCellSize(self.cell_size));
        }
        if self.board_width % self.cell_size != 0 || self.board_height % self.cell_size != 0 {
            return Err(ConfigError::UnalignedBoard {
                width: self.board_width,
                height: self.board_height,
                cell_size: self.cell_size,
            });
        }
        if self.min_length < 2 {
            return Err(ConfigError::MinLengthTooSmall(self.min_length));
        }
        if self.level_up < 2 {
            return Err(ConfigError::LevelUpTooSmall(self.level_up));
        }

        let board = self.board();
        // The head spawns in column min_length + 1 or further right, never the last column
        let required = (self.min_length as i32 + 2).max(GATE_COLUMNS);
        if board.columns() < required {
            return Err(ConfigError::TooNarrow {
                columns: board.columns(),
                min_length: self.min_length,
                required,
            });
        }
        if board.rows() < GATE_ROWS {
            return Err(ConfigError::TooShort {
                rows: board.rows(),
                required: GATE_ROWS,
            });
        }
        if self.min_tick_ms > self.base_tick_ms {
            return Err(ConfigError::TickFloorAboveBase {
                min_tick_ms: self.min_tick_ms,
                base_tick_ms: self.base_tick_ms,
            });
        }
        Ok(())
    }
}
