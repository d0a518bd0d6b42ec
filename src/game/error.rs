use thiserror::Error;

/// A game configuration that cannot produce a playable board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    NonPositiveCellSize(i32),
    #[error("board of {width}x{height} px is not a whole number of {cell_size} px cells")]
    UnalignedBoard {
        width: i32,
        height: i32,
        cell_size: i32,
    },
    #[error("board has {columns} columns but a snake of length {min_length} needs at least {required}")]
    TooNarrow {
        columns: i32,
        min_length: usize,
        required: i32,
    },
    #[error("board has {rows} rows but at least {required} are needed to place a gate")]
    TooShort { rows: i32, required: i32 },
    #[error("minimum snake length must be at least 2, got {0}")]
    MinLengthTooSmall(usize),
    #[error("level up threshold must be at least 2 fruit, got {0}")]
    LevelUpTooSmall(u32),
    #[error("minimum tick interval {min_tick_ms} ms exceeds the base interval {base_tick_ms} ms")]
    TickFloorAboveBase { min_tick_ms: u64, base_tick_ms: u64 },
}
