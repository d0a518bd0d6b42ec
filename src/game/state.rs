use super::action::Direction;
use super::grid::{Board, Segment, Tile};
use super::placement::Gate;
use super::snake::Snake;

/// What killed the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathReason {
    /// Snake ran into its own body
    SelfCollision,
    /// Snake hit the gate anywhere but the entrance
    GateCollision,
}

impl DeathReason {
    /// Line shown under "GAME OVER"
    pub fn message(&self) -> &'static str {
        match self {
            DeathReason::SelfCollision => "You are not delicious!",
            DeathReason::GateCollision => "Gate is not delicious!",
        }
    }
}

/// Where the game is in its progression cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Snake died this tick
    Dead(DeathReason),
    /// Snake is disappearing into the gate; `consumed` segments are gone
    LevelTransition { consumed: usize },
    /// Waiting for the player to restart or quit
    AwaitingRestart(DeathReason),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub snake: Snake,
    pub fruit: Segment,
    /// The open gate, if any
    pub gate: Option<Gate>,
    /// Starts at 1 and resets to 1 whenever the gate opens
    pub food_count: u32,
    pub speed_level: u32,
    pub tick_interval_ms: u64,
    pub direction: Direction,
    pub phase: Phase,
    /// Total fruit eaten this game
    pub fruits_eaten: u32,
    pub ticks: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(board: Board, snake: Snake, fruit: Segment, tick_interval_ms: u64) -> Self {
        Self {
            board,
            snake,
            fruit,
            gate: None,
            food_count: 1,
            speed_level: 0,
            tick_interval_ms,
            direction: Direction::Right,
            phase: Phase::Playing,
            fruits_eaten: 0,
            ticks: 0,
        }
    }

    pub fn gate_open(&self) -> bool {
        self.gate.is_some()
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing | Phase::LevelTransition { .. })
    }

    /// Reason for the game over, once the snake is dead
    pub fn death_reason(&self) -> Option<DeathReason> {
        match self.phase {
            Phase::Dead(reason) | Phase::AwaitingRestart(reason) => Some(reason),
            _ => None,
        }
    }

    /// Snake segments still on screen; the gate swallows them tail first
    pub fn visible_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let consumed = match self.phase {
            Phase::LevelTransition { consumed } => consumed,
            _ => 0,
        };
        self.snake
            .segments()
            .take(self.snake.len().saturating_sub(consumed))
    }

    /// Every tile that is currently drawn, for a full repaint.
    ///
    /// The fruit is hidden while the gate is open.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles: Vec<Tile> = self
            .visible_segments()
            .map(|s| self.board.tile(s.position, s.color))
            .collect();

        match &self.gate {
            Some(gate) => tiles.extend(
                gate.segments()
                    .map(|s| self.board.tile(s.position, s.color)),
            ),
            None => tiles.push(self.board.tile(self.fruit.position, self.fruit.color)),
        }

        tiles
    }
}
