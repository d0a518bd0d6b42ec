use rand::Rng;
use tracing::{debug, info};

use super::{
    action::Action,
    config::GameConfig,
    error::ConfigError,
    grid::{Segment, Tile},
    placement::{place_fruit, place_gate, spawn_snake},
    state::{DeathReason, GameState, Phase},
};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate fruit this step
    pub ate_fruit: bool,
    /// Whether the gate appeared this step
    pub gate_opened: bool,
    /// Whether the head reached the gate entrance this step
    pub entered_gate: bool,
    /// Whether the snake respawned on the next level this step
    pub leveled_up: bool,
    /// What killed the snake, if it died this step
    pub death: Option<DeathReason>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Tiles to repaint, in order
    pub changed: Vec<Tile>,
    /// How long to wait before the next step
    pub delay_ms: u64,
    /// Whether the game has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine<R = rand::rngs::ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<rand::rngs::ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing randomness from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let board = self.config.board();
        let (snake, direction) =
            spawn_snake(&mut self.rng, &self.config, self.config.min_length);
        let fruit = place_fruit(&mut self.rng, &board, &snake);

        let mut state = GameState::new(
            board,
            snake,
            Segment::new(fruit, self.config.fruit_color),
            self.config.tick_interval_ms(0),
        );
        state.direction = direction;
        state
    }

    /// Handle the player's answer on the game over screen.
    ///
    /// Returns false when the player chose to quit.
    pub fn restart(&mut self, state: &mut GameState, play_again: bool) -> bool {
        if play_again {
            info!(speed_level = state.speed_level, "restarting game");
            *state = self.reset();
        }
        play_again
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        let result = match state.phase {
            Phase::Playing => self.step_playing(state, action),
            Phase::LevelTransition { consumed } => self.step_transition(state, consumed),
            Phase::Dead(reason) => {
                state.phase = Phase::AwaitingRestart(reason);
                self.result(state, Vec::new(), StepInfo::default())
            }
            Phase::AwaitingRestart(_) => {
                return self.result(state, Vec::new(), StepInfo::default());
            }
        };

        state.ticks += 1;
        result
    }

    fn step_playing(&mut self, state: &mut GameState, action: Action) -> StepResult {
        let board = state.board;

        if state.snake.is_self_collided() {
            return self.kill(state, DeathReason::SelfCollision);
        }

        if let Some(gate) = &state.gate {
            if gate.blocks(state.snake.head()) {
                return self.kill(state, DeathReason::GateCollision);
            }
        }

        // Update direction based on action (prevent 180° turns)
        if let Action::Move(new_direction) = action {
            if !state.direction.is_opposite(new_direction) {
                state.direction = new_direction;
            }
        }

        let mut changed = Vec::new();
        let mut info = StepInfo::default();

        // Fruit is off the table while the gate is open
        if !state.gate_open() && state.snake.head() == state.fruit.position {
            let new_head = board.wrapped(
                state
                    .snake
                    .head()
                    .moved_in_direction(state.direction, board.cell_size),
            );
            state.snake.grow(new_head);
            changed.push(board.tile(new_head, state.snake.color()));

            state.fruit.position = place_fruit(&mut self.rng, &board, &state.snake);
            state.food_count += 1;
            state.fruits_eaten += 1;
            info.ate_fruit = true;
            debug!(
                length = state.snake.len(),
                food_count = state.food_count,
                "fruit eaten"
            );
        }

        if state.food_count % self.config.level_up == 0 {
            let gate = place_gate(
                &mut self.rng,
                &board,
                &state.snake,
                self.config.gate_color,
            );
            debug!(anchor = ?gate.anchor(), "gate opened");

            changed.push(board.tile(state.fruit.position, self.config.background_color));
            state.gate = Some(gate);
            state.food_count = 1;
            info.gate_opened = true;
        }

        if let Some(gate) = &state.gate {
            if state.snake.head() == gate.entrance() {
                debug!(length = state.snake.len(), "entering gate");
                state.phase = Phase::LevelTransition { consumed: 0 };
                info.entered_gate = true;
                return self.result(state, changed, info);
            }
        }

        let vacated = state.snake.move_in(state.direction);
        if let Some(wrapped) = board.wrap(state.snake.head()) {
            state.snake.teleport(wrapped);
        }

        changed.push(board.tile(vacated, self.config.background_color));
        changed.push(board.tile(state.snake.head(), state.snake.color()));
        self.push_pickups(state, &mut changed);

        self.result(state, changed, info)
    }

    /// One tick of the snake disappearing into the gate, tail first.
    ///
    /// Once every segment is gone the gate closes and a snake of the same
    /// length spawns somewhere else, one speed level up.
    fn step_transition(&mut self, state: &mut GameState, consumed: usize) -> StepResult {
        let board = state.board;
        let length = state.snake.len();

        if consumed < length {
            let mut changed = Vec::new();
            if let Some(segment) = state.snake.segment(length - 1 - consumed) {
                changed.push(board.tile(segment.position, self.config.background_color));
            }
            state.phase = Phase::LevelTransition {
                consumed: consumed + 1,
            };
            self.push_pickups(state, &mut changed);
            return self.result(state, changed, StepInfo::default());
        }

        let mut changed: Vec<Tile> = state
            .gate
            .take()
            .map(|gate| {
                gate.cells()
                    .iter()
                    .map(|&pos| board.tile(pos, self.config.background_color))
                    .collect()
            })
            .unwrap_or_default();

        let (snake, direction) = spawn_snake(&mut self.rng, &self.config, length);
        state.snake = snake;
        state.direction = direction;
        if state.snake.occupies(state.fruit.position) {
            state.fruit.position = place_fruit(&mut self.rng, &board, &state.snake);
        }
        state.speed_level += 1;
        state.tick_interval_ms = self.config.tick_interval_ms(state.speed_level);
        state.phase = Phase::Playing;
        info!(
            speed_level = state.speed_level,
            length,
            tick_interval_ms = state.tick_interval_ms,
            "level up"
        );

        changed.extend(state.tiles());
        let info = StepInfo {
            leveled_up: true,
            ..Default::default()
        };
        self.result(state, changed, info)
    }

    fn kill(&self, state: &mut GameState, reason: DeathReason) -> StepResult {
        info!(
            ?reason,
            length = state.snake.len(),
            speed_level = state.speed_level,
            "snake died"
        );
        state.snake.die();
        state.phase = Phase::Dead(reason);

        let info = StepInfo {
            death: Some(reason),
            ..Default::default()
        };
        self.result(state, Vec::new(), info)
    }

    /// Redraw whichever of fruit or gate is on the board
    fn push_pickups(&self, state: &GameState, changed: &mut Vec<Tile>) {
        let board = state.board;
        match &state.gate {
            Some(gate) => changed.extend(
                gate.segments()
                    .map(|segment| board.tile(segment.position, segment.color)),
            ),
            None => changed.push(board.tile(state.fruit.position, state.fruit.color)),
        }
    }

    fn result(&self, state: &GameState, changed: Vec<Tile>, info: StepInfo) -> StepResult {
        StepResult {
            changed,
            delay_ms: state.tick_interval_ms,
            terminated: !state.is_playing(),
            info,
        }
    }
}
