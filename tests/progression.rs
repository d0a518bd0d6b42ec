use gate_snake::game::{
    Action, Direction, GameConfig, GameEngine, GameState, Phase, Position, Snake,
};
use rand::{rngs::StdRng, SeedableRng};

fn engine(seed: u64) -> GameEngine<StdRng> {
    GameEngine::with_rng(GameConfig::default(), StdRng::seed_from_u64(seed))
        .expect("default config is valid")
}

/// Feed the snake by dropping the fruit on its head, then step once
fn feed(engine: &mut GameEngine<StdRng>, state: &mut GameState) -> gate_snake::game::StepResult {
    state.fruit.position = state.snake.head();
    engine.step(state, Action::Continue)
}

/// Vertical snake whose head sits `cells` below `target`, heading up
fn snake_below(state: &GameState, target: Position, cells: i32, length: usize) -> Snake {
    let board = state.board;
    let positions = (0..length as i32).map(|i| {
        let y = (target.y + (cells + i) * board.cell_size).rem_euclid(board.height);
        Position::new(target.x, y)
    });
    Snake::from_positions(positions, board.cell_size, state.snake.color())
}

#[test]
fn test_full_level_cycle() {
    let mut engine = engine(2024);
    let mut state = engine.reset();

    for eaten in 1..=3 {
        let result = feed(&mut engine, &mut state);
        assert!(result.info.ate_fruit);
        assert!(!result.info.gate_opened);
        assert!(!state.gate_open());
        assert_eq!(state.food_count, 1 + eaten);
    }

    let result = feed(&mut engine, &mut state);
    assert!(result.info.ate_fruit);
    assert!(result.info.gate_opened);
    assert!(state.gate_open());
    assert_eq!(state.food_count, 1);
    assert_eq!(state.snake.len(), 9);

    let gate = state.gate.clone().expect("gate is open");
    state.snake = snake_below(&state, gate.entrance(), 1, 9);
    state.direction = Direction::Up;

    // Fruit under the head is ignored while the gate is open
    let result = feed(&mut engine, &mut state);
    assert!(!result.info.ate_fruit);
    assert!(!result.info.gate_opened);
    assert_eq!(state.snake.head(), gate.entrance());

    let result = engine.step(&mut state, Action::Continue);
    assert!(result.info.entered_gate);
    assert!(!result.info.gate_opened);

    for consumed in 1..=9 {
        let result = engine.step(&mut state, Action::Continue);
        assert!(!result.terminated);
        assert_eq!(state.phase, Phase::LevelTransition { consumed });
        assert_eq!(state.snake.len(), 9);
    }

    let result = engine.step(&mut state, Action::Continue);
    assert!(result.info.leveled_up);
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.snake.len(), 9);
    assert_eq!(state.speed_level, 1);
    assert_eq!(state.tick_interval_ms, 65);
    assert!(!state.gate_open());
    assert!(!state.snake.is_self_collided());
    assert!(!state.snake.occupies(state.fruit.position));

    // Fruit counting starts over for the next gate
    let result = feed(&mut engine, &mut state);
    assert!(result.info.ate_fruit);
    assert_eq!(state.food_count, 2);
    assert_eq!(state.snake.len(), 10);
}

#[test]
fn test_gate_wall_kills_and_restart_resets() {
    let mut engine = engine(99);
    let mut state = engine.reset();
    state.food_count = 4;
    feed(&mut engine, &mut state);

    let gate = state.gate.clone().expect("gate is open");
    // Approach the left post of the bracket from below
    let post = gate.cells()[1];
    let length = state.snake.len();
    state.snake = snake_below(&state, post, 1, length);
    state.direction = Direction::Up;

    engine.step(&mut state, Action::Continue);
    assert_eq!(state.snake.head(), post);

    let result = engine.step(&mut state, Action::Continue);
    assert!(result.terminated);
    assert_eq!(
        result.info.death,
        Some(gate_snake::game::DeathReason::GateCollision)
    );

    engine.step(&mut state, Action::Continue);
    assert!(matches!(state.phase, Phase::AwaitingRestart(_)));

    assert!(engine.restart(&mut state, true));
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.snake.len(), 5);
    assert_eq!(state.food_count, 1);
    assert_eq!(state.speed_level, 0);
    assert_eq!(state.fruits_eaten, 0);
    assert!(!state.gate_open());
}

#[test]
fn test_snake_wraps_then_body_follows() {
    let mut engine = engine(5);
    let mut state = engine.reset();
    let row = state.snake.head().y;
    state.snake = Snake::new(Position::new(980, row), 5, 20, state.snake.color());
    state.fruit.position = Position::new(500, (row + 100) % 700);

    engine.step(&mut state, Action::Continue);
    assert_eq!(state.snake.head(), Position::new(0, row));

    for _ in 0..4 {
        engine.step(&mut state, Action::Continue);
    }
    let positions: Vec<Position> = state.snake.positions().collect();
    assert_eq!(
        positions,
        vec![
            Position::new(80, row),
            Position::new(60, row),
            Position::new(40, row),
            Position::new(20, row),
            Position::new(0, row),
        ]
    );
}
