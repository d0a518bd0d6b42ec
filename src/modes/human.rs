use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::info;

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState, Phase, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Canvas, Renderer, Screen};

pub struct HumanMode {
    engine: GameEngine<StdRng>,
    state: GameState,
    canvas: Canvas,
    screen: Screen,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    /// Set up a game; `seed` makes fruit, gate and spawn positions repeatable.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let background = config.background_color;
        let mut engine = GameEngine::with_rng(config, rng).context("Invalid game configuration")?;
        let state = engine.reset();
        let canvas = Canvas::new(state.board, background);

        Ok(Self {
            engine,
            state,
            canvas,
            screen: Screen::Greeting,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks speed up with every level
        let mut tick_ms = self.state.tick_interval_ms;
        let mut tick_timer = tick_timer_for(tick_ms);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            let mut next_delay_ms = None;

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.screen == Screen::Game {
                        next_delay_ms = Some(self.update_game().delay_ms);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.state.is_playing() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            self.screen,
                            &self.canvas,
                            &self.state,
                            &self.metrics,
                        );
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            if let Some(delay_ms) = next_delay_ms.filter(|&ms| ms != tick_ms) {
                tick_ms = delay_ms;
                tick_timer = tick_timer_for(tick_ms);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = self.input_handler.handle_key_event(key);
        let awaiting_restart = matches!(self.state.phase, Phase::AwaitingRestart(_));

        match action {
            KeyAction::Quit if awaiting_restart => self.answer_play_again(false),
            KeyAction::Quit => self.should_quit = true,
            _ if self.screen == Screen::Greeting => self.start_game(),
            KeyAction::GameAction(Action::Move(dir)) if self.state.is_playing() => {
                self.pending_direction = Some(dir);
            }
            _ if awaiting_restart => self.answer_play_again(true),
            _ => {}
        }
    }

    fn start_game(&mut self) {
        info!("game started");
        self.screen = Screen::Game;
        self.metrics.on_game_start();
        self.canvas.repaint(&self.state.tiles());
    }

    /// Advance the game one tick; the result carries the delay until the next
    fn update_game(&mut self) -> StepResult {
        let action = self
            .pending_direction
            .take()
            .map(Action::from)
            .unwrap_or(Action::Continue);

        let result = self.engine.step(&mut self.state, action);
        self.canvas.apply(&result.changed);

        if result.info.leveled_up {
            self.metrics.on_level_up(self.state.speed_level);
        }
        if result.info.death.is_some() {
            self.metrics.on_game_over(self.state.speed_level);
        }
        result
    }

    fn answer_play_again(&mut self, play_again: bool) {
        if self.engine.restart(&mut self.state, play_again) {
            self.pending_direction = None;
            self.metrics.on_game_start();
            self.canvas.repaint(&self.state.tiles());
        } else {
            self.should_quit = true;
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Ticker whose first tick is one full period away
fn tick_timer_for(tick_ms: u64) -> Interval {
    let period = Duration::from_millis(tick_ms);
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{DeathReason, Gate, Rgb};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode() -> HumanMode {
        HumanMode::new(GameConfig::default(), Some(1)).expect("default config is valid")
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.screen, Screen::Greeting);
        assert_eq!(mode.state.phase, Phase::Playing);
        assert_eq!(mode.state.snake.len(), 5);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert!(HumanMode::new(config, None).is_err());
    }

    #[test]
    fn test_any_key_starts_game() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));

        assert_eq!(mode.screen, Screen::Game);
        let head = mode.state.snake.head();
        let column = (head.x / 20) as usize;
        let row = (head.y / 20) as usize;
        assert_eq!(mode.canvas.color_at(column, row), mode.state.snake.color());
    }

    #[test]
    fn test_escape_on_greeting_quits() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Esc));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_direction_is_applied_on_tick() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.pending_direction, Some(Direction::Up));

        let result = mode.update_game();

        assert_eq!(result.delay_ms, 70);
        assert_eq!(mode.pending_direction, None);
        assert_eq!(mode.state.direction, Direction::Up);
    }

    #[test]
    fn test_play_again() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));
        mode.state.speed_level = 2;
        mode.state.phase = Phase::AwaitingRestart(DeathReason::SelfCollision);

        mode.handle_event(key(KeyCode::Char('x')));

        assert!(!mode.should_quit);
        assert_eq!(mode.state.phase, Phase::Playing);
        assert_eq!(mode.state.speed_level, 0);
    }

    #[test]
    fn test_escape_on_game_over_quits() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));
        mode.state.phase = Phase::AwaitingRestart(DeathReason::GateCollision);

        mode.handle_event(key(KeyCode::Esc));

        assert!(mode.should_quit);
    }

    #[test]
    fn test_death_is_recorded() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));
        mode.state.phase = Phase::Playing;
        // Fold the snake so its head sits on its body
        let body = mode.state.snake.segment(2).map(|s| s.position);
        mode.state.snake.teleport(body.expect("snake has five segments"));

        mode.update_game();

        assert_eq!(mode.state.phase, Phase::Dead(DeathReason::SelfCollision));
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_level_up_shortens_tick_delay() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Enter));
        let head = mode.state.snake.head();
        // Put the gate entrance right under the head
        mode.state.gate = Some(Gate::new(head.moved_by(-20, -20), 20, Rgb::GATE_PURPLE));

        let mut result = mode.update_game();
        assert!(result.info.entered_gate);
        while !result.info.leveled_up {
            assert_eq!(result.delay_ms, 70);
            result = mode.update_game();
        }

        assert_eq!(result.delay_ms, 65);
        assert_eq!(mode.metrics.best_level, 1);
    }
}
