use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::canvas::Canvas;
use crate::game::{DeathReason, GameState, Rgb};
use crate::metrics::GameMetrics;

/// Which screen the front-end is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Greeting,
    Game,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        screen: Screen,
        canvas: &Canvas,
        state: &GameState,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        if screen == Screen::Greeting {
            frame.render_widget(self.render_greeting(), chunks[1]);
            return;
        }

        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = chunks[1];
        match state.death_reason() {
            None => {
                let grid = self.render_grid(game_area, canvas);
                frame.render_widget(grid, game_area);
            }
            Some(reason) => {
                let game_over = self.render_game_over(game_area, state, reason);
                frame.render_widget(game_over, game_area);
            }
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, canvas: &Canvas) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(canvas.rows());

        for row in 0..canvas.rows() {
            let spans: Vec<Span> = (0..canvas.columns())
                .map(|column| {
                    let color = canvas.color_at(column, row);
                    if color == canvas.background() {
                        Span::styled("  ", Style::default().bg(to_color(color)))
                    } else {
                        Span::styled("██", Style::default().fg(to_color(color)))
                    }
                })
                .collect();

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Classic Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Level: ", label),
            Span::styled(
                state.speed_level.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Fruit: ", label),
            Span::styled(state.fruits_eaten.to_string(), value),
            Span::raw("    "),
            Span::styled("Best level: ", label),
            Span::styled(metrics.best_level.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_greeting(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("Welcome to", Style::default().fg(Color::Green))),
            Line::from(""),
            Line::from(Span::styled(
                "CLASSIC SNAKE",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to start or ESC to quit...",
                Style::default().fg(Color::Rgb(57, 170, 245)),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        state: &GameState,
        reason: DeathReason,
    ) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled(reason.message(), Style::default().fg(Color::Red))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Level reached: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.speed_level.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to play again or ESC to quit...",
                Style::default().fg(Color::Green),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("ESC", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}
