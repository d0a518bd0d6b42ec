use std::time::{Duration, Instant};

/// Session statistics, kept in memory only
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Highest speed level reached this session
    pub best_level: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_level: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, speed_level: u32) {
        self.games_played += 1;
        self.on_level_up(speed_level);
    }

    pub fn on_level_up(&mut self, speed_level: u32) {
        self.best_level = self.best_level.max(speed_level);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
