use crate::game::constants::{SESSION_SECS, SHOT_SCORE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameSummary {
    pub score: u32,
    pub accuracy: f32,
}

pub struct GameState {
    pub score: u32,
    pub shots_fired: u32,
    pub hits: u32,
    pub time_left: u32,
    pub started: bool,
    pub frozen: bool,
    tick_accumulator: f32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            shots_fired: 0,
            hits: 0,
            time_left: SESSION_SECS,
            started: false,
            frozen: false,
            tick_accumulator: 0.0,
        }
    }

    /// Starts the countdown. Later calls are ignored.
    pub fn start(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        true
    }

    /// Counts down whole seconds. Returns the summary on the tick that ends
    /// the session.
    pub fn update(&mut self, dt: f32) -> Option<GameSummary> {
        if !self.started || self.frozen {
            return None;
        }

        self.tick_accumulator += dt;
        while self.tick_accumulator >= 1.0 {
            self.tick_accumulator -= 1.0;
            self.time_left = self.time_left.saturating_sub(1);

            if self.time_left == 0 {
                self.frozen = true;
                return Some(self.summary());
            }
        }
        None
    }

    pub fn record_shot(&mut self, hit: bool) {
        self.shots_fired += 1;
        if hit {
            self.hits += 1;
            self.score += SHOT_SCORE;
        }
    }

    pub fn penalize(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            return 0.0;
        }
        self.hits as f32 / self.shots_fired as f32 * 100.0
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            score: self.score,
            accuracy: self.accuracy(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
