use std::time::{Duration, Instant};

/// Longest real-time gap simulated in one go, so a stalled window does not
/// trigger a burst of catch-up frames.
const MAX_FRAME_TIME: Duration = Duration::from_millis(250);

pub struct GameLoop {
    last_update: Instant,
    accumulator: Duration,
    fixed_timestep: Duration,
}

impl GameLoop {
    pub fn new(fps: u32) -> Self {
        Self {
            last_update: Instant::now(),
            accumulator: Duration::ZERO,
            fixed_timestep: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
        }
    }

    /// Runs as many fixed steps as the wall clock allows since the last call.
    pub fn tick<F>(&mut self, update_fn: F) -> u32
    where
        F: FnMut(f32),
    {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(frame_time, update_fn)
    }

    /// Feeds `frame_time` into the accumulator and returns the number of
    /// steps run.
    pub fn advance<F>(&mut self, frame_time: Duration, mut update_fn: F) -> u32
    where
        F: FnMut(f32),
    {
        self.accumulator += frame_time.min(MAX_FRAME_TIME);

        let dt = self.fixed_timestep.as_secs_f32();
        let mut steps = 0;
        while self.accumulator >= self.fixed_timestep {
            update_fn(dt);
            self.accumulator -= self.fixed_timestep;
            steps += 1;
        }
        steps
    }

    /// Forgets time spent paused.
    pub fn resync(&mut self) {
        self.last_update = Instant::now();
        self.accumulator = Duration::ZERO;
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leftover_time_carries_over() {
        let mut game_loop = GameLoop::new(10);
        assert_eq!(game_loop.advance(Duration::from_millis(150), |_| {}), 1);
        assert_eq!(game_loop.advance(Duration::from_millis(160), |_| {}), 2);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut game_loop = GameLoop::new(100);
        let mut total = 0.0;
        let steps = game_loop.advance(Duration::from_secs(5), |dt| total += dt);
        assert_eq!(steps, 25);
        assert!((total - 0.25).abs() < 1e-4);
    }
}
