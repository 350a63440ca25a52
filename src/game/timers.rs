/// Delayed events measured in simulation time.
///
/// Owned by the world, so dropping or clearing it cancels every pending
/// callback at once.
pub struct TimerQueue<T> {
    now: f32,
    next_seq: u64,
    pending: Vec<Timer<T>>,
}

struct Timer<T> {
    due: f32,
    seq: u64,
    event: T,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: 0.0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: f32, event: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Timer {
            due: self.now + delay.max(0.0),
            seq,
            event,
        });
    }

    /// Advances the clock and returns the events that fell due, earliest
    /// first; ties keep scheduling order.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        self.now += dt;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) = self.pending.drain(..).partition(|t| t.due <= now);
        self.pending = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|t| t.event).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_fire_once_in_due_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(2.0, "respawn");
        timers.schedule(0.1, "remove");

        assert!(timers.advance(0.05).is_empty());
        assert_eq!(timers.advance(0.1), vec!["remove"]);
        assert_eq!(timers.advance(5.0), vec!["respawn"]);
        assert!(timers.advance(5.0).is_empty());
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut timers = TimerQueue::new();
        timers.advance(10.0);
        timers.schedule(1.0, 7);
        assert!(timers.advance(0.5).is_empty());
        assert_eq!(timers.advance(0.5), vec![7]);
    }

    #[test]
    fn clear_cancels_pending() {
        let mut timers = TimerQueue::new();
        timers.schedule(0.0, ());
        timers.clear();
        assert!(timers.advance(1.0).is_empty());
    }
}
