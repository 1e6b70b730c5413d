use crate::peripherals::Level;
use std::time::{Duration, Instant};

/// A committed button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

/// Converts noisy raw samples of a mechanical button line into one clean
/// edge per physical press or release.
///
/// A raw level has to persist unchanged for longer than the debounce
/// interval before it becomes the stable level, so contact bounce inside
/// the window never surfaces. Timing is wall-clock (`now` is passed in),
/// which keeps the window accurate regardless of the polling rate.
pub struct ButtonDebouncer {
    stable: Level,
    candidate: Level,
    last_change: Option<Instant>,
    interval: Duration,
    pressed_level: Level,
}

impl ButtonDebouncer {
    /// `pressed_level` is the asserted line level (low for a button wired
    /// to a pull-up). Both tracked levels start at the idle level, so a
    /// button already held at power-on is not seen until it is released
    /// and pressed again.
    pub fn new(interval: Duration, pressed_level: Level) -> Self {
        let idle = pressed_level.inverted();
        Self {
            stable: idle,
            candidate: idle,
            last_change: None,
            interval,
            pressed_level,
        }
    }

    /// Feed one raw sample taken at `now`. Returns the edge when a new
    /// stable level commits, `None` otherwise.
    pub fn sample(&mut self, raw: Level, now: Instant) -> Option<Edge> {
        if raw != self.candidate {
            self.candidate = raw;
            self.last_change = Some(now);
            return None;
        }

        if self.candidate == self.stable {
            return None;
        }

        let changed_at = self.last_change?;
        if now.duration_since(changed_at) > self.interval {
            self.stable = self.candidate;
            return if self.stable == self.pressed_level {
                Some(Edge::Pressed)
            } else {
                Some(Edge::Released)
            };
        }

        None
    }

    pub fn stable_level(&self) -> Level {
        self.stable
    }
}
