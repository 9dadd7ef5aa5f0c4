//! Time management utilities

use std::time::{Duration, Instant};

/// Default tick rate of the host update loop
pub const DEFAULT_TICK_HZ: u32 = 60;

/// Fixed-rate tick accumulator
///
/// Hosts feed variable frame deltas in and get back how many fixed ticks
/// should run this frame. Leftover time carries into the next frame.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    interval: Duration,
    accumulator: Duration,
    max_steps_per_frame: u32,
    tick_count: u64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::from_hz(DEFAULT_TICK_HZ)
    }
}

impl FixedTimestep {
    /// Create a timestep with the given tick interval
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_micros(1)),
            accumulator: Duration::ZERO,
            max_steps_per_frame: 8,
            tick_count: 0,
        }
    }

    /// Create a timestep running at `hz` ticks per second
    pub fn from_hz(hz: u32) -> Self {
        Self::new(Duration::from_secs(1) / hz.max(1))
    }

    /// Cap the number of ticks returned for a single frame
    ///
    /// Protects the loop from a spiral of death after a long stall; time
    /// beyond the cap is dropped.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps_per_frame = max_steps.max(1);
        self
    }

    /// Add a frame delta and return the number of ticks to run
    pub fn advance(&mut self, delta: Duration) -> u32 {
        self.accumulator += delta;

        let mut steps = 0;
        while self.accumulator >= self.interval && steps < self.max_steps_per_frame {
            self.accumulator -= self.interval;
            steps += 1;
        }
        if steps == self.max_steps_per_frame && self.accumulator >= self.interval {
            log::trace!("Dropping {:?} of backlog after {} ticks", self.accumulator, steps);
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += u64::from(steps);
        steps
    }

    /// The fixed tick interval
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks produced so far
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated time covered by the ticks produced so far
    pub fn elapsed(&self) -> Duration {
        self.interval.saturating_mul(u32::try_from(self.tick_count).unwrap_or(u32::MAX))
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in milliseconds
    pub fn elapsed_millis(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}
