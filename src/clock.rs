//! Fixed-timestep accumulator.

use bevy::prelude::Resource;

/// Decouples simulation time from frame time.
///
/// Each rendered frame adds its wall-clock delta; every whole `timestep` in
/// the accumulator buys one fixed tick. `elapsed` is the simulation's `now`.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    /// Length of one tick in seconds.
    pub timestep: f64,
    /// Unspent frame time.
    pub accumulator: f64,
    /// Simulated time, advanced by `timestep` at the start of each tick.
    pub elapsed: f64,
    /// While set, frame time is not accumulated.
    pub paused: bool,
    /// Number of ticks run so far.
    pub ticks: u64,
}

impl FixedTimestep {
    /// Creates a clock at time zero.
    #[must_use]
    pub const fn new(timestep: f64) -> Self {
        Self {
            timestep,
            accumulator: 0.0,
            elapsed: 0.0,
            paused: false,
            ticks: 0,
        }
    }

    /// Adds one frame's worth of wall-clock time.
    pub fn accumulate(&mut self, frame_delta: f64) {
        if !self.paused && frame_delta.is_finite() && frame_delta > 0.0 {
            self.accumulator += frame_delta;
        }
    }

    /// Spends one timestep from the accumulator if available and advances
    /// the clock. Returns whether a tick should run.
    pub fn consume_tick(&mut self) -> bool {
        if self.accumulator < self.timestep {
            return false;
        }
        self.accumulator -= self.timestep;
        self.begin_tick();
        true
    }

    /// Advances the clock by one tick without touching the accumulator.
    pub fn begin_tick(&mut self) {
        self.elapsed += self.timestep;
        self.ticks += 1;
    }
}

/// Wall-clock delta of the frame being processed, written by the host loop.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameDelta(pub f64);
