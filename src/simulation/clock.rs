//! Logical simulation clock
//!
//! Time advances in fixed ticks from zero. A tick is taken while the elapsed
//! time has not passed the horizon, so a tick starting exactly at the horizon
//! still runs and no partial tick is ever taken.

use serde::{Deserialize, Serialize};

/// Fixed-step logical clock, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    elapsed: f64,
    horizon: f64,
    tick_length: f64,
    ticks: u64,
}

impl SimulationClock {
    /// Create a clock at time zero
    pub fn new(horizon: f64, tick_length: f64) -> Self {
        Self { elapsed: 0.0, horizon, tick_length, ticks: 0 }
    }

    /// Whether another tick should be taken
    pub fn is_running(&self) -> bool {
        self.elapsed <= self.horizon
    }

    /// Record one completed tick
    pub fn advance(&mut self) {
        self.elapsed += self.tick_length;
        self.ticks += 1;
    }

    /// Logical minutes elapsed
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Run horizon in minutes
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Tick length in minutes
    pub fn tick_length(&self) -> f64 {
        self.tick_length
    }

    /// Ticks taken so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks a full run takes: `floor(horizon / tick) + 1`
    ///
    /// Exact when both values are whole minutes; accumulated floating point
    /// error can shift the final tick for fractional tick lengths.
    pub fn expected_ticks(&self) -> u64 {
        if self.tick_length <= 0.0 || self.horizon < 0.0 {
            return 0;
        }
        (self.horizon / self.tick_length).floor() as u64 + 1
    }

    /// Fraction of the horizon covered, capped at 1
    pub fn progress(&self) -> f64 {
        if self.horizon <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.horizon).min(1.0)
    }
}
