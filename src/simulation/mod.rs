//! Simulation engine and control
//!
//! This module contains the simulation engine, the logical clock, statistics
//! derivation, error handling, and logging setup.
//!
//! # Overview
//!
//! - **Simulation**: owns the fleet and stations and sequences each tick
//! - **SimulationClock**: fixed-step logical time up to the run horizon
//! - **PerformanceReport**: per-truck and per-station utilization
//! - **SimulationError**: error handling for simulation operations
//!
//! # Usage Example
//!
//! ```rust
//! use mine_haulage_simulator::simulation::*;
//! use mine_haulage_simulator::types::*;
//!
//! let config = SimulationConfig {
//!     vehicle_count: 8,
//!     station_count: 2,
//!     horizon_hours: 24.0,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut simulation = Simulation::new(config).unwrap();
//! let summary = simulation.run().unwrap();
//! assert_eq!(summary.ticks_executed, simulation.clock().expected_ticks());
//!
//! let report = simulation.performance_report();
//! assert_eq!(report.vehicles.len(), 8);
//! ```

pub mod clock;
pub mod engine;
pub mod error;
pub mod logging;
pub mod statistics;

// Re-export all public types for convenience
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use statistics::*;
