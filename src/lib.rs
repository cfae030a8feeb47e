//! Mine Haulage Simulator
//!
//! A fixed-timestep simulation of a closed-loop mining haulage operation: a
//! fleet of trucks cycles through mining, hauling, unloading and returning
//! while contending for a limited number of unloading stations.
//!
//! # Overview
//!
//! This library models the fleet, the unloading stations and the dispatch
//! policy that matches loaded trucks to stations, advances everything on a
//! logical clock, and derives utilization statistics for every truck and
//! station at the end of the run.
//!
//! ## Key Features
//!
//! - **Truck Life Cycle**: Mining, hauling, queueing, unloading and returning phases
//! - **Station Queues**: FIFO service, one truck per tick, with pending-work estimates
//! - **Dispatch Policy**: Free stations first, then the shortest estimated wait
//! - **Deterministic Runs**: Seeded mining cycle draws and a fixed tick order
//! - **Results Output**: Per-entity utilization written as CSV or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use mine_haulage_simulator::*;
//!
//! // Create a basic simulation configuration
//! let config = SimulationConfig {
//!     vehicle_count: 10,
//!     station_count: 3,
//!     horizon_hours: 24.0,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! // Run it to the horizon
//! let mut simulation = Simulation::new(config)?;
//! let summary = simulation.run()?;
//!
//! // Inspect utilization
//! let report = simulation.performance_report();
//! println!("{} ticks, {} trucks", summary.ticks_executed, report.vehicles.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, and configuration
//! - [`fleet`]: Trucks, their phase machine, and the vehicle registry
//! - [`stations`]: Unloading stations, their registry, and dispatch
//! - [`simulation`]: Clock, engine, statistics, errors, and logging
//! - [`report`]: Results files
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │    Fleet    │    │  Stations   │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Vehicles    │◄───┤ Queues      │
//! │ Enums       │    │ Registry    │    │ Dispatch    │
//! │ Config      │    │ Durations   │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!        ▲                   ▲                   ▲
//!        │                   │                   │
//! ┌─────────────┐    ┌─────────────────────────────────┐
//! │   Report    │    │           Simulation            │
//! │             │    │                                 │
//! │ CSV / JSON  │◄───┤ Clock, Engine, Statistics       │
//! │ Writer      │    │ Errors, Logging                 │
//! └─────────────┘    └─────────────────────────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod fleet;
pub mod report;
pub mod simulation;
pub mod stations;

pub mod types;

// Core types and identifiers
pub use types::{
    // Enums
    Activity,
    ConfigValidationError,
    DispatchOperation,
    OutputFormat,
    // Configuration
    SimulationConfig,
    StationId,
    StationStatus,
    // Identifiers
    VehicleId,
};

// Fleet types and functionality
pub use fleet::{
    MiningDurationSource, ScriptedMiningDurations, TickReport, UniformMiningDurations, Vehicle,
    VehicleRegistry, VehicleState, VehicleTransition,
};

// Station types and functionality
pub use stations::{DispatchOutcome, Station, StationRegistry};

// Simulation types and functionality
pub use simulation::{
    Diagnostic, DispatchError, ErrorHandler, FleetSummary, PerformanceReport, RunParameters,
    RunSummary, Simulation, SimulationClock, SimulationError, SimulationResult,
    StationPerformance, VehiclePerformance,
};

// Results output
pub use report::{ReportPaths, ReportWriter};
