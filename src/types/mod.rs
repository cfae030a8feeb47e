//! Core types and identifiers for the haulage simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: sequential ids for vehicles and stations
//! - **Enums**: activity and station status views, output formats
//! - **Configuration**: Simulation configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use mine_haulage_simulator::types::*;
//!
//! let truck = VehicleId(0);
//! let station = StationId(2);
//! assert_eq!(truck.to_string(), "0");
//! assert_eq!(station.index(), 2);
//!
//! let config = SimulationConfig {
//!     vehicle_count: 20,
//!     station_count: 4,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
