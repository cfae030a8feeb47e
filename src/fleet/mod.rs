//! Mining fleet modeling
//!
//! This module contains the vehicle state machine, the registry that owns and
//! advances the fleet each tick, and the injectable mining duration sources.
//!
//! # Usage Example
//!
//! ```rust
//! use mine_haulage_simulator::fleet::*;
//! use mine_haulage_simulator::types::VehicleId;
//!
//! // Two vehicles with fixed 60 minute mining cycles
//! let mut source = ScriptedMiningDurations::constant(60.0);
//! let mut fleet = VehicleRegistry::new(2, (60.0, 60.0), 30.0, 5.0, &mut source).unwrap();
//!
//! // Twelve five-minute ticks finish the mining cycle
//! for _ in 0..12 {
//!     fleet.update(5.0);
//! }
//! let vehicle = fleet.get(VehicleId(0)).unwrap();
//! assert_eq!(vehicle.state(), VehicleState::Hauling);
//! assert!(vehicle.is_loaded());
//! ```

pub mod generator;
pub mod registry;
pub mod vehicle;

// Re-export all public types for convenience
pub use generator::*;
pub use registry::*;
pub use vehicle::*;
