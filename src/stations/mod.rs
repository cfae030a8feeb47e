//! Unloading stations and vehicle dispatch
//!
//! This module contains the station record, the registry that owns the
//! stations and the free-station pool, and the assignment policy that places
//! newly loaded vehicles into station queues.
//!
//! # Usage Example
//!
//! ```rust
//! use mine_haulage_simulator::fleet::{Vehicle, VehicleRegistry, VehicleState};
//! use mine_haulage_simulator::stations::*;
//! use mine_haulage_simulator::types::{StationId, VehicleId};
//!
//! let arrived = Vehicle::new_for_testing(
//!     VehicleId(0),
//!     60.0,
//!     VehicleState::AwaitingUnload { assigned: false },
//!     5.0,
//! );
//! let mut vehicles = VehicleRegistry::from_vehicles(vec![arrived], 30.0, 5.0);
//! let mut stations = StationRegistry::new(2, 5.0);
//!
//! let outcome = stations.assign_vehicles(&mut vehicles, &[VehicleId(0)]).unwrap();
//! assert_eq!(outcome.assigned, vec![(VehicleId(0), StationId(0))]);
//! assert_eq!(stations.stations()[0].pending_wait, 5.0);
//! ```

pub mod dispatch;
pub mod registry;
pub mod station;

// Re-export all public types for convenience
pub use dispatch::*;
pub use registry::*;
pub use station::*;
