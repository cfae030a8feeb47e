//! Identifier types for the haulage simulator
//!
//! Vehicles and stations are created once, in bulk, with sequential ids
//! `0..N-1`. The id doubles as the entity's index inside its registry, so the
//! newtypes wrap a plain `usize` rather than an opaque token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a mining vehicle (haul truck)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub usize);

impl VehicleId {
    /// Position of the vehicle inside its registry
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for VehicleId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Identifier of an unloading station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(pub usize);

impl StationId {
    /// Position of the station inside its registry
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for StationId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}
