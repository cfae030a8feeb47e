//! Unloading station record

use crate::types::{StationId, StationStatus, VehicleId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// An unloading station and its FIFO queue of vehicles
///
/// `pending_wait` is an estimated load metric, the sum of unload durations
/// for every queued vehicle. The assignment policy compares it between
/// stations; it is not a countdown timer. It may dip below zero by one
/// unload duration right after the last queued vehicle is serviced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station identifier
    pub id: StationId,
    /// Current status
    pub status: StationStatus,
    /// Estimated minutes of unloading work queued at this station
    pub pending_wait: f64,
    /// Vehicles awaiting or undergoing unloading, front first
    pub queue: VecDeque<VehicleId>,
    /// Vehicles this station has serviced
    pub completed_unloads: u64,
}

impl Station {
    /// Create an idle station
    pub fn new(id: StationId) -> Self {
        Self {
            id,
            status: StationStatus::Available,
            pending_wait: 0.0,
            queue: VecDeque::new(),
            completed_unloads: 0,
        }
    }

    /// Whether the station reports itself available
    pub fn is_available(&self) -> bool {
        self.status == StationStatus::Available
    }

    /// Number of queued vehicles, including one in service
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Queued vehicle ids in service order
    pub fn queued_vehicles(&self) -> Vec<VehicleId> {
        self.queue.iter().copied().collect()
    }
}
