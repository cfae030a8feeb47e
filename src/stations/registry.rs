//! Station registry and per-tick station update
//!
//! The registry owns every unloading station and the free-station pool, the
//! FIFO of station ids known to have emptied their queue. Each tick an
//! available station with queued vehicles becomes occupied, and an occupied
//! station services exactly one vehicle from the front of its queue,
//! regardless of tick length or unload duration.

use crate::fleet::VehicleRegistry;
use crate::simulation::DispatchError;
use crate::stations::station::Station;
use crate::types::{DispatchOperation, StationId, StationStatus, VehicleId};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Owner of the unloading stations
#[derive(Debug, Clone)]
pub struct StationRegistry {
    pub(crate) stations: Vec<Station>,
    pub(crate) free_pool: VecDeque<StationId>,
    pub(crate) unload_duration: f64,
}

impl StationRegistry {
    /// Create `count` idle stations with ids `0..count`
    ///
    /// The free-station pool starts empty; idle stations are found by the
    /// wait-time scan until they have served and emptied once.
    pub fn new(count: usize, unload_duration: f64) -> Self {
        let stations = (0..count).map(|index| Station::new(StationId(index))).collect();
        Self::from_stations(stations, unload_duration)
    }

    /// Build a registry around existing stations
    ///
    /// Station ids must equal their position in `stations`.
    pub fn from_stations(stations: Vec<Station>, unload_duration: f64) -> Self {
        Self { stations, free_pool: VecDeque::new(), unload_duration }
    }

    /// Advance every station by one tick
    ///
    /// Vehicles serviced here are released in `vehicles`, which lets them
    /// finish unloading during the vehicle update of the same tick. Failed
    /// services are skipped and returned as diagnostics; the offending id is
    /// still removed from the queue.
    pub fn update(&mut self, vehicles: &mut VehicleRegistry) -> Vec<DispatchError> {
        let Self { stations, free_pool, unload_duration } = self;
        let unload_duration = *unload_duration;
        let mut diagnostics = Vec::new();

        for station in stations.iter_mut() {
            let mut emptied = false;

            match station.status {
                StationStatus::Available => {
                    if !station.queue.is_empty() {
                        station.status = StationStatus::Occupied;
                        station.pending_wait = unload_duration * station.queue.len() as f64;
                        trace!(station = %station.id, queued = station.queue.len(), "Station occupied");
                    }
                }
                StationStatus::Occupied => match station.queue.pop_front() {
                    Some(vehicle) => {
                        match Self::service(station, vehicle, unload_duration, vehicles) {
                            Ok(drained) => emptied = drained,
                            Err(error) => diagnostics.push(error),
                        }
                    }
                    None => emptied = true,
                },
            }

            if emptied && station.queue.is_empty() {
                station.status = StationStatus::Available;
                free_pool.push_back(station.id);
                debug!(station = %station.id, "Station freed");
            }
        }

        diagnostics
    }

    /// Unload one vehicle; returns whether the station's pending work is exhausted
    fn service(
        station: &mut Station,
        vehicle_id: VehicleId,
        unload_duration: f64,
        vehicles: &mut VehicleRegistry,
    ) -> Result<bool, DispatchError> {
        vehicles
            .get(vehicle_id)
            .ok_or(DispatchError::UnknownVehicle {
                vehicle: vehicle_id,
                operation: DispatchOperation::Unload,
            })?
            .check_releasable()?;

        if unload_duration < 0.0 {
            return Err(DispatchError::InvalidUnloadDuration {
                station: station.id,
                minutes: unload_duration,
                operation: DispatchOperation::Unload,
            });
        }

        vehicles.release(vehicle_id)?;
        station.completed_unloads += 1;
        station.pending_wait -= unload_duration;

        Ok(station.pending_wait <= 0.0)
    }

    /// Get a station by id
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    /// Get a mutable station by id
    pub fn get_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.stations.get_mut(id.index())
    }

    /// All stations in id order
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Iterate over all stations in id order
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Number of stations
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether there are no stations
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Free-station pool, front first
    ///
    /// Entries can be stale or repeated: a station assigned through the
    /// wait-time scan keeps any pool entry that is not at the front.
    pub fn free_pool(&self) -> &VecDeque<StationId> {
        &self.free_pool
    }

    /// Replace the free-station pool
    pub fn set_free_pool(&mut self, pool: impl IntoIterator<Item = StationId>) {
        self.free_pool = pool.into_iter().collect();
    }

    /// Fixed unload duration in minutes
    pub fn unload_duration(&self) -> f64 {
        self.unload_duration
    }
}
