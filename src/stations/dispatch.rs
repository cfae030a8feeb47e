//! Assignment of newly loaded vehicles to unloading stations
//!
//! Vehicles are handled one at a time in the order they arrived. Each goes to
//! the station at the front of the free-station pool if there is one;
//! otherwise to the station with the smallest pending wait, where the lowest
//! station id wins ties.

use crate::fleet::VehicleRegistry;
use crate::simulation::DispatchError;
use crate::stations::registry::StationRegistry;
use crate::types::{DispatchOperation, StationId, VehicleId};
use tracing::debug;

/// Result of distributing one tick's loaded vehicles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchOutcome {
    /// Successful assignments in processing order
    pub assigned: Vec<(VehicleId, StationId)>,
    /// Assignments that were skipped, with the reason
    pub skipped: Vec<DispatchError>,
}

impl StationRegistry {
    /// Pick the station the next vehicle should join
    ///
    /// The front of the free-station pool is returned without being removed;
    /// [`StationRegistry::assign_vehicle`] removes it once the assignment
    /// succeeds. Fails only when there are no stations at all.
    pub fn select_station(&self) -> Result<StationId, DispatchError> {
        if let Some(&front) = self.free_pool.front() {
            return Ok(front);
        }

        let mut stations = self.stations.iter();
        let first = stations.next().ok_or(DispatchError::NoStations)?;

        let mut best = (first.id, first.pending_wait);
        for station in stations {
            if station.pending_wait < best.1 {
                best = (station.id, station.pending_wait);
            }
        }

        Ok(best.0)
    }

    /// Place a vehicle in a station's queue
    ///
    /// On success the vehicle is marked assigned, the station's pending wait
    /// grows by one unload duration, and the station leaves the free pool if
    /// it sits at the front. Nothing is changed when an error is returned.
    pub fn assign_vehicle(
        &mut self,
        vehicles: &mut VehicleRegistry,
        vehicle_id: VehicleId,
        station_id: StationId,
    ) -> Result<(), DispatchError> {
        let operation = DispatchOperation::Assign;

        vehicles
            .get(vehicle_id)
            .ok_or(DispatchError::UnknownVehicle { vehicle: vehicle_id, operation })?
            .check_assignable()?;

        if self.unload_duration < 0.0 {
            return Err(DispatchError::InvalidUnloadDuration {
                station: station_id,
                minutes: self.unload_duration,
                operation,
            });
        }

        let station = self
            .stations
            .get_mut(station_id.index())
            .ok_or(DispatchError::UnknownStation(station_id))?;

        vehicles.assign_station(vehicle_id)?;
        station.queue.push_back(vehicle_id);
        station.pending_wait += self.unload_duration;

        if self.free_pool.front() == Some(&station_id) {
            self.free_pool.pop_front();
        }

        debug!(vehicle = %vehicle_id, station = %station_id, "Vehicle assigned");
        Ok(())
    }

    /// Distribute newly loaded vehicles across the stations, in the given order
    ///
    /// Recoverable failures are collected in [`DispatchOutcome::skipped`] and
    /// the remaining vehicles are still processed. [`DispatchError::NoStations`]
    /// aborts the call.
    pub fn assign_vehicles(
        &mut self,
        vehicles: &mut VehicleRegistry,
        loaded: &[VehicleId],
    ) -> Result<DispatchOutcome, DispatchError> {
        let mut outcome = DispatchOutcome::default();

        for &vehicle_id in loaded {
            let station_id = self.select_station()?;
            match self.assign_vehicle(vehicles, vehicle_id, station_id) {
                Ok(()) => outcome.assigned.push((vehicle_id, station_id)),
                Err(error) => outcome.skipped.push(error),
            }
        }

        Ok(outcome)
    }
}
