//! Vehicle registry and per-tick fleet update
//!
//! The registry owns every vehicle for the lifetime of a run. Vehicles are
//! created in bulk with ids `0..N-1` and are only mutated through registry
//! methods, so a vehicle's id is also its index.

use crate::fleet::generator::MiningDurationSource;
use crate::fleet::vehicle::{Vehicle, VehicleTransition};
use crate::simulation::{DispatchError, SimulationError, SimulationResult};
use crate::types::{DispatchOperation, VehicleId};
use tracing::{debug, instrument, trace};

/// Vehicles that fired a phase change during one tick, in ascending id order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Vehicles that finished mining and started hauling
    pub finished_mining: Vec<VehicleId>,
    /// Vehicles that arrived loaded at the unloading area
    pub arrived_loaded: Vec<VehicleId>,
}

/// Owner of the fleet
#[derive(Debug, Clone)]
pub struct VehicleRegistry {
    vehicles: Vec<Vehicle>,
    travel_duration: f64,
    unload_duration: f64,
    last_tick: TickReport,
}

impl VehicleRegistry {
    /// Create `count` vehicles with mining cycles drawn from `source`
    ///
    /// `mining_range` is `(min, max)` in minutes. A draw outside the range is
    /// rejected so a faulty source cannot silently skew the run.
    #[instrument(skip(source))]
    pub fn new(
        count: usize,
        mining_range: (f64, f64),
        travel_duration: f64,
        unload_duration: f64,
        source: &mut dyn MiningDurationSource,
    ) -> SimulationResult<Self> {
        let (min, max) = mining_range;
        let mut vehicles = Vec::with_capacity(count);

        for index in 0..count {
            let duration = source.sample_minutes(min, max);
            if !duration.is_finite() || duration <= 0.0 || duration < min || duration > max {
                return Err(SimulationError::fleet_setup_error(format!(
                    "mining duration {} for vehicle {} is outside [{}, {}]",
                    duration, index, min, max
                )));
            }
            vehicles.push(Vehicle::new(VehicleId(index), duration));
        }

        debug!("Created {} vehicles", vehicles.len());
        Ok(Self::from_vehicles(vehicles, travel_duration, unload_duration))
    }

    /// Build a registry around existing vehicles
    ///
    /// Vehicle ids must equal their position in `vehicles`.
    pub fn from_vehicles(vehicles: Vec<Vehicle>, travel_duration: f64, unload_duration: f64) -> Self {
        Self { vehicles, travel_duration, unload_duration, last_tick: TickReport::default() }
    }

    /// Advance every vehicle by one tick
    ///
    /// Returns the vehicles that changed phase; `arrived_loaded` is the list
    /// the assignment policy consumes. The report is also kept for
    /// [`VehicleRegistry::loaded_vehicles`] until the next update.
    pub fn update(&mut self, tick_length: f64) -> TickReport {
        let mut report = TickReport::default();

        for vehicle in &mut self.vehicles {
            match vehicle.advance(tick_length, self.travel_duration, self.unload_duration) {
                Some(VehicleTransition::FinishedMining) => report.finished_mining.push(vehicle.id()),
                Some(VehicleTransition::ArrivedLoaded) => report.arrived_loaded.push(vehicle.id()),
                Some(transition) => trace!(vehicle = %vehicle.id(), ?transition, "Vehicle transition"),
                None => {}
            }
        }

        self.last_tick = report.clone();
        report
    }

    /// Vehicles that arrived loaded during the most recent update
    pub fn loaded_vehicles(&self) -> &[VehicleId] {
        &self.last_tick.arrived_loaded
    }

    /// Report of the most recent update
    pub fn last_tick(&self) -> &TickReport {
        &self.last_tick
    }

    /// Mark a vehicle as accepted by a station
    pub fn assign_station(&mut self, id: VehicleId) -> Result<(), DispatchError> {
        self.get_mut(id)
            .ok_or(DispatchError::UnknownVehicle { vehicle: id, operation: DispatchOperation::Assign })?
            .assign_station()
    }

    /// Release a queued vehicle into its unloading service
    pub fn release(&mut self, id: VehicleId) -> Result<(), DispatchError> {
        self.get_mut(id)
            .ok_or(DispatchError::UnknownVehicle { vehicle: id, operation: DispatchOperation::Unload })?
            .release()
    }

    /// Get a vehicle by id
    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    /// Get a mutable vehicle by id
    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(id.index())
    }

    /// All vehicles in id order
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Iterate over all vehicles in id order
    pub fn iter(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    /// Number of vehicles
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the fleet is empty
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Fixed one-way travel duration in minutes
    pub fn travel_duration(&self) -> f64 {
        self.travel_duration
    }

    /// Fixed unload duration in minutes
    pub fn unload_duration(&self) -> f64 {
        self.unload_duration
    }
}
