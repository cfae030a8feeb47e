//! Statistics collection and reporting
//!
//! Utilization figures are derived from the per-entity counters after a run.
//! Every function here is pure: computing a report twice over unchanged
//! counters yields identical values, and nothing feeds back into the run.

use crate::fleet::Vehicle;
use crate::stations::Station;
use crate::types::{SimulationConfig, StationId, VehicleId, MINUTES_PER_HOUR};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Run settings the statistics depend on, in minutes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// Run horizon
    pub horizon: f64,
    /// Tick length
    pub tick_length: f64,
    /// Fixed unload duration
    pub unload_duration: f64,
}

impl RunParameters {
    /// Derive the parameters from a simulation configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            horizon: config.horizon_minutes(),
            tick_length: config.tick_minutes,
            unload_duration: config.unload_minutes,
        }
    }

    fn percent_of_horizon(&self, minutes: f64) -> f64 {
        if self.horizon <= 0.0 {
            return 0.0;
        }
        minutes / self.horizon * 100.0
    }
}

/// Utilization of one vehicle over the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehiclePerformance {
    /// Vehicle identifier
    pub id: VehicleId,
    /// Share of the horizon spent mining
    pub percent_mining: f64,
    /// Share of the horizon spent traveling
    pub percent_travel: f64,
    /// Share of the horizon spent being unloaded
    pub percent_unloading: f64,
    /// Remainder of the horizon, including time queued at stations
    pub percent_idle: f64,
    /// Hours spent mining
    pub total_mining_hours: f64,
    /// Unloading service ticks received
    pub total_unloads: u64,
}

impl VehiclePerformance {
    /// Compute the utilization of a vehicle
    pub fn from_vehicle(vehicle: &Vehicle, params: &RunParameters) -> Self {
        let mining_minutes = vehicle.mining_ticks() as f64 * params.tick_length;
        let travel_minutes = vehicle.travel_ticks() as f64 * params.tick_length;
        let unloading_minutes = vehicle.unloads() as f64 * params.unload_duration;

        let percent_mining = params.percent_of_horizon(mining_minutes);
        let percent_travel = params.percent_of_horizon(travel_minutes);
        let percent_unloading = params.percent_of_horizon(unloading_minutes);

        Self {
            id: vehicle.id(),
            percent_mining,
            percent_travel,
            percent_unloading,
            percent_idle: 100.0 - percent_mining - percent_travel - percent_unloading,
            total_mining_hours: mining_minutes / MINUTES_PER_HOUR,
            total_unloads: vehicle.unloads(),
        }
    }
}

impl fmt::Display for VehiclePerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " - Truck ID: {}, Mining Time: {:.2}%, Travel Time: {:.2}%, Unloading Time: {:.2}%, Idle Time: {:.2}%, Total Mining Time (hrs): {:.2}, Total Unloads: {}",
            self.id,
            self.percent_mining,
            self.percent_travel,
            self.percent_unloading,
            self.percent_idle,
            self.total_mining_hours,
            self.total_unloads
        )
    }
}

/// Utilization of one station over the run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationPerformance {
    /// Station identifier
    pub id: StationId,
    /// Share of the horizon spent unloading vehicles
    pub percent_unloading: f64,
    /// Remainder of the horizon
    pub percent_idle: f64,
    /// Hours spent unloading vehicles
    pub total_unloading_hours: f64,
    /// Hours without unloading work
    pub total_idle_hours: f64,
    /// Vehicles serviced
    pub total_unloads: u64,
}

impl StationPerformance {
    /// Compute the utilization of a station
    pub fn from_station(station: &Station, params: &RunParameters) -> Self {
        let unloading_minutes = station.completed_unloads as f64 * params.unload_duration;
        let percent_unloading = params.percent_of_horizon(unloading_minutes);
        let total_unloading_hours = unloading_minutes / MINUTES_PER_HOUR;

        Self {
            id: station.id,
            percent_unloading,
            percent_idle: 100.0 - percent_unloading,
            total_unloading_hours,
            total_idle_hours: params.horizon / MINUTES_PER_HOUR - total_unloading_hours,
            total_unloads: station.completed_unloads,
        }
    }
}

impl fmt::Display for StationPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " - Station ID: {}, Total Unloads: {}, Percent Unloading Time: {:.2}%, Percent Idle Time: {:.2}%, Total Unloading Time (hrs): {:.2}, Total Idle Time (hrs): {:.2}",
            self.id,
            self.total_unloads,
            self.percent_unloading,
            self.percent_idle,
            self.total_unloading_hours,
            self.total_idle_hours
        )
    }
}

/// Per-entity utilization for a whole run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Settings the figures were computed with
    pub parameters: RunParameters,
    /// One record per vehicle, in id order
    pub vehicles: Vec<VehiclePerformance>,
    /// One record per station, in id order
    pub stations: Vec<StationPerformance>,
}

impl PerformanceReport {
    /// Compute the report from final vehicle and station counters
    pub fn compute(vehicles: &[Vehicle], stations: &[Station], params: &RunParameters) -> Self {
        Self {
            parameters: *params,
            vehicles: vehicles.iter().map(|v| VehiclePerformance::from_vehicle(v, params)).collect(),
            stations: stations.iter().map(|s| StationPerformance::from_station(s, params)).collect(),
        }
    }

    /// Fleet-wide averages and totals
    pub fn fleet_summary(&self) -> FleetSummary {
        FleetSummary::from_report(self)
    }

    /// Console rendering, one line per entity
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str("Mining Truck Performance: \n");
        for vehicle in &self.vehicles {
            output.push_str(&format!("{}\n", vehicle));
        }

        output.push_str("Unloading Station Performance: \n");
        for station in &self.stations {
            output.push_str(&format!("{}\n", station));
        }

        output
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Fleet-wide averages over a [`PerformanceReport`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    /// Number of vehicles
    pub vehicle_count: usize,
    /// Number of stations
    pub station_count: usize,
    /// Mean vehicle mining share
    pub mean_percent_mining: f64,
    /// Mean vehicle travel share
    pub mean_percent_travel: f64,
    /// Mean vehicle unloading share
    pub mean_percent_unloading: f64,
    /// Mean vehicle idle share
    pub mean_percent_idle: f64,
    /// Mean station unloading share
    pub mean_station_utilization: f64,
    /// Unloads summed over all stations
    pub total_unloads: u64,
}

impl FleetSummary {
    /// Summarize a report
    pub fn from_report(report: &PerformanceReport) -> Self {
        let vehicle_mean = |field: fn(&VehiclePerformance) -> f64| {
            mean(report.vehicles.iter().map(field), report.vehicles.len())
        };

        Self {
            vehicle_count: report.vehicles.len(),
            station_count: report.stations.len(),
            mean_percent_mining: vehicle_mean(|v| v.percent_mining),
            mean_percent_travel: vehicle_mean(|v| v.percent_travel),
            mean_percent_unloading: vehicle_mean(|v| v.percent_unloading),
            mean_percent_idle: vehicle_mean(|v| v.percent_idle),
            mean_station_utilization: mean(
                report.stations.iter().map(|s| s.percent_unloading),
                report.stations.len(),
            ),
            total_unloads: report.stations.iter().map(|s| s.total_unloads).sum(),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

impl fmt::Display for FleetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fleet Summary:")?;
        writeln!(f, "  Trucks: {}, Unloading Stations: {}", self.vehicle_count, self.station_count)?;
        writeln!(
            f,
            "  Average Truck Time: Mining {:.2}%, Travel {:.2}%, Unloading {:.2}%, Idle {:.2}%",
            self.mean_percent_mining,
            self.mean_percent_travel,
            self.mean_percent_unloading,
            self.mean_percent_idle
        )?;
        writeln!(f, "  Average Station Utilization: {:.2}%", self.mean_station_utilization)?;
        write!(f, "  Total Unloads: {}", self.total_unloads)
    }
}

/// Facts about the execution of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Ticks taken
    pub ticks_executed: u64,
    /// Logical minutes elapsed when the loop stopped
    pub elapsed_minutes: f64,
    /// Dispatch diagnostics recorded
    pub diagnostics: usize,
    /// Wall-clock time the loop took
    pub wall_clock: Duration,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Simulated {} ticks ({:.0} minutes) in {:.3} seconds with {} dispatch diagnostics",
            self.ticks_executed,
            self.elapsed_minutes,
            self.wall_clock.as_secs_f64(),
            self.diagnostics
        )
    }
}
