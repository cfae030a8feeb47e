//! Results file output
//!
//! Writes one file for the trucks and one for the stations into the results
//! directory, named `MiningSimulationResults_<Kind>_<timestamp>.<ext>`. The
//! CSV column headers are fixed; downstream plotting scripts rely on them.
//! Every CSV value after the id, unload counts included, has two decimals.

use crate::simulation::{PerformanceReport, SimulationError, SimulationResult};
use crate::types::{OutputFormat, SimulationConfig};
use chrono::Local;
use csv::Writer;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Timestamp layout used in results file names
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Column headers of the truck results table
pub const VEHICLE_CSV_HEADER: [&str; 7] = [
    "Vehicle ID",
    "Percent Mining Time",
    "Percent Travel Time",
    "Percent Unloading Time",
    "Percent Idle Time",
    "Total Mining Time (hrs)",
    "Total Unloads",
];

/// Column headers of the station results table
pub const STATION_CSV_HEADER: [&str; 6] = [
    "Station ID",
    "Percent Unloading Time",
    "Percent Idle Time",
    "Total Idle Time (hrs)",
    "Total Unloading Time (hrs)",
    "Total Unloads",
];

/// Locations of the two results files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    /// Truck results file
    pub vehicles: PathBuf,
    /// Station results file
    pub stations: PathBuf,
}

/// Writer for the results files of one run
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: PathBuf,
    format: OutputFormat,
    timestamp: String,
}

impl ReportWriter {
    /// Create a writer stamped with the current local time
    pub fn new(directory: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            directory: directory.into(),
            format,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Create a writer for the configured directory and format
    pub fn from_config(config: &SimulationConfig) -> SimulationResult<Self> {
        let format = config.get_output_format().map_err(SimulationError::configuration_error)?;
        Ok(Self::new(&config.results_dir, format))
    }

    /// Use a fixed timestamp in the file names
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    /// Directory receiving the files
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Paths the files will be written to
    pub fn paths(&self) -> ReportPaths {
        let extension = self.format.extension();
        ReportPaths {
            vehicles: self.directory.join(format!(
                "MiningSimulationResults_MiningTrucks_{}.{}",
                self.timestamp, extension
            )),
            stations: self.directory.join(format!(
                "MiningSimulationResults_UnloadingStations_{}.{}",
                self.timestamp, extension
            )),
        }
    }

    /// Write both results files, creating the directory if needed
    pub fn write(&self, report: &PerformanceReport) -> SimulationResult<ReportPaths> {
        if !self.directory.exists() {
            debug!("Creating results directory {}", self.directory.display());
            fs::create_dir_all(&self.directory)?;
        }

        let paths = self.paths();
        match self.format {
            OutputFormat::Csv => {
                write_vehicle_csv(&paths.vehicles, report)?;
                write_station_csv(&paths.stations, report)?;
            }
            OutputFormat::Json => {
                write_json(&paths.vehicles, &report.vehicles)?;
                write_json(&paths.stations, &report.stations)?;
            }
        }

        info!(
            "Results written to {} and {}",
            paths.vehicles.display(),
            paths.stations.display()
        );
        Ok(paths)
    }
}

fn write_vehicle_csv(path: &Path, report: &PerformanceReport) -> SimulationResult<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(VEHICLE_CSV_HEADER)?;

    for vehicle in &report.vehicles {
        writer.write_record(&[
            vehicle.id.to_string(),
            format!("{:.2}", vehicle.percent_mining),
            format!("{:.2}", vehicle.percent_travel),
            format!("{:.2}", vehicle.percent_unloading),
            format!("{:.2}", vehicle.percent_idle),
            format!("{:.2}", vehicle.total_mining_hours),
            format!("{:.2}", vehicle.total_unloads as f64),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_station_csv(path: &Path, report: &PerformanceReport) -> SimulationResult<()> {
    let mut writer = Writer::from_path(path)?;
    writer.write_record(STATION_CSV_HEADER)?;

    for station in &report.stations {
        writer.write_record(&[
            station.id.to_string(),
            format!("{:.2}", station.percent_unloading),
            format!("{:.2}", station.percent_idle),
            format!("{:.2}", station.total_idle_hours),
            format!("{:.2}", station.total_unloading_hours),
            format!("{:.2}", station.total_unloads as f64),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, records: &[T]) -> SimulationResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}
