//! Enumeration types for the haulage simulator
//!
//! This module contains the reporting view of vehicle activity, station status,
//! the dispatch operation tag carried by diagnostics, and output formats.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Phase of a vehicle's haulage cycle as seen by reports
///
/// The cycle runs MINING → TRAVELING → UNLOADING → TRAVELING → MINING. The
/// vehicle itself keeps a richer state; this is the three-way legacy view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    /// Extracting material at the mine site
    Mining,
    /// Driving between the mine site and the unloading stations
    Traveling,
    /// Queued at or being serviced by an unloading station
    Unloading,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Mining => write!(f, "Mining"),
            Activity::Traveling => write!(f, "Traveling"),
            Activity::Unloading => write!(f, "Unloading"),
        }
    }
}

impl FromStr for Activity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mining" => Ok(Activity::Mining),
            "traveling" | "travelling" | "travel" => Ok(Activity::Traveling),
            "unloading" | "unload" => Ok(Activity::Unloading),
            _ => Err(format!("Unknown activity: {}", s)),
        }
    }
}

/// Status of an unloading station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationStatus {
    /// No vehicle queued; may accept a vehicle immediately
    Available,
    /// Servicing its queue
    Occupied,
}

impl fmt::Display for StationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationStatus::Available => write!(f, "Available"),
            StationStatus::Occupied => write!(f, "Occupied"),
        }
    }
}

/// Operation that produced a dispatch diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchOperation {
    /// Placing a newly loaded vehicle into a station queue
    Assign,
    /// A station servicing the vehicle at the front of its queue
    Unload,
}

impl fmt::Display for DispatchOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchOperation::Assign => write!(f, "assign"),
            DispatchOperation::Unload => write!(f, "unload"),
        }
    }
}

/// Output format for the results files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// CSV tables with the historical column headers
    Csv,
    /// Pretty-printed JSON arrays of performance records
    Json,
}

impl OutputFormat {
    /// File extension used for this format, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
