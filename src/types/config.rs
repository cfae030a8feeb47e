//! Configuration structures for the haulage simulator
//!
//! This module contains the command line interface, the partial configuration
//! file format, and the validated simulation configuration that controls fleet
//! size, cycle durations, and the run horizon.

use super::OutputFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Minutes per hour, used to convert hour-denominated settings
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Largest accepted fleet size
pub const MAX_VEHICLE_COUNT: usize = 1_000_000;

/// Largest accepted number of unloading stations
pub const MAX_STATION_COUNT: usize = 100_000;

/// Tolerance used when checking whether a duration is a whole number of ticks
const TICK_ALIGNMENT_EPSILON: f64 = 1e-9;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mine-haulage-simulator",
    version = "0.1.0",
    about = "Mine Haulage Simulator - Fleet utilization for mining trucks and unloading stations",
    long_about = "Simulates a closed-loop haulage operation in fixed logical time steps: mining trucks cycle through mining, travel, and unloading while contending for a limited number of unloading stations. Reports per-truck and per-station utilization.

EXAMPLES:
    # Run with 10 trucks and 3 unloading stations
    mine-haulage-simulator 10 3

    # Use a configuration file
    mine-haulage-simulator --config haulage.json

    # Reproducible run with a shorter horizon
    mine-haulage-simulator 25 4 --horizon-hours 24 --seed 42

    # Generate configuration template
    mine-haulage-simulator --print-config > my-config.json

    # Validate configuration without running
    mine-haulage-simulator --config my-config.json --dry-run

    # Enable verbose logging
    mine-haulage-simulator 10 3 --verbose

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Number of mining trucks
    #[arg(
        value_name = "NUMBER_OF_MINING_TRUCKS",
        help = "Number of mining trucks",
        long_help = "Number of mining trucks in the fleet. Must be greater than 0. Default: 10"
    )]
    pub vehicle_count: Option<usize>,

    /// Number of unloading stations
    #[arg(
        value_name = "NUMBER_OF_UNLOADING_STATIONS",
        help = "Number of unloading stations",
        long_help = "Number of unloading stations shared by the fleet. Must be greater than 0. Default: 3"
    )]
    pub station_count: Option<usize>,

    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Shortest mining cycle in hours
    #[arg(long, help = "Minimum mining cycle duration (hours)")]
    pub min_mining_hours: Option<f64>,

    /// Longest mining cycle in hours
    #[arg(long, help = "Maximum mining cycle duration (hours)")]
    pub max_mining_hours: Option<f64>,

    /// One-way travel time in hours
    #[arg(
        long,
        help = "Travel duration between mine and stations (hours)",
        long_help = "Fixed one-way travel duration between the mine site and the unloading stations, identical for every truck. Default: 0.5"
    )]
    pub travel_hours: Option<f64>,

    /// Unload duration in minutes
    #[arg(long, help = "Unload duration per truck (minutes)")]
    pub unload_minutes: Option<f64>,

    /// Simulated horizon in hours
    #[arg(
        long,
        help = "Total simulated time (hours)",
        long_help = "Length of the simulated run in logical hours. Must be greater than 0. Default: 72"
    )]
    pub horizon_hours: Option<f64>,

    /// Tick length in minutes
    #[arg(
        long,
        help = "Simulation time step (minutes)",
        long_help = "Length of one simulation tick in minutes. Durations that are not a whole number of ticks are allowed; the overshoot carries into the next phase. Default: 5"
    )]
    pub tick_minutes: Option<f64>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Directory receiving the results files
    #[arg(long, help = "Directory for results files (default: results)")]
    pub results_dir: Option<String>,

    /// Output format for results files
    #[arg(
        long,
        help = "Output format (csv or json)",
        long_help = "Output format for the results files. Supported formats: csv, json. Default: csv"
    )]
    pub output_format: Option<String>,

    /// Skip writing results files
    #[arg(long, help = "Print results to the console only, without writing files")]
    pub no_output: bool,

    /// Directory for rolling log files
    #[arg(long, help = "Also write JSON logs to daily rolling files in this directory")]
    pub log_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of mining trucks
    pub vehicle_count: Option<usize>,

    /// Number of unloading stations
    pub station_count: Option<usize>,

    /// Shortest mining cycle in hours
    pub min_mining_hours: Option<f64>,

    /// Longest mining cycle in hours
    pub max_mining_hours: Option<f64>,

    /// One-way travel time in hours
    pub travel_hours: Option<f64>,

    /// Unload duration in minutes
    pub unload_minutes: Option<f64>,

    /// Simulated horizon in hours
    pub horizon_hours: Option<f64>,

    /// Tick length in minutes
    pub tick_minutes: Option<f64>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Directory receiving the results files
    pub results_dir: Option<String>,

    /// Output format for results files
    pub output_format: Option<String>,

    /// Whether results files are written
    pub write_results: Option<bool>,
}

/// Configuration for a haulage simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of mining trucks
    pub vehicle_count: usize,

    /// Number of unloading stations
    pub station_count: usize,

    /// Shortest mining cycle in hours
    pub min_mining_hours: f64,

    /// Longest mining cycle in hours
    pub max_mining_hours: f64,

    /// One-way travel time in hours
    pub travel_hours: f64,

    /// Unload duration in minutes
    pub unload_minutes: f64,

    /// Simulated horizon in hours
    pub horizon_hours: f64,

    /// Tick length in minutes
    pub tick_minutes: f64,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Directory receiving the results files
    pub results_dir: String,

    /// Output format for results files
    pub output_format: String,

    /// Whether results files are written
    pub write_results: bool,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// Vehicle count must be between 1 and [`MAX_VEHICLE_COUNT`]
    #[error("Vehicle count must be between 1 and {}, got {0}", MAX_VEHICLE_COUNT)]
    InvalidVehicleCount(usize),

    /// Station count must be between 1 and [`MAX_STATION_COUNT`]
    #[error("Station count must be between 1 and {}, got {0}", MAX_STATION_COUNT)]
    InvalidStationCount(usize),

    /// Mining range is inverted
    #[error("Invalid mining duration range: min ({0}) must be <= max ({1})")]
    InvalidMiningRange(f64, f64),

    /// A duration is zero, negative, or not finite
    #[error("Invalid duration for {field}: {value} (must be a finite value greater than 0)")]
    NonPositiveDuration {
        /// Name of the offending setting
        field: String,
        /// Value that was rejected
        value: f64,
    },

    /// Output format is not recognized
    #[error("Unknown output format: {0} (supported: csv, json)")]
    InvalidOutputFormat(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            vehicle_count: 10,
            station_count: 3,
            min_mining_hours: 1.0,
            max_mining_hours: 5.0,
            travel_hours: 0.5,
            unload_minutes: 5.0,
            horizon_hours: 72.0,
            tick_minutes: 5.0,
            seed: None,
            results_dir: "results".to_string(),
            output_format: "csv".to_string(),
            write_results: true,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            vehicle_count: config_file.vehicle_count.unwrap_or(defaults.vehicle_count),
            station_count: config_file.station_count.unwrap_or(defaults.station_count),
            min_mining_hours: config_file.min_mining_hours.unwrap_or(defaults.min_mining_hours),
            max_mining_hours: config_file.max_mining_hours.unwrap_or(defaults.max_mining_hours),
            travel_hours: config_file.travel_hours.unwrap_or(defaults.travel_hours),
            unload_minutes: config_file.unload_minutes.unwrap_or(defaults.unload_minutes),
            horizon_hours: config_file.horizon_hours.unwrap_or(defaults.horizon_hours),
            tick_minutes: config_file.tick_minutes.unwrap_or(defaults.tick_minutes),
            seed: config_file.seed.or(defaults.seed),
            results_dir: config_file.results_dir.unwrap_or(defaults.results_dir),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            write_results: config_file.write_results.unwrap_or(defaults.write_results),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.vehicle_count {
            config.vehicle_count = value;
        }
        if let Some(value) = args.station_count {
            config.station_count = value;
        }
        if let Some(value) = args.min_mining_hours {
            config.min_mining_hours = value;
        }
        if let Some(value) = args.max_mining_hours {
            config.max_mining_hours = value;
        }
        if let Some(value) = args.travel_hours {
            config.travel_hours = value;
        }
        if let Some(value) = args.unload_minutes {
            config.unload_minutes = value;
        }
        if let Some(value) = args.horizon_hours {
            config.horizon_hours = value;
        }
        if let Some(value) = args.tick_minutes {
            config.tick_minutes = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.results_dir {
            config.results_dir = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }

        // A flag can only switch file output off
        if args.no_output {
            config.write_results = false;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.vehicle_count == 0 || self.vehicle_count > MAX_VEHICLE_COUNT {
            return Err(ConfigValidationError::InvalidVehicleCount(self.vehicle_count));
        }

        if self.station_count == 0 || self.station_count > MAX_STATION_COUNT {
            return Err(ConfigValidationError::InvalidStationCount(self.station_count));
        }

        self.validate_duration("min_mining_hours", self.min_mining_hours)?;
        self.validate_duration("max_mining_hours", self.max_mining_hours)?;
        self.validate_duration("travel_hours", self.travel_hours)?;
        self.validate_duration("unload_minutes", self.unload_minutes)?;
        self.validate_duration("horizon_hours", self.horizon_hours)?;
        self.validate_duration("tick_minutes", self.tick_minutes)?;

        if self.min_mining_hours > self.max_mining_hours {
            return Err(ConfigValidationError::InvalidMiningRange(
                self.min_mining_hours,
                self.max_mining_hours,
            ));
        }

        self.get_output_format().map_err(|_| {
            ConfigValidationError::InvalidOutputFormat(self.output_format.clone())
        })?;

        Ok(())
    }

    /// Validate that a duration is finite and positive
    fn validate_duration(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigValidationError::NonPositiveDuration {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Durations that are not a whole number of ticks
    ///
    /// Such configurations are accepted; the timer overshoot carries into the
    /// next phase, so the caller may want to surface these as warnings.
    pub fn divisibility_warnings(&self) -> Vec<String> {
        let (min_mining, max_mining) = self.mining_range_minutes();
        let durations = [
            ("min_mining_hours", min_mining),
            ("max_mining_hours", max_mining),
            ("travel_hours", self.travel_minutes()),
            ("unload_minutes", self.unload_minutes),
            ("horizon_hours", self.horizon_minutes()),
        ];

        durations
            .iter()
            .filter(|(_, minutes)| !is_whole_ticks(*minutes, self.tick_minutes))
            .map(|(field, minutes)| {
                format!(
                    "{} ({} minutes) is not a multiple of the {} minute tick",
                    field, minutes, self.tick_minutes
                )
            })
            .collect()
    }

    /// Mining cycle range converted to minutes
    pub fn mining_range_minutes(&self) -> (f64, f64) {
        (self.min_mining_hours * MINUTES_PER_HOUR, self.max_mining_hours * MINUTES_PER_HOUR)
    }

    /// Travel duration converted to minutes
    pub fn travel_minutes(&self) -> f64 {
        self.travel_hours * MINUTES_PER_HOUR
    }

    /// Run horizon converted to minutes
    pub fn horizon_minutes(&self) -> f64 {
        self.horizon_hours * MINUTES_PER_HOUR
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }
}

fn is_whole_ticks(minutes: f64, tick: f64) -> bool {
    if tick <= 0.0 {
        return false;
    }
    let ticks = minutes / tick;
    (ticks - ticks.round()).abs() < TICK_ALIGNMENT_EPSILON
}
