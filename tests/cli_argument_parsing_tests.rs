//! Tests for CLI argument parsing functionality
//!
//! These tests verify that command line arguments are properly parsed and
//! merged with configuration files and defaults, CLI taking precedence.

use clap::Parser;
use mine_haulage_simulator::types::config::{CliArgs, ConfigError, ConfigValidationError, SimulationConfig};
use std::fs;

/// Test parsing of the positional fleet and station counts
#[test]
fn test_positional_counts() {
    let cli_args = CliArgs::try_parse_from(["test", "25", "4"]).unwrap();
    assert_eq!(cli_args.vehicle_count, Some(25));
    assert_eq!(cli_args.station_count, Some(4));

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.vehicle_count, 25);
    assert_eq!(config.station_count, 4);

    // Both counts are optional
    let cli_args = CliArgs::try_parse_from(["test"]).unwrap();
    assert_eq!(cli_args.vehicle_count, None);
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config, SimulationConfig::default());
}

/// Test parsing of the duration options
#[test]
fn test_duration_options() {
    let cli_args = CliArgs::try_parse_from([
        "test",
        "--min-mining-hours",
        "2",
        "--max-mining-hours",
        "3.5",
        "--travel-hours",
        "0.25",
        "--unload-minutes",
        "10",
        "--horizon-hours",
        "24",
        "--tick-minutes",
        "2.5",
        "--seed",
        "42",
    ])
    .unwrap();

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.min_mining_hours, 2.0);
    assert_eq!(config.max_mining_hours, 3.5);
    assert_eq!(config.travel_hours, 0.25);
    assert_eq!(config.unload_minutes, 10.0);
    assert_eq!(config.horizon_hours, 24.0);
    assert_eq!(config.tick_minutes, 2.5);
    assert_eq!(config.seed, Some(42));
    assert!(config.validate().is_ok());
}

/// Test output and control flags
#[test]
fn test_output_and_control_flags() {
    let cli_args = CliArgs::try_parse_from([
        "test",
        "--results-dir",
        "out",
        "--output-format",
        "json",
        "--no-output",
        "--verbose",
        "--dry-run",
    ])
    .unwrap();

    assert!(cli_args.verbose);
    assert!(cli_args.dry_run);
    assert!(!cli_args.debug);
    assert!(!cli_args.print_config);

    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.results_dir, "out");
    assert_eq!(config.output_format, "json");
    assert!(!config.write_results);
}

/// Test that non-numeric counts are rejected by the parser
#[test]
fn test_invalid_arguments_rejected() {
    assert!(CliArgs::try_parse_from(["test", "many"]).is_err());
    assert!(CliArgs::try_parse_from(["test", "--horizon-hours", "long"]).is_err());
}

/// Test that CLI arguments override the configuration file
#[test]
fn test_config_file_precedence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("haulage.json");
    fs::write(
        &path,
        r#"{ "vehicle_count": 40, "station_count": 6, "horizon_hours": 12.0, "write_results": false }"#,
    )
    .unwrap();
    let path = path.to_string_lossy().to_string();

    // File values over defaults
    let cli_args = CliArgs::try_parse_from(["test", "--config", path.as_str()]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.vehicle_count, 40);
    assert_eq!(config.station_count, 6);
    assert_eq!(config.horizon_hours, 12.0);
    assert!(!config.write_results);
    assert_eq!(config.tick_minutes, 5.0);

    // CLI values over file values
    let cli_args =
        CliArgs::try_parse_from(["test", "8", "2", "--config", path.as_str(), "--horizon-hours", "48"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.vehicle_count, 8);
    assert_eq!(config.station_count, 2);
    assert_eq!(config.horizon_hours, 48.0);
}

/// Test configuration file errors
#[test]
fn test_config_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(SimulationConfig::from_file(&missing), Err(ConfigError::FileNotFound(_))));

    let yaml = dir.path().join("haulage.yaml");
    fs::write(&yaml, "vehicle_count: 3").unwrap();
    assert!(matches!(SimulationConfig::from_file(&yaml), Err(ConfigError::UnsupportedFormat(_))));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(SimulationConfig::from_file(&broken), Err(ConfigError::JsonError(_))));
}

/// Test that a saved configuration loads back unchanged
#[test]
fn test_save_and_load_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.json");
    let config = SimulationConfig { vehicle_count: 17, seed: Some(5), ..Default::default() };

    config.save_to_file(&path).unwrap();
    assert_eq!(SimulationConfig::from_file(&path).unwrap(), config);
}

/// Test validation of merged configurations
#[test]
fn test_configuration_validation() {
    let cli_args = CliArgs::try_parse_from(["test", "0", "3"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.validate(), Err(ConfigValidationError::InvalidVehicleCount(0)));

    let cli_args = CliArgs::try_parse_from(["test", "--min-mining-hours", "6"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert_eq!(config.validate(), Err(ConfigValidationError::InvalidMiningRange(6.0, 5.0)));

    let cli_args = CliArgs::try_parse_from(["test", "--output-format", "xml"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();
    assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidOutputFormat(_))));
}

/// Test warnings for durations that are not whole ticks
#[test]
fn test_divisibility_warnings() {
    let cli_args = CliArgs::try_parse_from(["test", "--tick-minutes", "7"]).unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();

    let warnings = config.divisibility_warnings();
    assert!(config.validate().is_ok());
    assert!(warnings.iter().any(|warning| warning.starts_with("travel_hours")));
    assert!(warnings.iter().any(|warning| warning.starts_with("unload_minutes")));
}

/// Test that the printed default configuration is valid JSON
#[test]
fn test_print_config_output() {
    let json = SimulationConfig::default().print_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed["vehicle_count"], 10);
    assert_eq!(parsed["station_count"], 3);
    assert_eq!(parsed["output_format"], "csv");
}
