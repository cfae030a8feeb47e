// Mine Haulage Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/mine-haulage-simulator 10 3
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/mine-haulage-simulator 25 4 --horizon-hours 24 --seed 42 --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use mine_haulage_simulator::report::{ReportPaths, ReportWriter};
use mine_haulage_simulator::simulation::{
    LoggingConfig, PerformanceReport, RunSummary, Simulation, SimulationClock,
};
use mine_haulage_simulator::types::config::CliArgs;
use mine_haulage_simulator::types::SimulationConfig;
use std::process;
use tracing::{error, info, Level};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let default_config = SimulationConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if let Some(log_dir) = &args.log_dir {
        let level = if args.debug {
            Level::DEBUG
        } else if args.verbose {
            Level::INFO
        } else {
            Level::WARN
        };
        LoggingConfig::new().with_level(level).with_file_logging(log_dir.clone()).init()
    } else if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Mine Haulage Simulator");

    // Load configuration from CLI arguments and optional config file
    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    info!("Starting simulation");
    if let Err(e) = run_simulation(config) {
        error!("Simulation failed: {:#}", e);
        process::exit(1);
    }

    info!("Mine Haulage Simulator completed successfully");
}

/// Run the simulation to the horizon and report the results
fn run_simulation(config: SimulationConfig) -> Result<()> {
    let write_results = config.write_results;
    let writer = if write_results {
        Some(ReportWriter::from_config(&config).context("Invalid results output settings")?)
    } else {
        None
    };

    let mut simulation =
        Simulation::new(config).context("Failed to initialize the simulation")?;

    eprintln!("Running simulation...");
    let summary = simulation.run().context("Simulation run aborted")?;

    let report = simulation.performance_report();
    print_results(&report, &summary);

    if let Some(writer) = writer {
        let paths = write_report(&writer, &report)?;
        eprintln!("Truck results written to: {}", paths.vehicles.display());
        eprintln!("Station results written to: {}", paths.stations.display());
    }

    Ok(())
}

/// Write the results files
fn write_report(writer: &ReportWriter, report: &PerformanceReport) -> Result<ReportPaths> {
    writer
        .write(report)
        .with_context(|| format!("Failed to write results to {}", writer.directory().display()))
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SimulationConfig) {
    eprintln!("Mine Haulage Simulator");
    eprintln!("======================");
    eprintln!("Fleet utilization for mining trucks and unloading stations");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!("  Mining Trucks: {}", config.vehicle_count);
    eprintln!("  Unloading Stations: {}", config.station_count);
    eprintln!(
        "  Mining Cycle: {} - {} hours",
        config.min_mining_hours, config.max_mining_hours
    );
    eprintln!("  Travel Time: {} hours", config.travel_hours);
    eprintln!("  Unload Time: {} minutes", config.unload_minutes);
    eprintln!("  Horizon: {} hours", config.horizon_hours);
    eprintln!("  Tick Length: {} minutes", config.tick_minutes);
    if config.write_results {
        eprintln!("  Results: {} ({})", config.results_dir, config.output_format);
    } else {
        eprintln!("  Results: console only");
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }

    let ticks = SimulationClock::new(config.horizon_minutes(), config.tick_minutes).expected_ticks();
    eprintln!("\nEstimated Scale:");
    eprintln!("  Ticks: {}", ticks);
    eprintln!("  Truck Updates: ~{}", ticks.saturating_mul(config.vehicle_count as u64));
    eprintln!();
}

/// Print per-entity performance and the run summary
fn print_results(report: &PerformanceReport, summary: &RunSummary) {
    print!("{}", report.render());
    println!();
    println!("{}", report.fleet_summary());
    eprintln!();
    eprintln!("{}", summary);
}
