//! Results output
//!
//! This module writes the per-truck and per-station performance records to
//! timestamped CSV or JSON files in the results directory.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use mine_haulage_simulator::report::ReportWriter;
//! use mine_haulage_simulator::simulation::Simulation;
//! use mine_haulage_simulator::types::{OutputFormat, SimulationConfig};
//!
//! let mut simulation = Simulation::new(SimulationConfig::default()).unwrap();
//! simulation.run().unwrap();
//!
//! let writer = ReportWriter::new("results", OutputFormat::Csv);
//! let paths = writer.write(&simulation.performance_report()).unwrap();
//! println!("Trucks: {}", paths.vehicles.display());
//! ```

pub mod writer;

// Re-export all public types for convenience
pub use writer::*;
