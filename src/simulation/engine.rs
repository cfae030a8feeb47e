//! Haulage simulation engine
//!
//! This module contains the [`Simulation`], which owns the fleet, the
//! stations and the clock for the duration of a run and sequences every tick:
//! stations first, then vehicles, then assignment of the vehicles that
//! arrived loaded during the tick.

use crate::fleet::{MiningDurationSource, TickReport, UniformMiningDurations, VehicleRegistry};
use crate::simulation::{
    DispatchError, ErrorHandler, PerformanceReport, RecoveryContext, RecoveryStrategy,
    RunParameters, RunSummary, SimulationClock, SimulationError, SimulationResult,
};
use crate::stations::StationRegistry;
use crate::types::SimulationConfig;
use crate::{perf_span, sim_event};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// A recoverable dispatch failure recorded during a run
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Tick during which the failure happened, counted from zero
    pub tick: u64,
    /// Logical minutes elapsed at the start of that tick
    pub elapsed_minutes: f64,
    /// What went wrong
    pub error: DispatchError,
}

/// Fixed-timestep haulage simulation
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    parameters: RunParameters,
    vehicles: VehicleRegistry,
    stations: StationRegistry,
    clock: SimulationClock,
    error_handler: ErrorHandler,
    diagnostics: Vec<Diagnostic>,
}

impl Simulation {
    /// Create a simulation, drawing mining cycles from the configured seed
    ///
    /// Without a seed the draws come from operating system entropy.
    #[instrument(skip(config), fields(vehicle_count = config.vehicle_count, station_count = config.station_count))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        if let Some(seed) = config.seed {
            info!("Using deterministic seed: {}", seed);
            let mut source = UniformMiningDurations::with_seed(seed);
            Self::with_duration_source(config, &mut source)
        } else {
            debug!("Using entropy-based random seed");
            let mut source = UniformMiningDurations::from_entropy();
            Self::with_duration_source(config, &mut source)
        }
    }

    /// Create a simulation with mining cycles drawn from `source`
    pub fn with_duration_source(
        config: SimulationConfig,
        source: &mut dyn MiningDurationSource,
    ) -> SimulationResult<Self> {
        config.validate()?;

        for warning in config.divisibility_warnings() {
            warn!("{}", warning);
        }

        let vehicles = VehicleRegistry::new(
            config.vehicle_count,
            config.mining_range_minutes(),
            config.travel_minutes(),
            config.unload_minutes,
            source,
        )?;
        let stations = StationRegistry::new(config.station_count, config.unload_minutes);
        let clock = SimulationClock::new(config.horizon_minutes(), config.tick_minutes);
        let parameters = RunParameters::from_config(&config);

        info!(
            "Simulation initialized with {} trucks, {} unloading stations, {} ticks planned",
            vehicles.len(),
            stations.len(),
            clock.expected_ticks()
        );

        Ok(Self {
            config,
            parameters,
            vehicles,
            stations,
            clock,
            error_handler: ErrorHandler::new(),
            diagnostics: Vec::new(),
        })
    }

    /// Replace the error handler
    pub fn with_error_handler(mut self, error_handler: ErrorHandler) -> Self {
        self.error_handler = error_handler;
        self
    }

    /// Perform one tick and advance the clock
    ///
    /// Returns the vehicles that changed phase during the tick. Recoverable
    /// dispatch failures are recorded in [`Simulation::diagnostics`]; an
    /// unrecoverable one is returned after the clock has advanced.
    pub fn step(&mut self) -> SimulationResult<TickReport> {
        let tick = self.clock.ticks();
        let elapsed = self.clock.elapsed();

        let unload_failures = self.stations.update(&mut self.vehicles);
        let report = self.vehicles.update(self.clock.tick_length());
        let assignment = self.stations.assign_vehicles(&mut self.vehicles, &report.arrived_loaded);

        self.clock.advance();

        self.record(tick, elapsed, unload_failures)?;
        match assignment {
            Ok(outcome) => self.record(tick, elapsed, outcome.skipped)?,
            Err(error) => {
                let error = SimulationError::from(error);
                let context = RecoveryContext::abort().with_context(format!("tick {}", tick));
                self.error_handler.handle_error(&error, &context);
                return Err(error);
            }
        }

        Ok(report)
    }

    fn record(&mut self, tick: u64, elapsed: f64, failures: Vec<DispatchError>) -> SimulationResult<()> {
        for failure in failures {
            let error = SimulationError::from(failure.clone());
            let context = RecoveryContext::skip()
                .with_context(format!("tick {} at {} minutes", tick, elapsed));

            match self.error_handler.handle_error(&error, &context) {
                RecoveryStrategy::Skip => {
                    sim_event!(
                        debug,
                        "Dispatch diagnostic recorded",
                        tick = tick,
                        elapsed_minutes = elapsed,
                        recorded = self.diagnostics.len() + 1,
                    );
                    self.diagnostics.push(Diagnostic { tick, elapsed_minutes: elapsed, error: failure })
                }
                RecoveryStrategy::Abort => return Err(error),
            }
        }
        Ok(())
    }

    /// Run ticks until the horizon is passed
    #[instrument(skip(self), fields(vehicles = self.vehicles.len(), stations = self.stations.len()))]
    pub fn run(&mut self) -> SimulationResult<RunSummary> {
        let span = perf_span!(
            "tick_loop",
            horizon = self.clock.horizon(),
            tick_length = self.clock.tick_length(),
        );
        let _entered = span.enter();
        let started = Instant::now();

        while self.clock.is_running() {
            self.step()?;
        }

        let summary = RunSummary {
            ticks_executed: self.clock.ticks(),
            elapsed_minutes: self.clock.elapsed(),
            diagnostics: self.diagnostics.len(),
            wall_clock: started.elapsed(),
        };

        sim_event!(
            info,
            "Simulation run complete",
            ticks = summary.ticks_executed,
            diagnostics = summary.diagnostics,
            wall_clock_ms = summary.wall_clock.as_millis() as u64,
        );

        Ok(summary)
    }

    /// Compute utilization statistics from the current counters
    pub fn performance_report(&self) -> PerformanceReport {
        PerformanceReport::compute(self.vehicles.vehicles(), self.stations.stations(), &self.parameters)
    }

    /// Whether the clock has passed the horizon
    pub fn is_finished(&self) -> bool {
        !self.clock.is_running()
    }

    /// Configuration the simulation was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Settings the statistics are computed with
    pub fn parameters(&self) -> &RunParameters {
        &self.parameters
    }

    /// The fleet
    pub fn vehicles(&self) -> &VehicleRegistry {
        &self.vehicles
    }

    /// Mutable access to the fleet, for setting up scenarios between ticks
    pub fn vehicles_mut(&mut self) -> &mut VehicleRegistry {
        &mut self.vehicles
    }

    /// The stations
    pub fn stations(&self) -> &StationRegistry {
        &self.stations
    }

    /// Mutable access to the stations, for setting up scenarios between ticks
    pub fn stations_mut(&mut self) -> &mut StationRegistry {
        &mut self.stations
    }

    /// The clock
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Recoverable dispatch failures recorded so far
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
