//! Error types and handling
//!
//! This module contains error types and error handling for the simulation,
//! including the recoverable dispatch diagnostics raised while assigning
//! vehicles to stations and servicing station queues.

use crate::types::{ConfigValidationError, DispatchOperation, StationId, VehicleId};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Invariant violations detected while moving vehicles through stations
///
/// Every variant carries the offending ids and the operation so the failing
/// case can be reproduced. All variants except [`DispatchError::NoStations`]
/// are recoverable: the single operation is skipped and the run continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    /// The vehicle is not carrying material
    #[error("Vehicle {vehicle} is not loaded ({operation})")]
    VehicleNotLoaded {
        /// Offending vehicle
        vehicle: VehicleId,
        /// Operation that was attempted
        operation: DispatchOperation,
    },

    /// The vehicle already sits in a station queue
    #[error("Vehicle {vehicle} is already assigned to a station ({operation})")]
    VehicleAlreadyAssigned {
        /// Offending vehicle
        vehicle: VehicleId,
        /// Operation that was attempted
        operation: DispatchOperation,
    },

    /// The vehicle is loaded but still hauling toward the stations
    #[error("Vehicle {vehicle} has not arrived at the unloading area ({operation})")]
    VehicleNotArrived {
        /// Offending vehicle
        vehicle: VehicleId,
        /// Operation that was attempted
        operation: DispatchOperation,
    },

    /// The configured unload duration is negative
    #[error("Invalid unload duration {minutes} at station {station} ({operation})")]
    InvalidUnloadDuration {
        /// Station performing the operation
        station: StationId,
        /// Rejected duration in minutes
        minutes: f64,
        /// Operation that was attempted
        operation: DispatchOperation,
    },

    /// A queue references a vehicle the registry does not own
    #[error("Unknown vehicle {vehicle} ({operation})")]
    UnknownVehicle {
        /// Missing vehicle id
        vehicle: VehicleId,
        /// Operation that was attempted
        operation: DispatchOperation,
    },

    /// A station id does not exist in the registry
    #[error("Unknown station {0}")]
    UnknownStation(StationId),

    /// No station exists to compare wait times against
    #[error("No unloading station exists to receive vehicles")]
    NoStations,
}

impl DispatchError {
    /// Check if the run may continue after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DispatchError::NoStations)
    }

    /// Vehicle involved in the failure, if any
    pub fn vehicle(&self) -> Option<VehicleId> {
        match self {
            DispatchError::VehicleNotLoaded { vehicle, .. }
            | DispatchError::VehicleAlreadyAssigned { vehicle, .. }
            | DispatchError::VehicleNotArrived { vehicle, .. }
            | DispatchError::UnknownVehicle { vehicle, .. } => Some(*vehicle),
            _ => None,
        }
    }

    /// Operation during which the failure happened, if recorded
    pub fn operation(&self) -> Option<DispatchOperation> {
        match self {
            DispatchError::VehicleNotLoaded { operation, .. }
            | DispatchError::VehicleAlreadyAssigned { operation, .. }
            | DispatchError::VehicleNotArrived { operation, .. }
            | DispatchError::InvalidUnloadDuration { operation, .. }
            | DispatchError::UnknownVehicle { operation, .. } => Some(*operation),
            DispatchError::UnknownStation(_) | DispatchError::NoStations => None,
        }
    }
}

/// Errors that can occur during simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ConfigurationError(String),

    /// Fleet construction failed
    #[error("Fleet setup failed: {0}")]
    FleetSetupError(String),

    /// Dispatch between vehicles and stations failed
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl From<ConfigValidationError> for SimulationError {
    fn from(error: ConfigValidationError) -> Self {
        SimulationError::ConfigurationError(error.to_string())
    }
}

impl SimulationError {
    /// Create a configuration error
    pub fn configuration_error(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a fleet setup error
    pub fn fleet_setup_error(msg: impl Into<String>) -> Self {
        Self::FleetSetupError(msg.into())
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimulationError::ConfigurationError(_) => false,
            SimulationError::FleetSetupError(_) => false,
            SimulationError::Dispatch(dispatch) => dispatch.is_recoverable(),
            SimulationError::IoError(_) => true,
            SimulationError::SerializationError(_) => true,
            SimulationError::CsvError(_) => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::ConfigurationError(_) => "Configuration",
            SimulationError::FleetSetupError(_) => "Fleet Setup",
            SimulationError::Dispatch(_) => "Dispatch",
            SimulationError::IoError(_) => "IO",
            SimulationError::SerializationError(_) => "Serialization",
            SimulationError::CsvError(_) => "CSV",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

/// Error recovery strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// Skip the current operation and continue
    Skip,
    /// Abort the current tick and surface the error to the caller
    Abort,
}

/// Error recovery context
#[derive(Debug, Clone)]
pub struct RecoveryContext {
    /// The recovery strategy to use for recoverable errors
    pub strategy: RecoveryStrategy,
    /// Whether to log the error
    pub log_error: bool,
    /// Additional context information
    pub context: String,
}

impl Default for RecoveryContext {
    fn default() -> Self {
        Self { strategy: RecoveryStrategy::Skip, log_error: true, context: String::new() }
    }
}

impl RecoveryContext {
    /// Create a new recovery context with skip strategy
    pub fn skip() -> Self {
        Self { strategy: RecoveryStrategy::Skip, ..Default::default() }
    }

    /// Create a new recovery context with abort strategy
    pub fn abort() -> Self {
        Self { strategy: RecoveryStrategy::Abort, ..Default::default() }
    }

    /// Add context information
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Suppress logging for this context
    pub fn silent(mut self) -> Self {
        self.log_error = false;
        self
    }
}

/// Error handler for graceful error recovery
#[derive(Debug)]
pub struct ErrorHandler {
    /// Whether to continue on recoverable errors
    pub continue_on_recoverable: bool,
    /// Default recovery context
    pub default_recovery: RecoveryContext,
}

impl Default for ErrorHandler {
    fn default() -> Self {
        Self { continue_on_recoverable: true, default_recovery: RecoveryContext::default() }
    }
}

impl ErrorHandler {
    /// Create a new error handler
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler that aborts on every error
    pub fn strict() -> Self {
        Self { continue_on_recoverable: false, default_recovery: RecoveryContext::abort() }
    }

    /// Handle an error with the given recovery context
    pub fn handle_error(
        &self,
        error: &SimulationError,
        context: &RecoveryContext,
    ) -> RecoveryStrategy {
        if context.log_error {
            match error.category() {
                "Configuration" | "Fleet Setup" => {
                    error!("Critical error in {}: {}", error.category(), error);
                }
                "Dispatch" => {
                    warn!("Recoverable error in {}: {}", error.category(), error);
                }
                _ => {
                    info!("Error in {}: {}", error.category(), error);
                }
            }

            if !context.context.is_empty() {
                debug!("Error context: {}", context.context);
            }
        }

        if !error.is_recoverable() {
            warn!("Non-recoverable error encountered, aborting operation");
            return RecoveryStrategy::Abort;
        }

        if !self.continue_on_recoverable {
            return RecoveryStrategy::Abort;
        }

        context.strategy
    }

    /// Handle an error with default recovery context
    pub fn handle_error_default(&self, error: &SimulationError) -> RecoveryStrategy {
        self.handle_error(error, &self.default_recovery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_creation() {
        let config_error = SimulationError::configuration_error("Invalid config");
        assert!(matches!(config_error, SimulationError::ConfigurationError(_)));
        assert_eq!(config_error.to_string(), "Configuration validation failed: Invalid config");

        let fleet_error = SimulationError::fleet_setup_error("bad draw");
        assert_eq!(fleet_error.to_string(), "Fleet setup failed: bad draw");
    }

    #[test]
    fn test_dispatch_error_messages_carry_context() {
        let error = DispatchError::VehicleNotLoaded {
            vehicle: VehicleId(5),
            operation: DispatchOperation::Assign,
        };
        assert_eq!(error.to_string(), "Vehicle 5 is not loaded (assign)");
        assert_eq!(error.vehicle(), Some(VehicleId(5)));
        assert_eq!(error.operation(), Some(DispatchOperation::Assign));

        let error = DispatchError::InvalidUnloadDuration {
            station: StationId(2),
            minutes: -5.0,
            operation: DispatchOperation::Unload,
        };
        assert_eq!(error.to_string(), "Invalid unload duration -5 at station 2 (unload)");
        assert_eq!(error.vehicle(), None);
    }

    #[test]
    fn test_dispatch_error_recoverability() {
        assert!(!DispatchError::NoStations.is_recoverable());
        assert!(DispatchError::VehicleAlreadyAssigned {
            vehicle: VehicleId(0),
            operation: DispatchOperation::Assign
        }
        .is_recoverable());

        let wrapped: SimulationError = DispatchError::NoStations.into();
        assert!(!wrapped.is_recoverable());
        assert_eq!(wrapped.category(), "Dispatch");
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sim_error: SimulationError = io_error.into();
        assert!(matches!(sim_error, SimulationError::IoError(_)));
        assert!(sim_error.is_recoverable());
        assert_eq!(sim_error.category(), "IO");
    }

    #[test]
    fn test_error_from_validation_error() {
        let sim_error: SimulationError = ConfigValidationError::InvalidStationCount(0).into();
        assert!(matches!(sim_error, SimulationError::ConfigurationError(_)));
        assert!(!sim_error.is_recoverable());
    }

    #[test]
    fn test_recovery_context_builders() {
        let context = RecoveryContext::skip().with_context("tick 4");
        assert_eq!(context.strategy, RecoveryStrategy::Skip);
        assert_eq!(context.context, "tick 4");
        assert!(context.log_error);

        let context = RecoveryContext::abort().silent();
        assert_eq!(context.strategy, RecoveryStrategy::Abort);
        assert!(!context.log_error);
    }

    #[test]
    fn test_error_handler_strategies() {
        let handler = ErrorHandler::new();
        let recoverable: SimulationError = DispatchError::VehicleNotLoaded {
            vehicle: VehicleId(1),
            operation: DispatchOperation::Unload,
        }
        .into();
        let fatal: SimulationError = DispatchError::NoStations.into();

        assert_eq!(handler.handle_error_default(&recoverable), RecoveryStrategy::Skip);
        assert_eq!(handler.handle_error_default(&fatal), RecoveryStrategy::Abort);

        let strict = ErrorHandler::strict();
        assert_eq!(strict.handle_error_default(&recoverable), RecoveryStrategy::Abort);
    }
}
