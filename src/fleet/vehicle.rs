//! Mining vehicle state machine
//!
//! A vehicle cycles through mining, hauling a load to the unloading area,
//! waiting in a station queue, being unloaded, and returning empty. The
//! phase and the loaded/assigned facts are one tagged state, so a vehicle
//! can never be assigned without carrying a load.

use crate::simulation::DispatchError;
use crate::types::{Activity, DispatchOperation, VehicleId};
use serde::{Deserialize, Serialize};

/// Phase of a vehicle inside the haulage cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleState {
    /// Extracting material; the timer counts down the mining cycle
    Mining,
    /// Traveling loaded toward the unloading stations
    Hauling,
    /// Arrived loaded and blocked until a station releases it
    ///
    /// The timer does not advance in this state.
    AwaitingUnload {
        /// Whether a station has accepted the vehicle into its queue
        assigned: bool,
    },
    /// Released by a station; the timer counts down the unload
    Unloading,
    /// Traveling empty back to the mine site
    Returning,
}

impl VehicleState {
    /// Three-way activity view used by reports
    pub fn activity(&self) -> Activity {
        match self {
            VehicleState::Mining => Activity::Mining,
            VehicleState::Hauling | VehicleState::Returning => Activity::Traveling,
            VehicleState::AwaitingUnload { .. } | VehicleState::Unloading => Activity::Unloading,
        }
    }

    /// Whether the vehicle carries material
    pub fn is_loaded(&self) -> bool {
        matches!(self, VehicleState::Hauling | VehicleState::AwaitingUnload { .. })
    }

    /// Whether a station has accepted the vehicle
    pub fn is_assigned_station(&self) -> bool {
        matches!(self, VehicleState::AwaitingUnload { assigned: true })
    }
}

/// Transition fired by a timer reaching zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleTransition {
    /// Mining finished; the vehicle starts hauling its load
    FinishedMining,
    /// The loaded vehicle reached the unloading area
    ArrivedLoaded,
    /// Unloading finished; the vehicle heads back empty
    FinishedUnloading,
    /// The empty vehicle reached the mine site and starts a new cycle
    ArrivedAtMine,
}

/// A mining vehicle (haul truck)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    mining_cycle_duration: f64,
    state: VehicleState,
    time_remaining: f64,
    mining_ticks: u64,
    travel_ticks: u64,
    unloads: u64,
}

impl Vehicle {
    /// Create a vehicle at the start of its first mining cycle
    pub fn new(id: VehicleId, mining_cycle_duration: f64) -> Self {
        Self {
            id,
            mining_cycle_duration,
            state: VehicleState::Mining,
            time_remaining: mining_cycle_duration,
            mining_ticks: 0,
            travel_ticks: 0,
            unloads: 0,
        }
    }

    /// Create a vehicle placed directly in an arbitrary state (for fixtures)
    pub fn new_for_testing(
        id: VehicleId,
        mining_cycle_duration: f64,
        state: VehicleState,
        time_remaining: f64,
    ) -> Self {
        Self { state, time_remaining, ..Self::new(id, mining_cycle_duration) }
    }

    /// Vehicle identifier
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Length of this vehicle's mining cycle in minutes
    pub fn mining_cycle_duration(&self) -> f64 {
        self.mining_cycle_duration
    }

    /// Current state
    pub fn state(&self) -> VehicleState {
        self.state
    }

    /// Minutes until the next timer transition; may be slightly negative
    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    /// Ticks spent mining
    pub fn mining_ticks(&self) -> u64 {
        self.mining_ticks
    }

    /// Ticks spent traveling, loaded or empty
    pub fn travel_ticks(&self) -> u64 {
        self.travel_ticks
    }

    /// Ticks of unloading service received
    pub fn unloads(&self) -> u64 {
        self.unloads
    }

    /// Three-way activity view used by reports
    pub fn activity(&self) -> Activity {
        self.state.activity()
    }

    /// Whether the vehicle carries material
    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    /// Whether a station has accepted the vehicle
    pub fn is_assigned_station(&self) -> bool {
        self.state.is_assigned_station()
    }

    /// Advance the vehicle by one tick
    ///
    /// A vehicle awaiting unload is left untouched. Otherwise the timer is
    /// decremented and the counter of the current activity incremented, also
    /// on the tick a transition fires. When the timer reaches zero the next
    /// phase's duration is added to it, so any overshoot carries over.
    pub fn advance(
        &mut self,
        tick_length: f64,
        travel_duration: f64,
        unload_duration: f64,
    ) -> Option<VehicleTransition> {
        if let VehicleState::AwaitingUnload { .. } = self.state {
            return None;
        }

        self.time_remaining -= tick_length;

        match self.state {
            VehicleState::Mining => self.mining_ticks += 1,
            VehicleState::Hauling | VehicleState::Returning => self.travel_ticks += 1,
            VehicleState::Unloading => self.unloads += 1,
            VehicleState::AwaitingUnload { .. } => {}
        }

        if self.time_remaining > 0.0 {
            return None;
        }

        let (next, added, transition) = match self.state {
            VehicleState::Mining => {
                (VehicleState::Hauling, travel_duration, VehicleTransition::FinishedMining)
            }
            VehicleState::Hauling => (
                VehicleState::AwaitingUnload { assigned: false },
                unload_duration,
                VehicleTransition::ArrivedLoaded,
            ),
            VehicleState::Unloading => {
                (VehicleState::Returning, travel_duration, VehicleTransition::FinishedUnloading)
            }
            VehicleState::Returning => (
                VehicleState::Mining,
                self.mining_cycle_duration,
                VehicleTransition::ArrivedAtMine,
            ),
            VehicleState::AwaitingUnload { .. } => return None,
        };

        self.state = next;
        self.time_remaining += added;
        Some(transition)
    }

    /// Check that a station may accept this vehicle, without changing it
    pub fn check_assignable(&self) -> Result<(), DispatchError> {
        let operation = DispatchOperation::Assign;
        match self.state {
            VehicleState::AwaitingUnload { assigned: false } => Ok(()),
            VehicleState::AwaitingUnload { assigned: true } => {
                Err(DispatchError::VehicleAlreadyAssigned { vehicle: self.id, operation })
            }
            VehicleState::Hauling => {
                Err(DispatchError::VehicleNotArrived { vehicle: self.id, operation })
            }
            _ => Err(DispatchError::VehicleNotLoaded { vehicle: self.id, operation }),
        }
    }

    /// Mark the vehicle as accepted into a station queue
    pub fn assign_station(&mut self) -> Result<(), DispatchError> {
        self.check_assignable()?;
        self.state = VehicleState::AwaitingUnload { assigned: true };
        Ok(())
    }

    /// Check that a station may service this vehicle, without changing it
    pub fn check_releasable(&self) -> Result<(), DispatchError> {
        let operation = DispatchOperation::Unload;
        match self.state {
            VehicleState::AwaitingUnload { .. } => Ok(()),
            VehicleState::Hauling => {
                Err(DispatchError::VehicleNotArrived { vehicle: self.id, operation })
            }
            _ => Err(DispatchError::VehicleNotLoaded { vehicle: self.id, operation }),
        }
    }

    /// Hand the vehicle its unloading service
    ///
    /// Clears the loaded and assigned facts; the vehicle's own timer then
    /// finishes the unload on its next advance.
    pub fn release(&mut self) -> Result<(), DispatchError> {
        self.check_releasable()?;
        self.state = VehicleState::Unloading;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f64 = 5.0;
    const TRAVEL: f64 = 30.0;
    const UNLOAD: f64 = 5.0;

    #[test]
    fn test_new_vehicle_starts_mining() {
        let vehicle = Vehicle::new(VehicleId(3), 120.0);

        assert_eq!(vehicle.id(), VehicleId(3));
        assert_eq!(vehicle.state(), VehicleState::Mining);
        assert_eq!(vehicle.activity(), Activity::Mining);
        assert_eq!(vehicle.time_remaining(), 120.0);
        assert!(!vehicle.is_loaded());
        assert!(!vehicle.is_assigned_station());
        assert_eq!(vehicle.mining_ticks(), 0);
        assert_eq!(vehicle.travel_ticks(), 0);
        assert_eq!(vehicle.unloads(), 0);
    }

    #[test]
    fn test_state_views() {
        assert_eq!(VehicleState::Hauling.activity(), Activity::Traveling);
        assert_eq!(VehicleState::Returning.activity(), Activity::Traveling);
        assert_eq!(VehicleState::Unloading.activity(), Activity::Unloading);

        assert!(VehicleState::Hauling.is_loaded());
        assert!(VehicleState::AwaitingUnload { assigned: false }.is_loaded());
        assert!(!VehicleState::Unloading.is_loaded());
        assert!(!VehicleState::Returning.is_loaded());

        assert!(VehicleState::AwaitingUnload { assigned: true }.is_assigned_station());
        assert!(!VehicleState::Hauling.is_assigned_station());
    }

    #[test]
    fn test_mining_transition_fires_on_last_tick() {
        let mut vehicle = Vehicle::new(VehicleId(0), 15.0);

        assert_eq!(vehicle.advance(TICK, TRAVEL, UNLOAD), None);
        assert_eq!(vehicle.advance(TICK, TRAVEL, UNLOAD), None);
        assert_eq!(vehicle.state(), VehicleState::Mining);

        assert_eq!(vehicle.advance(TICK, TRAVEL, UNLOAD), Some(VehicleTransition::FinishedMining));
        assert_eq!(vehicle.state(), VehicleState::Hauling);
        assert!(vehicle.is_loaded());
        assert_eq!(vehicle.time_remaining(), TRAVEL);

        // The transition tick is counted as mining
        assert_eq!(vehicle.mining_ticks(), 3);
    }

    #[test]
    fn test_overshoot_carries_into_next_phase() {
        let mut vehicle = Vehicle::new(VehicleId(0), 12.0);

        vehicle.advance(TICK, TRAVEL, UNLOAD);
        vehicle.advance(TICK, TRAVEL, UNLOAD);
        let transition = vehicle.advance(TICK, TRAVEL, UNLOAD);

        assert_eq!(transition, Some(VehicleTransition::FinishedMining));
        // 12 - 15 = -3, plus 30 minutes of travel
        assert_eq!(vehicle.time_remaining(), 27.0);
    }

    #[test]
    fn test_awaiting_unload_is_not_advanced() {
        let mut vehicle = Vehicle::new_for_testing(
            VehicleId(1),
            60.0,
            VehicleState::AwaitingUnload { assigned: true },
            UNLOAD,
        );

        for _ in 0..10 {
            assert_eq!(vehicle.advance(TICK, TRAVEL, UNLOAD), None);
        }

        assert_eq!(vehicle.time_remaining(), UNLOAD);
        assert_eq!(vehicle.unloads(), 0);
        assert_eq!(vehicle.travel_ticks(), 0);
    }

    #[test]
    fn test_release_then_finish_unloading() {
        let mut vehicle = Vehicle::new_for_testing(
            VehicleId(1),
            60.0,
            VehicleState::AwaitingUnload { assigned: true },
            UNLOAD,
        );

        vehicle.release().unwrap();
        assert_eq!(vehicle.state(), VehicleState::Unloading);
        assert!(!vehicle.is_loaded());
        assert!(!vehicle.is_assigned_station());

        assert_eq!(
            vehicle.advance(TICK, TRAVEL, UNLOAD),
            Some(VehicleTransition::FinishedUnloading)
        );
        assert_eq!(vehicle.state(), VehicleState::Returning);
        assert_eq!(vehicle.unloads(), 1);
    }

    #[test]
    fn test_returning_restarts_mining_cycle() {
        let mut vehicle =
            Vehicle::new_for_testing(VehicleId(2), 90.0, VehicleState::Returning, TICK);

        assert_eq!(vehicle.advance(TICK, TRAVEL, UNLOAD), Some(VehicleTransition::ArrivedAtMine));
        assert_eq!(vehicle.state(), VehicleState::Mining);
        assert_eq!(vehicle.time_remaining(), 90.0);
        assert_eq!(vehicle.travel_ticks(), 1);
    }

    #[test]
    fn test_assign_station_rules() {
        let mut waiting = Vehicle::new_for_testing(
            VehicleId(4),
            60.0,
            VehicleState::AwaitingUnload { assigned: false },
            UNLOAD,
        );
        waiting.assign_station().unwrap();
        assert!(waiting.is_assigned_station());

        // Second assignment is rejected
        assert_eq!(
            waiting.assign_station(),
            Err(DispatchError::VehicleAlreadyAssigned {
                vehicle: VehicleId(4),
                operation: DispatchOperation::Assign,
            })
        );

        let mut mining = Vehicle::new(VehicleId(5), 60.0);
        assert_eq!(
            mining.assign_station(),
            Err(DispatchError::VehicleNotLoaded {
                vehicle: VehicleId(5),
                operation: DispatchOperation::Assign,
            })
        );

        let mut hauling = Vehicle::new_for_testing(VehicleId(6), 60.0, VehicleState::Hauling, 10.0);
        assert!(matches!(
            hauling.assign_station(),
            Err(DispatchError::VehicleNotArrived { .. })
        ));
        assert_eq!(hauling.state(), VehicleState::Hauling);
    }

    #[test]
    fn test_release_requires_load() {
        let mut vehicle = Vehicle::new(VehicleId(7), 60.0);
        assert_eq!(
            vehicle.release(),
            Err(DispatchError::VehicleNotLoaded {
                vehicle: VehicleId(7),
                operation: DispatchOperation::Unload,
            })
        );
        assert_eq!(vehicle.state(), VehicleState::Mining);
    }
}
