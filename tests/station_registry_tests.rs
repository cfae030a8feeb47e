//! Tests for the station registry
//!
//! These tests verify station initialization, the available/occupied cycle,
//! one-vehicle-per-tick service and the free-station pool.

use mine_haulage_simulator::fleet::{ScriptedMiningDurations, Vehicle, VehicleRegistry, VehicleState};
use mine_haulage_simulator::simulation::DispatchError;
use mine_haulage_simulator::stations::StationRegistry;
use mine_haulage_simulator::types::{StationId, StationStatus, VehicleId};

const TRAVEL: f64 = 30.0;
const UNLOAD: f64 = 5.0;

fn queued(id: usize) -> Vehicle {
    Vehicle::new_for_testing(VehicleId(id), 60.0, VehicleState::AwaitingUnload { assigned: true }, UNLOAD)
}

/// Test that new stations are idle with empty queues
#[test]
fn test_station_initialization() {
    let registry = StationRegistry::new(5, UNLOAD);

    assert_eq!(registry.len(), 5);
    for (index, station) in registry.iter().enumerate() {
        assert_eq!(station.id, StationId(index));
        assert_eq!(station.status, StationStatus::Available);
        assert_eq!(station.pending_wait, 0.0);
        assert!(station.queue.is_empty());
        assert_eq!(station.completed_unloads, 0);
    }
    assert!(registry.free_pool().is_empty());
}

/// Test a station serving one truck while the fleet is mining
#[test]
fn test_station_update_cycle() {
    let mut source = ScriptedMiningDurations::constant(60.0);
    let mut vehicles = VehicleRegistry::new(3, (60.0, 60.0), TRAVEL, UNLOAD, &mut source).unwrap();
    let mut stations = StationRegistry::new(1, UNLOAD);

    // Nothing queued, nothing changes
    for _ in 0..6 {
        assert!(stations.update(&mut vehicles).is_empty());
        vehicles.update(5.0);
    }
    let station = stations.get(StationId(0)).unwrap();
    assert_eq!(station.status, StationStatus::Available);
    assert_eq!(station.pending_wait, 0.0);

    // Queue a truck that has arrived and been assigned
    let mut fleet: Vec<Vehicle> = vehicles.vehicles().to_vec();
    fleet[0] = queued(0);
    let mut vehicles = VehicleRegistry::from_vehicles(fleet, TRAVEL, UNLOAD);
    stations.get_mut(StationId(0)).unwrap().queue.push_back(VehicleId(0));

    // First tick: the station takes on the work
    assert!(stations.update(&mut vehicles).is_empty());
    let station = stations.get(StationId(0)).unwrap();
    assert_eq!(station.status, StationStatus::Occupied);
    assert_eq!(station.pending_wait, 5.0);
    assert_eq!(station.queue_len(), 1);

    // Second tick: the truck is serviced and the station frees up
    assert!(stations.update(&mut vehicles).is_empty());
    let station = stations.get(StationId(0)).unwrap();
    assert_eq!(station.status, StationStatus::Available);
    assert_eq!(station.pending_wait, 0.0);
    assert!(station.queue.is_empty());
    assert_eq!(station.completed_unloads, 1);
    assert_eq!(stations.free_pool().iter().copied().collect::<Vec<_>>(), vec![StationId(0)]);

    let truck = vehicles.get(VehicleId(0)).unwrap();
    assert_eq!(truck.state(), VehicleState::Unloading);
    assert!(!truck.is_loaded());
    assert!(!truck.is_assigned_station());
}

/// Test that an occupied station services one truck per tick
#[test]
fn test_one_truck_serviced_per_tick() {
    let mut vehicles = VehicleRegistry::from_vehicles((0..3).map(queued).collect(), TRAVEL, UNLOAD);
    let mut stations = StationRegistry::new(1, UNLOAD);
    stations
        .get_mut(StationId(0))
        .unwrap()
        .queue
        .extend([VehicleId(0), VehicleId(1), VehicleId(2)]);

    stations.update(&mut vehicles);
    assert_eq!(stations.get(StationId(0)).unwrap().pending_wait, 15.0);

    for expected in 1..=3u64 {
        stations.update(&mut vehicles);
        let station = stations.get(StationId(0)).unwrap();
        assert_eq!(station.completed_unloads, expected);
        assert_eq!(station.queue_len() as u64, 3 - expected);
    }

    // FIFO order: the last truck was released last
    let station = stations.get(StationId(0)).unwrap();
    assert_eq!(station.status, StationStatus::Available);
    assert_eq!(vehicles.get(VehicleId(2)).unwrap().state(), VehicleState::Unloading);
    assert_eq!(stations.free_pool().len(), 1);
}

/// Test that an occupied station with an empty queue is freed
#[test]
fn test_occupied_station_with_empty_queue_is_freed() {
    let mut vehicles = VehicleRegistry::from_vehicles(Vec::new(), TRAVEL, UNLOAD);
    let mut stations = StationRegistry::new(2, UNLOAD);
    stations.get_mut(StationId(1)).unwrap().status = StationStatus::Occupied;

    stations.update(&mut vehicles);

    assert!(stations.get(StationId(1)).unwrap().is_available());
    assert_eq!(stations.free_pool().front(), Some(&StationId(1)));
}

/// Test that a failed service is reported and the id is still dequeued
#[test]
fn test_failed_service_is_reported() {
    let mining = Vehicle::new(VehicleId(0), 60.0);
    let mut vehicles = VehicleRegistry::from_vehicles(vec![mining, queued(1)], TRAVEL, UNLOAD);
    let mut stations = StationRegistry::new(1, UNLOAD);
    {
        let station = stations.get_mut(StationId(0)).unwrap();
        station.queue.extend([VehicleId(0), VehicleId(1)]);
    }

    stations.update(&mut vehicles);
    let diagnostics = stations.update(&mut vehicles);

    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(diagnostics[0], DispatchError::VehicleNotLoaded { vehicle: VehicleId(0), .. }));

    let station = stations.get(StationId(0)).unwrap();
    assert_eq!(station.completed_unloads, 0);
    assert_eq!(station.queued_vehicles(), vec![VehicleId(1)]);
    assert_eq!(vehicles.get(VehicleId(0)).unwrap().state(), VehicleState::Mining);

    // The next truck in line is still served
    assert!(stations.update(&mut vehicles).is_empty());
    assert_eq!(stations.get(StationId(0)).unwrap().completed_unloads, 1);
}
