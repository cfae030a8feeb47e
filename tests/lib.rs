// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use mine_haulage_simulator::*;

mod station_registry_tests;

// Include test modules for whole runs and their outputs
mod cli_argument_parsing_tests;

#[test]
fn test_core_id_types() {
    let vehicle_id = VehicleId(4);
    let station_id = StationId(2);

    assert_eq!(vehicle_id.index(), 4);
    assert_eq!(station_id.index(), 2);
    assert_eq!(VehicleId::from(4), vehicle_id);

    // Ids print as bare numbers in reports
    assert_eq!(vehicle_id.to_string(), "4");
    assert_eq!(station_id.to_string(), "2");

    // Ordering follows the index
    assert!(VehicleId(1) < VehicleId(2));
    assert_eq!(serde_json::to_string(&station_id).unwrap(), "2");
}

#[test]
fn test_enum_types() {
    let activities = [Activity::Mining, Activity::Traveling, Activity::Unloading];
    for activity in &activities {
        assert!(!activity.to_string().is_empty());
    }

    assert_eq!(OutputFormat::Csv.extension(), "csv");
    assert_eq!(OutputFormat::Json.extension(), "json");
    assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    assert!("xml".parse::<OutputFormat>().is_err());

    assert_eq!(DispatchOperation::Assign.to_string(), "assign");
    assert_eq!(DispatchOperation::Unload.to_string(), "unload");
    assert_ne!(StationStatus::Available, StationStatus::Occupied);
}

#[test]
fn test_vehicle_state_views() {
    assert_eq!(VehicleState::Mining.activity(), Activity::Mining);
    assert_eq!(VehicleState::Hauling.activity(), Activity::Traveling);
    assert_eq!(VehicleState::Returning.activity(), Activity::Traveling);
    assert_eq!(VehicleState::AwaitingUnload { assigned: true }.activity(), Activity::Unloading);
    assert_eq!(VehicleState::Unloading.activity(), Activity::Unloading);

    assert!(VehicleState::Hauling.is_loaded());
    assert!(VehicleState::AwaitingUnload { assigned: false }.is_loaded());
    assert!(!VehicleState::Unloading.is_loaded());
    assert!(VehicleState::AwaitingUnload { assigned: true }.is_assigned_station());
    assert!(!VehicleState::AwaitingUnload { assigned: false }.is_assigned_station());
}

#[test]
fn test_default_configuration() {
    let config = SimulationConfig::default();

    assert_eq!(config.vehicle_count, 10);
    assert_eq!(config.station_count, 3);
    assert_eq!(config.horizon_hours, 72.0);
    assert_eq!(config.tick_minutes, 5.0);
    assert_eq!(config.mining_range_minutes(), (60.0, 300.0));
    assert_eq!(config.travel_minutes(), 30.0);
    assert!(config.validate().is_ok());
    assert!(config.divisibility_warnings().is_empty());
}
