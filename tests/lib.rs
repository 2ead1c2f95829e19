// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use geo_walk_simulator::*;

// Geometry and agents
mod region_sampling_tests;

mod simulation_driver_tests;

// Configuration
mod cli_argument_parsing_tests;

#[test]
fn test_object_ids_are_unique() {
    let first = ObjectId::new();
    let second = ObjectId::new();
    assert_ne!(first, second);
    assert_eq!(first.to_string().len(), 36);
}

#[test]
fn test_category_vocabularies() {
    assert_eq!(AssetCategory::Taxi.status_vocabulary(), ["free", "occupied"]);
    assert_eq!(AssetCategory::VisitorTaxi.status_vocabulary(), ["ok", "free"]);
}

#[test]
fn test_default_configuration_is_valid_offline() {
    let config = SimulationConfig { offline: true, ..Default::default() };
    assert!(config.validate().is_ok());
    assert_eq!(config.expected_agent_count(), 20);
}
