//! Tests for CLI argument parsing and layered configuration
//!
//! CLI arguments override the config file, which overrides the defaults.

use clap::Parser;
use geo_walk_simulator::types::config::{CliArgs, ConfigError, ConfigValidationError, SimulationConfig};
use std::io::Write;

fn parse(args: &[&str]) -> CliArgs {
    let mut full = vec!["geo-walk-simulator"];
    full.extend_from_slice(args);
    CliArgs::try_parse_from(full).unwrap()
}

/// Test that no arguments leaves everything to the defaults
#[test]
fn test_no_arguments() {
    let args = parse(&[]);
    assert!(args.config.is_none());
    assert!(!args.offline);
    assert!(!args.dry_run);

    let config = SimulationConfig::from_cli_args(args).unwrap();
    let defaults = SimulationConfig::default();
    assert_eq!(config.device_count, defaults.device_count);
    assert_eq!(config.tick_interval_ms, 1_000);
    assert_eq!(config.request_timeout_ms, 2_000);
}

/// Test parsing of the walk and delivery arguments
#[test]
fn test_walk_and_delivery_arguments() {
    let args = parse(&[
        "--device-count",
        "25",
        "--floor",
        "B2",
        "--step-length",
        "1.5",
        "--tick-interval-ms",
        "250",
        "--wkid",
        "4326",
        "--endpoint",
        "http://localhost:8080/events",
        "--request-timeout-ms",
        "500",
        "--seed",
        "7",
        "--max-ticks",
        "100",
    ]);
    let config = SimulationConfig::from_cli_args(args).unwrap();

    assert_eq!(config.device_count, 25);
    assert_eq!(config.floor, "B2");
    assert_eq!(config.step_length, 1.5);
    assert_eq!(config.tick_interval_ms, 250);
    assert_eq!(config.spatial_reference_id, 4326);
    assert_eq!(config.endpoint.as_deref(), Some("http://localhost:8080/events"));
    assert_eq!(config.request_timeout_ms, 500);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.max_ticks, Some(100));
    assert!(config.validate().is_ok());
}

/// Test that CLI values win over the config file
#[test]
fn test_cli_overrides_config_file() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        file,
        r#"{{"device_count": 30, "floor": "7", "offline": true, "max_move_attempts": 10}}"#
    )
    .unwrap();
    let path = file.path().display().to_string();

    let config = SimulationConfig::from_cli_args(parse(&["--config", &path, "--device-count", "5"])).unwrap();

    assert_eq!(config.device_count, 5);
    assert_eq!(config.floor, "7");
    assert!(config.offline);
    assert_eq!(config.max_move_attempts, 10);
    assert!(config.validate().is_ok());
}

/// Test config file errors
#[test]
fn test_config_file_errors() {
    let missing = SimulationConfig::from_file("/nonexistent/config.json");
    assert!(matches!(missing, Err(ConfigError::FileNotFound(_))));

    let yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    assert!(matches!(
        SimulationConfig::from_file(yaml.path()),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

/// Test that online mode needs a usable endpoint
#[test]
fn test_endpoint_validation() {
    let config = SimulationConfig::from_cli_args(parse(&[])).unwrap();
    assert!(matches!(config.validate(), Err(ConfigValidationError::MissingEndpoint)));

    let config = SimulationConfig::from_cli_args(parse(&["--endpoint", "localhost:8080"])).unwrap();
    assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidEndpoint(_))));

    let config = SimulationConfig::from_cli_args(parse(&["--offline"])).unwrap();
    assert!(config.validate().is_ok());
}

/// Test the logging and run-mode flags
#[test]
fn test_logging_flags() {
    let args = parse(&["-v", "--json-logs", "--log-dir", "logs", "--dry-run", "--region", "campus.geojson"]);
    assert!(args.verbose);
    assert!(!args.debug);
    assert!(args.json_logs);
    assert_eq!(args.log_dir.as_deref(), Some("logs"));
    assert!(args.dry_run);
    assert_eq!(args.region.as_deref(), Some("campus.geojson"));

    let config = SimulationConfig::from_cli_args(args).unwrap();
    assert_eq!(config.region_path.as_deref(), Some("campus.geojson"));
}

/// Test that invalid numbers are rejected by the parser
#[test]
fn test_invalid_numbers_rejected() {
    assert!(CliArgs::try_parse_from(["geo-walk-simulator", "--device-count", "many"]).is_err());
    assert!(CliArgs::try_parse_from(["geo-walk-simulator", "--step-length", "far"]).is_err());
}

/// Test saving and reloading a configuration
#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = SimulationConfig { device_count: 12, offline: true, seed: Some(3), ..Default::default() };
    config.save_to_file(&path).unwrap();

    let reloaded = SimulationConfig::from_file(&path).unwrap();
    assert_eq!(reloaded.device_count, 12);
    assert!(reloaded.offline);
    assert_eq!(reloaded.seed, Some(3));
}
