//! Configuration structures for the walk simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the agents, the region they walk in, and where their events go.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Motion and retry constants
pub mod motion {
    /// Default distance advanced per tick, in region units
    pub const DEFAULT_STEP_LENGTH: f64 = 0.8;

    /// Heading drift applied after every successful move, in degrees (symmetric)
    pub const DRIFT_DEGREES: f64 = 20.0;

    /// Upper bound of the turn applied when a step would leave the region, in degrees
    pub const BOUNDARY_TURN_DEGREES: f64 = 10.0;

    /// Default number of turn-and-retry attempts before an agent is declared stuck
    pub const DEFAULT_MAX_MOVE_ATTEMPTS: usize = 1_000;

    /// Default number of draws allowed per sampled seed point
    pub const DEFAULT_MAX_SAMPLE_ATTEMPTS: usize = 100_000;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "geo-walk-simulator",
    version = "0.1.0",
    about = "Geo Walk Simulator - Emits synthetic location events for assets walking inside a polygon",
    long_about = "Spawns one random-walking agent per simulated asset inside a polygonal region and posts each agent's position and status as a JSON event once per tick.

EXAMPLES:
    # Post events for 50 assets to a receiver
    geo-walk-simulator --region site.geojson --endpoint http://localhost:6180/receiver

    # Offline run that records tracks for plotting
    geo-walk-simulator --region site.geojson --offline --track-output tracks/

    # Use a configuration file
    geo-walk-simulator --config config.json

    # Generate configuration template
    geo-walk-simulator --print-config > my-config.json

    # Validate configuration without running
    geo-walk-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    The simulation runs until interrupted (Ctrl-C) unless --max-ticks is given."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Requested number of simulated assets
    #[arg(
        long,
        help = "Number of simulated assets",
        long_help = "Requested number of simulated assets. Each category receives 20% of this number, with at least one asset per category. Default: 50"
    )]
    pub device_count: Option<usize>,

    /// Floor identifier reported as geometry.z
    #[arg(long, help = "Floor identifier reported in every event")]
    pub floor: Option<String>,

    /// Distance advanced per tick
    #[arg(long, help = "Distance advanced per tick, in region units")]
    pub step_length: Option<f64>,

    /// Delay between ticks of the same agent
    #[arg(long, help = "Delay between ticks in milliseconds")]
    pub tick_interval_ms: Option<u64>,

    /// Spatial reference id echoed into events
    #[arg(long, alias = "wkid", help = "Spatial reference id (wkid) of the region coordinates")]
    pub spatial_reference_id: Option<u32>,

    /// GeoJSON file holding the region polygon
    #[arg(
        long,
        help = "GeoJSON file with the region polygon",
        long_help = "Path to a GeoJSON Polygon, MultiPolygon, Feature or FeatureCollection. Without it a built-in 100x100 square is used."
    )]
    pub region: Option<String>,

    /// Receiver URL for event delivery
    #[arg(long, help = "Receiver URL that events are POSTed to")]
    pub endpoint: Option<String>,

    /// Disable network delivery
    #[arg(long, help = "Do not deliver events over the network; log them instead")]
    pub offline: bool,

    /// Timeout for one delivery
    #[arg(long, help = "Timeout for one event delivery in milliseconds")]
    pub request_timeout_ms: Option<u64>,

    /// Directory for per-agent track files
    #[arg(long, help = "Directory where per-agent CSV tracks are written")]
    pub track_output: Option<String>,

    /// Random seed for reproducible walks
    #[arg(long, help = "Random seed for reproducible walks")]
    pub seed: Option<u64>,

    /// Stop every agent after this many ticks
    #[arg(long, help = "Stop every agent after this many ticks")]
    pub max_ticks: Option<u64>,

    /// Directory for rolling log files
    #[arg(long, help = "Write JSON logs to a daily rolling file in this directory")]
    pub log_dir: Option<String>,

    /// Enable JSON console logs
    #[arg(long, help = "Emit console logs as JSON")]
    pub json_logs: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Requested number of simulated assets
    pub device_count: Option<usize>,
    /// Floor identifier reported as geometry.z
    pub floor: Option<String>,
    /// Distance advanced per tick
    pub step_length: Option<f64>,
    /// Delay between ticks in milliseconds
    pub tick_interval_ms: Option<u64>,
    /// Spatial reference id echoed into events
    pub spatial_reference_id: Option<u32>,
    /// GeoJSON file holding the region polygon
    pub region_path: Option<String>,
    /// Receiver URL for event delivery
    pub endpoint: Option<String>,
    /// Disable network delivery
    pub offline: Option<bool>,
    /// Timeout for one delivery in milliseconds
    pub request_timeout_ms: Option<u64>,
    /// Directory for per-agent track files
    pub track_output: Option<String>,
    /// Random seed for reproducible walks
    pub seed: Option<u64>,
    /// Stop every agent after this many ticks
    pub max_ticks: Option<u64>,
    /// Turn-and-retry attempts before an agent is stuck
    pub max_move_attempts: Option<usize>,
    /// Draws allowed per sampled seed point
    pub max_sample_attempts: Option<usize>,
}

/// Configuration for the walk simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Requested number of simulated assets
    pub device_count: usize,

    /// Floor identifier reported as geometry.z
    pub floor: String,

    /// Distance advanced per tick, in region units
    pub step_length: f64,

    /// Delay between ticks of the same agent in milliseconds
    pub tick_interval_ms: u64,

    /// Spatial reference id (wkid) echoed into every event
    pub spatial_reference_id: u32,

    /// GeoJSON file holding the region polygon
    pub region_path: Option<String>,

    /// Receiver URL for event delivery
    pub endpoint: Option<String>,

    /// Disable network delivery and log events instead
    pub offline: bool,

    /// Timeout for one delivery in milliseconds
    pub request_timeout_ms: u64,

    /// Directory for per-agent track files
    pub track_output: Option<String>,

    /// Random seed for reproducible walks
    pub seed: Option<u64>,

    /// Stop every agent after this many ticks (runs until cancelled when unset)
    pub max_ticks: Option<u64>,

    /// Turn-and-retry attempts before an agent is declared stuck
    pub max_move_attempts: usize,

    /// Draws allowed per sampled seed point
    pub max_sample_attempts: usize,
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Device count is invalid
    #[error("Device count must be greater than 0, got {0}")]
    InvalidDeviceCount(usize),

    /// Step length is invalid
    #[error("Step length must be a finite number greater than 0, got {0}")]
    InvalidStepLength(f64),

    /// Request timeout is invalid
    #[error("Request timeout must be greater than 0 ms, got {0}")]
    InvalidRequestTimeout(u64),

    /// Tick limit is invalid
    #[error("Max ticks must be greater than 0 when set, got {0}")]
    InvalidMaxTicks(u64),

    /// A retry limit is zero
    #[error("Invalid retry limit for {field}: {value} (must be greater than 0)")]
    InvalidRetryLimit {
        /// Name of the field with the invalid limit
        field: String,
        /// The invalid limit
        value: usize,
    },

    /// Floor identifier is empty
    #[error("Floor identifier must not be empty")]
    EmptyFloor,

    /// Online mode without a receiver
    #[error("An endpoint is required unless offline mode is enabled")]
    MissingEndpoint,

    /// Endpoint is not an http(s) URL
    #[error("Invalid endpoint '{0}': must start with http:// or https://")]
    InvalidEndpoint(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            device_count: 50,
            floor: "1".to_string(),
            step_length: motion::DEFAULT_STEP_LENGTH,
            tick_interval_ms: 1_000,
            spatial_reference_id: 3857,
            region_path: None,
            endpoint: None,
            offline: false,
            request_timeout_ms: 2_000,
            track_output: None,
            seed: None,
            max_ticks: None,
            max_move_attempts: motion::DEFAULT_MAX_MOVE_ATTEMPTS,
            max_sample_attempts: motion::DEFAULT_MAX_SAMPLE_ATTEMPTS,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            device_count: config_file.device_count.unwrap_or(defaults.device_count),
            floor: config_file.floor.unwrap_or(defaults.floor),
            step_length: config_file.step_length.unwrap_or(defaults.step_length),
            tick_interval_ms: config_file.tick_interval_ms.unwrap_or(defaults.tick_interval_ms),
            spatial_reference_id: config_file
                .spatial_reference_id
                .unwrap_or(defaults.spatial_reference_id),
            region_path: config_file.region_path.or(defaults.region_path),
            endpoint: config_file.endpoint.or(defaults.endpoint),
            offline: config_file.offline.unwrap_or(defaults.offline),
            request_timeout_ms: config_file
                .request_timeout_ms
                .unwrap_or(defaults.request_timeout_ms),
            track_output: config_file.track_output.or(defaults.track_output),
            seed: config_file.seed.or(defaults.seed),
            max_ticks: config_file.max_ticks.or(defaults.max_ticks),
            max_move_attempts: config_file
                .max_move_attempts
                .unwrap_or(defaults.max_move_attempts),
            max_sample_attempts: config_file
                .max_sample_attempts
                .unwrap_or(defaults.max_sample_attempts),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.device_count {
            config.device_count = value;
        }
        if let Some(value) = args.floor {
            config.floor = value;
        }
        if let Some(value) = args.step_length {
            config.step_length = value;
        }
        if let Some(value) = args.tick_interval_ms {
            config.tick_interval_ms = value;
        }
        if let Some(value) = args.spatial_reference_id {
            config.spatial_reference_id = value;
        }
        if let Some(value) = args.region {
            config.region_path = Some(value);
        }
        if let Some(value) = args.endpoint {
            config.endpoint = Some(value);
        }
        if args.offline {
            config.offline = true;
        }
        if let Some(value) = args.request_timeout_ms {
            config.request_timeout_ms = value;
        }
        if let Some(value) = args.track_output {
            config.track_output = Some(value);
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.max_ticks {
            config.max_ticks = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.device_count == 0 {
            return Err(ConfigValidationError::InvalidDeviceCount(self.device_count));
        }

        if !self.step_length.is_finite() || self.step_length <= 0.0 {
            return Err(ConfigValidationError::InvalidStepLength(self.step_length));
        }

        if self.floor.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFloor);
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidRequestTimeout(self.request_timeout_ms));
        }

        if let Some(0) = self.max_ticks {
            return Err(ConfigValidationError::InvalidMaxTicks(0));
        }

        self.validate_retry_limit("max_move_attempts", self.max_move_attempts)?;
        self.validate_retry_limit("max_sample_attempts", self.max_sample_attempts)?;

        match (&self.endpoint, self.offline) {
            (None, false) => return Err(ConfigValidationError::MissingEndpoint),
            (Some(endpoint), _) => {
                if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                    return Err(ConfigValidationError::InvalidEndpoint(endpoint.clone()));
                }
            }
            (None, true) => {}
        }

        Ok(())
    }

    /// Helper method to validate retry limits
    fn validate_retry_limit(&self, field: &str, value: usize) -> Result<(), ConfigValidationError> {
        if value == 0 {
            return Err(ConfigValidationError::InvalidRetryLimit {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Delay between ticks of the same agent
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Timeout for one event delivery
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Expected number of agents once the category split is applied
    pub fn expected_agent_count(&self) -> usize {
        crate::agent::AgentProfileGenerator::planned_count(self.device_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let mut full = vec!["geo-walk-simulator"];
        full.extend_from_slice(args);
        CliArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_simulation_config_default() {
        let config = SimulationConfig::default();

        assert_eq!(config.device_count, 50);
        assert_eq!(config.floor, "1");
        assert_eq!(config.step_length, 0.8);
        assert_eq!(config.tick_interval_ms, 1_000);
        assert_eq!(config.spatial_reference_id, 3857);
        assert!(config.region_path.is_none());
        assert!(config.endpoint.is_none());
        assert!(!config.offline);
        assert_eq!(config.request_timeout_ms, 2_000);
        assert!(config.seed.is_none());
        assert!(config.max_ticks.is_none());
    }

    #[test]
    fn test_default_config_requires_endpoint() {
        let config = SimulationConfig::default();
        match config.validate() {
            Err(ConfigValidationError::MissingEndpoint) => {}
            other => panic!("Expected MissingEndpoint error, got {:?}", other),
        }
    }

    #[test]
    fn test_offline_config_validates_without_endpoint() {
        let config = SimulationConfig { offline: true, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides() {
        let args = parse(&[
            "--device-count",
            "10",
            "--step-length",
            "0.05",
            "--tick-interval-ms",
            "250",
            "--wkid",
            "4326",
            "--endpoint",
            "http://localhost:6180/in",
            "--seed",
            "7",
            "--max-ticks",
            "100",
        ]);

        let config = SimulationConfig::from_cli_args(args).unwrap();

        assert_eq!(config.device_count, 10);
        assert_eq!(config.step_length, 0.05);
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.spatial_reference_id, 4326);
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:6180/in"));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_ticks, Some(100));
        // Untouched fields keep their defaults
        assert_eq!(config.floor, "1");
        assert!(!config.offline);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "device_count": 20,
            "floor": "3",
            "step_length": 1.5,
            "offline": true,
            "track_output": "tracks",
            "seed": 12345
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = SimulationConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.device_count, 20);
        assert_eq!(config.floor, "3");
        assert_eq!(config.step_length, 1.5);
        assert!(config.offline);
        assert_eq!(config.track_output.as_deref(), Some("tracks"));
        assert_eq!(config.seed, Some(12345));
        assert_eq!(config.tick_interval_ms, 1_000);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        temp_file.write_all(br#"{"device_count": 20, "offline": true}"#).unwrap();
        temp_file.flush().unwrap();

        let path = temp_file.path().to_str().unwrap().to_string();
        let args = parse(&["--config", &path, "--device-count", "5"]);
        let config = SimulationConfig::from_cli_args(args).unwrap();

        assert_eq!(config.device_count, 5);
        assert!(config.offline);
    }

    #[test]
    fn test_config_file_errors() {
        match SimulationConfig::from_file("/definitely/not/here.json") {
            Err(ConfigError::FileNotFound(_)) => {}
            other => panic!("Expected FileNotFound, got {:?}", other),
        }

        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        match SimulationConfig::from_file(temp_file.path()) {
            Err(ConfigError::UnsupportedFormat(ext)) => assert_eq!(ext, "yaml"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_device_count() {
        let config = SimulationConfig { device_count: 0, offline: true, ..Default::default() };
        match config.validate() {
            Err(ConfigValidationError::InvalidDeviceCount(0)) => {}
            other => panic!("Expected InvalidDeviceCount error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_step_length() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SimulationConfig { step_length: bad, offline: true, ..Default::default() };
            assert!(matches!(
                config.validate(),
                Err(ConfigValidationError::InvalidStepLength(_))
            ));
        }
    }

    #[test]
    fn test_validation_endpoint_scheme() {
        let config = SimulationConfig {
            endpoint: Some("ftp://example.com".to_string()),
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigValidationError::InvalidEndpoint(url)) => assert_eq!(url, "ftp://example.com"),
            other => panic!("Expected InvalidEndpoint error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_retry_limits_and_ticks() {
        let config = SimulationConfig { offline: true, max_move_attempts: 0, ..Default::default() };
        match config.validate() {
            Err(ConfigValidationError::InvalidRetryLimit { field, value }) => {
                assert_eq!(field, "max_move_attempts");
                assert_eq!(value, 0);
            }
            other => panic!("Expected InvalidRetryLimit error, got {:?}", other),
        }

        let config = SimulationConfig { offline: true, max_ticks: Some(0), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidMaxTicks(0))));
    }

    #[test]
    fn test_print_json_round_trips() {
        let config = SimulationConfig { seed: Some(9), ..Default::default() };
        let json = config.print_json().unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(9));
        assert_eq!(back.spatial_reference_id, 3857);
    }

    #[test]
    fn test_expected_agent_count() {
        let config = SimulationConfig { device_count: 10, ..Default::default() };
        assert_eq!(config.expected_agent_count(), 4);

        let config = SimulationConfig { device_count: 50, ..Default::default() };
        assert_eq!(config.expected_agent_count(), 20);
    }
}
