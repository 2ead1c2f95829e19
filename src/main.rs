// Geo Walk Simulator - Main Entry Point
//
// Offline run against the built-in square, ten ticks per agent:
//
// ```console
// $ ./target/release/geo-walk-simulator --offline --max-ticks 10 --verbose
// ```
//
// Streaming to a receiver inside a GeoJSON region:
//
// ```console
// $ ./target/release/geo-walk-simulator --region campus.geojson --endpoint http://localhost:8080/events
// ```

use anyhow::{Context, Result};
use clap::Parser;
use geo_walk_simulator::agent::{AgentProfile, AgentProfileGenerator, ProfileStats};
use geo_walk_simulator::geometry::{Point, Region, RegionLoader, RegionSampler};
use geo_walk_simulator::simulation::{
    CancellationToken, LoggingConfig, LoggingGuard, RunSummary, SimulationDriver,
};
use geo_walk_simulator::sink::build_sink;
use geo_walk_simulator::types::config::CliArgs;
use geo_walk_simulator::types::{AssetCategory, DeviceKind, SimulationConfig};
use std::process;
use std::sync::Arc;
use tracing::{error, info, Level};

fn main() {
    let args = CliArgs::parse();

    if args.print_config {
        match SimulationConfig::default().print_json() {
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

    let _logging_guard = match init_logging(&args) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Geo Walk Simulator");

    let config = match SimulationConfig::from_cli_args(args.clone()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        eprintln!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    let (region, profiles, seeds) = match prepare(&config) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("Failed to prepare simulation: {:#}", e);
            eprintln!("Failed to prepare simulation: {:#}", e);
            process::exit(1);
        }
    };

    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - agents will not be started.");
        print_configuration_summary(&config, &region, &profiles);
        return;
    }

    print_startup_banner(&config, &region, &profiles);

    match run(&config, region, profiles, seeds) {
        Ok(summary) => {
            print_run_summary(&summary);
            info!("Geo Walk Simulator completed successfully");
        }
        Err(e) => {
            error!("Simulation failed: {:#}", e);
            eprintln!("Simulation failed: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_logging(args: &CliArgs) -> Result<LoggingGuard, Box<dyn std::error::Error + Send + Sync>> {
    let level = if args.debug {
        Level::DEBUG
    } else if args.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let mut logging = LoggingConfig::new().with_level(level);
    if args.debug {
        logging = logging.with_span_events();
    }
    if args.json_logs {
        logging = logging.with_json_format().without_ansi();
    }
    if let Some(directory) = &args.log_dir {
        logging = logging.with_file_logging(directory.clone());
    }
    logging.init()
}

/// Load the region, generate profiles and sample one seed position per profile
fn prepare(config: &SimulationConfig) -> Result<(Arc<Region>, Vec<AgentProfile>, Vec<Point>)> {
    let region = match &config.region_path {
        Some(path) => RegionLoader::from_file(path)
            .with_context(|| format!("failed to load region from '{}'", path))?,
        None => {
            info!("No region file given, using the built-in 100x100 square");
            Region::default_square()
        }
    };
    info!(
        "Region has {} part(s), area {:.3}, coverage {:.3} of its bounding box",
        region.parts().len(),
        region.area(),
        region.coverage_ratio()
    );

    let mut generator = match config.seed {
        Some(seed) => AgentProfileGenerator::with_seed(seed),
        None => AgentProfileGenerator::new(),
    }
    .with_spatial_reference(config.spatial_reference_id);
    let profiles = generator.generate(config.device_count, &config.floor);

    let mut sampler = match config.seed {
        Some(seed) => RegionSampler::with_seed(seed),
        None => RegionSampler::new(),
    }
    .with_max_attempts(config.max_sample_attempts);
    let seeds = sampler
        .sample(&region, profiles.len())
        .context("failed to sample seed positions")?;

    info!("Prepared {} agents", profiles.len());
    Ok((Arc::new(region), profiles, seeds))
}

fn run(
    config: &SimulationConfig,
    region: Arc<Region>,
    profiles: Vec<AgentProfile>,
    seeds: Vec<Point>,
) -> Result<RunSummary> {
    let sink = build_sink(config).context("failed to set up event sink")?;

    let cancel = CancellationToken::new();
    cancel
        .install_ctrlc_handler()
        .context("failed to install Ctrl-C handler")?;

    eprintln!("Running {} agents, press Ctrl-C to stop...", profiles.len());
    let driver = SimulationDriver::new(config, sink);
    let summary = driver
        .run(profiles, seeds, region, cancel)
        .context("simulation run failed")?;
    Ok(summary)
}

fn print_startup_banner(config: &SimulationConfig, region: &Region, profiles: &[AgentProfile]) {
    eprintln!("Geo Walk Simulator");
    eprintln!("==================");
    eprintln!("Random-walking geo assets streaming location events");
    eprintln!();

    print_configuration_summary(config, region, profiles);
}

fn print_configuration_summary(config: &SimulationConfig, region: &Region, profiles: &[AgentProfile]) {
    let stats = ProfileStats::from_profiles(profiles);
    let bbox = region.bounding_box();

    eprintln!("Configuration:");
    eprintln!("  Requested Devices: {}", config.device_count);
    eprintln!("  Floor: {}", config.floor);
    eprintln!("  Spatial Reference: {}", config.spatial_reference_id);
    eprintln!("  Step Length: {}", config.step_length);
    eprintln!("  Tick Interval: {} ms", config.tick_interval_ms);
    match (&config.endpoint, config.offline) {
        (_, true) => eprintln!("  Delivery: offline (events logged)"),
        (Some(endpoint), false) => eprintln!(
            "  Delivery: {} (timeout {} ms)",
            endpoint, config.request_timeout_ms
        ),
        (None, false) => eprintln!("  Delivery: none"),
    }
    if let Some(directory) = &config.track_output {
        eprintln!("  Track Output: {}", directory);
    }
    if let Some(max_ticks) = config.max_ticks {
        eprintln!("  Tick Limit: {}", max_ticks);
    }
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }

    eprintln!("\nRegion:");
    eprintln!(
        "  Source: {}",
        config.region_path.as_deref().unwrap_or("built-in square")
    );
    eprintln!("  Parts: {}", region.parts().len());
    eprintln!("  Area: {:.3}", region.area());
    eprintln!(
        "  Bounds: ({:.3}, {:.3}) - ({:.3}, {:.3})",
        bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y
    );

    eprintln!("\nAgents: {}", stats.total);
    for category in AssetCategory::ALL {
        eprintln!("  {}: {}", category, stats.category(category));
    }
    for device in DeviceKind::ALL {
        eprintln!("  {}: {}", device, stats.device(device));
    }
    eprintln!();
}

fn print_run_summary(summary: &RunSummary) {
    eprintln!();
    eprintln!("{}", summary);
    for report in summary.agents.iter().filter(|r| r.outcome.is_failure()) {
        eprintln!("  {} ({}): {}", report.object_id, report.category, report.outcome);
    }
}
