//! Integration tests for the multi-agent driver and the sinks it feeds
//!
//! Covers prompt cancellation, delivery failures that must not stop a walk,
//! track files and input validation before any agent starts.

use geo_walk_simulator::agent::{AgentProfile, AgentProfileGenerator};
use geo_walk_simulator::events::LocationEvent;
use geo_walk_simulator::geometry::{Point, Region, RegionSampler};
use geo_walk_simulator::simulation::{
    AgentOutcome, CancellationToken, SimulationDriver, SimulationError,
};
use geo_walk_simulator::sink::{
    build_sink, CollectingSink, CompositeSink, EventSink, SinkError, TrackRecorder,
};
use geo_walk_simulator::types::{AssetCategory, DeviceKind, SimulationConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn offline_config() -> SimulationConfig {
    SimulationConfig {
        offline: true,
        tick_interval_ms: 0,
        step_length: 0.05,
        seed: Some(99),
        ..Default::default()
    }
}

fn unit_square() -> Arc<Region> {
    Arc::new(Region::rectangle(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap())
}

fn taxis(count: usize) -> Vec<AgentProfile> {
    (0..count)
        .map(|_| AgentProfile::new(AssetCategory::Taxi, DeviceKind::Android, "1", 3857))
        .collect()
}

/// Sink that fails every other delivery
#[derive(Debug, Default)]
struct Flaky {
    calls: AtomicUsize,
    accepted: CollectingSink,
}

impl EventSink for Flaky {
    fn deliver(&self, event: &LocationEvent) -> Result<(), SinkError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            Err(SinkError::Rejected { status: 503 })
        } else {
            self.accepted.deliver(event)
        }
    }

    fn name(&self) -> &'static str {
        "flaky"
    }
}

/// The unit square end-to-end: 1000 ticks from (0.5, 0.5), every event inside
#[test]
fn test_end_to_end_unit_square() {
    let config = SimulationConfig { max_ticks: Some(1_000), ..offline_config() };
    let sink = Arc::new(CollectingSink::new());

    let summary = SimulationDriver::new(&config, sink.clone())
        .run(taxis(1), vec![Point::new(0.5, 0.5)], unit_square(), CancellationToken::new())
        .unwrap();

    assert_eq!(summary.total_ticks(), 1_000);
    assert_eq!(sink.len(), 1_000);
    for event in sink.events() {
        assert!((0.0..=1.0).contains(&event.geometry.x));
        assert!((0.0..=1.0).contains(&event.geometry.y));
    }
}

/// Cancelling stops every agent promptly and no events follow the join
#[test]
fn test_cancellation_stops_all_agents() {
    let config = SimulationConfig { tick_interval_ms: 20, ..offline_config() };
    let sink = Arc::new(CollectingSink::new());
    let cancel = CancellationToken::new();
    let region = Arc::new(Region::default_square());
    let seeds = RegionSampler::with_seed(5).sample(&region, 5).unwrap();

    let runner = {
        let sink = sink.clone();
        let cancel = cancel.clone();
        thread::spawn(move || {
            SimulationDriver::new(&config, sink).run(taxis(5), seeds, region, cancel)
        })
    };

    thread::sleep(Duration::from_millis(200));
    let cancelled_at = Instant::now();
    cancel.cancel();
    let summary = runner.join().unwrap().unwrap();
    assert!(cancelled_at.elapsed() < Duration::from_secs(5));

    let after_join = sink.len();
    thread::sleep(Duration::from_millis(200));
    assert_eq!(sink.len(), after_join);

    assert_eq!(summary.agent_count(), 5);
    assert!(summary.agents.iter().all(|a| a.outcome == AgentOutcome::Cancelled));
    assert!(summary.total_ticks() > 0);
    assert_eq!(summary.total_ticks() as usize, after_join);
}

/// A sink that keeps failing never stops the walk
#[test]
fn test_failing_sink_does_not_stop_walk() {
    let config = SimulationConfig { max_ticks: Some(40), ..offline_config() };
    let sink = Arc::new(Flaky::default());

    let summary = SimulationDriver::new(&config, sink.clone())
        .run(taxis(1), vec![Point::new(0.5, 0.5)], unit_square(), CancellationToken::new())
        .unwrap();

    assert_eq!(summary.total_ticks(), 40);
    assert_eq!(summary.failed_deliveries(), 20);
    assert_eq!(summary.delivered_events(), 20);
    assert_eq!(sink.accepted.len(), 20);
    assert_eq!(summary.agents[0].outcome, AgentOutcome::Completed);
}

/// A stuck agent is reported while its siblings finish
#[test]
fn test_stuck_agent_does_not_stop_siblings() {
    let region = Arc::new(
        Region::new(vec![
            geo_walk_simulator::geometry::Polygon::rectangle(Point::new(0.0, 0.0), Point::new(0.01, 0.01)).unwrap(),
            geo_walk_simulator::geometry::Polygon::rectangle(Point::new(10.0, 10.0), Point::new(20.0, 20.0)).unwrap(),
        ])
        .unwrap(),
    );
    let config = SimulationConfig {
        max_ticks: Some(10),
        step_length: 0.5,
        max_move_attempts: 200,
        ..offline_config()
    };
    let sink = Arc::new(CollectingSink::new());

    let summary = SimulationDriver::new(&config, sink.clone())
        .run(
            taxis(2),
            vec![Point::new(0.005, 0.005), Point::new(15.0, 15.0)],
            region,
            CancellationToken::new(),
        )
        .unwrap();

    assert_eq!(summary.agents[0].outcome, AgentOutcome::Stuck { attempts: 200 });
    assert_eq!(summary.agents[1].outcome, AgentOutcome::Completed);
    assert_eq!(summary.agents[1].ticks, 10);
    assert_eq!(summary.stuck_agents(), 1);
    assert_eq!(sink.len(), 10);
}

/// Each agent gets its own track file next to the regular sink
#[test]
fn test_track_files_per_agent() {
    let dir = tempfile::tempdir().unwrap();
    let config = SimulationConfig { max_ticks: Some(15), ..offline_config() };
    let collected = Arc::new(CollectingSink::new());
    let tracks = Arc::new(TrackRecorder::new(dir.path()).unwrap());
    let sink = Arc::new(CompositeSink::new(vec![collected.clone(), tracks.clone()]));

    let summary = SimulationDriver::new(&config, sink)
        .run(taxis(3), vec![Point::new(0.5, 0.5); 3], unit_square(), CancellationToken::new())
        .unwrap();

    for report in &summary.agents {
        let track = tracks.read_track(report.object_id).unwrap();
        assert_eq!(track.len(), 15);
        assert!(track.iter().all(|&(x, y)| unit_square().contains(&Point::new(x, y))));

        let last = collected.events_for(report.object_id).pop().unwrap();
        assert_eq!(track.last().copied(), Some((last.lat, last.lon)));
    }
}

/// Seeds and profiles that do not pair up are rejected before any event
#[test]
fn test_count_mismatch_rejected() {
    let sink = Arc::new(CollectingSink::new());
    let profiles = AgentProfileGenerator::with_seed(1).generate(10, "1");

    let result = SimulationDriver::new(&offline_config(), sink.clone()).run(
        profiles,
        vec![Point::new(0.5, 0.5)],
        unit_square(),
        CancellationToken::new(),
    );

    assert!(matches!(result, Err(SimulationError::CountMismatch { profiles: 4, seeds: 1 })));
    assert!(sink.is_empty());
}

/// The sink factory wires the offline log sink and the track recorder
#[test]
fn test_build_sink_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = SimulationConfig {
        track_output: Some(dir.path().display().to_string()),
        max_ticks: Some(3),
        ..offline_config()
    };

    let sink = build_sink(&config).unwrap();
    let summary = SimulationDriver::new(&config, sink)
        .run(taxis(1), vec![Point::new(0.5, 0.5)], unit_square(), CancellationToken::new())
        .unwrap();

    let object_id = summary.agents[0].object_id;
    let recorder = TrackRecorder::new(dir.path()).unwrap();
    assert_eq!(recorder.read_track(object_id).unwrap().len(), 3);
    assert_eq!(summary.delivered_events(), 3);
}
