#![allow(clippy::unwrap_used)]
// End-to-end tests for `execute` against a scripted counter source.
//
// Time is paused so the sleeps between samples advance the clock
// instantly and deterministically.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::time::Instant;

use ifrate_core::{CheckConfig, CoreError, CounterFamily, CounterSource, Direction, Unit, Verdict, execute};
use ifrate_core::verdict::Thresholds;
use ifrate_snmp::{Error, ObjectId};

// ── Helpers ─────────────────────────────────────────────────────────

const HC_IN_OCTETS_1: &str = "1.3.6.1.2.1.31.1.1.1.6.1";
const HC_OUT_OCTETS_2: &str = "1.3.6.1.2.1.31.1.1.1.10.2";
const IN_OCTETS_1: &str = "1.3.6.1.2.1.2.2.1.10.1";

/// Replays canned responses in order and records every identifier read.
struct ScriptedSource {
    responses: VecDeque<Result<u64, Error>>,
    reads: Arc<Mutex<Vec<String>>>,
    closes: Arc<AtomicUsize>,
}

struct Probe {
    reads: Arc<Mutex<Vec<String>>>,
    closes: Arc<AtomicUsize>,
}

impl Probe {
    fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap().clone()
    }

    fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

fn scripted(responses: Vec<Result<u64, Error>>) -> (ScriptedSource, Probe) {
    let reads = Arc::new(Mutex::new(Vec::new()));
    let closes = Arc::new(AtomicUsize::new(0));
    let source = ScriptedSource {
        responses: responses.into(),
        reads: Arc::clone(&reads),
        closes: Arc::clone(&closes),
    };
    (source, Probe { reads, closes })
}

impl CounterSource for ScriptedSource {
    async fn read_counter(&mut self, oid: &ObjectId) -> Result<u64, Error> {
        self.reads.lock().unwrap().push(oid.to_string());
        self.responses.pop_front().unwrap_or_else(|| {
            Err(Error::Request {
                oid: oid.to_string(),
                reason: "script exhausted".into(),
            })
        })
    }

    fn close(self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

fn absent(oid: &str) -> Result<u64, Error> {
    Err(Error::NoSuchObject { oid: oid.into() })
}

fn unreachable(oid: &str) -> Result<u64, Error> {
    Err(Error::Request {
        oid: oid.into(),
        reason: "Receive".into(),
    })
}

fn config(samples: u32, secs: u64, warning: u64, critical: u64) -> CheckConfig {
    let mut config = CheckConfig {
        samples,
        duration: Duration::from_secs(secs),
        thresholds: Thresholds { warning, critical },
        ..CheckConfig::default()
    };
    config.session.host = "test".into();
    config
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn three_samples_average_to_ok() {
    let (source, probe) = scripted(vec![Ok(0), Ok(100), Ok(200), Ok(300)]);

    let report = execute(source, &config(3, 2, 1000, 5000)).await.unwrap();

    assert_eq!(report.counter.family, CounterFamily::Extended);
    assert_eq!(report.observations.len(), 2);
    assert!(report.observations.iter().all(|o| (o.rate - 800.0).abs() < 1e-9));
    assert!((report.rate - 800.0).abs() < 1e-9);
    assert_eq!(report.verdict, Verdict::Ok);
    assert_eq!(report.summary(), "TRAFFIC_RATE OK: 800bps inbound");

    assert_eq!(probe.reads(), vec![HC_IN_OCTETS_1; 4]);
    assert_eq!(probe.closes(), 1);
}

#[tokio::test(start_paused = true)]
async fn sample_count_controls_reads_and_intervals() {
    let (source, probe) = scripted(vec![Ok(0), Ok(0), Ok(10), Ok(20), Ok(30), Ok(40)]);

    let report = execute(source, &config(5, 4, 1000, 5000)).await.unwrap();

    // One probe plus N sample reads; N-1 observations.
    assert_eq!(probe.reads().len(), 6);
    assert_eq!(report.observations.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn run_spans_the_observation_window() {
    let (source, _probe) = scripted(vec![Ok(0), Ok(0), Ok(1), Ok(2), Ok(3)]);
    let started = Instant::now();

    execute(source, &config(4, 30, 1000, 5000)).await.unwrap();

    // Three sleeps of 10s, none after the final read.
    assert_eq!(started.elapsed(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn outbound_bytes_use_out_column() {
    let (source, probe) = scripted(vec![Ok(0), Ok(1_000), Ok(3_000)]);
    let mut cfg = config(2, 2, 10_000, 20_000);
    cfg.interface = "2".into();
    cfg.direction = Direction::Outbound;
    cfg.unit = Unit::Bytes;

    let report = execute(source, &cfg).await.unwrap();

    assert_eq!(probe.reads(), vec![HC_OUT_OCTETS_2; 3]);
    assert!((report.rate - 1_000.0).abs() < 1e-9);
    assert_eq!(report.summary(), "TRAFFIC_RATE OK: 1000Bps outbound");
}

// ── Counter family selection ────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn absent_extended_counter_falls_back_to_legacy() {
    let (source, probe) = scripted(vec![
        absent(HC_IN_OCTETS_1),
        Ok(4_294_967_290),
        Ok(5),
    ]);

    let report = execute(source, &config(2, 1, 1000, 5000)).await.unwrap();

    assert_eq!(report.counter.family, CounterFamily::Legacy);
    assert_eq!(report.counter.oid.to_string(), IN_OCTETS_1);
    assert_eq!(report.observations[0].delta, 11);
    assert!(report.observations[0].wrapped);
    assert!((report.rate - 88.0).abs() < 1e-9);
    assert_eq!(
        probe.reads(),
        vec![HC_IN_OCTETS_1, IN_OCTETS_1, IN_OCTETS_1]
    );
}

#[tokio::test(start_paused = true)]
async fn extended_counter_wraps_at_two_to_the_64() {
    let (source, _probe) = scripted(vec![Ok(0), Ok(u64::MAX - 9), Ok(10)]);

    let report = execute(source, &config(2, 1, 1000, 5000)).await.unwrap();

    assert_eq!(report.counter.family, CounterFamily::Extended);
    assert_eq!(report.observations[0].delta, 20);
}

#[tokio::test(start_paused = true)]
async fn unreachable_agent_during_probe_does_not_fall_back() {
    let (source, probe) = scripted(vec![unreachable(HC_IN_OCTETS_1), Ok(1), Ok(2)]);

    let err = execute(source, &config(2, 1, 1000, 5000)).await.unwrap_err();

    assert!(matches!(err, CoreError::Read { ref oid, .. } if oid == HC_IN_OCTETS_1));
    assert_eq!(err.verdict(), Verdict::Critical);
    assert_eq!(probe.reads().len(), 1);
    assert_eq!(probe.closes(), 1);
}

// ── Failures ────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn read_failure_aborts_immediately() {
    let (source, probe) = scripted(vec![
        Ok(0),
        Ok(100),
        unreachable(HC_IN_OCTETS_1),
        Ok(300),
        Ok(400),
    ]);

    let err = execute(source, &config(4, 3, 1000, 5000)).await.unwrap_err();

    assert_eq!(err.verdict(), Verdict::Critical);
    assert!(err.to_string().contains(HC_IN_OCTETS_1));
    // Probe, first sample, failing sample. Nothing after.
    assert_eq!(probe.reads().len(), 3);
    assert_eq!(probe.closes(), 1);
}

#[tokio::test(start_paused = true)]
async fn single_sample_is_unknown_without_reads() {
    let (source, probe) = scripted(vec![Ok(0), Ok(1)]);

    let err = execute(source, &config(1, 1, 1000, 5000)).await.unwrap_err();

    assert!(matches!(err, CoreError::InvalidConfig { .. }));
    assert_eq!(err.verdict(), Verdict::Unknown);
    assert!(probe.reads().is_empty());
    assert_eq!(probe.closes(), 1);
}

#[tokio::test(start_paused = true)]
async fn zero_window_has_no_usable_interval() {
    let (source, probe) = scripted(vec![Ok(0), Ok(100), Ok(200), Ok(300)]);

    let err = execute(source, &config(3, 0, 1000, 5000)).await.unwrap_err();

    assert!(matches!(err, CoreError::NoObservations { pairs: 2 }));
    assert_eq!(err.verdict(), Verdict::Unknown);
    assert_eq!(probe.closes(), 1);
}

// ── Thresholds ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn rate_equal_to_critical_is_critical() {
    // 625 octets/s × 8 = 5000 bps.
    let (source, _probe) = scripted(vec![Ok(0), Ok(0), Ok(625)]);

    let report = execute(source, &config(2, 1, 1000, 5000)).await.unwrap();

    assert_eq!(report.verdict, Verdict::Critical);
    assert_eq!(report.summary(), "TRAFFIC_RATE CRITICAL: 5000bps inbound");
}

#[tokio::test(start_paused = true)]
async fn default_thresholds_trip_on_idle_interface() {
    let (source, _probe) = scripted(vec![Ok(0), Ok(7), Ok(7)]);
    let mut cfg = config(2, 1, 0, 0);
    cfg.thresholds = Thresholds::default();

    let report = execute(source, &cfg).await.unwrap();

    assert!(report.rate.abs() < f64::EPSILON);
    assert_eq!(report.verdict, Verdict::Critical);
}

#[tokio::test(start_paused = true)]
async fn huge_sample_count_reads_until_first_failure() {
    let (source, probe) = scripted(vec![
        Ok(0),
        Ok(10),
        Ok(20),
        unreachable(HC_IN_OCTETS_1),
    ]);

    let err = execute(source, &config(u32::MAX, 30, 1000, 5000))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Read { .. }), "{err:?}");
    assert_eq!(probe.reads().len(), 4);
    assert_eq!(probe.closes(), 1);
}
