// ── Check orchestration ──
//
// One run end to end: pick the counter, sample it, average the interval
// rates, compare against thresholds. The source is closed exactly once
// whether the run succeeds or fails.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::CHECK_NAME;
use crate::config::{CheckConfig, Direction, Unit};
use crate::counter::{CounterDescriptor, select_counter};
use crate::error::CoreError;
use crate::rate::{RateObservation, derive_rates, mean_rate};
use crate::sampler::collect_samples;
use crate::source::CounterSource;
use crate::verdict::{Thresholds, Verdict};

/// Result of a completed check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub verdict: Verdict,
    /// Mean rate over the window, in `unit` per second.
    pub rate: f64,
    pub unit: Unit,
    pub direction: Direction,
    pub interface: String,
    pub counter: CounterDescriptor,
    pub thresholds: Thresholds,
    /// Per-interval rates, newest interval first.
    pub observations: Vec<RateObservation>,
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    /// The status line, e.g. `TRAFFIC_RATE OK: 800bps inbound`.
    pub fn summary(&self) -> String {
        format!(
            "{CHECK_NAME} {}: {:.0}{} {}",
            self.verdict,
            self.rate.round(),
            self.unit.suffix(),
            self.direction
        )
    }
}

/// The status line for a run that ended without a rate.
pub fn failure_summary(verdict: Verdict, message: &dyn Display) -> String {
    format!("{CHECK_NAME} {verdict}: {message}")
}

/// Run a full check against `source`, then close it.
pub async fn execute<S: CounterSource>(
    mut source: S,
    config: &CheckConfig,
) -> Result<CheckReport, CoreError> {
    let result = run(&mut source, config).await;
    source.close();
    result
}

async fn run<S: CounterSource>(
    source: &mut S,
    config: &CheckConfig,
) -> Result<CheckReport, CoreError> {
    config.validate()?;

    let counter = select_counter(source, config).await?;
    let samples = collect_samples(source, &counter, config).await?;

    let observations = derive_rates(&samples, counter.family, config.unit);
    let rate = mean_rate(&observations).ok_or(CoreError::NoObservations {
        pairs: samples.len().saturating_sub(1),
    })?;
    let verdict = config.thresholds.evaluate(rate);

    info!(
        rate,
        unit = config.unit.suffix(),
        intervals = observations.len(),
        %verdict,
        "check complete"
    );

    Ok(CheckReport {
        verdict,
        rate,
        unit: config.unit,
        direction: config.direction,
        interface: config.interface.clone(),
        counter,
        thresholds: config.thresholds,
        observations,
        checked_at: Utc::now(),
    })
}
