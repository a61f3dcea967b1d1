// ── Rate derivation ──
//
// Pure functions over an ordered run of samples: adjacent pairs become
// per-interval rates (with single-wrap correction), and the rates are
// reduced to one unweighted mean.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::warn;

use crate::config::Unit;
use crate::counter::CounterFamily;

/// One counter reading and the monotonic time it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub value: u64,
    pub at: Instant,
}

impl Sample {
    pub fn new(value: u64, at: Instant) -> Self {
        Self { value, at }
    }
}

/// The rate observed over one interval between two adjacent samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateObservation {
    /// Rate in the configured unit per second.
    pub rate: f64,
    /// Octets counted over the interval, after wrap correction.
    pub delta: u64,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    /// The counter wrapped during this interval.
    pub wrapped: bool,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

/// Octets counted between `prev` and `cur`.
///
/// A reading lower than its predecessor means the counter wrapped; exactly
/// one wrap is assumed. Returns the delta and whether a wrap was corrected.
pub fn counter_delta(prev: u64, cur: u64, family: CounterFamily) -> (u64, bool) {
    if prev > cur {
        let corrected =
            (u128::from(cur) + family.wrap_modulus()).saturating_sub(u128::from(prev));
        (u64::try_from(corrected).unwrap_or(u64::MAX), true)
    } else {
        (cur - prev, false)
    }
}

/// Rate between two samples, `cur` taken after `prev`.
///
/// Returns `None` when no time elapsed between the two readings; such an
/// interval has no defined rate and is left out of the average.
#[allow(clippy::cast_precision_loss)]
pub fn observe(
    prev: &Sample,
    cur: &Sample,
    family: CounterFamily,
    unit: Unit,
) -> Option<RateObservation> {
    let elapsed = cur.at.saturating_duration_since(prev.at);
    if elapsed.is_zero() {
        warn!(
            prev = prev.value,
            cur = cur.value,
            "zero elapsed time between samples, skipping interval"
        );
        return None;
    }

    let (delta, wrapped) = counter_delta(prev.value, cur.value, family);
    if wrapped {
        warn!(prev = prev.value, cur = cur.value, %family, "counter wrapped");
    }

    Some(RateObservation {
        rate: delta as f64 / elapsed.as_secs_f64() * unit.scale(),
        delta,
        elapsed,
        wrapped,
    })
}

/// Per-interval rates for every adjacent pair, newest pair first.
///
/// `samples` must be in chronological order. A run of N samples yields N-1
/// observations, fewer if some intervals had zero elapsed time.
pub fn derive_rates(samples: &[Sample], family: CounterFamily, unit: Unit) -> Vec<RateObservation> {
    samples
        .windows(2)
        .rev()
        .filter_map(|pair| match pair {
            [prev, cur] => observe(prev, cur, family, unit),
            _ => None,
        })
        .collect()
}

/// Unweighted arithmetic mean of the observed rates.
///
/// Every interval counts once regardless of its length, so uneven sleeps
/// skew the result slightly. Returns `None` for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn mean_rate(observations: &[RateObservation]) -> Option<f64> {
    if observations.is_empty() {
        return None;
    }
    let total: f64 = observations.iter().map(|o| o.rate).sum();
    Some(total / observations.len() as f64)
}
