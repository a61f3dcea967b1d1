// ifrate-core: Counter selection and windowed rate sampling between
// ifrate-snmp and the CLI.

pub mod check;
pub mod config;
pub mod counter;
pub mod error;
pub mod rate;
pub mod sampler;
pub mod source;
pub mod verdict;

// ── Primary re-exports ──────────────────────────────────────────────
pub use check::{CheckReport, execute, failure_summary};
pub use config::{CheckConfig, Direction, Unit};
pub use counter::{CounterDescriptor, CounterFamily, select_counter};
pub use error::CoreError;
pub use rate::{RateObservation, Sample, derive_rates, mean_rate};
pub use sampler::collect_samples;
pub use source::CounterSource;
pub use verdict::{Thresholds, Verdict};

/// Name printed at the start of every status line.
pub const CHECK_NAME: &str = "TRAFFIC_RATE";
