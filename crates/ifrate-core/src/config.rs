// ── Check configuration ──
//
// The immutable description of one check run. The CLI builds a
// `CheckConfig` from flags, profiles, and defaults, then hands it in;
// core never reads argv or config files.

use std::time::Duration;

use serde::Serialize;
use secrecy::SecretString;

use ifrate_snmp::{SessionConfig, SnmpVersion};
use ifrate_snmp::session::DEFAULT_PORT;

use crate::error::CoreError;
use crate::verdict::Thresholds;

/// Minimum number of samples that yields at least one rate.
pub const MIN_SAMPLES: u32 = 2;

/// Which octet counter of the interface to watch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    #[default]
    Inbound,
    Outbound,
}

/// Unit the final rate is reported in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Bits per second (octet delta × 8).
    #[default]
    Bits,
    /// Bytes per second.
    Bytes,
}

impl Unit {
    /// Suffix appended to the rate in the status line.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Bits => "bps",
            Self::Bytes => "Bps",
        }
    }

    /// Factor applied to an octets-per-second rate.
    pub fn scale(self) -> f64 {
        match self {
            Self::Bits => 8.0,
            Self::Bytes => 1.0,
        }
    }
}

/// Everything one check run needs. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Agent address, credentials, and protocol version.
    pub session: SessionConfig,
    /// Interface index as given by the user (e.g. `"1"`).
    pub interface: String,
    pub direction: Direction,
    pub unit: Unit,
    /// Total observation window.
    pub duration: Duration,
    /// Number of counter reads; must be at least [`MIN_SAMPLES`].
    pub samples: u32,
    pub thresholds: Thresholds,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig {
                host: "localhost".into(),
                port: DEFAULT_PORT,
                community: SecretString::from("public".to_string()),
                version: SnmpVersion::default(),
            },
            interface: "1".into(),
            direction: Direction::default(),
            unit: Unit::default(),
            duration: Duration::from_secs(30),
            samples: 3,
            thresholds: Thresholds::default(),
        }
    }
}

impl CheckConfig {
    /// Pre-flight validation. Runs before any session is opened.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.samples < MIN_SAMPLES {
            return Err(CoreError::InvalidConfig {
                message: format!(
                    "number of samples must be at least {MIN_SAMPLES}, got {}",
                    self.samples
                ),
            });
        }
        self.interface_index()?;
        Ok(())
    }

    /// The interface identifier as a numeric table index.
    pub fn interface_index(&self) -> Result<u64, CoreError> {
        self.interface
            .trim()
            .parse::<u64>()
            .map_err(|_| CoreError::InvalidConfig {
                message: format!(
                    "interface must be a numeric ifIndex, got '{}'",
                    self.interface
                ),
            })
    }

    /// Sleep between consecutive reads: `duration / (samples - 1)`.
    pub fn sample_interval(&self) -> Duration {
        self.duration / self.samples.saturating_sub(1).max(1)
    }
}
