// ── Core error types ──
//
// Failures a check can end in. Each maps to exactly one verdict; the
// `From<ifrate_snmp::Error>` impl sorts protocol failures into
// "could not connect" and "a read failed".

use thiserror::Error;

use crate::verdict::Verdict;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Pre-flight ───────────────────────────────────────────────────
    #[error("{message}")]
    InvalidConfig { message: String },

    // ── Protocol ─────────────────────────────────────────────────────
    #[error("cannot open session to {target}: {reason}")]
    Connection { target: String, reason: String },

    #[error("failed to read {oid}: {reason}")]
    Read { oid: String, reason: String },

    // ── Aggregation ──────────────────────────────────────────────────
    #[error("no usable sampling interval among {pairs} sample pairs (elapsed time was zero)")]
    NoObservations { pairs: usize },
}

impl CoreError {
    /// The verdict this failure reports as.
    pub fn verdict(&self) -> Verdict {
        match self {
            Self::InvalidConfig { .. } | Self::NoObservations { .. } => Verdict::Unknown,
            Self::Connection { .. } | Self::Read { .. } => Verdict::Critical,
        }
    }
}

// ── Conversion from protocol errors ──────────────────────────────────

impl From<ifrate_snmp::Error> for CoreError {
    fn from(err: ifrate_snmp::Error) -> Self {
        match err {
            ifrate_snmp::Error::Connect { target, source } => CoreError::Connection {
                target,
                reason: source.to_string(),
            },
            ifrate_snmp::Error::InvalidOid { input, reason } => CoreError::InvalidConfig {
                message: format!("invalid object identifier '{input}': {reason}"),
            },
            ifrate_snmp::Error::NoSuchObject { oid } => CoreError::Read {
                oid,
                reason: "no such object on agent".into(),
            },
            ifrate_snmp::Error::Agent { oid, status } => CoreError::Read {
                oid,
                reason: format!("agent returned error status {status}"),
            },
            ifrate_snmp::Error::EmptyResponse { oid } => CoreError::Read {
                oid,
                reason: "empty response".into(),
            },
            ifrate_snmp::Error::UnexpectedType { oid, found } => CoreError::Read {
                oid,
                reason: format!("not a counter: {found}"),
            },
            ifrate_snmp::Error::Request { oid, reason } => CoreError::Read { oid, reason },
        }
    }
}
