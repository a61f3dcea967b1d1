use thiserror::Error;

/// Top-level error type for the `ifrate-snmp` crate.
///
/// Separates "the agent answered, but has no such object" from every other
/// failure. Only the former is a legitimate reason to fall back to another
/// counter family; everything else is a read failure.
#[derive(Debug, Error)]
pub enum Error {
    // ── Session ─────────────────────────────────────────────────────
    /// The session could not be opened (DNS failure, bind failure, etc.)
    #[error("Cannot open SNMP session to {target}: {source}")]
    Connect {
        target: String,
        #[source]
        source: std::io::Error,
    },

    // ── Agent responses ─────────────────────────────────────────────
    /// The agent reported the object as absent (noSuchObject,
    /// noSuchInstance, endOfMibView, or v1 noSuchName).
    #[error("No such object: {oid}")]
    NoSuchObject { oid: String },

    /// The agent answered with a non-zero error status.
    #[error("Agent returned error status {status} for {oid}")]
    Agent { oid: String, status: u32 },

    /// The response carried no variable bindings at all.
    #[error("Empty response for {oid}")]
    EmptyResponse { oid: String },

    /// The value is not something we can treat as an unsigned counter.
    #[error("Unexpected value type for {oid}: {found}")]
    UnexpectedType { oid: String, found: String },

    // ── Transport ───────────────────────────────────────────────────
    /// Send, receive, or decode failure on the wire.
    #[error("SNMP request for {oid} failed: {reason}")]
    Request { oid: String, reason: String },

    // ── Input ───────────────────────────────────────────────────────
    /// Object identifier text could not be parsed.
    #[error("Invalid object identifier '{input}': {reason}")]
    InvalidOid { input: String, reason: String },
}

impl Error {
    /// Returns `true` if the agent explicitly reported the object as absent.
    ///
    /// Connection and transport failures are never "absent".
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::NoSuchObject { .. })
    }

    /// The object identifier the failing request targeted, if any.
    pub fn oid(&self) -> Option<&str> {
        match self {
            Self::NoSuchObject { oid }
            | Self::Agent { oid, .. }
            | Self::EmptyResponse { oid }
            | Self::UnexpectedType { oid, .. }
            | Self::Request { oid, .. } => Some(oid),
            Self::Connect { .. } | Self::InvalidOid { .. } => None,
        }
    }
}
