//! CLI error types with miette diagnostics.
//!
//! Every failure ends the run with a verdict: pre-flight problems are
//! UNKNOWN, anything that goes wrong talking to the agent is CRITICAL.

use miette::Diagnostic;
use thiserror::Error;

use ifrate_config::ConfigError;
use ifrate_core::{CoreError, Verdict};

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Pre-flight ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(ifrate::usage), help("Run: ifrate --help"))]
    Usage { message: String },

    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(ifrate::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("profile '{name}' not found in configuration")]
    #[diagnostic(
        code(ifrate::profile_not_found),
        help("Available profiles: {available}\nConfig file: {path}")
    )]
    ProfileNotFound {
        name: String,
        available: String,
        path: String,
    },

    #[error("cannot load configuration: {0}")]
    #[diagnostic(code(ifrate::config))]
    Config(Box<ConfigError>),

    // ── Agent ────────────────────────────────────────────────────────
    #[error("cannot open session to {target}: {reason}")]
    #[diagnostic(
        code(ifrate::connection_failed),
        help("Check the hostname and port (-H, -p).")
    )]
    Connection { target: String, reason: String },

    #[error("failed to read {oid}: {reason}")]
    #[diagnostic(
        code(ifrate::read_failed),
        help(
            "Check that the agent is reachable, the community (-C) is correct,\n\
             and interface index exists on the device."
        )
    )]
    Read { oid: String, reason: String },

    // ── Sampling ─────────────────────────────────────────────────────
    #[error("no usable sampling interval among {pairs} sample pairs")]
    #[diagnostic(
        code(ifrate::no_interval),
        help("Use a longer observation window (-t) or fewer samples (-n).")
    )]
    NoObservations { pairs: usize },
}

impl CliError {
    /// The verdict this failure is reported as.
    pub fn verdict(&self) -> Verdict {
        match self {
            Self::Connection { .. } | Self::Read { .. } => Verdict::Critical,
            Self::Usage { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::Config(_)
            | Self::NoObservations { .. } => Verdict::Unknown,
        }
    }

    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        self.verdict().exit_code()
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfig { message } => CliError::Validation {
                field: "arguments".into(),
                reason: message,
            },
            CoreError::Connection { target, reason } => CliError::Connection { target, reason },
            CoreError::Read { oid, reason } => CliError::Read { oid, reason },
            CoreError::NoObservations { pairs } => CliError::NoObservations { pairs },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name, available } => CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
                path: ifrate_config::config_path().display().to_string(),
            },
            other => CliError::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn agent_failures_are_critical() {
        let err = CliError::from(CoreError::Read {
            oid: "1.3.6.1.2.1.2.2.1.10.1".into(),
            reason: "Receive".into(),
        });
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "failed to read 1.3.6.1.2.1.2.2.1.10.1: Receive");
    }

    #[test]
    fn preflight_failures_are_unknown() {
        let err = CliError::from(CoreError::InvalidConfig {
            message: "number of samples must be at least 2, got 1".into(),
        });
        assert_eq!(err.exit_code(), 3);

        let err = CliError::from(ConfigError::ProfileNotFound {
            name: "core".into(),
            available: vec![],
        });
        assert_eq!(err.exit_code(), 3);
    }
}
