// ── Verdicts and thresholds ──
//
// Tri-state health plus UNKNOWN, mapped onto the exit codes monitoring
// systems (Nagios, Icinga, Naemon) expect from a plugin.

use serde::Serialize;

/// Plugin exit codes.
pub mod exit_code {
    pub const OK: i32 = 0;
    pub const WARNING: i32 = 1;
    pub const CRITICAL: i32 = 2;
    pub const UNKNOWN: i32 = 3;
}

/// Outcome of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verdict {
    Ok,
    Warning,
    Critical,
    /// The check could not produce a rate (bad arguments, no usable interval).
    Unknown,
}

impl Verdict {
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Ok => exit_code::OK,
            Self::Warning => exit_code::WARNING,
            Self::Critical => exit_code::CRITICAL,
            Self::Unknown => exit_code::UNKNOWN,
        }
    }
}

/// Warning and critical thresholds, in the configured rate unit.
///
/// Both default to `0`. With the defaults any rate, including an idle
/// interface at exactly 0, is `>= critical` and the check reports CRITICAL.
/// Callers are expected to pass real thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Thresholds {
    pub warning: u64,
    pub critical: u64,
}

impl Thresholds {
    /// Compare `rate` against the thresholds. Both bounds are inclusive.
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(&self, rate: f64) -> Verdict {
        if rate >= self.critical as f64 {
            Verdict::Critical
        } else if rate >= self.warning as f64 {
            Verdict::Warning
        } else {
            Verdict::Ok
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn thresholds(warning: u64, critical: u64) -> Thresholds {
        Thresholds { warning, critical }
    }

    #[test]
    fn below_warning_is_ok() {
        assert_eq!(thresholds(1000, 5000).evaluate(800.0), Verdict::Ok);
    }

    #[test]
    fn boundaries_are_inclusive() {
        let t = thresholds(1000, 5000);
        assert_eq!(t.evaluate(1000.0), Verdict::Warning);
        assert_eq!(t.evaluate(4999.9), Verdict::Warning);
        assert_eq!(t.evaluate(5000.0), Verdict::Critical);
    }

    #[test]
    fn critical_wins_over_warning() {
        // Misordered thresholds still check critical first.
        assert_eq!(thresholds(9000, 100).evaluate(500.0), Verdict::Critical);
    }

    #[test]
    fn zero_thresholds_trip_on_any_rate() {
        let t = Thresholds::default();
        assert_eq!(t.evaluate(0.0), Verdict::Critical);
        assert_eq!(t.evaluate(1.0), Verdict::Critical);
    }

    #[test]
    fn exit_codes_follow_plugin_convention() {
        assert_eq!(Verdict::Ok.exit_code(), 0);
        assert_eq!(Verdict::Warning.exit_code(), 1);
        assert_eq!(Verdict::Critical.exit_code(), 2);
        assert_eq!(Verdict::Unknown.exit_code(), 3);
        assert_eq!(Verdict::Warning.to_string(), "WARNING");
    }
}
