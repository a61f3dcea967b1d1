//! Clap derive structures for the `ifrate` plugin.
//!
//! Flag letters follow the long-standing `check_*` plugin conventions so
//! existing service definitions keep working.

use clap::{ArgAction, Parser, ValueEnum};

const THRESHOLD_NOTE: &str = "\
Thresholds are inclusive: a rate equal to --critical is CRITICAL.
Both thresholds default to 0, so without -w/-c every run reports CRITICAL.

Exit codes: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN.";

/// ifrate -- average interface traffic rate over SNMP
#[derive(Debug, Parser)]
#[command(
    name = "ifrate",
    version,
    about = "Check an interface's average traffic rate over SNMP",
    long_about = "Samples an interface octet counter several times across an observation\n\
        window, averages the per-interval rates, and reports OK, WARNING, or\n\
        CRITICAL against the given thresholds.\n\n\
        64-bit counters (ifHCInOctets/ifHCOutOctets) are used when the agent\n\
        has them, 32-bit counters (ifInOctets/ifOutOctets) otherwise.",
    after_help = THRESHOLD_NOTE
)]
pub struct Cli {
    /// Warning threshold, in bits/s (bytes/s with --bytes)
    #[arg(long, short = 'w', value_name = "RATE")]
    pub warning: Option<u64>,

    /// Critical threshold, in bits/s (bytes/s with --bytes)
    #[arg(long, short = 'c', value_name = "RATE")]
    pub critical: Option<u64>,

    /// Agent hostname or address [default: localhost]
    #[arg(long, short = 'H', value_name = "HOST")]
    pub hostname: Option<String>,

    /// SNMP community [default: public]
    #[arg(long, short = 'C', env = "IFRATE_COMMUNITY", hide_env_values = true)]
    pub community: Option<String>,

    /// Interface index (ifIndex) [default: 1]
    #[arg(long, short = 'I', value_name = "IFINDEX")]
    pub interface: Option<String>,

    /// Check inbound traffic (default)
    #[arg(long, short = 'i', conflicts_with = "outbound")]
    pub inbound: bool,

    /// Check outbound traffic
    #[arg(long, short = 'o')]
    pub outbound: bool,

    /// Report bytes/s (Bps) instead of bits/s (bps)
    #[arg(long, short = 'B')]
    pub bytes: bool,

    /// Observation window in seconds [default: 30]
    #[arg(long, short = 't', value_name = "SECONDS")]
    pub time: Option<u64>,

    /// Number of samples across the window, at least 2 [default: 3]
    #[arg(long, short = 'n', value_name = "COUNT")]
    pub number: Option<u32>,

    /// Agent UDP port [default: 161]
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// SNMP protocol version [default: v2c]
    #[arg(long, value_name = "VERSION", value_parser = ["v1", "v2c"], ignore_case = true)]
    pub snmp_version: Option<String>,

    /// Device profile from the config file
    #[arg(long, short = 'P', env = "IFRATE_PROFILE")]
    pub profile: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub completions: Option<clap_complete::Shell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single status line (monitoring systems)
    Text,
    /// One JSON object with the per-interval detail
    Json,
}
