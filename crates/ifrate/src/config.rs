//! CLI configuration: merges flags with `ifrate_config` profiles.
//!
//! Every setting resolves flag > profile > config defaults > built-in
//! default, then the result is validated before any session is opened.

use std::time::Duration;

use secrecy::SecretString;

use ifrate_config::{Config, ConfigError, Profile, resolve_community};
use ifrate_core::verdict::Thresholds;
use ifrate_core::{CheckConfig, Direction, Unit};
use ifrate_snmp::{SessionConfig, SnmpVersion};

use crate::cli::Cli;
use crate::error::CliError;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_COMMUNITY: &str = "public";
const DEFAULT_INTERFACE: &str = "1";

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(cli: &Cli, config: &Config) -> Option<String> {
    cli.profile
        .clone()
        .or_else(|| config.default_profile.clone())
}

/// Build the validated `CheckConfig` for this run.
pub fn resolve_check_config(cli: &Cli, config: &Config) -> Result<CheckConfig, CliError> {
    let profile_name = active_profile_name(cli, config);
    let profile = match profile_name.as_deref() {
        Some(name) => config.profile(name)?.clone(),
        None => Profile::default(),
    };

    // 1. Agent
    let host = cli
        .hostname
        .clone()
        .or_else(|| profile.host.clone())
        .unwrap_or_else(|| DEFAULT_HOST.into());
    let port = cli.port.or(profile.port).unwrap_or(config.defaults.port);
    let version = match cli.snmp_version.as_deref() {
        Some(text) => parse_snmp_version(text)?,
        None => profile
            .snmp_version
            .unwrap_or(config.defaults.snmp_version),
    };
    let community = resolve_community_with_flag(cli, &profile, profile_name.as_deref())?;

    // 2. Counter
    let interface = cli
        .interface
        .clone()
        .or_else(|| profile.interface.clone())
        .unwrap_or_else(|| DEFAULT_INTERFACE.into());
    let direction = if cli.outbound {
        Direction::Outbound
    } else {
        Direction::Inbound
    };
    let unit = if cli.bytes { Unit::Bytes } else { Unit::Bits };

    // 3. Sampling window
    let duration = Duration::from_secs(cli.time.unwrap_or(config.defaults.time));
    let samples = cli.number.unwrap_or(config.defaults.samples);

    // 4. Thresholds
    let thresholds = Thresholds {
        warning: cli.warning.or(profile.warning).unwrap_or(0),
        critical: cli.critical.or(profile.critical).unwrap_or(0),
    };

    let check = CheckConfig {
        session: SessionConfig {
            host,
            port,
            community,
            version,
        },
        interface,
        direction,
        unit,
        duration,
        samples,
        thresholds,
    };
    check.validate()?;
    Ok(check)
}

fn parse_snmp_version(text: &str) -> Result<SnmpVersion, CliError> {
    text.parse().map_err(|_| CliError::Validation {
        field: "snmp-version".into(),
        reason: format!("expected v1 or v2c, got '{text}'"),
    })
}

/// Community from the flag, else the profile's credential chain, else `public`.
fn resolve_community_with_flag(
    cli: &Cli,
    profile: &Profile,
    profile_name: Option<&str>,
) -> Result<SecretString, CliError> {
    if let Some(ref community) = cli.community {
        return Ok(SecretString::from(community.clone()));
    }
    let Some(name) = profile_name else {
        return Ok(SecretString::from(DEFAULT_COMMUNITY.to_string()));
    };
    match resolve_community(profile, name) {
        Ok(secret) => Ok(secret),
        Err(ConfigError::NoCredentials { .. }) => {
            Ok(SecretString::from(DEFAULT_COMMUNITY.to_string()))
        }
        Err(other) => Err(other.into()),
    }
}
