//! Shared configuration for ifrate.
//!
//! TOML device profiles, layered defaults (built-in → file → environment),
//! and community resolution (env + keyring + plaintext). The CLI merges
//! these with its flags to build an `ifrate_core::CheckConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ifrate_snmp::SnmpVersion;

/// Keyring service name for stored communities.
const KEYRING_SERVICE: &str = "ifrate";

const CONFIG_FILE: &str = "config.toml";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("profile '{name}' not found in configuration")]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("no community configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named device profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub snmp_version: SnmpVersion,

    /// Observation window in seconds.
    #[serde(default = "default_time")]
    pub time: u64,

    #[serde(default = "default_samples")]
    pub samples: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            port: default_port(),
            snmp_version: SnmpVersion::default(),
            time: default_time(),
            samples: default_samples(),
        }
    }
}

fn default_port() -> u16 {
    161
}
fn default_time() -> u64 {
    30
}
fn default_samples() -> u32 {
    3
}

/// A named device profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Agent hostname or address.
    pub host: Option<String>,

    /// Community string in plaintext. Prefer keyring or env var.
    pub community: Option<String>,

    /// Environment variable name containing the community.
    pub community_env: Option<String>,

    pub port: Option<u16>,

    pub snmp_version: Option<SnmpVersion>,

    /// Default interface index for this device.
    pub interface: Option<String>,

    pub warning: Option<u64>,

    pub critical: Option<u64>,
}

impl Config {
    /// Look up a profile by name.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles.get(name).ok_or_else(|| {
            let mut available: Vec<String> = self.profiles.keys().cloned().collect();
            available.sort();
            ConfigError::ProfileNotFound {
                name: name.into(),
                available,
            }
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Platform config file path, e.g. `~/.config/ifrate/config.toml` on Linux.
///
/// Falls back to `$HOME/.config/ifrate` when no home directory can be
/// determined by `directories`.
pub fn config_path() -> PathBuf {
    let dir = ProjectDirs::from("org", "ifrate", "ifrate").map_or_else(
        || {
            std::env::var_os("HOME")
                .map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".config")
                .join("ifrate")
        },
        |dirs| dirs.config_dir().to_path_buf(),
    );
    dir.join(CONFIG_FILE)
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from `path` layered over built-in defaults and under
/// `IFRATE_`-prefixed environment variables (`IFRATE_DEFAULTS__PORT=1161`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("IFRATE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load the config from the canonical path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a profile's community from the credential chain.
pub fn resolve_community(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's community_env → env var lookup
    if let Some(ref env_name) = profile.community_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/community")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref community) = profile.community {
        return Ok(SecretString::from(community.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}
