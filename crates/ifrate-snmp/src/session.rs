// SNMP session
//
// Wraps `snmp2::AsyncSession` with counter-oriented GET semantics: one
// request, one variable binding, one unsigned value. Absence reported by the
// agent is kept distinct from transport failures so callers can decide
// whether a fallback is legitimate.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use snmp2::{AsyncSession, Oid, Value};
use tracing::{debug, trace};

use crate::error::Error;
use crate::oid::ObjectId;

/// SNMPv1 `noSuchName` error status.
const ERROR_STATUS_NO_SUCH_NAME: u32 = 2;

pub const DEFAULT_PORT: u16 = 161;

/// Protocol version used for the session.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SnmpVersion {
    V1,
    /// Required for 64-bit counters.
    #[default]
    V2c,
}

/// Everything needed to open a session against one agent.
#[derive(Clone)]
pub struct SessionConfig {
    pub host: String,
    pub port: u16,
    pub community: SecretString,
    pub version: SnmpVersion,
}

impl SessionConfig {
    /// `host:port`, bracketing IPv6 literals.
    pub fn target(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("community", &"[REDACTED]")
            .field("version", &self.version)
            .finish()
    }
}

/// An open session to a single SNMP agent.
///
/// Acquired once per check and released with [`Session::close`].
pub struct Session {
    inner: AsyncSession,
    target: String,
}

impl Session {
    /// Open a UDP session to the agent described by `config`.
    pub async fn open(config: &SessionConfig) -> Result<Self, Error> {
        let target = config.target();
        let community = config.community.expose_secret().as_bytes();
        let destination = (config.host.as_str(), config.port);

        debug!(%target, version = %config.version, "opening SNMP session");

        let inner = match config.version {
            SnmpVersion::V1 => AsyncSession::new_v1(destination, community, 0).await,
            SnmpVersion::V2c => AsyncSession::new_v2c(destination, community, 0).await,
        }
        .map_err(|source| Error::Connect {
            target: target.clone(),
            source,
        })?;

        Ok(Self { inner, target })
    }

    /// Issue a single GET and interpret the bound value as an unsigned counter.
    pub async fn get_counter(&mut self, oid: &ObjectId) -> Result<u64, Error> {
        let text = oid.to_string();
        let wire_oid = Oid::from(oid.arcs()).map_err(|e| Error::InvalidOid {
            input: text.clone(),
            reason: format!("{e:?}"),
        })?;

        debug!(target = %self.target, oid = %text, "GET");

        let mut pdu = self
            .inner
            .get(&wire_oid)
            .await
            .map_err(|e| Error::Request {
                oid: text.clone(),
                reason: format!("{e:?}"),
            })?;

        match pdu.error_status {
            0 => {}
            ERROR_STATUS_NO_SUCH_NAME => return Err(Error::NoSuchObject { oid: text }),
            status => return Err(Error::Agent { oid: text, status }),
        }

        let Some((_name, value)) = pdu.varbinds.next() else {
            return Err(Error::EmptyResponse { oid: text });
        };

        let counter = counter_from_value(&text, &value)?;
        trace!(oid = %text, counter, "GET ok");
        Ok(counter)
    }

    /// Release the session. Consumes `self` so it cannot be used again.
    pub fn close(self) {
        debug!(target = %self.target, "closing SNMP session");
        drop(self.inner);
    }
}

/// Interpret a bound value as an unsigned counter reading.
///
/// Exception values map to [`Error::NoSuchObject`]; non-counter types are
/// rejected rather than coerced.
pub(crate) fn counter_from_value(oid: &str, value: &Value<'_>) -> Result<u64, Error> {
    match value {
        Value::Counter32(v) | Value::Unsigned32(v) => Ok(u64::from(*v)),
        Value::Counter64(v) => Ok(*v),
        Value::Integer(v) => u64::try_from(*v).map_err(|_| Error::UnexpectedType {
            oid: oid.into(),
            found: format!("negative integer {v}"),
        }),
        Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView => {
            Err(Error::NoSuchObject { oid: oid.into() })
        }
        other => Err(Error::UnexpectedType {
            oid: oid.into(),
            found: format!("{other:?}"),
        }),
    }
}
