// ── Counter selection ──
//
// Decides once per run which object identifier to poll. The IF-MIB
// high-capacity table (ifXTable, 64-bit) is preferred; agents that report it
// as absent get the MIB-II ifTable (32-bit) instead.

use serde::Serialize;
use tracing::{debug, info};

use ifrate_snmp::ObjectId;

use crate::config::{CheckConfig, Direction};
use crate::error::CoreError;
use crate::source::CounterSource;

/// IF-MIB::ifEntry columns, `1.3.6.1.2.1.2.2.1`.
const IF_ENTRY: [u64; 9] = [1, 3, 6, 1, 2, 1, 2, 2, 1];
/// IF-MIB::ifXEntry columns, `1.3.6.1.2.1.31.1.1.1`.
const IF_X_ENTRY: [u64; 10] = [1, 3, 6, 1, 2, 1, 31, 1, 1, 1];

/// Which counter table the run polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CounterFamily {
    /// ifInOctets / ifOutOctets, 32-bit.
    Legacy,
    /// ifHCInOctets / ifHCOutOctets, 64-bit.
    Extended,
}

impl CounterFamily {
    /// Column sub-identifier for `direction` within this family's table.
    pub fn column(self, direction: Direction) -> u64 {
        match (self, direction) {
            (Self::Legacy, Direction::Inbound) => 10,
            (Self::Legacy, Direction::Outbound) => 16,
            (Self::Extended, Direction::Inbound) => 6,
            (Self::Extended, Direction::Outbound) => 10,
        }
    }

    /// Counter width in bits.
    pub fn width(self) -> u32 {
        match self {
            Self::Legacy => 32,
            Self::Extended => 64,
        }
    }

    /// Value added to a reading that wrapped past the counter's maximum.
    pub fn wrap_modulus(self) -> u128 {
        1u128 << self.width()
    }

    /// Fully-qualified identifier for `direction` on interface `if_index`.
    pub fn oid(self, direction: Direction, if_index: u64) -> ObjectId {
        let entry: &[u64] = match self {
            Self::Legacy => &IF_ENTRY,
            Self::Extended => &IF_X_ENTRY,
        };
        ObjectId::from_arcs(entry)
            .child(self.column(direction))
            .child(if_index)
    }
}

/// The counter a run polls, resolved once before sampling starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterDescriptor {
    pub family: CounterFamily,
    pub oid: ObjectId,
}

impl CounterDescriptor {
    pub fn new(family: CounterFamily, direction: Direction, if_index: u64) -> Self {
        Self {
            family,
            oid: family.oid(direction, if_index),
        }
    }
}

/// Probe for 64-bit counters and pick the family to poll.
///
/// Only an explicit "no such object" answer selects the legacy family. Any
/// other failure (unreachable agent, bad community, decode error) is
/// returned as a read error.
pub async fn select_counter<S: CounterSource>(
    source: &mut S,
    config: &CheckConfig,
) -> Result<CounterDescriptor, CoreError> {
    let if_index = config.interface_index()?;
    let extended = CounterDescriptor::new(CounterFamily::Extended, config.direction, if_index);

    debug!(oid = %extended.oid, "probing for 64-bit counters");

    match source.read_counter(&extended.oid).await {
        Ok(_) => {
            info!(oid = %extended.oid, "using 64-bit counters");
            Ok(extended)
        }
        Err(err) if err.is_absent() => {
            let legacy = CounterDescriptor::new(CounterFamily::Legacy, config.direction, if_index);
            info!(oid = %legacy.oid, "64-bit counters unavailable, using 32-bit counters");
            Ok(legacy)
        }
        Err(err) => Err(err.into()),
    }
}
