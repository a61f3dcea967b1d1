// Numeric object identifiers.
//
// Kept independent of the wire crate so identifier templates can be built,
// compared, and printed without touching a socket.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::Error;

/// A numeric SNMP object identifier, e.g. `1.3.6.1.2.1.2.2.1.10.1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(Vec<u64>);

impl ObjectId {
    /// Build an identifier from its arcs.
    pub fn from_arcs(arcs: &[u64]) -> Self {
        Self(arcs.to_vec())
    }

    /// Return a new identifier with `arc` appended.
    #[must_use]
    pub fn child(&self, arc: u64) -> Self {
        let mut arcs = self.0.clone();
        arcs.push(arc);
        Self(arcs)
    }

    pub fn arcs(&self) -> &[u64] {
        &self.0
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| Error::InvalidOid {
            input: s.into(),
            reason: reason.into(),
        };

        let trimmed = s.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(invalid("empty identifier"));
        }

        let arcs = trimmed
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .map_err(|_| invalid(&format!("arc '{arc}' is not a non-negative integer")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if arcs.len() < 2 {
            return Err(invalid("at least two arcs required"));
        }

        Ok(Self(arcs))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for arc in &self.0 {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
