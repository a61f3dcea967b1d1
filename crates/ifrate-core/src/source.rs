// ── Counter sources ──
//
// The seam between the check logic and the protocol client. Production
// code reads through an `ifrate_snmp::Session`; tests plug in a scripted
// source.

use std::future::Future;

use ifrate_snmp::{ObjectId, Session};

/// Something that can read a single counter value by identifier.
///
/// A source is owned by one check run: every read (probe and samples) goes
/// through the same source, and [`CounterSource::close`] is called exactly
/// once when the run ends.
pub trait CounterSource: Sized {
    /// Read the current value of the counter at `oid`.
    fn read_counter(
        &mut self,
        oid: &ObjectId,
    ) -> impl Future<Output = Result<u64, ifrate_snmp::Error>>;

    /// Release the underlying session.
    fn close(self);
}

impl CounterSource for Session {
    fn read_counter(
        &mut self,
        oid: &ObjectId,
    ) -> impl Future<Output = Result<u64, ifrate_snmp::Error>> {
        self.get_counter(oid)
    }

    fn close(self) {
        Session::close(self);
    }
}
