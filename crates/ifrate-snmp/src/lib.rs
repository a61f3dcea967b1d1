// ifrate-snmp: Minimal async SNMP client for single-value counter reads.

pub mod error;
pub mod oid;
pub mod session;

pub use error::Error;
pub use oid::ObjectId;
pub use session::{Session, SessionConfig, SnmpVersion};
