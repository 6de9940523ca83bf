//! CRUD probe
//!
//! Runs create → read → update → delete against a scratch-data HTTP collection
//! and collects every failed check in an [`AssertionLedger`] instead of
//! stopping at the first one.

pub mod config;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod probe;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use ledger::{AssertionLedger, Outcome, Step};
pub use model::{ResourceId, UserRecord};
pub use probe::CrudProbe;
pub use transport::{HttpTransport, ReqwestTransport, TransportResponse};
