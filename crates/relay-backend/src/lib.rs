//! Backend orchestrating the local event store and the remote ledger.
//!
//! Writes commit to the local store first; its result is the caller's
//! result. The remote ledger is then mirrored best-effort under a timeout,
//! and its outcome is only logged. Reads go the other way: the remote is
//! asked first when active, and the local view is the fallback.

pub mod backend;
pub mod config;
pub mod error;

pub use backend::Backend;
pub use config::{BackendConfig, MirrorMode};
pub use error::{BackendError, BackendResult};
