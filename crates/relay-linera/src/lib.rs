//! Client for the Linera application that durably records activity events.
//!
//! The application exposes a GraphQL service per chain. Every operation is a
//! single POST of `{query, variables}`; the `events` query returns its page
//! as a JSON-encoded string inside `data.events`, so reads are decoded twice.
//!
//! The client performs exactly one round-trip per call. It never retries and
//! imposes no timeout of its own; callers bound it.

pub mod client;
pub mod config;
pub mod error;
pub mod graphql;

pub use client::{LineraClient, RemoteLedger};
pub use config::{load_ids, resolve_app_endpoint, LineraConfig, LineraIds};
pub use error::{LineraError, LineraResult};
