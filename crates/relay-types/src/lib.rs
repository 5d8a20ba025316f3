//! Foundation types for the activity relayer.
//!
//! Every other relayer crate depends on `relay-types`. The types here mirror
//! the JSON wire shape exactly (camelCase field names, absent optionals are
//! omitted) so that an event decoded from a client request can be stored,
//! mirrored to the remote ledger, and served back without translation.
//!
//! # Key Types
//!
//! - [`ActivityEvent`] -- one bridge/swap/deploy/contract-call record
//! - [`ActivityStatus`] / [`ActivityKind`] -- closed enums with wire names
//! - [`ActivityTx`] -- source/destination transaction hashes, merged on update
//! - [`StatusUpdate`] -- the status-update request payload
//! - [`EventsPage`] -- one page of events plus the next cursor

pub mod error;
pub mod event;
pub mod page;
pub mod update;

pub use error::TypeError;
pub use event::{
    ActivityAi, ActivityApp, ActivityChains, ActivityEvent, ActivityKind, ActivityRefs,
    ActivitySignals, ActivitySignalsMeta, ActivityStatus, ActivityToken, ActivityTx, AiMode,
    AiVerdict, TokenSymbol, APP_ID,
};
pub use page::{resolve_limit, resolve_offset, EventsPage, DEFAULT_PAGE_LIMIT};
pub use update::StatusUpdate;
