//! Local activity event storage for the relayer.
//!
//! Events are kept per actor in insertion order, which is also chronological
//! order. Each actor's sequence is bounded by a retention count; when an
//! append pushes the sequence past it, the oldest events are evicted in the
//! same call.
//!
//! # Design Rules
//!
//! 1. `(actor, id)` is unique within the retention window.
//! 2. Only `status` and `tx` of a stored event ever change.
//! 3. Operations on one actor are serialized; different actors proceed in
//!    parallel.
//! 4. Reads page by offset; the cursor is the decimal offset of the next page.
//!
//! All backends implement the [`EventStore`] trait:
//!
//! - [`InMemoryEventStore`] -- process-local store used by the relayer

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryEventStore, DEFAULT_RETENTION};
pub use traits::EventStore;
