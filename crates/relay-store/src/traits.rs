use relay_types::{ActivityEvent, ActivityStatus, ActivityTx, EventsPage};

use crate::error::StoreResult;

/// Per-actor, append-only-with-update event store.
///
/// Implementations must satisfy these invariants:
/// - `append` rejects a duplicate `(actor, id)` and leaves state untouched.
/// - After `append`, an actor holds at most the configured retention count;
///   the oldest events are evicted first.
/// - `update_status` never creates events.
/// - None of the operations block on I/O.
pub trait EventStore: Send + Sync {
    /// Append an event to the tail of its actor's sequence.
    fn append(&self, event: ActivityEvent) -> StoreResult<()>;

    /// Replace the status of an existing event and merge `tx` into its
    /// hashes. Returns the event as stored after the update.
    fn update_status(
        &self,
        actor: &str,
        id: &str,
        status: ActivityStatus,
        tx: Option<&ActivityTx>,
    ) -> StoreResult<ActivityEvent>;

    /// Read one page of an actor's events, oldest first.
    ///
    /// `limit` falls back to the default page size when absent or
    /// non-positive; an absent or malformed `cursor` reads from the start.
    /// An unknown actor yields an empty page.
    fn events(
        &self,
        actor: &str,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> StoreResult<EventsPage>;

    /// Drop all stored events.
    fn reset(&self) -> StoreResult<()>;
}
