use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use relay_types::{
    resolve_limit, resolve_offset, ActivityEvent, ActivityStatus, ActivityTx, EventsPage,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::EventStore;

/// Retention used when a store is configured with zero.
pub const DEFAULT_RETENTION: usize = 300;

type Sequence = Arc<Mutex<VecDeque<ActivityEvent>>>;

/// In-memory event store.
///
/// The actor map sits behind a `RwLock` that is only write-locked to add a
/// new actor or reset; each actor's sequence has its own `Mutex`, so
/// operations on different actors never wait on each other.
pub struct InMemoryEventStore {
    retention: usize,
    actors: RwLock<HashMap<String, Sequence>>,
}

impl InMemoryEventStore {
    pub fn new(retention: usize) -> Self {
        let retention = if retention == 0 {
            DEFAULT_RETENTION
        } else {
            retention
        };
        Self {
            retention,
            actors: RwLock::new(HashMap::new()),
        }
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Number of actors with at least one retained event.
    pub fn actor_count(&self) -> StoreResult<usize> {
        let actors = self.read_actors()?;
        let mut count = 0;
        for seq in actors.values() {
            if !lock(seq)?.is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Number of events currently retained for `actor`.
    pub fn len(&self, actor: &str) -> StoreResult<usize> {
        match self.sequence(actor)? {
            Some(seq) => Ok(lock(&seq)?.len()),
            None => Ok(0),
        }
    }

    fn read_actors(
        &self,
    ) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<String, Sequence>>> {
        self.actors
            .read()
            .map_err(|_| StoreError::Unavailable("actor map read lock poisoned".into()))
    }

    fn sequence(&self, actor: &str) -> StoreResult<Option<Sequence>> {
        Ok(self.read_actors()?.get(actor).cloned())
    }

    fn sequence_or_insert(&self, actor: &str) -> StoreResult<Sequence> {
        if let Some(seq) = self.sequence(actor)? {
            return Ok(seq);
        }
        let mut actors = self
            .actors
            .write()
            .map_err(|_| StoreError::Unavailable("actor map write lock poisoned".into()))?;
        Ok(actors.entry(actor.to_string()).or_default().clone())
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}

impl EventStore for InMemoryEventStore {
    fn append(&self, event: ActivityEvent) -> StoreResult<()> {
        let seq = self.sequence_or_insert(&event.actor)?;
        let mut events = lock(&seq)?;

        if events.iter().any(|existing| existing.id == event.id) {
            return Err(StoreError::EventExists {
                actor: event.actor,
                id: event.id,
            });
        }

        events.push_back(event);
        while events.len() > self.retention {
            if let Some(evicted) = events.pop_front() {
                tracing::debug!(actor = %evicted.actor, id = %evicted.id, "evicted event past retention");
            }
        }
        Ok(())
    }

    fn update_status(
        &self,
        actor: &str,
        id: &str,
        status: ActivityStatus,
        tx: Option<&ActivityTx>,
    ) -> StoreResult<ActivityEvent> {
        let not_found = || StoreError::NotFound {
            actor: actor.to_string(),
            id: id.to_string(),
        };

        let seq = self.sequence(actor)?.ok_or_else(not_found)?;
        let mut events = lock(&seq)?;
        let event = events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(not_found)?;

        event.apply_status(status, tx);
        Ok(event.clone())
    }

    fn events(
        &self,
        actor: &str,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> StoreResult<EventsPage> {
        let Some(seq) = self.sequence(actor)? else {
            return Ok(EventsPage::empty());
        };
        let events = lock(&seq)?;

        let offset = resolve_offset(cursor);
        let limit = resolve_limit(limit);
        let items: Vec<ActivityEvent> = events.iter().skip(offset).take(limit).cloned().collect();

        let next_offset = offset + items.len();
        let next_cursor = (next_offset < events.len()).then(|| next_offset.to_string());

        Ok(EventsPage { items, next_cursor })
    }

    /// Sequences are emptied in place rather than dropped, so an append
    /// already holding a sequence handle stays visible after the reset.
    fn reset(&self) -> StoreResult<()> {
        let actors = self
            .actors
            .write()
            .map_err(|_| StoreError::Unavailable("actor map write lock poisoned".into()))?;
        for seq in actors.values() {
            lock(seq)?.clear();
        }
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryEventStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let actors = self.actor_count().unwrap_or_default();
        f.debug_struct("InMemoryEventStore")
            .field("retention", &self.retention)
            .field("actor_count", &actors)
            .finish()
    }
}

fn lock(seq: &Sequence) -> StoreResult<MutexGuard<'_, VecDeque<ActivityEvent>>> {
    seq.lock()
        .map_err(|_| StoreError::Unavailable("actor sequence lock poisoned".into()))
}
