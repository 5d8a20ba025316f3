use std::future::Future;
use std::sync::Arc;

use relay_linera::{LineraClient, LineraConfig, LineraResult, RemoteLedger};
use relay_store::{EventStore, InMemoryEventStore};
use relay_types::{resolve_limit, ActivityEvent, ActivityStatus, ActivityTx, EventsPage};

use crate::config::{BackendConfig, MirrorMode};
use crate::error::BackendResult;

/// Local store plus optional remote mirror.
pub struct Backend {
    store: Arc<dyn EventStore>,
    remote: Option<Arc<dyn RemoteLedger>>,
    config: BackendConfig,
}

impl Backend {
    /// Build a backend over a fresh in-memory store.
    pub fn new(config: BackendConfig, remote: Option<Arc<dyn RemoteLedger>>) -> Self {
        let store = Arc::new(InMemoryEventStore::new(config.retention));
        Self::with_store(store, config, remote)
    }

    pub fn with_store(
        store: Arc<dyn EventStore>,
        config: BackendConfig,
        remote: Option<Arc<dyn RemoteLedger>>,
    ) -> Self {
        Self {
            store,
            remote,
            config,
        }
    }

    /// Build a backend whose remote is active only if `linera` resolves to
    /// an application endpoint.
    pub fn from_linera_config(config: BackendConfig, linera: &LineraConfig) -> Self {
        let client = LineraClient::new(linera);
        let remote: Option<Arc<dyn RemoteLedger>> = match client.endpoint() {
            Some(endpoint) => {
                tracing::info!(endpoint, "linera mirror enabled");
                Some(Arc::new(client))
            }
            None => {
                tracing::info!("linera not configured, serving from local store only");
                None
            }
        };
        Self::new(config, remote)
    }

    pub fn is_remote_active(&self) -> bool {
        self.remote.is_some()
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn EventStore> {
        &self.store
    }

    /// Append locally, then mirror. A local failure is returned at once and
    /// the remote is never contacted.
    pub async fn append_event(&self, event: ActivityEvent) -> BackendResult<()> {
        self.store.append(event.clone())?;
        tracing::debug!(actor = %event.actor, id = %event.id, "event appended");

        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let actor = event.actor.clone();
            let id = event.id.clone();
            self.mirror("linera_append_failed", actor, id, async move {
                remote.append_event(&event).await
            })
            .await;
        }
        Ok(())
    }

    /// Update locally, then mirror the caller's `tx` as given.
    pub async fn update_event_status(
        &self,
        actor: &str,
        id: &str,
        status: ActivityStatus,
        tx: Option<&ActivityTx>,
    ) -> BackendResult<ActivityEvent> {
        let updated = self.store.update_status(actor, id, status, tx)?;
        tracing::debug!(actor, id, status = %status, "event status updated");

        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let (actor, id) = (actor.to_string(), id.to_string());
            let tx = tx.cloned();
            self.mirror("linera_update_failed", actor.clone(), id.clone(), async move {
                remote
                    .update_event_status(&actor, &id, status, tx.as_ref())
                    .await
            })
            .await;
        }
        Ok(updated)
    }

    /// Remote first when active; the local view on any remote failure.
    pub async fn get_events(
        &self,
        actor: &str,
        limit: Option<i64>,
        cursor: Option<&str>,
    ) -> BackendResult<EventsPage> {
        if let Some(remote) = &self.remote {
            let call = remote.get_events(actor, resolve_limit(limit), cursor);
            match tokio::time::timeout(self.config.remote_timeout, call).await {
                Ok(Ok(page)) => return Ok(page),
                Ok(Err(err)) => {
                    tracing::warn!(actor, error = %err.code(), "linera_get_failed")
                }
                Err(_) => tracing::warn!(actor, error = "timeout", "linera_get_failed"),
            }
        }
        Ok(self.store.events(actor, limit, cursor)?)
    }

    async fn mirror<F>(&self, failure: &'static str, actor: String, id: String, call: F)
    where
        F: Future<Output = LineraResult<()>> + Send + 'static,
    {
        let timeout = self.config.remote_timeout;
        let task = async move {
            match tokio::time::timeout(timeout, call).await {
                Ok(Ok(())) => tracing::debug!(actor = %actor, id = %id, "mirrored to linera"),
                Ok(Err(err)) => {
                    tracing::warn!(actor = %actor, id = %id, error = %err.code(), "{failure}")
                }
                Err(_) => tracing::warn!(actor = %actor, id = %id, error = "timeout", "{failure}"),
            }
        };

        match self.config.mirror {
            MirrorMode::Inline => task.await,
            MirrorMode::Detached => {
                tokio::spawn(task);
            }
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("remote_active", &self.is_remote_active())
            .field("config", &self.config)
            .finish()
    }
}
