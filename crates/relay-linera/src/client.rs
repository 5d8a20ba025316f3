use async_trait::async_trait;
use relay_types::{ActivityEvent, ActivityStatus, ActivityTx, EventsPage};
use serde::Serialize;
use serde_json::Value;

use crate::config::{resolve_app_endpoint, LineraConfig};
use crate::error::{LineraError, LineraResult};
use crate::graphql::{
    cursor_variable, limit_variable, AppendEventVars, EventsVars, GraphqlRequest,
    GraphqlResponse, RemotePage, UpdateEventStatusVars, APPEND_EVENT_MUTATION, EVENTS_QUERY,
    UPDATE_EVENT_STATUS_MUTATION,
};

/// Durable remote copy of the activity log.
#[async_trait]
pub trait RemoteLedger: Send + Sync {
    async fn append_event(&self, event: &ActivityEvent) -> LineraResult<()>;

    /// `tx` is forwarded exactly as the caller supplied it; merging is the
    /// remote's concern.
    async fn update_event_status(
        &self,
        actor: &str,
        id: &str,
        status: ActivityStatus,
        tx: Option<&ActivityTx>,
    ) -> LineraResult<()>;

    async fn get_events(
        &self,
        actor: &str,
        limit: usize,
        cursor: Option<&str>,
    ) -> LineraResult<EventsPage>;
}

/// [`RemoteLedger`] over the Linera application's GraphQL endpoint.
#[derive(Clone, Debug)]
pub struct LineraClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl LineraClient {
    pub fn new(config: &LineraConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: resolve_app_endpoint(config),
        }
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: Some(endpoint.into()),
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    async fn execute<V: Serialize + Send + Sync>(
        &self,
        query: &'static str,
        variables: V,
    ) -> LineraResult<GraphqlResponse> {
        let endpoint = self.endpoint.as_deref().ok_or(LineraError::NotConfigured)?;

        let resp = self
            .http
            .post(endpoint)
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LineraError::Http {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        let response: GraphqlResponse = serde_json::from_slice(&body)
            .map_err(|err| LineraError::InvalidResponse(err.to_string()))?;

        if let Some(messages) = response.error_messages() {
            return Err(LineraError::Graphql(messages));
        }
        Ok(response)
    }
}

#[async_trait]
impl RemoteLedger for LineraClient {
    async fn append_event(&self, event: &ActivityEvent) -> LineraResult<()> {
        let event_json = serde_json::to_string(event)
            .map_err(|err| LineraError::InvalidJson(err.to_string()))?;
        let response = self
            .execute(
                APPEND_EVENT_MUTATION,
                AppendEventVars {
                    actor: &event.actor,
                    event_json,
                },
            )
            .await?;

        match response.field("appendEvent") {
            Some(Value::Bool(true)) => Ok(()),
            _ => Err(LineraError::AppendRejected),
        }
    }

    async fn update_event_status(
        &self,
        actor: &str,
        id: &str,
        status: ActivityStatus,
        tx: Option<&ActivityTx>,
    ) -> LineraResult<()> {
        let tx_json = tx
            .map(serde_json::to_string)
            .transpose()
            .map_err(|err| LineraError::InvalidJson(err.to_string()))?;
        let response = self
            .execute(
                UPDATE_EVENT_STATUS_MUTATION,
                UpdateEventStatusVars {
                    actor,
                    id,
                    status: status.as_str(),
                    tx_json,
                },
            )
            .await?;

        match response.field("updateEventStatus") {
            Some(Value::Bool(true)) => Ok(()),
            _ => Err(LineraError::UpdateRejected),
        }
    }

    async fn get_events(
        &self,
        actor: &str,
        limit: usize,
        cursor: Option<&str>,
    ) -> LineraResult<EventsPage> {
        let response = self
            .execute(
                EVENTS_QUERY,
                EventsVars {
                    actor,
                    limit: limit_variable(limit),
                    cursor: cursor_variable(cursor),
                },
            )
            .await?;

        let Some(Value::String(encoded)) = response.field("events") else {
            return Err(LineraError::InvalidResponse(
                "data.events is not a string".into(),
            ));
        };

        let page: RemotePage = serde_json::from_str(encoded)
            .map_err(|err| LineraError::InvalidJson(err.to_string()))?;
        Ok(page.into())
    }
}
