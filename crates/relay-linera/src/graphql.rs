//! Wire shapes for the Linera application's GraphQL service.

use relay_types::{ActivityEvent, EventsPage};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const APPEND_EVENT_MUTATION: &str =
    "mutation($actor:String!,$eventJson:String!){ appendEvent(actor:$actor,eventJson:$eventJson) }";

pub const UPDATE_EVENT_STATUS_MUTATION: &str = "mutation($actor:String!,$id:String!,$status:String!,$txJson:String){ updateEventStatus(actor:$actor,id:$id,status:$status,txJson:$txJson) }";

pub const EVENTS_QUERY: &str =
    "query($actor:String!,$limit:Int,$cursor:Int){ events(actor:$actor,limit:$limit,cursor:$cursor) }";

#[derive(Debug, Serialize)]
pub struct GraphqlRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendEventVars<'a> {
    pub actor: &'a str,
    pub event_json: String,
}

/// `tx_json` is always sent, as `null` when there is no tx.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventStatusVars<'a> {
    pub actor: &'a str,
    pub id: &'a str,
    pub status: &'a str,
    pub tx_json: Option<String>,
}

/// The service types `limit` as `u32` and `cursor` as `u64`.
#[derive(Debug, Serialize)]
pub struct EventsVars<'a> {
    pub actor: &'a str,
    pub limit: u32,
    pub cursor: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<Value>>,
}

impl GraphqlResponse {
    /// Messages of every reported error, or `None` when there are none.
    pub fn error_messages(&self) -> Option<Vec<String>> {
        let errors = self.errors.as_ref().filter(|errors| !errors.is_empty())?;
        Some(
            errors
                .iter()
                .map(|err| match err.get("message").and_then(Value::as_str) {
                    Some(message) => message.to_string(),
                    None => err.to_string(),
                })
                .collect(),
        )
    }

    /// The named field under `data`, if any.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(name))
    }
}

/// Page as encoded inside the `events` string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePage {
    #[serde(default)]
    pub items: Option<Vec<ActivityEvent>>,
    #[serde(default)]
    pub next_cursor: Option<Value>,
}

impl From<RemotePage> for EventsPage {
    fn from(page: RemotePage) -> Self {
        let next_cursor = match page.next_cursor {
            Some(Value::String(cursor)) => Some(cursor),
            Some(Value::Number(cursor)) => Some(cursor.to_string()),
            _ => None,
        };
        EventsPage {
            items: page.items.unwrap_or_default(),
            next_cursor,
        }
    }
}

/// Parse a caller cursor into the integer the query expects. Anything that
/// is not a non-negative integer is sent as `null`.
pub fn cursor_variable(cursor: Option<&str>) -> Option<u64> {
    cursor.and_then(|c| c.trim().parse::<u64>().ok())
}

/// Clamp a page size into the range the query accepts.
pub fn limit_variable(limit: usize) -> u32 {
    u32::try_from(limit).unwrap_or(u32::MAX)
}
