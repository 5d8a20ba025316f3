//! Schemas for the two payloads the relayer accepts.

use relay_types::{ActivityEvent, StatusUpdate, APP_ID};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ValidationErrors;
use crate::rule::Rule;
use crate::schema::{validate, FieldSpec, ObjectSchema, ROOT};

const STATUSES: &[&str] = &[
    "started",
    "approved",
    "submitted",
    "attested",
    "completed",
    "failed",
];
const KINDS: &[&str] = &["bridge", "swap", "deploy", "contractCall"];
const TOKEN_SYMBOLS: &[&str] = &["USDC", "EURC"];
const AI_MODES: &[&str] = &["suggest", "approve"];
const AI_VERDICTS: &[&str] = &["approve", "deny", "suggest"];

pub static CHAINS_SCHEMA: ObjectSchema = ObjectSchema {
    path: "chains",
    fields: &[
        FieldSpec::optional("sourceChainId", Rule::PositiveInt),
        FieldSpec::optional("destChainId", Rule::PositiveInt),
    ],
};

pub static TOKEN_SCHEMA: ObjectSchema = ObjectSchema {
    path: "token",
    fields: &[
        FieldSpec::required("symbol", Rule::OneOf(TOKEN_SYMBOLS)),
        FieldSpec::required("amount", Rule::DigitString),
    ],
};

pub static TX_SCHEMA: ObjectSchema = ObjectSchema {
    path: "tx",
    fields: &[
        FieldSpec::optional("sourceTxHash", Rule::TxHash),
        FieldSpec::optional("destTxHash", Rule::TxHash),
    ],
};

pub static REFS_SCHEMA: ObjectSchema = ObjectSchema {
    path: "refs",
    fields: &[
        FieldSpec::optional("explorerSourceUrl", Rule::Url),
        FieldSpec::optional("explorerDestUrl", Rule::Url),
    ],
};

pub static AI_SCHEMA: ObjectSchema = ObjectSchema {
    path: "ai",
    fields: &[
        FieldSpec::required("mode", Rule::OneOf(AI_MODES)),
        FieldSpec::optional("receiptRoot", Rule::NonEmptyString),
        FieldSpec::optional("model", Rule::NonEmptyString),
        FieldSpec::optional("verdict", Rule::OneOf(AI_VERDICTS)),
        FieldSpec::optional("reason", Rule::NonEmptyString),
    ],
};

pub static SIGNALS_META_SCHEMA: ObjectSchema = ObjectSchema {
    path: "signals.meta",
    fields: &[
        FieldSpec::optional("deployAddress", Rule::Address),
        FieldSpec::optional("errors", Rule::StringList),
        FieldSpec::optional("decimals", Rule::NonNegativeInt),
        FieldSpec::optional("slippage", Rule::NonEmptyString),
    ],
};

pub static SIGNALS_SCHEMA: ObjectSchema = ObjectSchema {
    path: "signals",
    fields: &[
        FieldSpec::required("items", Rule::StringList),
        FieldSpec::optional("meta", Rule::Object(&SIGNALS_META_SCHEMA)),
    ],
};

/// Full activity event, as posted by clients.
pub static EVENT_SCHEMA: ObjectSchema = ObjectSchema {
    path: ROOT,
    fields: &[
        FieldSpec::required("id", Rule::Uuid),
        FieldSpec::required("createdAt", Rule::IsoDateTime),
        FieldSpec::required("actor", Rule::Address),
        FieldSpec::required("app", Rule::Literal(APP_ID)),
        FieldSpec::required("intentId", Rule::Uuid),
        FieldSpec::required("kind", Rule::OneOf(KINDS)),
        FieldSpec::required("status", Rule::OneOf(STATUSES)),
        FieldSpec::optional("chains", Rule::Object(&CHAINS_SCHEMA)),
        FieldSpec::optional("token", Rule::Object(&TOKEN_SCHEMA)),
        FieldSpec::optional("tx", Rule::Object(&TX_SCHEMA)),
        FieldSpec::optional("refs", Rule::Object(&REFS_SCHEMA)),
        FieldSpec::optional("ai", Rule::Object(&AI_SCHEMA)),
        FieldSpec::optional("signals", Rule::Object(&SIGNALS_SCHEMA)),
    ],
};

/// Status update for an existing event.
pub static STATUS_UPDATE_SCHEMA: ObjectSchema = ObjectSchema {
    path: ROOT,
    fields: &[
        FieldSpec::required("actor", Rule::Address),
        FieldSpec::required("id", Rule::Uuid),
        FieldSpec::required("status", Rule::OneOf(STATUSES)),
        FieldSpec::optional("tx", Rule::Object(&TX_SCHEMA)),
    ],
};

pub fn validate_event(payload: &Value) -> Result<(), ValidationErrors> {
    validate(&EVENT_SCHEMA, payload)
}

pub fn validate_status_update(payload: &Value) -> Result<(), ValidationErrors> {
    validate(&STATUS_UPDATE_SCHEMA, payload)
}

/// Validate and decode an activity event.
pub fn parse_event(payload: &Value) -> Result<ActivityEvent, ValidationErrors> {
    validate_event(payload)?;
    decode(payload)
}

/// Validate and decode a status update.
pub fn parse_status_update(payload: &Value) -> Result<StatusUpdate, ValidationErrors> {
    validate_status_update(payload)?;
    decode(payload)
}

// A payload that passed its schema always decodes; the fallback keeps the
// contract total anyway.
fn decode<T: DeserializeOwned>(payload: &Value) -> Result<T, ValidationErrors> {
    serde_json::from_value(payload.clone())
        .map_err(|_| ValidationErrors::new(vec!["invalid_shape".to_string()]))
}
