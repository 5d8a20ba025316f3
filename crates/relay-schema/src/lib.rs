//! Closed-schema validation for relayer payloads.
//!
//! Payloads arrive as untyped JSON. Before anything is decoded into the typed
//! model they are checked against an explicit schema descriptor: a set of
//! allowed keys per object plus one [`Rule`] per field. Validation never stops
//! at the first problem; every violation is reported by its dotted path so a
//! client can fix the whole payload in one round trip.
//!
//! - [`schema`] -- [`ObjectSchema`] / [`FieldSpec`] descriptors and the evaluator
//! - [`rule`] -- per-field format rules
//! - [`activity`] -- the activity-event and status-update schemas

pub mod activity;
pub mod error;
pub mod rule;
pub mod schema;

pub use activity::{
    parse_event, parse_status_update, validate_event, validate_status_update, EVENT_SCHEMA,
    STATUS_UPDATE_SCHEMA,
};
pub use error::ValidationErrors;
pub use rule::Rule;
pub use schema::{validate, FieldSpec, ObjectSchema};
