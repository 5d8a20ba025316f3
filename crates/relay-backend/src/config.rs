use std::time::Duration;

use relay_store::DEFAULT_RETENTION;
use serde::{Deserialize, Serialize};

/// How a write is mirrored to the remote ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorMode {
    /// Await the bounded mirror call before returning the local result.
    #[default]
    Inline,
    /// Spawn the mirror call and return immediately.
    Detached,
}

/// Configuration for a [`crate::Backend`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Events kept per actor in the local store.
    pub retention: usize,
    /// Upper bound on every remote call.
    pub remote_timeout: Duration,
    pub mirror: MirrorMode,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            retention: DEFAULT_RETENTION,
            remote_timeout: Duration::from_secs(5),
            mirror: MirrorMode::Inline,
        }
    }
}
