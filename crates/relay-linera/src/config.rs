use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the Linera application lives.
///
/// Either `app_endpoint` is given outright, or it is derived from
/// `endpoint`, `chain_id` and `app_id`. Empty strings count as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineraConfig {
    /// Base URL of the Linera node service, e.g. `http://localhost:8080`.
    pub endpoint: Option<String>,
    pub chain_id: Option<String>,
    pub app_id: Option<String>,
    /// Full application URL; takes precedence over the derived one.
    pub app_endpoint: Option<String>,
    /// Wallet used by the node service. Informational only.
    pub wallet_path: Option<String>,
    /// JSON file with `chainId`/`appId`, consulted for ids not set here.
    pub ids_path: Option<PathBuf>,
}

impl LineraConfig {
    /// Fill missing ids from the file at `ids_path`, if there is one.
    pub fn with_ids_file(self) -> Self {
        match self.ids_path.as_deref().and_then(load_ids) {
            Some(ids) => self.with_ids(ids),
            None => self,
        }
    }

    /// Fill a missing chain or application id from `ids`.
    pub fn with_ids(mut self, ids: LineraIds) -> Self {
        if set(&self.chain_id).is_none() {
            self.chain_id = ids.chain_id;
        }
        if set(&self.app_id).is_none() {
            self.app_id = ids.app_id;
        }
        self
    }
}

/// Chain and application ids as written by the Linera deploy script.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineraIds {
    #[serde(default)]
    pub chain_id: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
}

/// Load the ids file.
///
/// Relative paths are tried against the working directory and then its
/// parent. A missing, empty or malformed file yields `None`.
pub fn load_ids(path: &Path) -> Option<LineraIds> {
    let candidates: Vec<PathBuf> = if path.is_absolute() {
        vec![path.to_path_buf()]
    } else {
        let cwd = std::env::current_dir().ok()?;
        vec![cwd.join(path), cwd.join("..").join(path)]
    };

    let found = candidates.into_iter().find(|candidate| candidate.is_file())?;
    let raw = match std::fs::read_to_string(&found) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(path = %found.display(), error = %err, "failed to read linera ids file");
            return None;
        }
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => Some(LineraIds {
            chain_id: string_field(&value, "chainId"),
            app_id: string_field(&value, "appId"),
        }),
        Err(err) => {
            tracing::warn!(path = %found.display(), error = %err, "ignoring malformed linera ids file");
            None
        }
    }
}

/// Resolve the URL GraphQL requests are posted to.
///
/// Returns `None` when neither an explicit application endpoint nor all of
/// `endpoint`, `chain_id` and `app_id` are set.
pub fn resolve_app_endpoint(config: &LineraConfig) -> Option<String> {
    if let Some(explicit) = set(&config.app_endpoint) {
        return Some(explicit.trim_end_matches('/').to_string());
    }

    let base = set(&config.endpoint)?;
    let chain_id = set(&config.chain_id)?;
    let app_id = set(&config.app_id)?;
    Some(format!(
        "{}/chains/{chain_id}/applications/{app_id}",
        base.trim_end_matches('/')
    ))
}

fn set(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn string_field(value: &serde_json::Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(str::to_string)
}
