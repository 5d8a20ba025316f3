use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use relay_backend::{BackendConfig, MirrorMode};
use relay_linera::LineraConfig;
use relay_server::ServerConfig;
use serde::{Deserialize, Serialize};

/// Backend settings as written in the config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSection {
    pub retention: usize,
    pub remote_timeout_ms: u64,
    pub mirror: MirrorMode,
}

impl Default for BackendSection {
    fn default() -> Self {
        let defaults = BackendConfig::default();
        Self {
            retention: defaults.retention,
            remote_timeout_ms: defaults.remote_timeout.as_millis() as u64,
            mirror: defaults.mirror,
        }
    }
}

impl From<&BackendSection> for BackendConfig {
    fn from(section: &BackendSection) -> Self {
        Self {
            retention: section.retention,
            remote_timeout: Duration::from_millis(section.remote_timeout_ms),
            mirror: section.mirror,
        }
    }
}

/// Everything the relayer reads at startup. Immutable once loaded.
///
/// ```toml
/// [server]
/// bind_addr = "0.0.0.0:3000"
/// api_key = "dev"
///
/// [backend]
/// retention = 300
/// remote_timeout_ms = 5000
/// mirror = "inline"
///
/// [linera]
/// endpoint = "http://localhost:8080"
/// ids_path = "linera-ids.json"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayerConfig {
    pub server: ServerConfig,
    pub backend: BackendSection,
    pub linera: LineraConfig,
}

impl RelayerConfig {
    /// Load the optional file, then apply the process environment on top.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.linera = config.linera.with_ids_file();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Override fields from environment variables. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(port) = var("PORT") {
            self.server.bind_addr.set_port(parse("PORT", &port)?);
        }
        if let Some(bind) = var("RELAYER_BIND") {
            self.server.bind_addr = parse::<SocketAddr>("RELAYER_BIND", &bind)?;
        }
        if let Some(key) = var("RELAYER_API_KEY") {
            self.server.api_key = Some(key);
        }
        if let Some(retention) = var("RELAYER_RETENTION") {
            self.backend.retention = parse("RELAYER_RETENTION", &retention)?;
        }
        if let Some(mirror) = var("RELAYER_MIRROR") {
            self.backend.mirror = match mirror.trim() {
                "inline" => MirrorMode::Inline,
                "detached" => MirrorMode::Detached,
                other => bail!("RELAYER_MIRROR must be inline or detached, got {other:?}"),
            };
        }
        if let Some(timeout) = var("LINERA_TIMEOUT_MS") {
            self.backend.remote_timeout_ms = parse("LINERA_TIMEOUT_MS", &timeout)?;
        }

        let linera = &mut self.linera;
        for (key, slot) in [
            ("LINERA_ENDPOINT", &mut linera.endpoint),
            ("LINERA_CHAIN_ID", &mut linera.chain_id),
            ("LINERA_APP_ID", &mut linera.app_id),
            ("LINERA_APP_ENDPOINT", &mut linera.app_endpoint),
            ("LINERA_WALLET_PATH", &mut linera.wallet_path),
        ] {
            if let Some(value) = var(key) {
                *slot = Some(value);
            }
        }
        if let Some(path) = var("LINERA_IDS_PATH") {
            linera.ids_path = Some(PathBuf::from(path));
        }
        Ok(())
    }

    pub fn backend_config(&self) -> BackendConfig {
        BackendConfig::from(&self.backend)
    }
}

fn parse<T>(key: &str, value: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} has invalid value {value:?}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = RelayerConfig::default();
        assert_eq!(config.server.bind_addr.port(), 3000);
        assert_eq!(config.backend.retention, 300);
        assert_eq!(config.backend.mirror, MirrorMode::Inline);
        assert!(config.linera.endpoint.is_none());
    }

    #[test]
    fn env_overrides() {
        let mut config = RelayerConfig::default();
        config
            .apply_env(env(&[
                ("PORT", "4000"),
                ("RELAYER_API_KEY", "secret"),
                ("RELAYER_RETENTION", "50"),
                ("RELAYER_MIRROR", "detached"),
                ("LINERA_ENDPOINT", "http://node:8080"),
                ("LINERA_CHAIN_ID", "chain"),
                ("LINERA_APP_ID", "app"),
                ("LINERA_TIMEOUT_MS", "750"),
                ("LINERA_WALLET_PATH", ""),
            ]))
            .unwrap();

        assert_eq!(config.server.bind_addr.port(), 4000);
        assert_eq!(config.server.api_key.as_deref(), Some("secret"));
        assert_eq!(config.linera.chain_id.as_deref(), Some("chain"));
        assert!(config.linera.wallet_path.is_none());

        let backend = config.backend_config();
        assert_eq!(backend.retention, 50);
        assert_eq!(backend.mirror, MirrorMode::Detached);
        assert_eq!(backend.remote_timeout, Duration::from_millis(750));
    }

    #[test]
    fn bind_wins_over_port() {
        let mut config = RelayerConfig::default();
        config
            .apply_env(env(&[("PORT", "4000"), ("RELAYER_BIND", "127.0.0.1:5000")]))
            .unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:5000".parse().unwrap());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut config = RelayerConfig::default();
        let err = config.apply_env(env(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        let err = config.apply_env(env(&[("RELAYER_MIRROR", "sometimes")])).unwrap_err();
        assert!(err.to_string().contains("RELAYER_MIRROR"));
    }

    #[test]
    fn file_is_base_layer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relayer.toml");
        std::fs::write(
            &path,
            r#"
[server]
bind_addr = "127.0.0.1:3100"
api_key = "from-file"

[backend]
retention = 10

[linera]
endpoint = "http://file:8080"
"#,
        )
        .unwrap();

        let mut config = RelayerConfig::from_file(&path).unwrap();
        assert_eq!(config.server.bind_addr.port(), 3100);
        assert_eq!(config.backend.retention, 10);
        assert_eq!(config.backend.remote_timeout_ms, 5000);

        config
            .apply_env(env(&[("RELAYER_API_KEY", "from-env")]))
            .unwrap();
        assert_eq!(config.server.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.linera.endpoint.as_deref(), Some("http://file:8080"));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[server\n").unwrap();
        let err = RelayerConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("broken.toml"));
    }
}
