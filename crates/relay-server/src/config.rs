use std::net::{Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Shared secret expected in `x-api-key`. Without one, every protected
    /// route answers `api_key_not_configured`.
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            api_key: None,
        }
    }
}
