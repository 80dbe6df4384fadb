use std::net::SocketAddr;

use serde::Deserialize;

use crate::health::HealthConfig;

/// Largest request body read by default, in bytes
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    /// Request bodies above this size are unreadable
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
    #[serde(default)]
    pub health: HealthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: None,
            body_limit: DEFAULT_BODY_LIMIT,
            health: HealthConfig::default(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_body_limit() -> usize {
    DEFAULT_BODY_LIMIT
}
