//! Listen address of the record log API
//!
//! Lives under the `http` key of `proglog.json`. Both fields fall back to
//! their defaults when left out.

use serde::{Deserialize, Serialize};

/// Where the record log API listens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Interface to listen on; all interfaces unless set
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port for `POST /` and `GET /`
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl HttpServerConfig {
    /// Listen on all interfaces at `port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port`, as handed to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
