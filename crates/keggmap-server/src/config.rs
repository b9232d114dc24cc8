use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Default listen address.
pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 5006);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Upper bound on a whole multipart request body, in bytes.
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            max_upload_size: 16 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Parse a TOML document. Missing keys take their default values.
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Load a TOML config file.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), bind = %config.bind_addr, "loaded server config");
        Ok(config)
    }

    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:5006".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_upload_size, 16 * 1024 * 1024);
    }

    #[test]
    fn parse_full_toml() {
        let c = ServerConfig::from_toml_str(
            "bind_addr = \"0.0.0.0:8080\"\nmax_upload_size = 1024\n",
        )
        .unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.max_upload_size, 1024);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let c = ServerConfig::from_toml_str("max_upload_size = 2048").unwrap();
        assert_eq!(c.bind_addr, ServerConfig::default().bind_addr);
        assert_eq!(c.max_upload_size, 2048);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keggmap.toml");
        std::fs::write(&path, "bind_addr = \"127.0.0.1:9000\"").unwrap();

        let c = ServerConfig::from_file(&path).unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ServerConfig::from_file("/nonexistent/keggmap.toml").unwrap_err();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
