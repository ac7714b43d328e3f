use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

/// Server configuration, loadable from TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Which storage backend holds the raw bytes.
    pub storage: StorageConfig,
    /// Session lifetime in seconds.
    pub session_ttl_secs: u64,
}

impl ServerConfig {
    /// Load configuration from a TOML file. Missing fields fall back to
    /// their defaults.
    pub fn load(path: &std::path::Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| ServerError::Config(e.to_string()))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".parse().expect("valid default bind addr"),
            storage: StorageConfig::Memory,
            session_ttl_secs: 3600,
        }
    }
}

/// Storage backend selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Everything in memory; lost on shutdown.
    Memory,
    /// One file per key under `path`.
    Disk { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert!(matches!(c.storage, StorageConfig::Memory));
        assert_eq!(c.session_ttl_secs, 3600);
    }

    #[test]
    fn toml_roundtrip_with_disk_storage() {
        let toml = r#"
            bind_addr = "0.0.0.0:9000"
            session_ttl_secs = 60

            [storage]
            kind = "disk"
            path = "/var/lib/docstore"
        "#;
        let c: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(c.bind_addr, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(c.session_ttl_secs, 60);
        match c.storage {
            StorageConfig::Disk { path } => {
                assert_eq!(path, PathBuf::from("/var/lib/docstore"));
            }
            other => panic!("unexpected storage config: {other:?}"),
        }
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docstore.toml");
        std::fs::write(&path, "bind_addr = \"127.0.0.1:7777\"").unwrap();
        let c = ServerConfig::load(&path).unwrap();
        assert_eq!(c.bind_addr.port(), 7777);
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docstore.toml");
        std::fs::write(&path, "bind_addr = 42").unwrap();
        assert!(matches!(
            ServerConfig::load(&path),
            Err(ServerError::Config(_))
        ));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let c: ServerConfig = toml::from_str("session_ttl_secs = 5").unwrap();
        assert_eq!(c.session_ttl_secs, 5);
        assert!(matches!(c.storage, StorageConfig::Memory));
    }
}
