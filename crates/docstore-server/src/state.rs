use std::sync::Arc;

use docstore_backend::{DiskBackend, MemoryBackend, StorageBackend};
use docstore_store::{Client, StoreError};
use docstore_types::User;

use crate::config::{ServerConfig, StorageConfig};
use crate::error::{ServerError, ServerResult};
use crate::session::SessionManager;

/// Username of the bootstrap user that unauthenticated requests act as.
pub const ANONYMOUS_USER: &str = "anonymous";

/// Shared server state: one store client and the session list, constructed
/// once at startup and passed by reference to every request handler.
pub struct AppState {
    pub client: Client,
    pub sessions: SessionManager,
}

impl AppState {
    /// Build the state for a config: open the backend, restore the index
    /// cache from the last synced blob, and create the anonymous user if
    /// this is a fresh store.
    pub fn new(config: &ServerConfig) -> ServerResult<Arc<Self>> {
        let backend: Arc<dyn StorageBackend> = match &config.storage {
            StorageConfig::Memory => Arc::new(MemoryBackend::new()),
            StorageConfig::Disk { path } => Arc::new(DiskBackend::open(path)?),
        };
        let client = Client::new(backend);
        let restored = client.restore_index()?;
        if restored > 0 {
            tracing::info!(entries = restored, "index cache restored");
        }

        match client.get_user_by_username(ANONYMOUS_USER) {
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => {
                let mut anonymous = User::new(ANONYMOUS_USER);
                anonymous.groups.push(ANONYMOUS_USER.to_string());
                client.set_user(&mut anonymous)?;
                tracing::info!("created bootstrap anonymous user");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Arc::new(Self {
            client,
            sessions: SessionManager::new(config.session_ttl_secs),
        }))
    }

    /// Resolve a session key to its user.
    ///
    /// An empty key resolves to the anonymous user; an unknown or expired
    /// key is a Permission-class error.
    pub fn user_from_session_key(&self, key: &str) -> ServerResult<User> {
        if key.is_empty() {
            return Ok(self.client.get_user_by_username(ANONYMOUS_USER)?);
        }
        let session = self
            .sessions
            .resolve(key)
            .ok_or(ServerError::InvalidSession)?;
        Ok(self.client.get_user(&session.user_uid)?)
    }
}
