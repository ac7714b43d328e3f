//! In-memory bearer sessions.
//!
//! Sessions are HTTP-layer state: the store core only ever sees the
//! already-resolved user. The list lives behind a lock and is pruned of
//! expired entries on every login.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use rand::RngCore;

use docstore_types::User;

/// An issued login session.
#[derive(Clone, Debug)]
pub struct Session {
    /// UID of the user the session belongs to.
    pub user_uid: String,
    /// Opaque bearer token presented by the client.
    pub key: String,
    /// Remote address recorded at login, for audit logging.
    pub ip: String,
    /// Absolute expiry time.
    pub expires: DateTime<Utc>,
}

impl Session {
    /// Whether the session has expired as of `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

/// Owns the session list and the token lifecycle.
pub struct SessionManager {
    ttl: Duration,
    sessions: RwLock<Vec<Session>>,
}

impl SessionManager {
    /// Create a manager issuing sessions with the given lifetime.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            sessions: RwLock::new(Vec::new()),
        }
    }

    /// Issue a new session for `user`, pruning expired sessions first.
    pub fn create(&self, user: &User, ip: &str) -> Session {
        let session = Session {
            user_uid: user.uid.clone(),
            key: generate_key(),
            ip: ip.to_string(),
            expires: Utc::now() + self.ttl,
        };
        let mut sessions = self.sessions.write().expect("lock poisoned");
        let now = Utc::now();
        sessions.retain(|s| !s.is_expired(now));
        sessions.push(session.clone());
        tracing::debug!(user_uid = %session.user_uid, ip = %session.ip, "created session");
        session
    }

    /// Look up a live session by key. Unknown and expired keys both
    /// resolve to `None`.
    pub fn resolve(&self, key: &str) -> Option<Session> {
        let sessions = self.sessions.read().expect("lock poisoned");
        let now = Utc::now();
        sessions
            .iter()
            .find(|s| s.key == key && !s.is_expired(now))
            .cloned()
    }

    /// Number of sessions currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.read().expect("lock poisoned").len()
    }

    /// Returns `true` if no sessions are held.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().expect("lock poisoned").is_empty()
    }
}

/// 32 random bytes, hex-encoded.
fn generate_key() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
