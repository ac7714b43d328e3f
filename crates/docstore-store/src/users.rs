//! User persistence.
//!
//! Users ride the same storage backend as ordinary objects but under their
//! own key namespace, and they never enter the object index: a query can
//! never return a user account. Username lookup goes through a pointer key
//! mapping the name to the owning UID.

use uuid::Uuid;

use docstore_types::User;

use crate::client::Client;
use crate::error::{StoreError, StoreResult};
use crate::password;

pub(crate) const USER_KEY_PREFIX: &str = "user/";
pub(crate) const USERNAME_KEY_PREFIX: &str = "username/";

impl Client {
    /// Fetch a user by UID.
    pub fn get_user(&self, uid: &str) -> StoreResult<User> {
        self.get_raw(&format!("{USER_KEY_PREFIX}{uid}"))
    }

    /// Fetch a user by username.
    pub fn get_user_by_username(&self, username: &str) -> StoreResult<User> {
        let bytes = self
            .backend
            .get(&format!("{USERNAME_KEY_PREFIX}{username}"))?
            .ok_or_else(|| StoreError::NotFound(format!("user {username}")))?;
        let uid = String::from_utf8(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.get_user(&uid)
    }

    /// Persist a user, assigning a UID if absent.
    ///
    /// Usernames are unique: storing a user whose username already points
    /// at a different live UID fails with InvalidArgument.
    ///
    /// The record and the pointer are two separate writes. The pointer
    /// goes first: if the record write then fails, the pointer targets a
    /// missing record, which lookups report as NotFound and a later
    /// `set_user` with the same username reclaims.
    pub fn set_user(&self, user: &mut User) -> StoreResult<()> {
        if user.username.is_empty() {
            return Err(StoreError::InvalidArgument("empty username".into()));
        }
        if user.uid.is_empty() {
            user.uid = Uuid::now_v7().to_string();
        }
        let pointer_key = format!("{USERNAME_KEY_PREFIX}{}", user.username);
        if let Some(existing) = self.backend.get(&pointer_key)? {
            if existing != user.uid.as_bytes() {
                let existing_uid = String::from_utf8(existing)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                if self
                    .backend
                    .get(&format!("{USER_KEY_PREFIX}{existing_uid}"))?
                    .is_some()
                {
                    return Err(StoreError::InvalidArgument(format!(
                        "username already taken: {}",
                        user.username
                    )));
                }
                // Dangling pointer from an interrupted set_user; the name
                // is free.
            }
        }
        let bytes =
            serde_json::to_vec(&user).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.put(&pointer_key, user.uid.as_bytes())?;
        self.backend
            .put(&format!("{USER_KEY_PREFIX}{}", user.uid), &bytes)?;
        tracing::debug!(uid = %user.uid, username = %user.username, "set user");
        Ok(())
    }

    /// Verify a plaintext password against a stored hash.
    pub fn check_password(&self, plaintext: &str, password_hash: &str) -> bool {
        password::verify(plaintext, password_hash)
    }
}
