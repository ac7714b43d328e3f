use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use uuid::Uuid;

use docstore_backend::StorageBackend;
use docstore_query::{matches, parse};
use docstore_types::{IndexObject, Object, User};

use crate::error::{StoreError, StoreResult};
use crate::gate::{AccessGate, Action, AllowAll};
use crate::users::{USERNAME_KEY_PREFIX, USER_KEY_PREFIX};

/// The fixed key under which the durable index blob is stored.
pub const INDEX_KEY: &str = "_index";

/// Objects share one backend keyspace with the index blob and the user
/// records, so a caller-supplied UID must not collide with either: a `set`
/// on such a UID would silently destroy durable state the store depends
/// on.
fn check_uid_not_reserved(uid: &str) -> StoreResult<()> {
    if uid == INDEX_KEY
        || uid.starts_with(USER_KEY_PREFIX)
        || uid.starts_with(USERNAME_KEY_PREFIX)
    {
        return Err(StoreError::InvalidArgument(format!("reserved uid: {uid}")));
    }
    Ok(())
}

/// The store client: object CRUD, the index cache, and the sync engine.
///
/// One `Client` is shared by every concurrent caller. See the crate docs
/// for the consistency model and locking discipline.
pub struct Client {
    pub(crate) backend: Arc<dyn StorageBackend>,
    gate: Arc<dyn AccessGate>,
    index: RwLock<BTreeMap<String, IndexObject>>,
}

impl Client {
    /// Create a client over the given backend with no access restrictions.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self::with_gate(backend, Arc::new(AllowAll))
    }

    /// Create a client that consults `gate` before every operation
    /// invoked with an acting user.
    pub fn with_gate(backend: Arc<dyn StorageBackend>, gate: Arc<dyn AccessGate>) -> Self {
        Self {
            backend,
            gate,
            index: RwLock::new(BTreeMap::new()),
        }
    }

    /// Seed the index cache from the durable blob under [`INDEX_KEY`].
    ///
    /// Intended for startup over a durable backend; the cache is replaced
    /// wholesale. Returns the number of restored entries; a backend with
    /// no synced index yet restores zero.
    pub fn restore_index(&self) -> StoreResult<usize> {
        let Some(bytes) = self.backend.get(INDEX_KEY)? else {
            return Ok(0);
        };
        let objects: Vec<IndexObject> =
            serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut index = self.index.write().expect("lock poisoned");
        index.clear();
        for object in objects {
            index.insert(object.uid.clone(), object);
        }
        tracing::info!(entries = index.len(), "restored index from durable blob");
        Ok(index.len())
    }

    /// Persist an object, fully replacing any prior version, and update
    /// the index cache.
    ///
    /// An empty UID is assigned a fresh one, written back to `object`; a
    /// caller-supplied UID colliding with [`INDEX_KEY`] or a user key is
    /// rejected with InvalidArgument. On any failure (gate denial, backend
    /// error) neither the backing store nor the index cache changes.
    pub fn set(&self, object: &mut Object, user: Option<&User>) -> StoreResult<()> {
        self.check(user, Action::Set { uid: &object.uid })?;
        if object.uid.is_empty() {
            object.uid = Uuid::now_v7().to_string();
        } else {
            check_uid_not_reserved(&object.uid)?;
        }
        let bytes =
            serde_json::to_vec(&object).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.put(&object.uid, &bytes)?;

        let projection = object.to_index();
        let mut index = self.index.write().expect("lock poisoned");
        index.insert(object.uid.clone(), projection);
        tracing::debug!(uid = %object.uid, "set object");
        Ok(())
    }

    /// Fetch an object by UID.
    pub fn get(&self, uid: &str, user: Option<&User>) -> StoreResult<Object> {
        if uid.is_empty() {
            return Err(StoreError::InvalidArgument("empty uid".into()));
        }
        check_uid_not_reserved(uid)?;
        self.check(user, Action::Get { uid })?;
        self.get_raw(uid)
    }

    /// Remove an object from the backing store and the index cache.
    ///
    /// Deleting a UID that does not exist fails with NotFound, consistent
    /// with [`Client::get`]. After a successful delete, a `get` on the
    /// same UID fails with NotFound.
    pub fn delete(&self, object: &Object, user: Option<&User>) -> StoreResult<()> {
        if object.uid.is_empty() {
            return Err(StoreError::InvalidArgument("empty uid".into()));
        }
        check_uid_not_reserved(&object.uid)?;
        self.check(user, Action::Delete { uid: &object.uid })?;
        if !self.backend.delete(&object.uid)? {
            return Err(StoreError::NotFound(object.uid.clone()));
        }
        let mut index = self.index.write().expect("lock poisoned");
        index.remove(&object.uid);
        tracing::debug!(uid = %object.uid, "deleted object");
        Ok(())
    }

    /// A point-in-time snapshot of the index cache, in UID order.
    ///
    /// Always reflects the latest `set`/`delete` calls regardless of when
    /// [`Client::sync`] last ran.
    pub fn index(&self) -> StoreResult<Vec<IndexObject>> {
        let index = self.index.read().expect("lock poisoned");
        Ok(index.values().cloned().collect())
    }

    /// Run a filter expression over the index cache and return the full
    /// objects that match.
    ///
    /// The expression is parsed before anything else; a parse failure
    /// reaches the caller without the cache being touched. Matching is a
    /// linear scan of the cache snapshot. Objects the gate rejects for
    /// the acting user are filtered out of the result, and a UID deleted
    /// concurrently between the snapshot and the fetch is skipped.
    pub fn query(&self, expression: &str, user: Option<&User>) -> StoreResult<Vec<Object>> {
        let query = parse(expression)?;
        self.check(user, Action::Query)?;

        let matching: Vec<String> = {
            let index = self.index.read().expect("lock poisoned");
            index
                .values()
                .filter(|object| matches(&object.data, &query))
                .map(|object| object.uid.clone())
                .collect()
        };

        let mut results = Vec::with_capacity(matching.len());
        for uid in matching {
            if let Some(user) = user {
                if !self.gate.allow(user, &Action::Get { uid: &uid }) {
                    continue;
                }
            }
            match self.backend.get(&uid)? {
                Some(bytes) => results.push(
                    serde_json::from_slice(&bytes)
                        .map_err(|e| StoreError::Serialization(e.to_string()))?,
                ),
                None => continue,
            }
        }
        tracing::debug!(expression, results = results.len(), "query evaluated");
        Ok(results)
    }

    /// Publish the index cache to durable storage.
    ///
    /// Serializes the entire cache and writes it as one blob under
    /// [`INDEX_KEY`], overwriting whatever was there: a full-replace
    /// snapshot, not a merge. The snapshot is taken under the read lock
    /// and written outside it, so a concurrent `set` can never produce a
    /// torn blob. On failure the previously persisted blob is untouched.
    pub fn sync(&self) -> StoreResult<()> {
        let snapshot: Vec<IndexObject> = {
            let index = self.index.read().expect("lock poisoned");
            index.values().cloned().collect()
        };
        let bytes = serde_json::to_vec(&snapshot)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.put(INDEX_KEY, &bytes)?;
        tracing::debug!(entries = snapshot.len(), "synced index");
        Ok(())
    }

    /// Fetch and deserialize the raw bytes stored under an arbitrary key,
    /// bypassing the index cache.
    ///
    /// This is how the durable state is observable independent of the
    /// cache: reading [`INDEX_KEY`] here shows the index as of the last
    /// [`Client::sync`], not the current cache.
    pub fn get_raw<T: DeserializeOwned>(&self, key: &str) -> StoreResult<T> {
        let bytes = self
            .backend
            .get(key)?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub(crate) fn check(&self, user: Option<&User>, action: Action<'_>) -> StoreResult<()> {
        if let Some(user) = user {
            if !self.gate.allow(user, &action) {
                return Err(StoreError::Permission(action.to_string()));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.index.read().expect("lock poisoned").len();
        f.debug_struct("Client").field("index_entries", &entries).finish()
    }
}
