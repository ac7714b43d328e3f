//! Store client for the docstore document store.
//!
//! This crate is the core engine behind the HTTP API: it persists objects
//! through a [`StorageBackend`], maintains an always-fresh in-memory index
//! of truncated object projections, evaluates filter queries against that
//! index, and publishes the index to durable storage on explicit demand.
//!
//! # Consistency Model
//!
//! Reads served from the index cache ([`Client::index`], [`Client::query`])
//! always reflect the latest writes. The durable copy of the index, stored
//! as one blob under [`INDEX_KEY`], lags behind until [`Client::sync`] is
//! called; sync fully replaces that blob with the cache's current state.
//! This decouples write latency from publication latency: a caller can
//! batch many writes and publish the index once.
//!
//! # Concurrency
//!
//! One shared [`Client`] serves many concurrent callers. The index cache
//! sits behind a `RwLock`; mutations hold the write lock only for the
//! in-memory change, and backend I/O happens outside the lock. Sync takes
//! a full snapshot under the read lock and serializes/writes outside it,
//! so no concurrent set can produce a torn blob.

pub mod client;
pub mod error;
pub mod gate;
pub mod password;
pub mod users;

pub use client::{Client, INDEX_KEY};
pub use error::{ErrorKind, StoreError, StoreResult};
pub use gate::{AccessGate, Action, AllowAll, GroupGate};

// Re-export the shapes callers need alongside the client.
pub use docstore_backend::{DiskBackend, MemoryBackend, StorageBackend};
pub use docstore_types::{IndexObject, Object, User, Value, INDEX_VALUE_MAX_SIZE};
