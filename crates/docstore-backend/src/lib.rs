//! Raw key/value storage backends for docstore.
//!
//! The store core persists bytes under string keys and is agnostic to the
//! medium actually holding them. This crate defines that contract and two
//! implementations:
//!
//! - [`MemoryBackend`] -- `HashMap`-based backend for tests and embedding
//! - [`DiskBackend`] -- one file per key under a root directory
//!
//! # Design Rules
//!
//! 1. The backend never interprets values -- it is a pure byte store.
//! 2. Writes fully replace whatever was previously stored under a key; a
//!    reader must never observe a torn value.
//! 3. All I/O errors are propagated, never silently ignored.

pub mod disk;
pub mod error;
pub mod memory;
pub mod traits;

pub use disk::DiskBackend;
pub use error::{BackendError, BackendResult};
pub use memory::MemoryBackend;
pub use traits::StorageBackend;
