use crate::error::BackendResult;

/// Byte-level key/value persistence.
///
/// All implementations must satisfy these invariants:
/// - `put` fully replaces any value previously stored under the key.
/// - `get` returns `Ok(None)` for an absent key; errors are reserved for
///   I/O failure.
/// - A reader never observes a partially written value.
/// - The backend never interprets values.
pub trait StorageBackend: Send + Sync {
    /// Store `value` under `key`, replacing any prior value.
    fn put(&self, key: &str, value: &[u8]) -> BackendResult<()>;

    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> BackendResult<Option<Vec<u8>>>;

    /// Remove the value stored under `key`. Returns `true` if it existed.
    fn delete(&self, key: &str) -> BackendResult<bool>;
}
