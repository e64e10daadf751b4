use crate::error::StorageError;

/// String-keyed persistent storage with overwrite semantics.
///
/// Mirrors browser `localStorage`: values are opaque strings, `set` replaces
/// whatever was stored under the key, `remove` of an absent key is a no-op.
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
