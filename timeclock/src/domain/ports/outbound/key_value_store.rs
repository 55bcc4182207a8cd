use crate::domain::KeyValueError;

/// Outbound port for a small durable string key/value store.
///
/// Implementations are synchronous; callers decide whether a failure matters.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueError>;

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), KeyValueError>;
}
