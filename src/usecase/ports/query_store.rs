/// Key-value view of the current location's query string.
///
/// Writes replace the current history entry instead of pushing a new one.
pub trait QueryStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);
}

/// Anything that can be serialized into (and restored from) query parameters.
pub trait QueryState: Clone + PartialEq {
    fn write_to(&self, store: &mut dyn QueryStore);
}
