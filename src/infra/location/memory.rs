use std::fmt;

use crate::domain::entities::query_string::QueryString;
use crate::usecase::ports::query_store::QueryStore;

/// A location held in memory: path plus query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    pub path: String,
    pub query: QueryString,
    /// Number of history replacements performed so far.
    pub replacements: usize,
}

impl MemoryLocation {
    /// Parses `"/users?page=2"`-style locations.
    pub fn parse(location: &str) -> Self {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        Self {
            path: path.to_string(),
            query: QueryString::parse(query),
            replacements: 0,
        }
    }

    /// Navigation to another location; the query is replaced wholesale.
    pub fn navigate(&mut self, location: &str) {
        let next = MemoryLocation::parse(location);
        self.path = next.path;
        self.query = next.query;
    }
}

impl fmt::Display for MemoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

impl QueryStore for MemoryLocation {
    fn read(&self, key: &str) -> Option<String> {
        self.query.get(key).map(str::to_string)
    }

    fn write(&mut self, key: &str, value: &str) {
        self.query.set(key, value);
        self.replacements += 1;
    }

    fn delete(&mut self, key: &str) {
        self.query.remove(key);
        self.replacements += 1;
    }
}
