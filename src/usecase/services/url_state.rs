use tracing::debug;

use crate::domain::entities::update::{Origin, Update};
use crate::usecase::ports::query_store::{QueryState, QueryStore};

/// One piece of URL-backed state.
///
/// Local updates are mirrored into the store; external ones (URL reads,
/// navigation) are adopted silently so they never echo back.
#[derive(Debug, Clone, PartialEq)]
pub struct Synced<S> {
    value: S,
}

impl<S: QueryState + std::fmt::Debug> Synced<S> {
    pub fn new(value: S) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &S {
        &self.value
    }

    /// Returns whether the held value changed.
    pub fn apply(&mut self, update: Update<S>, store: &mut dyn QueryStore) -> bool {
        if self.value == update.value {
            return false;
        }
        self.value = update.value;
        if update.origin == Origin::Local {
            debug!(state = ?self.value, "writing state to url");
            self.value.write_to(store);
        }
        true
    }
}
