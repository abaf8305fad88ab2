use tracing::debug;

use crate::domain::entities::filter::{FilterSet, FILTERS_PARAM};
use crate::domain::entities::update::Update;
use crate::usecase::ports::query_store::{QueryState, QueryStore};
use crate::usecase::services::url_state::Synced;

impl QueryState for FilterSet {
    fn write_to(&self, store: &mut dyn QueryStore) {
        if self.is_empty() {
            store.delete(FILTERS_PARAM);
        } else {
            store.write(FILTERS_PARAM, &self.serialize());
        }
    }
}

/// Keeps the global search tokens consistent with the `filters` URL parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSynchronizer {
    pathname: String,
    state: Synced<FilterSet>,
}

impl FilterSynchronizer {
    /// Starts on `pathname` so the first observation is not treated as navigation.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            state: Synced::new(FilterSet::new()),
        }
    }

    pub fn filters(&self) -> &FilterSet {
        self.state.get()
    }

    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// Called on mount and whenever the active path may have changed.
    ///
    /// Navigating elsewhere clears the tokens without touching the new URL;
    /// staying on the same path restores tokens found in the URL.
    pub fn observe_route(&mut self, pathname: &str, store: &mut dyn QueryStore) -> bool {
        if self.pathname != pathname {
            debug!(from = %self.pathname, to = %pathname, "route changed, clearing filters");
            self.pathname = pathname.to_string();
            return self.state.apply(Update::external(FilterSet::new()), store);
        }

        let restored = store
            .read(FILTERS_PARAM)
            .map(|raw| FilterSet::parse(&raw))
            .unwrap_or_default();
        if restored.is_empty() {
            return false;
        }
        self.state.apply(Update::external(restored), store)
    }

    pub fn add(&mut self, raw: &str, store: &mut dyn QueryStore) -> bool {
        let mut next = self.state.get().clone();
        if !next.insert(raw) {
            return false;
        }
        self.state.apply(Update::local(next), store)
    }

    pub fn remove(&mut self, index: usize, store: &mut dyn QueryStore) -> bool {
        let mut next = self.state.get().clone();
        if !next.remove(index) {
            return false;
        }
        self.state.apply(Update::local(next), store)
    }

    /// Always leaves the URL without a `filters` parameter.
    pub fn clear(&mut self, store: &mut dyn QueryStore) -> bool {
        let changed = self.state.apply(Update::local(FilterSet::new()), store);
        if !changed {
            self.state.get().write_to(store);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::location::memory::MemoryLocation;

    fn mounted(location: &str) -> (FilterSynchronizer, MemoryLocation) {
        let mut store = MemoryLocation::parse(location);
        let mut sync = FilterSynchronizer::new(store.path.clone());
        let path = store.path.clone();
        sync.observe_route(&path, &mut store);
        (sync, store)
    }

    #[test]
    fn mount_restores_filters_without_writing_back() {
        let (sync, store) = mounted("/users?filters=role%3Ateacher,eso");

        assert_eq!(sync.filters().tokens(), ["role:teacher", "eso"]);
        assert_eq!(store.replacements, 0);
    }

    #[test]
    fn add_appends_in_order_and_writes_literal_commas() {
        let (mut sync, mut store) = mounted("/users?page=2");

        assert!(sync.add(" eso ", &mut store));
        assert!(sync.add("bio", &mut store));
        assert!(!sync.add("eso", &mut store));
        assert!(!sync.add("   ", &mut store));

        assert_eq!(sync.filters().tokens(), ["eso", "bio"]);
        assert_eq!(store.to_string(), "/users?page=2&filters=eso,bio");
        assert_eq!(store.replacements, 2);
    }

    #[test]
    fn remove_out_of_range_leaves_url_untouched() {
        let (mut sync, mut store) = mounted("/users?filters=a,b");

        assert!(!sync.remove(5, &mut store));

        assert_eq!(sync.filters().tokens(), ["a", "b"]);
        assert_eq!(store.replacements, 0);
    }

    #[test]
    fn removing_last_token_drops_parameter() {
        let (mut sync, mut store) = mounted("/users?filters=a&limit=20");

        assert!(sync.remove(0, &mut store));

        assert!(sync.filters().is_empty());
        assert_eq!(store.to_string(), "/users?limit=20");
    }

    #[test]
    fn clear_removes_parameter_even_when_already_empty() {
        let (mut sync, mut store) = mounted("/departments");
        store.navigate("/departments?filters=stale");

        assert!(!sync.clear(&mut store));

        assert_eq!(store.read(FILTERS_PARAM), None);
    }

    #[test]
    fn route_change_clears_without_repushing() {
        let (mut sync, mut store) = mounted("/users?filters=eso");
        store.navigate("/subjects?page=1");

        assert!(sync.observe_route("/subjects", &mut store));

        assert!(sync.filters().is_empty());
        assert_eq!(sync.pathname(), "/subjects");
        assert_eq!(store.to_string(), "/subjects?page=1");
        assert_eq!(store.replacements, 0);
    }

    #[test]
    fn mutation_after_route_change_is_written() {
        let (mut sync, mut store) = mounted("/users?filters=eso");
        store.navigate("/subjects");
        sync.observe_route("/subjects", &mut store);

        sync.add("mat", &mut store);

        assert_eq!(store.to_string(), "/subjects?filters=mat");
    }
}
