use dioxus::prelude::*;
use tracing::debug;

use crate::domain::entities::query_string::QueryString;
use crate::ui::routes::Route;
use crate::usecase::ports::query_store::QueryStore;

/// `QueryStore` over the router's current location.
///
/// On the web the router history is the browser's `location`/`history`, so
/// a replace here is a `history.replaceState`; desktop and mobile use the
/// router's in-memory history.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterQueryStore;

impl RouterQueryStore {
    fn current() -> Route {
        router().current::<Route>()
    }

    fn edit(&mut self, apply: impl FnOnce(&mut QueryString)) {
        if let Some(target) = replaced(&Self::current(), apply) {
            debug!(to = %target, "replacing location");
            navigator().replace(target);
        }
    }
}

/// The route after editing its query, or `None` when nothing changes.
fn replaced(route: &Route, apply: impl FnOnce(&mut QueryString)) -> Option<Route> {
    let query = route.query()?;
    let mut next = query.clone();
    apply(&mut next);
    if &next == query {
        return None;
    }
    Some(route.with_query(next))
}

impl QueryStore for RouterQueryStore {
    fn read(&self, key: &str) -> Option<String> {
        Self::current()
            .query()
            .and_then(|query| query.get(key))
            .map(str::to_string)
    }

    fn write(&mut self, key: &str, value: &str) {
        self.edit(|query| query.set(key, value));
    }

    fn delete(&mut self, key: &str) {
        self.edit(|query| {
            query.remove(key);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::filter::FILTERS_PARAM;
    use crate::usecase::services::filter_sync::FilterSynchronizer;

    /// Router stand-in: every replace swaps the held route.
    struct HeldRoute(Route);

    impl QueryStore for HeldRoute {
        fn read(&self, key: &str) -> Option<String> {
            self.0.query().and_then(|query| query.get(key)).map(str::to_string)
        }

        fn write(&mut self, key: &str, value: &str) {
            if let Some(next) = replaced(&self.0, |query| query.set(key, value)) {
                self.0 = next;
            }
        }

        fn delete(&mut self, key: &str) {
            if let Some(next) = replaced(&self.0, |query| {
                query.remove(key);
            }) {
                self.0 = next;
            }
        }
    }

    #[test]
    fn filters_reach_the_url_on_the_dashboard() {
        let mut store = HeldRoute(Route::dashboard());
        let mut filters = FilterSynchronizer::new("/");

        filters.add("eso", &mut store);
        filters.add("role:teacher", &mut store);

        assert_eq!(store.read(FILTERS_PARAM).as_deref(), Some("eso,role:teacher"));
        assert_eq!(store.0.pathname(), "/");

        filters.clear(&mut store);

        assert_eq!(store.read(FILTERS_PARAM), None);
    }

    #[test]
    fn detail_screen_keeps_its_id_when_filters_change() {
        let mut store = HeldRoute(Route::user_detail("u-7"));
        let mut filters = FilterSynchronizer::new("/users/u-7");

        filters.add("eso", &mut store);

        assert_eq!(
            store.0,
            Route::UserDetail {
                id: "u-7".to_string(),
                query: QueryString::parse("filters=eso"),
            }
        );
    }

    #[test]
    fn deep_link_on_a_screen_without_a_list_is_adopted() {
        let mut store = HeldRoute(Route::Credentials {
            query: QueryString::parse("filters=eso,bio"),
        });
        let mut filters = FilterSynchronizer::new("/credentials");

        filters.observe_route("/credentials", &mut store);

        assert_eq!(filters.filters().to_vec(), ["eso", "bio"]);
    }

    #[test]
    fn unchanged_query_is_not_replaced() {
        let route = Route::users().with_query(QueryString::parse("page=2"));

        assert_eq!(replaced(&route, |query| query.set("page", "2")), None);
        let not_found = Route::NotFound {
            segments: Vec::new(),
        };
        assert_eq!(replaced(&not_found, |query| query.set("page", "2")), None);
    }
}
