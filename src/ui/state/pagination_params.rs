use dioxus::prelude::*;
use tracing::debug;

use crate::domain::entities::pagination::{PageParams, LIMIT_PARAM, PAGE_PARAM};
use crate::domain::entities::query_string::QueryString;
use crate::ui::state::router_store::RouterQueryStore;
use crate::usecase::services::pagination_sync::PaginationSynchronizer;

#[derive(Clone, Copy, PartialEq)]
pub struct PaginationHandle {
    engine: Signal<PaginationSynchronizer>,
}

impl PaginationHandle {
    pub fn params(&self) -> PageParams {
        self.engine.read().params()
    }

    pub fn page(&self) -> u32 {
        self.engine.read().page()
    }

    pub fn limit(&self) -> u32 {
        self.engine.read().limit()
    }

    pub fn set_page(&mut self, page: u32) {
        self.engine.write().set_page(page, &mut RouterQueryStore);
    }

    pub fn set_limit(&mut self, limit: u32) {
        self.engine.write().set_limit(limit, &mut RouterQueryStore);
    }
}

/// Page and page size of a list screen, mirrored into `?page=&limit=`.
///
/// `query` is the route's query at mount. A change of `filters` after
/// mount sends the screen back to page 1.
pub fn use_pagination_params(
    default_limit: u32,
    query: &QueryString,
    filters: Vec<String>,
) -> PaginationHandle {
    let seed = PageParams::from_raw(query.get(PAGE_PARAM), query.get(LIMIT_PARAM), default_limit);
    let mut engine = use_signal(move || PaginationSynchronizer::starting_at(seed, default_limit));

    // Spawned rather than run inline: the task is polled after the router has
    // applied the navigation that mounted this screen.
    use_hook(move || {
        spawn(async move {
            let mut engine = engine;
            engine.write().restore(&mut RouterQueryStore);
        })
    });

    use_effect(use_reactive!(|filters| {
        debug!(filters = filters.len(), "list filters changed");
        engine.write().filters_changed(&mut RouterQueryStore);
    }));

    PaginationHandle { engine }
}
