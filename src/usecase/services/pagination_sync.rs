use crate::domain::entities::pagination::{PageParams, LIMIT_PARAM, PAGE_PARAM};
use crate::domain::entities::update::Update;
use crate::usecase::ports::query_store::{QueryState, QueryStore};
use crate::usecase::services::url_state::Synced;

impl QueryState for PageParams {
    fn write_to(&self, store: &mut dyn QueryStore) {
        store.write(PAGE_PARAM, &self.page.to_string());
        store.write(LIMIT_PARAM, &self.limit.to_string());
    }
}

/// Keeps `(page, limit)` consistent with the `page`/`limit` URL parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationSynchronizer {
    default_limit: u32,
    state: Synced<PageParams>,
    filters_seen: bool,
}

impl PaginationSynchronizer {
    /// Starts from values already known from the route, so the first render
    /// lists the right page. `restore` still runs once navigation settles.
    pub fn starting_at(initial: PageParams, default_limit: u32) -> Self {
        Self {
            default_limit: default_limit.max(1),
            state: Synced::new(initial),
            filters_seen: false,
        }
    }

    pub fn params(&self) -> PageParams {
        *self.state.get()
    }

    pub fn page(&self) -> u32 {
        self.state.get().page
    }

    pub fn limit(&self) -> u32 {
        self.state.get().limit
    }

    /// Mount-time read, run once navigation has settled.
    ///
    /// The normalized values are written back so the URL always carries
    /// `page` and `limit`, then adopted as an external update.
    pub fn restore(&mut self, store: &mut dyn QueryStore) -> bool {
        let from_url = PageParams::from_raw(
            store.read(PAGE_PARAM).as_deref(),
            store.read(LIMIT_PARAM).as_deref(),
            self.default_limit,
        );
        from_url.write_to(store);
        self.state.apply(Update::external(from_url), store)
    }

    /// No bounds check: the backend decides whether a page exists.
    pub fn set_page(&mut self, page: u32, store: &mut dyn QueryStore) -> bool {
        let next = PageParams {
            page: page.max(1),
            limit: self.limit(),
        };
        self.state.apply(Update::local(next), store)
    }

    /// A new page size invalidates the current page, so it restarts at 1.
    pub fn set_limit(&mut self, limit: u32, store: &mut dyn QueryStore) -> bool {
        self.state.apply(Update::local(PageParams::first(limit)), store)
    }

    /// Reacts to a change of the caller's filter dependency.
    ///
    /// The first notification comes from mounting and must not clobber a
    /// page restored from the URL.
    pub fn filters_changed(&mut self, store: &mut dyn QueryStore) -> bool {
        if !self.filters_seen {
            self.filters_seen = true;
            return false;
        }
        self.set_page(1, store)
    }
}
