use dioxus::prelude::*;

use crate::ui::routes::Route;
use crate::ui::state::router_store::RouterQueryStore;
use crate::usecase::services::filter_sync::FilterSynchronizer;

/// Handle to the app-wide search tokens, provided once at the shell.
#[derive(Clone, Copy, PartialEq)]
pub struct FilterContext {
    engine: Signal<FilterSynchronizer>,
}

impl FilterContext {
    pub fn filters(&self) -> Vec<String> {
        self.engine.read().filters().to_vec()
    }

    pub fn add_filter(&mut self, raw: &str) {
        self.engine.write().add(raw, &mut RouterQueryStore);
    }

    pub fn remove_filter(&mut self, index: usize) {
        self.engine.write().remove(index, &mut RouterQueryStore);
    }

    pub fn clear_filters(&mut self) {
        self.engine.write().clear(&mut RouterQueryStore);
    }
}

/// Installs the filter state for every screen below the caller.
pub fn use_filter_provider() -> FilterContext {
    let pathname = use_route::<Route>().pathname();
    let initial = pathname.clone();
    // Tokens already in the URL are adopted before the first render so list
    // screens never observe an empty set that is replaced right after.
    let mut engine = use_signal(move || {
        let mut engine = FilterSynchronizer::new(initial.clone());
        engine.observe_route(&initial, &mut RouterQueryStore);
        engine
    });
    let context = use_context_provider(|| FilterContext { engine });

    use_effect(use_reactive!(|pathname| {
        engine.write().observe_route(&pathname, &mut RouterQueryStore);
    }));

    context
}

pub fn use_filters() -> FilterContext {
    use_context::<FilterContext>()
}
