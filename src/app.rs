use std::sync::Arc;

use anyhow::Result;
use dioxus::prelude::*;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::infra::sqlite::repo::SqliteRepo;
use crate::platform::blocking::run_blocking;
use crate::ui::routes::Route;
use crate::ui::state::app_state::AppServices;
use crate::usecase::services::directory_service::DirectoryService;

/// Loads the configuration and opens (and if needed seeds) the database.
pub fn bootstrap() -> Result<AppServices> {
    let config = AppConfig::load()?;
    let repo = Arc::new(SqliteRepo {
        db_path: config.db_path.clone(),
        seed_demo_data: config.seed_demo_data,
    });
    let directory = DirectoryService::new(repo);
    run_blocking("init", || directory.init())?;
    info!(
        db = %config.db_path.display(),
        page_size = config.default_limit,
        "campus admin ready"
    );
    Ok(AppServices {
        directory: Arc::new(directory),
        config: Arc::new(config),
    })
}

#[component]
pub fn App() -> Element {
    let services = use_hook(|| {
        bootstrap().map_err(|err| {
            error!(error = %format!("{err:#}"), "startup failed");
            format!("{err:#}")
        })
    });

    match services {
        Ok(services) => rsx! {
            ServicesRoot { services }
        },
        Err(message) => rsx! {
            div {
                style: "padding: 24px; font-family: sans-serif;",
                h2 { "No se pudo iniciar la aplicación" }
                p { "{message}" }
            }
        },
    }
}

#[component]
fn ServicesRoot(services: AppServices) -> Element {
    use_context_provider(|| services);
    rsx! {
        Router::<Route> {}
    }
}
