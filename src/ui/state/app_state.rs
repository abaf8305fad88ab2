use std::sync::Arc;

use dioxus::prelude::*;
use tracing::warn;

use crate::config::AppConfig;
use crate::domain::entities::directory::DepartmentBasic;
use crate::platform::blocking::run_blocking;
use crate::usecase::services::directory_service::{DirectoryService, ServiceError};

/// Services shared with every screen through the context.
#[derive(Clone)]
pub struct AppServices {
    pub directory: Arc<DirectoryService>,
    pub config: Arc<AppConfig>,
}

impl PartialEq for AppServices {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.directory, &other.directory) && Arc::ptr_eq(&self.config, &other.config)
    }
}

pub fn use_app_services() -> AppServices {
    use_context::<AppServices>()
}

/// Active departments for form selectors; empty when loading fails.
pub fn use_department_options() -> Memo<Vec<DepartmentBasic>> {
    let services = use_app_services();
    use_memo(move || {
        match run_blocking("department_options", || services.directory.department_options()) {
            Ok(options) => options,
            Err(err) => {
                warn!(error = %err, "department options unavailable");
                Vec::new()
            }
        }
    })
}

/// Local signals of a list screen.
pub struct ListState<T: 'static> {
    /// Bumped to force the list to load again.
    pub reload: Signal<u64>,
    pub pending_delete: Signal<Option<T>>,
    pub status: Signal<Option<String>>,
}

impl<T: 'static> ListState<T> {
    pub fn new() -> Self {
        Self {
            reload: use_signal(|| 0_u64),
            pending_delete: use_signal(|| None::<T>),
            status: use_signal(|| None::<String>),
        }
    }
}

/// Local signals of a create/edit form screen.
pub struct FormState<F: 'static> {
    pub form: Signal<F>,
    pub error: Signal<Option<ServiceError>>,
    pub busy: Signal<bool>,
}

impl<F: Default + 'static> FormState<F> {
    pub fn new() -> Self {
        Self {
            form: use_signal(F::default),
            error: use_signal(|| None::<ServiceError>),
            busy: use_signal(|| false),
        }
    }
}

/// Message of a failed field check, if the last submit failed validation.
pub fn field_message(error: &Option<ServiceError>, field: &str) -> Option<String> {
    match error {
        Some(ServiceError::Validation(validation)) => {
            validation.message_for(field).map(str::to_string)
        }
        _ => None,
    }
}

/// Banner text for errors that are not tied to a field.
pub fn banner_message(error: &Option<ServiceError>) -> Option<String> {
    match error {
        Some(ServiceError::Repo(err)) => Some(err.to_string()),
        Some(ServiceError::Validation(_)) => Some("Revisa los campos marcados".to_string()),
        None => None,
    }
}
