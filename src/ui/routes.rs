use dioxus::prelude::*;

use crate::domain::entities::query_string::QueryString;
use crate::ui::components::shell::Shell;
use crate::ui::screens::dashboard::Dashboard;
use crate::ui::screens::departments::{DepartmentCreate, DepartmentDetail, Departments};
use crate::ui::screens::placeholder::{AccessLogs, Credentials, NotFound, Reservations};
use crate::ui::screens::subjects::{SubjectCreate, Subjects};
use crate::ui::screens::users::{UserCreate, UserDetail, Users};

/// Every screen under the shell carries its whole query string, so the
/// global `filters` and the list `page`/`limit` travel with the route.
#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/?:..query")]
        Dashboard { query: QueryString },
        #[route("/users?:..query")]
        Users { query: QueryString },
        #[route("/users/create?:..query")]
        UserCreate { query: QueryString },
        #[route("/users/:id?:..query")]
        UserDetail { id: String, query: QueryString },
        #[route("/academic/departments?:..query")]
        Departments { query: QueryString },
        #[route("/academic/departments/create?:..query")]
        DepartmentCreate { query: QueryString },
        #[route("/academic/departments/:id?:..query")]
        DepartmentDetail { id: i64, query: QueryString },
        #[route("/academic/subjects?:..query")]
        Subjects { query: QueryString },
        #[route("/academic/subjects/create?:..query")]
        SubjectCreate { query: QueryString },
        #[route("/credentials?:..query")]
        Credentials { query: QueryString },
        #[route("/access/reservations?:..query")]
        Reservations { query: QueryString },
        #[route("/supervision/logs?:..query")]
        AccessLogs { query: QueryString },
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Props of a screen that only receives the route's query string.
#[derive(Props, Clone, PartialEq)]
pub struct ScreenQuery {
    pub query: QueryString,
}

impl Route {
    pub fn dashboard() -> Self {
        Route::Dashboard {
            query: QueryString::default(),
        }
    }

    pub fn users() -> Self {
        Route::Users {
            query: QueryString::default(),
        }
    }

    pub fn user_create() -> Self {
        Route::UserCreate {
            query: QueryString::default(),
        }
    }

    pub fn user_detail(id: impl Into<String>) -> Self {
        Route::UserDetail {
            id: id.into(),
            query: QueryString::default(),
        }
    }

    pub fn departments() -> Self {
        Route::Departments {
            query: QueryString::default(),
        }
    }

    pub fn department_create() -> Self {
        Route::DepartmentCreate {
            query: QueryString::default(),
        }
    }

    pub fn department_detail(id: i64) -> Self {
        Route::DepartmentDetail {
            id,
            query: QueryString::default(),
        }
    }

    pub fn subjects() -> Self {
        Route::Subjects {
            query: QueryString::default(),
        }
    }

    pub fn subject_create() -> Self {
        Route::SubjectCreate {
            query: QueryString::default(),
        }
    }

    pub fn credentials() -> Self {
        Route::Credentials {
            query: QueryString::default(),
        }
    }

    pub fn reservations() -> Self {
        Route::Reservations {
            query: QueryString::default(),
        }
    }

    pub fn access_logs() -> Self {
        Route::AccessLogs {
            query: QueryString::default(),
        }
    }

    /// Query of the current location; `None` only outside the shell.
    pub fn query(&self) -> Option<&QueryString> {
        match self {
            Route::Dashboard { query }
            | Route::Users { query }
            | Route::UserCreate { query }
            | Route::UserDetail { query, .. }
            | Route::Departments { query }
            | Route::DepartmentCreate { query }
            | Route::DepartmentDetail { query, .. }
            | Route::Subjects { query }
            | Route::SubjectCreate { query }
            | Route::Credentials { query }
            | Route::Reservations { query }
            | Route::AccessLogs { query } => Some(query),
            Route::NotFound { .. } => None,
        }
    }

    /// Same screen with a different query; the not-found page is unchanged.
    pub fn with_query(&self, next: QueryString) -> Self {
        let mut route = self.clone();
        match &mut route {
            Route::Dashboard { query }
            | Route::Users { query }
            | Route::UserCreate { query }
            | Route::UserDetail { query, .. }
            | Route::Departments { query }
            | Route::DepartmentCreate { query }
            | Route::DepartmentDetail { query, .. }
            | Route::Subjects { query }
            | Route::SubjectCreate { query }
            | Route::Credentials { query }
            | Route::Reservations { query }
            | Route::AccessLogs { query } => *query = next,
            Route::NotFound { .. } => {}
        }
        route
    }

    /// Path without the query string.
    pub fn pathname(&self) -> String {
        let full = self.to_string();
        match full.split_once('?') {
            Some((path, _)) => path.to_string(),
            None => full,
        }
    }
}
