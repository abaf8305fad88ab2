use dioxus::prelude::*;

use crate::domain::entities::pagination::{ListParams, PageParams};
use crate::platform::blocking::run_blocking;
use crate::ui::routes::{Route, ScreenQuery};
use crate::ui::state::app_state::use_app_services;
use crate::ui::styles::{ERROR, GREY, PRIMARY};
use crate::usecase::ports::repo::RepoError;

#[derive(Clone, Debug, PartialEq)]
struct Totals {
    users: u64,
    teachers: u64,
    departments: u64,
    subjects: u64,
}

#[component]
fn StatCard(label: &'static str, value: Option<u64>, to: Route) -> Element {
    let text = value.map_or_else(|| "–".to_string(), |value| value.to_string());
    rsx! {
        Link {
            to,
            style: "flex: 1; min-width: 180px; text-decoration: none; background: #fff; border-radius: 10px; padding: 16px 20px; box-shadow: 0 1px 4px rgba(0,0,0,0.08);",
            div { style: "font-size: 13px; color: {GREY};", "{label}" }
            div { style: "font-size: 28px; font-weight: 600; color: {PRIMARY};", "{text}" }
        }
    }
}

#[allow(non_snake_case)]
pub fn Dashboard(_: ScreenQuery) -> Element {
    let services = use_app_services();

    let totals = use_memo(move || {
        let directory = services.directory.clone();
        run_blocking("dashboard_totals", move || {
            // Only `meta.total` is read, so one row per request is enough.
            let count = |filters: Vec<String>| ListParams {
                page: PageParams::first(1),
                filters,
            };
            Ok::<_, RepoError>(Totals {
                users: directory.list_users(&count(Vec::new()))?.meta.total,
                teachers: directory
                    .list_users(&count(vec!["role:teacher".to_string()]))?
                    .meta
                    .total,
                departments: directory.list_departments(&count(Vec::new()))?.meta.total,
                subjects: directory.list_subjects(&count(Vec::new()))?.meta.total,
            })
        })
    });

    let (values, error) = match totals() {
        Ok(totals) => (Some(totals), None),
        Err(err) => (None, Some(err.to_string())),
    };

    rsx! {
        h2 { style: "margin: 0; color: {PRIMARY};", "Panel de control" }
        if let Some(error) = error {
            p { style: "color: {ERROR};", "No se pudieron cargar los totales: {error}" }
        }
        div {
            style: "display: flex; flex-wrap: wrap; gap: 16px;",
            StatCard { label: "Usuarios", value: values.as_ref().map(|t| t.users), to: Route::users() }
            StatCard { label: "Profesores", value: values.as_ref().map(|t| t.teachers), to: Route::users() }
            StatCard { label: "Departamentos", value: values.as_ref().map(|t| t.departments), to: Route::departments() }
            StatCard { label: "Asignaturas", value: values.as_ref().map(|t| t.subjects), to: Route::subjects() }
        }
    }
}
