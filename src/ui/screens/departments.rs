use dioxus::prelude::*;
use tracing::info;

use crate::domain::entities::directory::{Department, DepartmentId};
use crate::domain::entities::pagination::ListParams;
use crate::domain::entities::query_string::QueryString;
use crate::domain::entities::table::{ColumnDescriptor, SortValue};
use crate::domain::entities::validation::DepartmentForm;
use crate::platform::blocking::run_blocking;
use crate::ui::components::confirm_dialog::ConfirmDialog;
use crate::ui::components::data_table::DataTable;
use crate::ui::components::form_field::{primary_button_style, StatusBanner, TextField};
use crate::ui::components::styled_chip::StyledChip;
use crate::ui::routes::{Route, ScreenQuery};
use crate::ui::state::app_state::{
    banner_message, field_message, use_app_services, FormState, ListState,
};
use crate::ui::state::filter_context::use_filters;
use crate::ui::state::pagination_params::use_pagination_params;
use crate::ui::styles::{button_style, cell_style, ERROR, GREY, PRIMARY, SUCCESS};
use crate::usecase::services::directory_service::ServiceError;

fn department_columns() -> Vec<ColumnDescriptor<Department>> {
    vec![
        ColumnDescriptor::new("name", "Departamento", 1.6).sort_by_field("name"),
        ColumnDescriptor::new("subjects", "Asignaturas", 0.7).sort_by_field("subjectCount"),
        ColumnDescriptor::new("teachers", "Profesores", 0.7).sort_by_field("teacherCount"),
        ColumnDescriptor::new("status", "Estado", 0.6).sort_by(|department: &Department| {
            SortValue::Number(if department.is_active { 1.0 } else { 0.0 })
        }),
        ColumnDescriptor::new("actions", "Acciones", 0.35).unsortable(),
    ]
}

#[component]
pub fn Departments(query: QueryString) -> Element {
    let services = use_app_services();
    let filters = use_filters();
    let mut pagination =
        use_pagination_params(services.config.default_limit, &query, filters.filters());
    let ListState {
        mut reload,
        mut pending_delete,
        mut status,
    } = ListState::<Department>::new();
    let columns = use_hook(department_columns);

    let directory = services.directory.clone();
    let listing = use_memo(move || {
        reload();
        let params = ListParams {
            page: pagination.params(),
            filters: filters.filters(),
        };
        run_blocking("list_departments", || directory.list_departments(&params))
    });

    let (rows, meta, load_error) = match listing() {
        Ok(response) => (response.data, Some(response.meta), None),
        Err(err) => (
            Vec::new(),
            None,
            Some(format!("Error al cargar departamentos: {err}")),
        ),
    };

    let render_row = Callback::new(move |department: Department| {
        let id = department.department_id.0;
        let name = department.name.clone();
        let is_active = department.is_active;
        let subject_count = department.subject_count;
        let teacher_count = department.teacher_count;
        let (status_label, status_color) = if is_active {
            ("Activo", SUCCESS)
        } else {
            ("Inactivo", GREY)
        };
        rsx! {
            div {
                style: "{cell_style(1.6)}",
                Link {
                    to: Route::department_detail(id),
                    style: "font-weight: 600; color: #222; text-decoration: none;",
                    "{name}"
                }
            }
            div { style: "{cell_style(0.7)}", "{subject_count}" }
            div { style: "{cell_style(0.7)}", "{teacher_count}" }
            div {
                style: "{cell_style(0.6)}",
                StyledChip { text: status_label, color: status_color }
            }
            div {
                style: "{cell_style(0.35)}",
                if is_active {
                    button {
                        style: "{button_style(true)}",
                        title: "Desactivar",
                        onclick: move |_| pending_delete.set(Some(department.clone())),
                        "🗑"
                    }
                }
            }
        }
    });

    let directory = services.directory.clone();
    let confirm_delete = move |_: ()| {
        let Some(department) = pending_delete() else {
            return;
        };
        match run_blocking("delete_department", || {
            directory.delete_department(department.department_id)
        }) {
            Ok(()) => {
                info!(department_id = department.department_id.0, "department deactivated");
                status.set(Some(format!("Departamento {} desactivado", department.name)));
                reload += 1;
            }
            Err(err) => status.set(Some(format!("No se pudo desactivar: {err}"))),
        }
        pending_delete.set(None);
    };

    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between;",
            h2 { style: "margin: 0; color: {PRIMARY};", "Departamentos" }
            Link {
                to: Route::department_create(),
                style: "{primary_button_style(true)} text-decoration: none;",
                "+ Nuevo departamento"
            }
        }
        StatusBanner { message: load_error.or(status()) }
        DataTable::<Department> {
            data: rows,
            columns,
            key_extractor: Callback::new(|department: Department| department.department_id.0.to_string()),
            render_row,
            pagination: meta,
            on_page_change: move |page| pagination.set_page(page),
            on_limit_change: move |limit| pagination.set_limit(limit),
            limit_options: services.config.limit_options.clone(),
            on_refresh: move |_| reload += 1,
            empty_message: "No hay departamentos disponibles",
            default_sort_key: Some("name".to_string()),
        }
        if let Some(department) = pending_delete() {
            ConfirmDialog {
                title: "Desactivar departamento",
                message: format!(
                    "¿Desactivar {}? Sus asignaturas y profesores se conservan.",
                    department.name
                ),
                confirm_label: "Desactivar",
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

#[component]
fn DepartmentFields(mut form: Signal<DepartmentForm>, error: Option<ServiceError>) -> Element {
    let current = form();
    rsx! {
        TextField {
            label: "Nombre del departamento",
            value: current.name,
            placeholder: "Ej. Ciencias Naturales",
            error: field_message(&error, "name"),
            on_input: move |value| form.write().name = value,
        }
    }
}

#[allow(non_snake_case)]
pub fn DepartmentCreate(_: ScreenQuery) -> Element {
    let services = use_app_services();
    let FormState {
        form,
        mut error,
        mut busy,
    } = FormState::<DepartmentForm>::new();

    let directory = services.directory.clone();
    let submit = move |_: MouseEvent| {
        busy.set(true);
        let result = run_blocking("create_department", || {
            directory.create_department(&form.read())
        });
        busy.set(false);
        match result {
            Ok(department) => {
                info!(department_id = department.department_id.0, "department created");
                navigator().go_back();
            }
            Err(err) => error.set(Some(err)),
        }
    };

    rsx! {
        h2 { style: "margin: 0; color: {PRIMARY};", "Nuevo departamento" }
        StatusBanner { message: banner_message(&error()) }
        DepartmentFields { form, error: error() }
        div {
            style: "display: flex; gap: 8px;",
            button {
                style: "{primary_button_style(!busy())}",
                disabled: busy(),
                onclick: submit,
                "Crear departamento"
            }
            button {
                style: "{button_style(true)}",
                onclick: move |_| navigator().go_back(),
                "Cancelar"
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct DepartmentDetailProps {
    id: i64,
    query: QueryString,
}

#[allow(non_snake_case)]
pub fn DepartmentDetail(props: DepartmentDetailProps) -> Element {
    let DepartmentDetailProps { id, .. } = props;
    let services = use_app_services();
    let department = use_memo(use_reactive!(|id| {
        run_blocking("get_department", || {
            services.directory.get_department(DepartmentId(id))
        })
    }));

    match department() {
        Ok(department) => {
            let key = department.department_id.0;
            rsx! {
                DepartmentEditor { key: "{key}", department }
            }
        }
        Err(err) => rsx! {
            h2 { style: "margin: 0; color: {PRIMARY};", "Departamento" }
            p { style: "color: {ERROR};", "Error al cargar el departamento: {err}" }
            Link { to: Route::departments(), "Volver a departamentos" }
        },
    }
}

#[component]
fn DepartmentEditor(department: Department) -> Element {
    let services = use_app_services();
    let initial = DepartmentForm {
        name: department.name.clone(),
    };
    let form = use_signal(move || initial);
    let mut is_active = use_signal(|| department.is_active);
    let mut error = use_signal(|| None::<ServiceError>);
    let mut confirm_open = use_signal(|| false);
    let mut delete_error = use_signal(|| None::<String>);
    let id = department.department_id;

    let directory = services.directory.clone();
    let save = move |_: MouseEvent| {
        match run_blocking("update_department", || {
            directory.update_department(id, &form.read(), is_active())
        }) {
            Ok(updated) => {
                info!(department_id = updated.department_id.0, "department updated");
                navigator().go_back();
            }
            Err(err) => error.set(Some(err)),
        }
    };

    let directory = services.directory.clone();
    let deactivate = move |_: ()| {
        confirm_open.set(false);
        match run_blocking("delete_department", || directory.delete_department(id)) {
            Ok(()) => {
                info!(department_id = id.0, "department deactivated");
                navigator().replace(Route::departments());
            }
            Err(err) => delete_error.set(Some(format!("No se pudo desactivar: {err}"))),
        }
    };

    rsx! {
        h2 { style: "margin: 0; color: {PRIMARY};", "Editar departamento" }
        p {
            style: "margin: 0; color: {GREY};",
            "{department.subject_count} asignaturas · {department.teacher_count} profesores"
        }
        StatusBanner { message: banner_message(&error()).or(delete_error()) }
        DepartmentFields { form, error: error() }
        label {
            style: "display: inline-flex; align-items: center; gap: 6px;",
            input {
                r#type: "checkbox",
                checked: is_active(),
                onchange: move |_| is_active.set(!is_active()),
            }
            "Departamento activo"
        }
        div {
            style: "display: flex; gap: 8px;",
            button { style: "{primary_button_style(true)}", onclick: save, "Guardar cambios" }
            if department.is_active {
                button {
                    style: "{button_style(true)} color: {ERROR};",
                    onclick: move |_| confirm_open.set(true),
                    "Desactivar departamento"
                }
            }
            button {
                style: "{button_style(true)}",
                onclick: move |_| navigator().go_back(),
                "Cancelar"
            }
        }
        if confirm_open() {
            ConfirmDialog {
                title: "Desactivar departamento",
                message: format!("¿Desactivar {}?", department.name),
                confirm_label: "Desactivar",
                on_confirm: deactivate,
                on_cancel: move |_| confirm_open.set(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::{sort_rows, SortDirection, SortState};

    fn department(id: i64, name: &str, subjects: i64) -> Department {
        Department {
            department_id: DepartmentId(id),
            name: name.to_string(),
            is_active: true,
            subject_count: subjects,
            teacher_count: 0,
        }
    }

    #[test]
    fn counts_sort_numerically() {
        let rows = vec![
            department(1, "Lengua", 10),
            department(2, "Música", 2),
            department(3, "Física", 9),
        ];
        let columns = department_columns();
        let state = SortState::new(Some("subjects"), SortDirection::Desc);

        let names: Vec<&str> = sort_rows(&rows, &columns, &state)
            .into_iter()
            .map(|row| row.name.as_str())
            .collect();

        assert_eq!(names, ["Lengua", "Física", "Música"]);
    }
}
