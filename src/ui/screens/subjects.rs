use dioxus::prelude::*;
use tracing::info;

use crate::domain::entities::directory::{DepartmentId, Subject};
use crate::domain::entities::pagination::ListParams;
use crate::domain::entities::query_string::QueryString;
use crate::domain::entities::table::{ColumnDescriptor, SortValue};
use crate::domain::entities::validation::SubjectForm;
use crate::platform::blocking::run_blocking;
use crate::ui::components::confirm_dialog::ConfirmDialog;
use crate::ui::components::data_table::DataTable;
use crate::ui::components::form_field::{
    department_select_options, primary_button_style, SelectField, StatusBanner, TextField,
};
use crate::ui::components::styled_chip::StyledChip;
use crate::ui::routes::{Route, ScreenQuery};
use crate::ui::state::app_state::{
    banner_message, field_message, use_app_services, use_department_options, FormState, ListState,
};
use crate::ui::state::filter_context::use_filters;
use crate::ui::state::pagination_params::use_pagination_params;
use crate::ui::styles::{button_style, cell_style, GREY, PRIMARY, SECONDARY, SUCCESS};

fn subject_columns() -> Vec<ColumnDescriptor<Subject>> {
    vec![
        ColumnDescriptor::new("code", "Código", 0.7).sort_by_field("subjectCode"),
        ColumnDescriptor::new("name", "Asignatura", 1.6).sort_by_field("name"),
        ColumnDescriptor::new("department", "Departamento", 1.1)
            .sort_by(|subject: &Subject| subject.department.name.as_str().into()),
        ColumnDescriptor::new("status", "Estado", 0.6).sort_by(|subject: &Subject| {
            SortValue::Number(if subject.is_active { 1.0 } else { 0.0 })
        }),
        ColumnDescriptor::new("actions", "Acciones", 0.5).unsortable(),
    ]
}

fn toggle_label(is_active: bool) -> &'static str {
    if is_active {
        "Desactivar"
    } else {
        "Activar"
    }
}

fn toggle_title(is_active: bool) -> String {
    format!("{} asignatura", toggle_label(is_active))
}

#[component]
pub fn Subjects(query: QueryString) -> Element {
    let services = use_app_services();
    let filters = use_filters();
    let mut pagination =
        use_pagination_params(services.config.default_limit, &query, filters.filters());
    let ListState {
        mut reload,
        pending_delete: mut pending_toggle,
        mut status,
    } = ListState::<Subject>::new();
    let columns = use_hook(subject_columns);

    let directory = services.directory.clone();
    let listing = use_memo(move || {
        reload();
        let params = ListParams {
            page: pagination.params(),
            filters: filters.filters(),
        };
        run_blocking("list_subjects", || directory.list_subjects(&params))
    });

    let (rows, meta, load_error) = match listing() {
        Ok(response) => (response.data, Some(response.meta), None),
        Err(err) => (
            Vec::new(),
            None,
            Some(format!("Error al cargar asignaturas: {err}")),
        ),
    };

    let render_row = Callback::new(move |subject: Subject| {
        let code = subject.subject_code.clone();
        let name = subject.name.clone();
        let department_id = subject.department.department_id.0;
        let department_name = subject.department.name.clone();
        let is_active = subject.is_active;
        let (status_label, status_color) = if is_active {
            ("Activa", SUCCESS)
        } else {
            ("Inactiva", GREY)
        };
        let action = toggle_label(is_active);
        rsx! {
            div { style: "{cell_style(0.7)} font-family: monospace;", "{code}" }
            div { style: "{cell_style(1.6)} font-weight: 600;", "{name}" }
            div {
                style: "{cell_style(1.1)}",
                Link {
                    to: Route::department_detail(department_id),
                    style: "color: {SECONDARY}; text-decoration: none;",
                    "{department_name}"
                }
            }
            div {
                style: "{cell_style(0.6)}",
                StyledChip { text: status_label, color: status_color }
            }
            div {
                style: "{cell_style(0.5)}",
                button {
                    style: "{button_style(true)} font-size: 13px;",
                    onclick: move |_| pending_toggle.set(Some(subject.clone())),
                    "{action}"
                }
            }
        }
    });

    let directory = services.directory.clone();
    let confirm_toggle = move |_: ()| {
        let Some(subject) = pending_toggle() else {
            return;
        };
        let next = !subject.is_active;
        match run_blocking("update_subject", || {
            directory.set_subject_active(subject.subject_id, next)
        }) {
            Ok(updated) => {
                info!(subject_id = updated.subject_id.0, is_active = next, "subject updated");
                reload += 1;
            }
            Err(err) => status.set(Some(format!("No se pudo actualizar la asignatura: {err}"))),
        }
        pending_toggle.set(None);
    };

    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between;",
            h2 { style: "margin: 0; color: {PRIMARY};", "Gestión de Asignaturas" }
            Link {
                to: Route::subject_create(),
                style: "{primary_button_style(true)} text-decoration: none;",
                "+ Nueva asignatura"
            }
        }
        StatusBanner { message: load_error.or(status()) }
        DataTable::<Subject> {
            data: rows,
            columns,
            key_extractor: Callback::new(|subject: Subject| subject.subject_id.0.to_string()),
            render_row,
            pagination: meta,
            on_page_change: move |page| pagination.set_page(page),
            on_limit_change: move |limit| pagination.set_limit(limit),
            limit_options: services.config.limit_options.clone(),
            on_refresh: move |_| reload += 1,
            empty_message: "No hay asignaturas disponibles",
            default_sort_key: Some("code".to_string()),
        }
        if let Some(subject) = pending_toggle() {
            ConfirmDialog {
                title: toggle_title(subject.is_active),
                message: format!(
                    "¿{} {} ({})?",
                    toggle_label(subject.is_active),
                    subject.name,
                    subject.subject_code
                ),
                confirm_label: toggle_label(subject.is_active),
                on_confirm: confirm_toggle,
                on_cancel: move |_| pending_toggle.set(None),
            }
        }
    }
}

#[allow(non_snake_case)]
pub fn SubjectCreate(_: ScreenQuery) -> Element {
    let services = use_app_services();
    let options = use_department_options();
    let FormState {
        mut form,
        mut error,
        mut busy,
    } = FormState::<SubjectForm>::new();
    let current = form();
    let department_options = department_select_options(&options());

    let directory = services.directory.clone();
    let submit = move |_: MouseEvent| {
        busy.set(true);
        let result = run_blocking("create_subject", || directory.create_subject(&form.read()));
        busy.set(false);
        match result {
            Ok(subject) => {
                info!(subject_id = subject.subject_id.0, code = %subject.subject_code, "subject created");
                navigator().go_back();
            }
            Err(err) => error.set(Some(err)),
        }
    };

    rsx! {
        h2 { style: "margin: 0; color: {PRIMARY};", "Nueva asignatura" }
        StatusBanner { message: banner_message(&error()) }
        div {
            style: "display: grid; grid-template-columns: 1fr 2fr; gap: 12px;",
            TextField {
                label: "Código",
                value: current.subject_code.clone(),
                placeholder: "BIO-101",
                error: field_message(&error(), "subjectCode"),
                on_input: move |value: String| form.write().subject_code = value.to_uppercase(),
            }
            TextField {
                label: "Nombre",
                value: current.name.clone(),
                error: field_message(&error(), "name"),
                on_input: move |value| form.write().name = value,
            }
        }
        SelectField {
            label: "Departamento",
            options: department_options,
            selected: current.department_id.map(|id| id.0.to_string()),
            error: field_message(&error(), "department"),
            on_select: move |value: Option<String>| {
                form.write().department_id =
                    value.and_then(|raw| raw.parse::<i64>().ok()).map(DepartmentId);
            },
        }
        div {
            style: "display: flex; gap: 8px;",
            button {
                style: "{primary_button_style(!busy())}",
                disabled: busy(),
                onclick: submit,
                "Crear asignatura"
            }
            button {
                style: "{button_style(true)}",
                onclick: move |_| navigator().go_back(),
                "Cancelar"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::directory::{DepartmentBasic, SubjectId};
    use crate::domain::entities::table::{sort_rows, SortDirection, SortState};

    fn subject(id: i64, code: &str, department: &str) -> Subject {
        Subject {
            subject_id: SubjectId(id),
            subject_code: code.to_string(),
            name: format!("Asignatura {code}"),
            is_active: true,
            department: DepartmentBasic {
                department_id: DepartmentId(id),
                name: department.to_string(),
                is_active: true,
            },
        }
    }

    #[test]
    fn department_column_sorts_by_nested_name() {
        let rows = vec![
            subject(1, "MAT-201", "matemáticas"),
            subject(2, "BIO-101", "Biología"),
        ];
        let columns = subject_columns();
        let state = SortState::new(Some("department"), SortDirection::Asc);

        let sorted = sort_rows(&rows, &columns, &state);

        assert_eq!(sorted[0].subject_code, "BIO-101");
    }

    #[test]
    fn toggle_wording_follows_current_state() {
        assert_eq!(toggle_label(true), "Desactivar");
        assert_eq!(toggle_title(false), "Activar asignatura");
    }

    #[test]
    fn code_column_reads_serialized_field() {
        let rows = vec![subject(1, "MAT-201", "A"), subject(2, "BIO-101", "B")];
        let columns = subject_columns();
        let state = SortState::new(Some("code"), SortDirection::Desc);

        let sorted = sort_rows(&rows, &columns, &state);

        assert_eq!(sorted[0].subject_code, "MAT-201");
    }
}
