use dioxus::prelude::*;
use tracing::info;

use crate::domain::entities::directory::{
    role_label, roles_label, DepartmentId, User, KNOWN_ROLES, ROLE_ADMIN,
    ROLE_JANITOR, ROLE_TEACHER,
};
use crate::domain::entities::pagination::ListParams;
use crate::domain::entities::query_string::QueryString;
use crate::domain::entities::table::{ColumnDescriptor, SortValue};
use crate::domain::entities::validation::UserForm;
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
use crate::ui::styles::{cell_style, button_style, ERROR, GREY, PRIMARY, SUCCESS, TERTIARY};
use crate::usecase::services::directory_service::ServiceError;

pub fn role_color(roles: &[String]) -> &'static str {
    let has = |role: &str| roles.iter().any(|r| r == role);
    if has(ROLE_ADMIN) {
        ERROR
    } else if has(ROLE_TEACHER) {
        TERTIARY
    } else if has(ROLE_JANITOR) {
        PRIMARY
    } else {
        GREY
    }
}

fn user_columns() -> Vec<ColumnDescriptor<User>> {
    vec![
        ColumnDescriptor::new("name", "Usuario", 1.4).sort_by(|user: &User| user.full_name().into()),
        ColumnDescriptor::new("email", "Email", 1.0).sort_by_field("email"),
        ColumnDescriptor::new("role", "Rol", 1.2)
            .sort_by(|user: &User| roles_label(&user.roles).into()),
        ColumnDescriptor::new("department", "Departamento", 0.9).sort_by(|user: &User| {
            user.department
                .as_ref()
                .map(|department| department.name.clone())
                .unwrap_or_default()
                .into()
        }),
        ColumnDescriptor::new("status", "Estado", 0.6)
            .sort_by(|user: &User| SortValue::Number(if user.is_active() { 1.0 } else { 0.0 })),
        ColumnDescriptor::new("actions", "Acciones", 0.35).unsortable(),
    ]
}

/// `YYYY-MM-DD` prefix of a stored timestamp, for date inputs.
fn date_part(value: Option<&str>) -> String {
    value
        .map(|raw| raw.chars().take(10).collect())
        .unwrap_or_default()
}

pub fn form_from_user(user: &User) -> UserForm {
    UserForm {
        name: user.name.clone(),
        lastname: user.lastname.clone(),
        email: user.email.clone(),
        roles: user.roles.clone(),
        department_id: user
            .department
            .as_ref()
            .map(|department| department.department_id),
        valid_from: date_part(user.valid_from.as_deref()),
        valid_to: date_part(user.valid_to.as_deref()),
    }
}

#[component]
pub fn Users(query: QueryString) -> Element {
    let services = use_app_services();
    let filters = use_filters();
    let mut pagination =
        use_pagination_params(services.config.default_limit, &query, filters.filters());
    let ListState {
        mut reload,
        mut pending_delete,
        mut status,
    } = ListState::<User>::new();
    let columns = use_hook(user_columns);

    let directory = services.directory.clone();
    let listing = use_memo(move || {
        reload();
        let params = ListParams {
            page: pagination.params(),
            filters: filters.filters(),
        };
        run_blocking("list_users", || directory.list_users(&params))
    });

    let (rows, meta, load_error) = match listing() {
        Ok(response) => (response.data, Some(response.meta), None),
        Err(err) => (Vec::new(), None, Some(format!("Error al cargar usuarios: {err}"))),
    };

    let render_row = Callback::new(move |user: User| {
        let active = user.is_active();
        let department = user
            .department
            .as_ref()
            .filter(|_| user.has_role(ROLE_TEACHER))
            .map(|department| department.name.clone())
            .unwrap_or_default();
        let roles = roles_label(&user.roles);
        let color = role_color(&user.roles);
        let id = user.user_id.clone();
        let full_name = user.full_name();
        let email = user.email.clone();
        let (status_label, status_color) = if active {
            ("Activo", SUCCESS)
        } else {
            ("Inactivo", GREY)
        };
        rsx! {
            div {
                style: "{cell_style(1.4)}",
                Link {
                    to: Route::user_detail(id),
                    style: "font-weight: 600; color: #222; text-decoration: none;",
                    "{full_name}"
                }
            }
            div { style: "{cell_style(1.0)}", "{email}" }
            div { style: "{cell_style(1.2)}", StyledChip { text: roles, color } }
            div { style: "{cell_style(0.9)}", "{department}" }
            div {
                style: "{cell_style(0.6)}",
                StyledChip { text: status_label, color: status_color }
            }
            div {
                style: "{cell_style(0.35)}",
                button {
                    style: "{button_style(true)}",
                    title: "Eliminar",
                    onclick: move |_| pending_delete.set(Some(user.clone())),
                    "🗑"
                }
            }
        }
    });

    let directory = services.directory.clone();
    let confirm_delete = move |_: ()| {
        let Some(user) = pending_delete() else {
            return;
        };
        match run_blocking("delete_user", || directory.delete_user(&user.user_id)) {
            Ok(()) => {
                info!(user_id = %user.user_id, "user deleted");
                status.set(Some(format!("Usuario {} eliminado", user.full_name())));
                reload += 1;
            }
            Err(err) => status.set(Some(format!("No se pudo eliminar: {err}"))),
        }
        pending_delete.set(None);
    };

    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between;",
            h2 { style: "margin: 0; color: {PRIMARY};", "Usuarios" }
            Link {
                to: Route::user_create(),
                style: "{primary_button_style(true)} text-decoration: none;",
                "+ Nuevo usuario"
            }
        }
        StatusBanner { message: load_error.or(status()) }
        DataTable::<User> {
            data: rows,
            columns,
            key_extractor: Callback::new(|user: User| user.user_id),
            render_row,
            pagination: meta,
            on_page_change: move |page| pagination.set_page(page),
            on_limit_change: move |limit| pagination.set_limit(limit),
            limit_options: services.config.limit_options.clone(),
            on_refresh: move |_| reload += 1,
            empty_message: "No hay usuarios disponibles",
            default_sort_key: Some("name".to_string()),
        }
        if let Some(user) = pending_delete() {
            ConfirmDialog {
                title: "Eliminar usuario",
                message: format!("¿Eliminar a {}? Esta acción no se puede deshacer.", user.full_name()),
                confirm_label: "Eliminar",
                on_confirm: confirm_delete,
                on_cancel: move |_| pending_delete.set(None),
            }
        }
    }
}

/// Fields shared by the create and edit screens.
#[component]
fn UserFields(mut form: Signal<UserForm>, error: Option<ServiceError>) -> Element {
    let options = use_department_options();
    let current = form();
    let selected_department = current.department_id.map(|id| id.0.to_string());

    rsx! {
        div {
            style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px;",
            TextField {
                label: "Nombre",
                value: current.name.clone(),
                error: field_message(&error, "name"),
                on_input: move |value| form.write().name = value,
            }
            TextField {
                label: "Apellidos",
                value: current.lastname.clone(),
                error: field_message(&error, "lastname"),
                on_input: move |value| form.write().lastname = value,
            }
            TextField {
                label: "Email",
                input_type: "email",
                value: current.email.clone(),
                error: field_message(&error, "email"),
                on_input: move |value| form.write().email = value,
            }
            SelectField {
                label: "Departamento",
                options: department_select_options(&options()),
                selected: selected_department,
                error: field_message(&error, "department"),
                on_select: move |value: Option<String>| {
                    form.write().department_id =
                        value.and_then(|raw| raw.parse::<i64>().ok()).map(DepartmentId);
                },
            }
            TextField {
                label: "Válido desde",
                input_type: "date",
                value: current.valid_from.clone(),
                error: field_message(&error, "validFrom"),
                on_input: move |value| form.write().valid_from = value,
            }
            TextField {
                label: "Válido hasta",
                input_type: "date",
                value: current.valid_to.clone(),
                error: field_message(&error, "validTo"),
                on_input: move |value| form.write().valid_to = value,
            }
        }
        fieldset {
            style: "border: 1px solid #ddd; border-radius: 8px; display: flex; gap: 16px;",
            legend { style: "font-size: 13px; color: {GREY};", "Roles" }
            {KNOWN_ROLES.iter().map(|&role| {
                let checked = current.roles.iter().any(|r| r == role);
                rsx!(
                    label {
                        key: "{role}",
                        style: "display: inline-flex; align-items: center; gap: 4px;",
                        input {
                            r#type: "checkbox",
                            checked,
                            onchange: move |_| {
                                let mut form = form.write();
                                match form.roles.iter().position(|r| r == role) {
                                    Some(index) => {
                                        form.roles.remove(index);
                                    }
                                    None => form.roles.push(role.to_string()),
                                }
                            },
                        }
                        "{role_label(role)}"
                    }
                )
            })}
            if let Some(message) = field_message(&error, "roles") {
                span { style: "color: {ERROR}; font-size: 12px;", "{message}" }
            }
        }
    }
}

#[allow(non_snake_case)]
pub fn UserCreate(_: ScreenQuery) -> Element {
    let services = use_app_services();
    let FormState {
        form,
        mut error,
        mut busy,
    } = FormState::<UserForm>::new();

    let directory = services.directory.clone();
    let submit = move |_: MouseEvent| {
        busy.set(true);
        let result = run_blocking("create_user", || directory.create_user(&form.read()));
        busy.set(false);
        match result {
            Ok(user) => {
                info!(user_id = %user.user_id, "user created");
                navigator().go_back();
            }
            Err(err) => error.set(Some(err)),
        }
    };

    rsx! {
        h2 { style: "margin: 0; color: {PRIMARY};", "Nuevo usuario" }
        StatusBanner { message: banner_message(&error()) }
        UserFields { form, error: error() }
        div {
            style: "display: flex; gap: 8px;",
            button {
                style: "{primary_button_style(!busy())}",
                disabled: busy(),
                onclick: submit,
                "Crear usuario"
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
pub struct UserDetailProps {
    id: String,
    query: QueryString,
}

#[allow(non_snake_case)]
pub fn UserDetail(props: UserDetailProps) -> Element {
    let UserDetailProps { id, .. } = props;
    let services = use_app_services();
    let user = use_memo(use_reactive!(|id| {
        run_blocking("get_user", || services.directory.get_user(&id))
    }));

    match user() {
        Ok(user) => {
            let key = user.user_id.clone();
            rsx! {
                UserEditor { key: "{key}", user }
            }
        }
        Err(err) => rsx! {
            h2 { style: "margin: 0; color: {PRIMARY};", "Usuario" }
            p { style: "color: {ERROR};", "{err}" }
            Link { to: Route::users(), "Volver a usuarios" }
        },
    }
}

#[component]
fn UserEditor(user: User) -> Element {
    let services = use_app_services();
    let initial = form_from_user(&user);
    let form = use_signal(move || initial);
    let mut error = use_signal(|| None::<ServiceError>);
    let mut confirm_open = use_signal(|| false);
    let mut delete_error = use_signal(|| None::<String>);

    let directory = services.directory.clone();
    let user_id = user.user_id.clone();
    let save = move |_: MouseEvent| {
        match run_blocking("update_user", || directory.update_user(&user_id, &form.read())) {
            Ok(updated) => {
                info!(user_id = %updated.user_id, "user updated");
                navigator().go_back();
            }
            Err(err) => error.set(Some(err)),
        }
    };

    let directory = services.directory.clone();
    let user_id = user.user_id.clone();
    let delete = move |_: ()| {
        confirm_open.set(false);
        match run_blocking("delete_user", || directory.delete_user(&user_id)) {
            Ok(()) => {
                info!(user_id = %user_id, "user deleted");
                navigator().replace(Route::users());
            }
            Err(err) => delete_error.set(Some(format!("No se pudo eliminar: {err}"))),
        }
    };

    rsx! {
        h2 { style: "margin: 0; color: {PRIMARY};", "{user.full_name()}" }
        StatusBanner { message: banner_message(&error()).or(delete_error()) }
        UserFields { form, error: error() }
        div {
            style: "display: flex; gap: 8px;",
            button { style: "{primary_button_style(true)}", onclick: save, "Guardar cambios" }
            button {
                style: "{button_style(true)} color: {ERROR};",
                onclick: move |_| confirm_open.set(true),
                "Eliminar usuario"
            }
            button {
                style: "{button_style(true)}",
                onclick: move |_| navigator().go_back(),
                "Cancelar"
            }
        }
        if confirm_open() {
            ConfirmDialog {
                title: "Eliminar usuario",
                message: format!("¿Eliminar a {}? Esta acción no se puede deshacer.", user.full_name()),
                confirm_label: "Eliminar",
                on_confirm: delete,
                on_cancel: move |_| confirm_open.set(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::table::{sort_rows, SortDirection, SortState};

    fn user(id: &str, name: &str, roles: &[&str], valid_to: Option<&str>) -> User {
        User {
            user_id: id.to_string(),
            name: name.to_string(),
            lastname: "Ruiz".to_string(),
            email: format!("{id}@campus.es"),
            avatar: String::new(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
            department: None,
            valid_from: Some("2024-09-01T00:00:00Z".to_string()),
            valid_to: valid_to.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn admin_color_wins_over_teacher() {
        let roles = vec![ROLE_TEACHER.to_string(), ROLE_ADMIN.to_string()];

        assert_eq!(role_color(&roles), ERROR);
        assert_eq!(role_color(&["guest".to_string()]), GREY);
    }

    #[test]
    fn status_column_sorts_inactive_first() {
        let rows = vec![
            user("a", "Ana", &[ROLE_TEACHER], None),
            user("b", "Beatriz", &[ROLE_JANITOR], Some("2000-01-01")),
        ];
        let columns = user_columns();
        let state = SortState::new(Some("status"), SortDirection::Asc);

        let sorted = sort_rows(&rows, &columns, &state);

        assert_eq!(sorted[0].user_id, "b");
    }

    #[test]
    fn form_from_user_keeps_date_part() {
        let form = form_from_user(&user("a", "Ana", &[ROLE_TEACHER], Some("2026-06-30T00:00:00Z")));

        assert_eq!(form.valid_from, "2024-09-01");
        assert_eq!(form.valid_to, "2026-06-30");
        assert_eq!(form.roles, [ROLE_TEACHER]);
    }
}
