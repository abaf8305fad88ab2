use dioxus::prelude::*;

use crate::ui::components::search_menu::SearchMenu;
use crate::ui::routes::Route;
use crate::ui::state::filter_context::use_filter_provider;
use crate::ui::styles::{root_container_style, PRIMARY, SECONDARY};

struct Tab {
    label: &'static str,
    prefix: &'static str,
    target: fn() -> Route,
}

const TABS: [Tab; 7] = [
    Tab { label: "Inicio", prefix: "/", target: Route::dashboard },
    Tab { label: "Usuarios", prefix: "/users", target: Route::users },
    Tab { label: "Departamentos", prefix: "/academic/departments", target: Route::departments },
    Tab { label: "Asignaturas", prefix: "/academic/subjects", target: Route::subjects },
    Tab { label: "Credenciales", prefix: "/credentials", target: Route::credentials },
    Tab { label: "Reservas", prefix: "/access/reservations", target: Route::reservations },
    Tab { label: "Registros de acceso", prefix: "/supervision/logs", target: Route::access_logs },
];

fn tab_is_active(prefix: &str, pathname: &str) -> bool {
    if prefix == "/" {
        pathname == "/"
    } else {
        pathname == prefix || pathname.starts_with(&format!("{prefix}/"))
    }
}

/// Layout of every screen: title bar with the search menu, tab bar, content.
#[component]
pub fn Shell() -> Element {
    use_filter_provider();
    let pathname = use_route::<Route>().pathname();

    rsx! {
        div {
            style: "{root_container_style()}",
            div {
                style: "display: flex; align-items: center; justify-content: space-between; padding: 10px 20px; background: {PRIMARY}; color: #fff;",
                span { style: "font-size: 18px; font-weight: 600;", "Campus Admin" }
                div {
                    style: "background: #fff; border-radius: 18px; padding: 2px 8px;",
                    SearchMenu {}
                }
            }
            nav {
                style: "display: flex; gap: 4px; padding: 0 16px; background: #fff; border-bottom: 1px solid #e0e0e0;",
                {TABS.iter().map(|tab| {
                    let active = tab_is_active(tab.prefix, &pathname);
                    let border = if active { SECONDARY } else { "transparent" };
                    let weight = if active { 600 } else { 400 };
                    rsx!(
                        Link {
                            key: "{tab.prefix}",
                            to: (tab.target)(),
                            style: "padding: 10px 14px; text-decoration: none; color: {SECONDARY}; border-bottom: 3px solid {border}; font-weight: {weight};",
                            "{tab.label}"
                        }
                    )
                })}
            }
            div {
                style: "flex: 1; min-height: 0; display: flex; flex-direction: column; padding: 16px 20px; gap: 12px; overflow: auto;",
                Outlet::<Route> {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_paths_keep_their_tab_active() {
        assert!(tab_is_active("/users", "/users/create"));
        assert!(tab_is_active("/academic/subjects", "/academic/subjects"));
        assert!(!tab_is_active("/users", "/usersx"));
        assert!(!tab_is_active("/", "/users"));
    }
}
