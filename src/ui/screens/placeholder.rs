use dioxus::prelude::*;

use crate::ui::routes::{Route, ScreenQuery};
use crate::ui::styles::{GREY, PRIMARY};

#[component]
fn ComingSoon(title: &'static str, description: &'static str) -> Element {
    rsx! {
        div {
            style: "flex: 1; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 8px;",
            h2 { style: "margin: 0; color: {PRIMARY};", "{title}" }
            p { style: "margin: 0; color: {GREY};", "{description}" }
        }
    }
}

#[allow(non_snake_case)]
pub fn Credentials(_: ScreenQuery) -> Element {
    rsx! {
        ComingSoon {
            title: "Credenciales",
            description: "La gestión de credenciales de acceso estará disponible próximamente.",
        }
    }
}

#[allow(non_snake_case)]
pub fn Reservations(_: ScreenQuery) -> Element {
    rsx! {
        ComingSoon {
            title: "Reservas",
            description: "Las reservas de espacios estarán disponibles próximamente.",
        }
    }
}

#[allow(non_snake_case)]
pub fn AccessLogs(_: ScreenQuery) -> Element {
    rsx! {
        ComingSoon {
            title: "Registros de acceso",
            description: "La supervisión de accesos estará disponible próximamente.",
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! {
        div {
            style: "padding: 40px; font-family: sans-serif;",
            h2 { style: "color: {PRIMARY};", "Página no encontrada" }
            p { style: "color: {GREY};", "No existe ninguna pantalla en {path}." }
            Link { to: Route::dashboard(), "Volver al inicio" }
        }
    }
}
