use dioxus::prelude::*;

use crate::ui::styles::ERROR;

/// In-app confirmation for destructive actions.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.35); display: flex; align-items: center; justify-content: center; z-index: 1300;",
            onclick: move |_| on_cancel.call(()),
            div {
                style: "background: #fff; border-radius: 12px; padding: 20px 24px; min-width: 320px; max-width: 440px; box-shadow: 0 10px 24px rgba(0,0,0,0.2);",
                onclick: move |event| event.stop_propagation(),
                h3 { style: "margin: 0 0 8px;", "{title}" }
                p { style: "margin: 0 0 20px;", "{message}" }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 8px;",
                    button {
                        style: "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| on_cancel.call(()),
                        "Cancelar"
                    }
                    button {
                        style: "border: none; background: {ERROR}; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| on_confirm.call(()),
                        "{confirm_label}"
                    }
                }
            }
        }
    }
}
