use dioxus::prelude::*;

use crate::ui::styles::chip_style;

#[component]
pub fn StyledChip(
    text: String,
    color: &'static str,
    on_close: Option<EventHandler<()>>,
) -> Element {
    let style = chip_style(color);
    rsx! {
        span {
            style: "{style}",
            "{text}"
            if let Some(on_close) = on_close {
                button {
                    style: "border: none; background: transparent; cursor: pointer; color: inherit; padding: 0 0 0 2px;",
                    title: "Quitar",
                    onclick: move |event| {
                        event.stop_propagation();
                        on_close.call(());
                    },
                    "×"
                }
            }
        }
    }
}
