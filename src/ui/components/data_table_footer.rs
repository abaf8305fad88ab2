use dioxus::prelude::*;

use crate::domain::entities::pagination::Pagination;
use crate::ui::styles::{button_style, GREY, OUTLINE, SECONDARY};

/// "Mostrando 11-20 de 42"
pub fn range_label(pagination: &Pagination) -> String {
    let (from, to) = pagination.visible_range();
    format!("Mostrando {from}-{to} de {}", pagination.total)
}

/// Renders server-reported pagination; it never computes counts itself.
#[component]
pub fn DataTableFooter(
    pagination: Pagination,
    on_page_change: EventHandler<u32>,
    on_limit_change: Option<EventHandler<u32>>,
    limit_options: Vec<u32>,
) -> Element {
    let mut limit_menu_open = use_signal(|| false);
    let page = pagination.page;
    let total_pages = pagination.total_pages;
    let has_previous = pagination.has_previous;
    let has_next = pagination.has_next;
    let summary = range_label(&pagination);

    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; gap: 16px; padding: 8px 16px; border-top: 1px solid {OUTLINE}; font-size: 13px; color: {GREY};",
            span { "{summary}" }

            if let Some(on_limit_change) = on_limit_change {
                div {
                    style: "position: relative; display: flex; align-items: center; gap: 6px;",
                    span { "Filas por página:" }
                    button {
                        style: "border: 1px solid {SECONDARY}; color: {SECONDARY}; background: #fff; border-radius: 6px; padding: 2px 10px; cursor: pointer;",
                        onclick: move |_| limit_menu_open.set(!limit_menu_open()),
                        "{pagination.limit}"
                    }
                    if limit_menu_open() {
                        div {
                            style: "position: absolute; bottom: 28px; right: 0; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 6px 16px rgba(0,0,0,0.15); z-index: 1200;",
                            {limit_options.iter().map(|&limit| {
                                let background = if limit == pagination.limit { "#eef4ff" } else { "transparent" };
                                rsx!(
                                    div {
                                        key: "{limit}",
                                        style: "padding: 6px 16px; cursor: pointer; background: {background};",
                                        onclick: move |_| {
                                            on_limit_change.call(limit);
                                            limit_menu_open.set(false);
                                        },
                                        "{limit}"
                                    }
                                )
                            })}
                        }
                    }
                }
            }

            div {
                style: "display: flex; align-items: center; gap: 2px;",
                button {
                    style: "{button_style(has_previous)}",
                    disabled: !has_previous,
                    title: "Primera página",
                    onclick: move |_| on_page_change.call(1),
                    "⏮"
                }
                button {
                    style: "{button_style(has_previous)}",
                    disabled: !has_previous,
                    title: "Página anterior",
                    onclick: move |_| on_page_change.call(page.saturating_sub(1).max(1)),
                    "‹"
                }
                span { style: "padding: 0 8px;", "{page} / {total_pages}" }
                button {
                    style: "{button_style(has_next)}",
                    disabled: !has_next,
                    title: "Página siguiente",
                    onclick: move |_| on_page_change.call(page + 1),
                    "›"
                }
                button {
                    style: "{button_style(has_next)}",
                    disabled: !has_next,
                    title: "Última página",
                    onclick: move |_| on_page_change.call(total_pages),
                    "⏭"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::pagination::PageParams;

    #[test]
    fn range_label_uses_server_counts() {
        let meta = Pagination::compute(PageParams { page: 2, limit: 20 }, 42);

        assert_eq!(range_label(&meta), "Mostrando 21-40 de 42");
    }

    #[test]
    fn range_label_for_empty_result() {
        let meta = Pagination::compute(PageParams::first(10), 0);

        assert_eq!(range_label(&meta), "Mostrando 0-0 de 0");
    }
}
