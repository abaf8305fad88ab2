use dioxus::prelude::*;
use serde::Serialize;

use crate::domain::entities::pagination::{Pagination, LIMIT_OPTIONS};
use crate::domain::entities::table::{sort_rows, ColumnDescriptor, SortDirection, SortState};
use crate::ui::components::data_table_footer::DataTableFooter;
use crate::ui::styles::{
    button_style, header_cell_style, row_style, table_container_style, table_header_style, GREY,
};

pub const DEFAULT_EMPTY_MESSAGE: &str = "No hay datos disponibles";

#[derive(Props, Clone, PartialEq)]
pub struct DataTableProps<T: Clone + PartialEq + Serialize + 'static> {
    pub data: Vec<T>,
    pub columns: Vec<ColumnDescriptor<T>>,
    pub key_extractor: Callback<T, String>,
    pub render_row: Callback<T, Element>,
    pub pagination: Option<Pagination>,
    pub on_page_change: Option<EventHandler<u32>>,
    pub on_limit_change: Option<EventHandler<u32>>,
    #[props(default = LIMIT_OPTIONS.to_vec())]
    pub limit_options: Vec<u32>,
    #[props(default)]
    pub is_loading: bool,
    pub on_refresh: Option<EventHandler<()>>,
    #[props(default = DEFAULT_EMPTY_MESSAGE.to_string())]
    pub empty_message: String,
    pub default_sort_key: Option<String>,
    #[props(default)]
    pub default_sort_order: SortDirection,
}

/// Paginated table with client-side sorting of the loaded page.
#[allow(non_snake_case)]
pub fn DataTable<T: Clone + PartialEq + Serialize + 'static>(props: DataTableProps<T>) -> Element {
    let default_sort_key = props.default_sort_key.clone();
    let default_sort_order = props.default_sort_order;
    let mut sort = use_signal(move || {
        SortState::new(default_sort_key.as_deref(), default_sort_order)
    });
    let mut hovered = use_signal(|| None::<&'static str>);

    let sorted: Vec<T> = sort_rows(&props.data, &props.columns, &sort.read())
        .into_iter()
        .cloned()
        .collect();
    let header_style = table_header_style();
    let row_style = row_style();

    rsx! {
        div {
            style: "{table_container_style()}",
            div {
                style: "{header_style}",
                {props.columns.iter().map(|column| {
                    let key = column.key;
                    let sortable = column.sortable;
                    let is_active = sort.read().is_active(key);
                    let is_hovered = hovered() == Some(key);
                    let arrow = if is_active { sort.read().direction.arrow() } else { "" };
                    let style = header_cell_style(column.flex, sortable, is_active || is_hovered);
                    let label = column.label.clone();
                    let column = column.clone();
                    rsx!(
                        div {
                            key: "{key}",
                            style: "{style}",
                            onclick: move |_| {
                                sort.write().toggle(&column);
                            },
                            onmouseenter: move |_| {
                                if sortable {
                                    hovered.set(Some(key));
                                }
                            },
                            onmouseleave: move |_| hovered.set(None),
                            "{label} {arrow}"
                        }
                    )
                })}
                if let Some(on_refresh) = props.on_refresh {
                    button {
                        style: "{button_style(!props.is_loading)}",
                        disabled: props.is_loading,
                        title: "Actualizar",
                        onclick: move |_| on_refresh.call(()),
                        if props.is_loading { "…" } else { "⟳" }
                    }
                }
            }
            div {
                style: "flex: 1; overflow-y: auto;",
                if sorted.is_empty() {
                    div {
                        style: "padding: 24px; text-align: center; color: {GREY};",
                        if props.is_loading { "Cargando…" } else { "{props.empty_message}" }
                    }
                }
                {sorted.into_iter().map(|row| {
                    let row_key = props.key_extractor.call(row.clone());
                    let content = props.render_row.call(row);
                    rsx!(
                        div {
                            key: "{row_key}",
                            style: "{row_style}",
                            {content}
                        }
                    )
                })}
            }
            if let Some(pagination) = props.pagination {
                if let Some(on_page_change) = props.on_page_change {
                    DataTableFooter {
                        pagination,
                        on_page_change,
                        on_limit_change: props.on_limit_change,
                        limit_options: props.limit_options.clone(),
                    }
                }
            }
        }
    }
}
