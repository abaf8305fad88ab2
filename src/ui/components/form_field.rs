use dioxus::prelude::*;

use crate::domain::entities::directory::DepartmentBasic;
use crate::ui::styles::{ERROR, GREY, SUCCESS};

#[component]
pub fn TextField(
    label: &'static str,
    value: String,
    error: Option<String>,
    #[props(default = "text")] input_type: &'static str,
    #[props(default)] placeholder: String,
    on_input: EventHandler<String>,
) -> Element {
    let border = if error.is_some() { ERROR } else { "#bbb" };
    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 4px; font-size: 13px; color: {GREY};",
            "{label}"
            input {
                style: "border: 1px solid {border}; border-radius: 6px; padding: 6px 10px; font-size: 14px; color: #222;",
                r#type: input_type,
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |event| on_input.call(event.value()),
            }
            if let Some(error) = error {
                span { style: "color: {ERROR}; font-size: 12px;", "{error}" }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

pub fn department_select_options(options: &[DepartmentBasic]) -> Vec<SelectOption> {
    options
        .iter()
        .map(|department| SelectOption {
            value: department.department_id.0.to_string(),
            label: department.name.clone(),
        })
        .collect()
}

pub const NONE_OPTION_VALUE: &str = "__none__";

#[component]
pub fn SelectField(
    label: &'static str,
    options: Vec<SelectOption>,
    selected: Option<String>,
    error: Option<String>,
    #[props(default = "(sin seleccionar)")] none_label: &'static str,
    on_select: EventHandler<Option<String>>,
) -> Element {
    let border = if error.is_some() { ERROR } else { "#bbb" };
    let current = selected.unwrap_or_else(|| NONE_OPTION_VALUE.to_string());
    rsx! {
        label {
            style: "display: flex; flex-direction: column; gap: 4px; font-size: 13px; color: {GREY};",
            "{label}"
            select {
                style: "border: 1px solid {border}; border-radius: 6px; padding: 6px 10px; font-size: 14px; background: #fff;",
                value: "{current}",
                onchange: move |event| {
                    let value = event.value();
                    on_select.call((value != NONE_OPTION_VALUE).then_some(value));
                },
                option { value: NONE_OPTION_VALUE, selected: current == NONE_OPTION_VALUE, "{none_label}" }
                {options.iter().map(|opt| {
                    let is_selected = opt.value == current;
                    rsx!(
                        option {
                            key: "{opt.value}",
                            value: "{opt.value}",
                            selected: is_selected,
                            "{opt.label}"
                        }
                    )
                })}
            }
            if let Some(error) = error {
                span { style: "color: {ERROR}; font-size: 12px;", "{error}" }
            }
        }
    }
}

/// Status line above a form or list; `ok` picks the color.
#[component]
pub fn StatusBanner(message: Option<String>, #[props(default)] ok: bool) -> Element {
    let color = if ok { SUCCESS } else { ERROR };
    rsx! {
        if let Some(message) = message {
            div {
                style: "padding: 8px 12px; border-radius: 8px; border: 1px solid {color}; color: {color}; background: #fff; font-size: 13px;",
                "{message}"
            }
        }
    }
}

pub fn primary_button_style(enabled: bool) -> String {
    let background = if enabled { crate::ui::styles::SECONDARY } else { "#bdbdbd" };
    let cursor = if enabled { "pointer" } else { "not-allowed" };
    format!(
        "border: none; background: {background}; color: #fff; padding: 8px 16px; border-radius: 6px; cursor: {cursor}; font-size: 14px;"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_primary_button_is_muted() {
        assert!(primary_button_style(false).contains("not-allowed"));
        assert!(primary_button_style(true).contains(crate::ui::styles::SECONDARY));
    }
}
