use dioxus::prelude::*;

use crate::domain::entities::filter::FilterToken;
use crate::ui::components::styled_chip::StyledChip;
use crate::ui::state::filter_context::use_filters;
use crate::ui::styles::{GREY, SECONDARY, TERTIARY};

/// Splits typed text on commas: completed pieces become tokens, the tail
/// stays in the input.
pub fn split_typed(value: &str) -> (Vec<String>, String) {
    let mut pieces: Vec<&str> = value.split(',').collect();
    let rest = pieces.pop().unwrap_or_default().to_string();
    let tokens = pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect();
    (tokens, rest)
}

/// Global search box of the top bar: chips plus free-text input.
#[component]
pub fn SearchMenu() -> Element {
    let mut filters = use_filters();
    let mut input_value = use_signal(String::new);
    let mut open = use_signal(|| false);
    let tokens = filters.filters();
    let count = tokens.len();
    let placeholder = if tokens.is_empty() {
        "Buscar... Enter o , para agregar"
    } else {
        "Agregar filtro..."
    };

    rsx! {
        div {
            style: "position: relative;",
            button {
                style: "position: relative; border: none; background: transparent; cursor: pointer; font-size: 20px; color: {GREY};",
                title: "Buscar",
                onclick: move |_| open.set(!open()),
                "🔍"
                if count > 0 {
                    span {
                        style: "position: absolute; top: -4px; right: -6px; background: {SECONDARY}; color: #fff; border-radius: 9px; font-size: 11px; min-width: 18px; height: 18px; line-height: 18px; text-align: center;",
                        "{count}"
                    }
                }
            }
            if open() {
                div {
                    style: "position: absolute; right: 0; top: 36px; width: 420px; background: #fff; border-radius: 10px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); padding: 10px; z-index: 1200;",
                    div {
                        style: "display: flex; flex-wrap: wrap; align-items: center; gap: 6px; border: 1px solid #d5dce6; border-radius: 8px; padding: 6px 8px;",
                        {tokens.iter().enumerate().map(|(index, token)| {
                            let color = if FilterToken::classify(token).is_qualified() { TERTIARY } else { GREY };
                            rsx!(
                                StyledChip {
                                    key: "{index}-{token}",
                                    text: token.clone(),
                                    color,
                                    on_close: move |_| filters.remove_filter(index),
                                }
                            )
                        })}
                        input {
                            style: "flex: 1; min-width: 120px; border: none; outline: none; font-size: 14px;",
                            placeholder,
                            autofocus: true,
                            value: "{input_value}",
                            oninput: move |event| {
                                let (completed, rest) = split_typed(&event.value());
                                for token in completed {
                                    filters.add_filter(&token);
                                }
                                input_value.set(rest);
                            },
                            onkeydown: move |event| {
                                if event.key() == Key::Enter {
                                    event.prevent_default();
                                    let typed = input_value();
                                    if !typed.trim().is_empty() {
                                        filters.add_filter(&typed);
                                        input_value.set(String::new());
                                    }
                                }
                            },
                        }
                        if count > 0 {
                            button {
                                style: "border: none; background: transparent; cursor: pointer; color: {GREY};",
                                title: "Limpiar filtros",
                                onclick: move |_| filters.clear_filters(),
                                "✕"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_typed_keeps_unfinished_tail() {
        let (tokens, rest) = split_typed("eso, bio,,role:teacher,ma");

        assert_eq!(tokens, ["eso", "bio", "role:teacher"]);
        assert_eq!(rest, "ma");
    }

    #[test]
    fn split_typed_without_comma_is_all_tail() {
        let (tokens, rest) = split_typed("biolo");

        assert!(tokens.is_empty());
        assert_eq!(rest, "biolo");
    }
}
