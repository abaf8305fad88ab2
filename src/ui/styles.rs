pub const PRIMARY: &str = "#1f3a5f";
pub const SECONDARY: &str = "#2f6fb0";
pub const TERTIARY: &str = "#7b4fb3";
pub const SUCCESS: &str = "#2e7d32";
pub const ERROR: &str = "#c62828";
pub const GREY: &str = "#757575";
pub const OUTLINE: &str = "#e0e0e0";

pub fn root_container_style() -> &'static str {
    "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif; background: #f7f8fa;"
}

pub fn table_container_style() -> &'static str {
    "display: flex; flex-direction: column; flex: 1; min-height: 0; background: #fff; border-radius: 10px; box-shadow: 0 1px 4px rgba(0,0,0,0.08); overflow: hidden;"
}

pub fn table_header_style() -> String {
    format!(
        "display: flex; padding: 14px 20px 12px; background: {SECONDARY}; color: #fff; position: sticky; top: 0; z-index: 1;"
    )
}

pub fn header_cell_style(flex: f32, sortable: bool, emphasized: bool) -> String {
    let cursor = if sortable { "pointer" } else { "default" };
    let weight = if emphasized { 600 } else { 500 };
    format!("flex: {flex}; cursor: {cursor}; font-weight: {weight}; user-select: none;")
}

pub fn row_style() -> String {
    format!(
        "display: flex; align-items: center; padding: 10px 16px; border-bottom: 1px solid {OUTLINE};"
    )
}

pub fn cell_style(flex: f32) -> String {
    format!("flex: {flex}; min-width: 0; overflow: hidden; text-overflow: ellipsis;")
}

pub fn chip_style(color: &str) -> String {
    format!(
        "display: inline-flex; align-items: center; gap: 4px; padding: 2px 10px; border-radius: 12px; font-size: 12px; color: {color}; background: {color}1f; border: 1px solid {color}55;"
    )
}

pub fn button_style(enabled: bool) -> String {
    let color = if enabled { SECONDARY } else { "#bdbdbd" };
    let cursor = if enabled { "pointer" } else { "not-allowed" };
    format!(
        "border: none; background: transparent; color: {color}; cursor: {cursor}; font-size: 16px; padding: 4px 8px;"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticky_header_styles_include_positioning() {
        let style = table_header_style();

        assert!(style.contains("position: sticky"));
        assert!(style.contains("top: 0"));
    }

    #[test]
    fn table_container_style_is_flexible() {
        let style = table_container_style();

        assert!(style.contains("flex: 1"));
        assert!(style.contains("min-height: 0"));
    }

    #[test]
    fn header_cell_reflects_sortability() {
        assert!(header_cell_style(1.5, true, true).contains("cursor: pointer"));
        assert!(header_cell_style(0.3, false, false).contains("cursor: default"));
        assert!(header_cell_style(1.0, true, true).contains("font-weight: 600"));
    }

    #[test]
    fn disabled_button_uses_muted_color() {
        assert!(button_style(false).contains("not-allowed"));
        assert!(button_style(true).contains(SECONDARY));
    }
}
