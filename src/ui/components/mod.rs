pub mod confirm_dialog;
pub mod data_table;
pub mod data_table_footer;
pub mod form_field;
pub mod search_menu;
pub mod shell;
pub mod styled_chip;
