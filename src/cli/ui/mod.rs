pub mod cli_reporter;
pub mod ui_print;
