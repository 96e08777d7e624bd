pub mod args;
pub mod commands;
pub mod entry;
pub mod ui;
