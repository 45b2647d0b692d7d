pub mod commands;
pub mod core;
pub mod document;
pub mod help;
pub mod io;
pub mod mail;
pub mod output;
pub mod preview;
pub mod registry;
pub mod render;
mod shell;
pub mod shell_context;

pub use shell::run_cli;
