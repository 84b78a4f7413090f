mod cli;
mod prompt;
mod render;
mod ui;

pub use cli::{Cli, Command};
pub use ui::{UI, report_error};
