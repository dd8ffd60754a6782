pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, InitArgs, RulesArgs, StatusArgs, TemplatesArgs};
pub use output::{OutputFormat, OutputFormatter};
