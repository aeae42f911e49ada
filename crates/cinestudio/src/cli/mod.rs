//! CLI command definitions and handlers.

mod commands;
mod run;

pub use commands::{Cli, Collection, Commands, LibraryCommands, SortField};
pub use run::handle_command;
