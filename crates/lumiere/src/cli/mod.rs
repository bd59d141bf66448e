//! Command-line interface module.
//!
//! CLI structure and command handlers for the lumiere binary.

mod commands;
mod generate;
mod records;

pub use commands::{Cli, Commands};
pub use generate::{generate_record, random_persona};
pub use records::{handle_record_command, open_catalog};
