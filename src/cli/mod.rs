//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{parse_resolution, Args, Command, ConfigAction};
pub use commands::{handle_config_action, run_convert, CliError, DEFAULT_CONFIG};
pub use enums::{CharacterSet, ColorMode, Preprocess};
