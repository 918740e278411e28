//! CLI subcommand implementations.

pub mod generate;
pub mod params;
pub mod process;
