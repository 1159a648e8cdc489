//! Connects to a database described by a YAML config, discovers the mapped
//! tables and writes SeaORM models and query helpers for them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod connection;
pub mod error;
pub mod generator;
pub mod orchestrator;
pub mod output;
pub mod presets;

pub use cli::*;
pub use commands::*;
pub use config::*;
pub use connection::*;
pub use error::*;
pub use generator::*;
pub use orchestrator::*;
pub use presets::Preset;
