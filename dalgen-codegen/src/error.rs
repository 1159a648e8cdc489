use std::io;
use thiserror::Error;

/// Failures raised while turning a schema into source files
#[derive(Debug, Error)]
pub enum Error {
    /// The table mapping violates one of its invariants
    #[error("Invalid table mapping: {0}")]
    Mapping(String),
    /// The output directories cannot hold the generated files side by side
    #[error("Invalid output directories: {0}")]
    OutputDir(String),
    /// A mapped table does not exist in the connected schema
    #[error("Table `{0}` not found in the database schema")]
    UnknownTable(String),
    /// A discovered table could not be turned into a model
    #[error("Failed to transform schema: {0}")]
    Transform(String),
    /// Schema discovery against the live database failed
    #[error("Failed to discover schema: {0}")]
    Discovery(String),
    /// Reading or writing generated files failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// `rustfmt` rejected a generated file
    #[error("Fail to format file `{0}`")]
    Format(String),
}
