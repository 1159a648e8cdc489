use std::{env, io, path::PathBuf};
use thiserror::Error;

/// Any failure of a generation run
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Fail to connect to the database: {0}")]
    Connection(#[from] sqlx::Error),
    #[error(transparent)]
    Generation(#[from] dalgen_codegen::Error),
}

/// The configuration file is missing, malformed or incomplete
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Fail to read config file `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Fail to parse config file `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Config field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("Environment variable `{name}` referenced by the config is not set")]
    MissingEnv {
        name: String,
        #[source]
        source: env::VarError,
    },
    #[error("Database driver `{0}` is not supported")]
    UnsupportedDriver(String),
    #[error("Argument `{0}` is required when no preset is selected")]
    MissingArgument(&'static str),
    #[error("Invalid database source: {0}")]
    InvalidSource(String),
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidSource(err.to_string())
    }
}
