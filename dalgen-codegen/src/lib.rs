//! Turns discovered database tables into SeaORM model files and query helpers.
//!
//! The pipeline is `EntityTransformer::transform` (schema + mapping into
//! tables) followed by `EntityWriter::generate` (tables into a `FileSet`).

mod entity;
mod error;
mod mapping;
mod settings;
mod util;

pub use entity::*;
pub use error::*;
pub use mapping::*;
pub use settings::*;
