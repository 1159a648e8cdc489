#![deny(
    missing_debug_implementations,
    clippy::print_stderr,
    clippy::print_stdout
)]

//! # dalgen
//!
//! Runtime side of the `dalgen` generator: binds a live SeaORM connection to
//! the generated query façade and carries the build metadata of the binary.
//!
//! ```ignore
//! mod dal;
//!
//! let db = sea_orm::Database::connect(url).await?;
//! let q: dal::query::Query = dalgen::bind(db);
//! let users = q.user().find_all().await?;
//! ```

pub mod dal;
pub mod version;

pub use dal::bind;
pub use version::BuildInfo;
