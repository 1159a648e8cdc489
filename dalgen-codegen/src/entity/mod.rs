mod column;
mod primary_key;
mod table;
mod transformer;
mod writer;

pub use column::*;
pub use primary_key::*;
pub use table::*;
pub use transformer::*;
pub use writer::*;
