pub mod error;
pub mod path;
pub mod version;

pub use error::{SourceError, SourceResult};
