pub mod bytes;
pub mod document;
pub mod error;
pub mod log;
pub mod paths;

pub use document::{Document, Section, VERSION_BANNERS, ValueEntry};
pub use error::{Error, Result};
