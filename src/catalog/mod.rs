// Template catalog module
// Discovers reference images in a directory and parses the click metadata
// embedded in their file names.

pub mod error;
pub mod scan;
pub mod template;

pub use error::CatalogError;
pub use scan::scan_directory;
pub use template::{ClickKind, Template};
