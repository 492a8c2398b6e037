//! Concrete customer data sources.
//!
//! Each format lives in its own module with a pure `load_from_str` parser and
//! a file wrapper; the unit structs below plug those parsers into the
//! [`LoaderRegistry`] from `crm-core`.

pub mod csv_loader;
pub mod xml_loader;

use std::{fs, io, path::Path};

use crm_core::{Customer, CustomerLoader, LoadError, LoaderRegistry, SourceConfig};
use tracing::debug;

pub use csv_loader::CsvLoadError;
pub use xml_loader::XmlLoadError;

/// Loads the `<customers>` XML document.
pub struct XmlCustomerLoader;

impl CustomerLoader for XmlCustomerLoader {
    fn format_name(&self) -> &'static str {
        "xml"
    }

    fn load(
        &self,
        config: &SourceConfig,
    ) -> Result<Vec<Customer>, LoadError> {
        let contents = read_source(&config.location)?;
        xml_loader::load_from_str(&contents).map_err(|e| malformed(&config.location, e))
    }
}

/// Loads a CSV export with one customer per row.
pub struct CsvCustomerLoader;

impl CustomerLoader for CsvCustomerLoader {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn load(
        &self,
        config: &SourceConfig,
    ) -> Result<Vec<Customer>, LoadError> {
        let contents = read_source(&config.location)?;
        csv_loader::load_from_str(&contents).map_err(|e| malformed(&config.location, e))
    }
}

/// A registry with every format this crate knows about.
pub fn default_registry() -> LoaderRegistry {
    let mut registry = LoaderRegistry::new();
    registry.register(Box::new(XmlCustomerLoader));
    registry.register(Box::new(CsvCustomerLoader));
    registry
}

fn read_source(path: &Path) -> Result<String, LoadError> {
    debug!(path = %path.display(), "reading customer source");
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::MissingSource(path.display().to_string()),
        _ => LoadError::MissingSource(format!("{}: {e}", path.display())),
    })
}

fn malformed(
    path: &Path,
    error: impl std::error::Error,
) -> LoadError {
    LoadError::Malformed(format!("{}: {error}", path.display()))
}
