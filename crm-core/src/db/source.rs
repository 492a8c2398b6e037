use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::models::Customer;

/// Failures while reading customers at start-up. All of them are fatal: the
/// application has no degraded mode without its customer list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Missing customer data source: {0}")]
    MissingSource(String),

    #[error("Malformed customer data: {0}")]
    Malformed(String),
}

/// Where the customers come from.
///
/// `format` must match the [`CustomerLoader::format_name`] of a registered
/// loader. `location` is handed to that loader unchanged.
///
/// | format | location examples                 |
/// |--------|-----------------------------------|
/// | `xml`  | `data/customers.xml`              |
/// | `csv`  | `exports/customers.csv`           |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Lowercase identifier matching a registered loader (e.g. `"xml"`).
    pub format: String,
    pub location: PathBuf,
}

impl SourceConfig {
    /// Builds a config whose format is taken from the file extension.
    /// Unknown or missing extensions fall back to `xml`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let location = path.into();
        let format = format_for_extension(&location).unwrap_or("xml");
        Self {
            format: format.to_string(),
            location,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            format: "xml".to_string(),
            location: PathBuf::from("data/customers.xml"),
        }
    }
}

fn format_for_extension(path: &Path) -> Option<&'static str> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("xml") => Some("xml"),
        Some("csv") => Some("csv"),
        _ => None,
    }
}

/// One implementation per data-source format.
pub trait CustomerLoader {
    /// Unique, lowercase identifier for this format.
    fn format_name(&self) -> &'static str;

    /// Reads every customer, in source order.
    fn load(
        &self,
        config: &SourceConfig,
    ) -> Result<Vec<Customer>, LoadError>;
}

/// Registry of [`CustomerLoader`] instances, keyed by format name.
pub struct LoaderRegistry {
    loaders: HashMap<&'static str, Box<dyn CustomerLoader>>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Register a loader. A loader with the same format name is replaced.
    pub fn register(
        &mut self,
        loader: Box<dyn CustomerLoader>,
    ) {
        self.loaders.insert(loader.format_name(), loader);
    }

    /// Names of every registered format, sorted alphabetically.
    pub fn available_formats(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.loaders.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the loader that matches `config.format`.
    ///
    /// # Errors
    /// * [`LoadError::Configuration`]: no loader is registered for the
    ///   requested format.
    /// * Any error the chosen loader itself returns.
    pub fn load(
        &self,
        config: &SourceConfig,
    ) -> Result<Vec<Customer>, LoadError> {
        let loader = self.loaders.get(config.format.as_str()).ok_or_else(|| {
            LoadError::Configuration(format!(
                "unknown format '{}'; available: {:?}",
                config.format,
                self.available_formats()
            ))
        })?;

        loader.load(config)
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::db::CustomerRepository;

    // ── stub loaders ─────────────────────────────────────────────────────
    /// Returns one fixed customer and counts how often it was asked.
    struct StubLoader {
        name: &'static str,
        calls: Rc<Cell<usize>>,
    }

    impl CustomerLoader for StubLoader {
        fn format_name(&self) -> &'static str {
            self.name
        }

        fn load(
            &self,
            _config: &SourceConfig,
        ) -> Result<Vec<Customer>, LoadError> {
            self.calls.set(self.calls.get() + 1);
            Ok(vec![Customer::new(dec!(100), "Ann", "Lee", false, "ann@x.com").unwrap()])
        }
    }

    struct FailingLoader;

    impl CustomerLoader for FailingLoader {
        fn format_name(&self) -> &'static str {
            "failing"
        }

        fn load(
            &self,
            config: &SourceConfig,
        ) -> Result<Vec<Customer>, LoadError> {
            Err(LoadError::MissingSource(config.location.display().to_string()))
        }
    }

    fn stub_loader(name: &'static str) -> (Box<dyn CustomerLoader>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Box::new(StubLoader {
                name,
                calls: calls.clone(),
            }),
            calls,
        )
    }

    fn config(format: &str) -> SourceConfig {
        SourceConfig {
            format: format.to_string(),
            location: PathBuf::from("customers.data"),
        }
    }

    // ── SourceConfig ─────────────────────────────────────────────────────
    #[test]
    fn default_config_points_at_bundled_xml() {
        let cfg = SourceConfig::default();
        assert_eq!(cfg.format, "xml");
        assert_eq!(cfg.location, PathBuf::from("data/customers.xml"));
    }

    #[test]
    fn from_path_infers_format_from_extension() {
        assert_eq!(SourceConfig::from_path("a/customers.xml").format, "xml");
        assert_eq!(SourceConfig::from_path("a/customers.CSV").format, "csv");
        assert_eq!(SourceConfig::from_path("a/customers").format, "xml");
    }

    // ── registry ─────────────────────────────────────────────────────────
    #[test]
    fn new_registry_has_no_formats() {
        assert!(LoaderRegistry::new().available_formats().is_empty());
    }

    #[test]
    fn available_formats_is_sorted() {
        let mut reg = LoaderRegistry::new();
        let (xml, _) = stub_loader("xml");
        let (csv, _) = stub_loader("csv");
        reg.register(xml);
        reg.register(csv);

        assert_eq!(reg.available_formats(), vec!["csv", "xml"]);
    }

    #[test]
    fn duplicate_registration_replaces_previous() {
        let mut reg = LoaderRegistry::new();
        let (old, old_calls) = stub_loader("xml");
        let (new, new_calls) = stub_loader("xml");
        reg.register(old);
        reg.register(new);

        reg.load(&config("xml")).unwrap();

        assert_eq!(reg.available_formats(), vec!["xml"]);
        assert_eq!(old_calls.get(), 0);
        assert_eq!(new_calls.get(), 1);
    }

    #[test]
    fn load_dispatches_to_matching_loader() {
        let mut reg = LoaderRegistry::new();
        let (xml, xml_calls) = stub_loader("xml");
        let (csv, csv_calls) = stub_loader("csv");
        reg.register(xml);
        reg.register(csv);

        let customers = reg.load(&config("csv")).unwrap();

        assert_eq!(customers.len(), 1);
        assert_eq!(csv_calls.get(), 1);
        assert_eq!(xml_calls.get(), 0);
    }

    #[test]
    fn unknown_format_names_requested_and_available() {
        let mut reg = LoaderRegistry::new();
        let (xml, _) = stub_loader("xml");
        reg.register(xml);

        match reg.load(&config("json")) {
            Err(LoadError::Configuration(msg)) => {
                assert!(msg.contains("json"), "error should name the requested format");
                assert!(msg.contains("xml"), "error should list available formats");
            }
            other => panic!("expected Configuration error, got {other:#?}"),
        }
    }

    #[test]
    fn loader_errors_propagate() {
        let mut reg = LoaderRegistry::new();
        reg.register(Box::new(FailingLoader));

        assert_eq!(
            reg.load(&config("failing")),
            Err(LoadError::MissingSource("customers.data".to_string()))
        );
    }

    // ── repository start-up ──────────────────────────────────────────────
    #[test]
    fn repository_load_makes_every_customer_a_member() {
        let mut reg = LoaderRegistry::new();
        let (xml, _) = stub_loader("xml");
        reg.register(xml);

        let repo = CustomerRepository::load(&reg, &config("xml")).unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.customer(repo.customers()[0]).unwrap().last_name, "Lee");
    }

    #[test]
    fn repository_load_has_no_partial_mode() {
        let mut reg = LoaderRegistry::new();
        reg.register(Box::new(FailingLoader));

        assert!(CustomerRepository::load(&reg, &config("failing")).is_err());
    }
}
