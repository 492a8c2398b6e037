//! Start-up wiring shared by the binary and the integration tests.

use std::{fmt::Write, rc::Rc};

use crm_core::{CustomerRepository, LoadError, LoaderRegistry, SourceConfig};
use tracing::debug;

use crate::viewmodels::AllCustomersViewModel;

/// Every data-source format the application can read.
pub fn build_registry() -> LoaderRegistry {
    crm_data::default_registry()
}

/// Loads the shared repository described by `config`.
///
/// Failure here is fatal for the application: there is no partial load.
pub fn load_repository(config: &SourceConfig) -> Result<Rc<CustomerRepository>, LoadError> {
    debug!(format = %config.format, path = %config.location.display(), "loading customers");
    let registry = build_registry();
    CustomerRepository::load(&registry, config).map(Rc::new)
}

/// Renders the customer list the way the console front end prints it: one
/// line per customer with a selection box, then the selected total.
pub fn render_summary(all: &AllCustomersViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", all.display_name(), all.len());

    for customer in all.all_customers() {
        let mark = if customer.is_selected() { 'x' } else { ' ' };
        let _ = writeln!(
            out,
            "  [{mark}] {:<32} {:>12}",
            customer.display_name(),
            customer.total_sales()
        );
    }

    let _ = writeln!(out, "Total selected sales: {}", all.total_selected_sales());
    out
}
