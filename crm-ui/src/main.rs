use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use crm_core::SourceConfig;
use crm_ui::{
    AllCustomersViewModel, app,
    logging::{self, LoggingConfig},
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Customer manager.
///
/// Loads the customer data source, lists every customer and prints the total
/// sales of the selected ones.
#[derive(Debug, Parser)]
struct Cli {
    /// Customer data file.
    #[arg(long, default_value = "data/customers.xml")]
    source: PathBuf,

    /// Data format; inferred from the file extension when omitted.
    #[arg(long)]
    format: Option<String>,

    /// Zero-based positions of customers to mark as selected.
    #[arg(long, num_args = 1..)]
    select: Vec<usize>,

    /// Log filter, e.g. `debug` or `crm_core=trace,info`. Defaults to `RUST_LOG`.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not print log records to stdout.
    #[arg(long)]
    quiet: bool,
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        let mut config = SourceConfig::from_path(&self.source);
        if let Some(format) = &self.format {
            config.format = format.to_lowercase();
        }
        config
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&LoggingConfig {
        level: cli.log_level.clone(),
        file: cli.log_file.clone(),
        stdout: !cli.quiet,
    })?;

    let config = cli.source_config();
    let repository = app::load_repository(&config)
        .with_context(|| format!("failed to load customers from '{}'", config.location.display()))?;
    info!(customers = repository.len(), "customers loaded");

    let all = AllCustomersViewModel::new(repository)?;
    for index in &cli.select {
        match all.get(*index) {
            Some(customer) => customer.set_is_selected(true),
            None => warn!(index, len = all.len(), "no customer at selected position"),
        }
    }

    print!("{}", app::render_summary(&all));
    Ok(())
}
