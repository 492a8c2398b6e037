use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crm_core::{CustomerField, SourceConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Check a customer data file before shipping it with the application.
///
/// Loads the file the same way the application does at start-up and prints
/// every customer together with its validation errors.
#[derive(Parser, Debug)]
#[command(name = "crm-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the customer data file (.xml or .csv)
    #[arg(short, long)]
    file: PathBuf,

    /// Data format; inferred from the file extension when omitted
    #[arg(long)]
    format: Option<String>,

    /// Exit with an error when any customer fails validation
    #[arg(short, long, default_value_t = false)]
    strict: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let mut config = SourceConfig::from_path(&args.file);
    if let Some(format) = args.format {
        config.format = format.to_lowercase();
    }
    debug!("using {} loader", config.format);

    let registry = crm_data::default_registry();
    let customers = registry
        .load(&config)
        .with_context(|| format!("Failed to load customers from: {}", args.file.display()))?;

    info!("Parsed {} customers", customers.len());

    let mut invalid = 0;
    for (idx, customer) in customers.iter().enumerate() {
        let errors: Vec<String> = CustomerField::VALIDATED
            .iter()
            .filter_map(|field| customer.validate(*field))
            .map(|e| e.to_string())
            .collect();

        let name = if customer.is_company {
            customer.first_name.clone()
        } else {
            format!("{}, {}", customer.last_name, customer.first_name)
        };

        if errors.is_empty() {
            println!("{:>4}  ok       {name} ({})", idx + 1, customer.total_sales());
        } else {
            invalid += 1;
            println!("{:>4}  invalid  {name}", idx + 1);
            for error in errors {
                println!("        - {error}");
            }
        }
    }

    println!(
        "{} customers, {} valid, {} invalid",
        customers.len(),
        customers.len() - invalid,
        invalid
    );

    if invalid > 0 {
        warn!(invalid, "data file contains invalid customers");
        if args.strict {
            bail!("{invalid} customers failed validation");
        }
    }

    Ok(())
}
