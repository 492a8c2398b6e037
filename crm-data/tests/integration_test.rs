//! Integration tests that run the registered loaders against on-disk fixtures.

use std::path::{Path, PathBuf};

use crm_core::{CustomerLoader, CustomerRepository, LoadError, SourceConfig};
use crm_data::{CsvCustomerLoader, XmlCustomerLoader, default_registry, xml_loader};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const FIXTURE_XML: &str = include_str!("../test-data/customers.xml");

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("test-data").join(name)
}

#[test]
fn test_default_registry_knows_xml_and_csv() {
    assert_eq!(default_registry().available_formats(), vec!["csv", "xml"]);
}

#[test]
fn test_xml_fixture_loads_through_registry() {
    let customers = default_registry()
        .load(&SourceConfig::from_path(fixture("customers.xml")))
        .expect("fixture file should load without error");

    assert_eq!(customers.len(), 4);
    assert_eq!(customers[0].first_name, "Ann");
    assert_eq!(customers[1].total_sales(), dec!(2500.50));
    assert!(customers[1].is_company);
}

#[test]
fn test_csv_and_xml_fixtures_agree() {
    let registry = default_registry();
    let from_xml = registry
        .load(&SourceConfig::from_path(fixture("customers.xml")))
        .unwrap();
    let from_csv = registry
        .load(&SourceConfig::from_path(fixture("customers.csv")))
        .unwrap();

    assert_eq!(from_xml, from_csv);
}

#[test]
fn test_fixture_validity_per_customer() {
    let customers = xml_loader::load_from_str(FIXTURE_XML).unwrap();
    let valid: Vec<bool> = customers.iter().map(|c| c.is_valid()).collect();

    // Globex is a company with a last name and a bad address.
    assert_eq!(valid, vec![true, true, true, false]);
}

#[test]
fn test_repository_load_from_fixture() {
    let repo = CustomerRepository::load(
        &default_registry(),
        &SourceConfig::from_path(fixture("customers.xml")),
    )
    .unwrap();

    assert_eq!(repo.len(), 4);
    let last = *repo.customers().last().unwrap();
    assert_eq!(repo.customer(last).unwrap().first_name, "Globex");
}

#[test]
fn test_missing_file_is_missing_source() {
    let config = SourceConfig::from_path("/this/path/does/not/exist.xml");

    assert!(matches!(
        default_registry().load(&config),
        Err(LoadError::MissingSource(_))
    ));
}

#[test]
fn test_wrong_format_for_file_is_malformed() {
    let config = SourceConfig {
        format: "csv".to_string(),
        location: fixture("customers.xml"),
    };

    assert!(matches!(
        default_registry().load(&config),
        Err(LoadError::Malformed(_))
    ));
}

#[test]
fn test_each_loader_reads_its_fixture_from_disk() {
    let xml = XmlCustomerLoader
        .load(&SourceConfig::from_path(fixture("customers.xml")))
        .unwrap();
    let csv = CsvCustomerLoader
        .load(&SourceConfig::from_path(fixture("customers.csv")))
        .unwrap();

    assert_eq!(xml.len(), 4);
    assert_eq!(csv.len(), 4);
}
