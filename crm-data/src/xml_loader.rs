//! XML loader for the bundled customer document.
//!
//! ## Format
//!
//! A single `<customers>` root with one `<customer>` element per customer.
//! Every value is an attribute:
//!
//! | Attribute    | Required | Type    | Notes                                  |
//! |--------------|----------|---------|----------------------------------------|
//! | `totalSales` | yes      | decimal | must not be negative                   |
//! | `firstName`  | no       | string  | company name when `isCompany` is true  |
//! | `lastName`   | no       | string  | left empty for companies               |
//! | `isCompany`  | yes      | boolean | `true` / `false`                       |
//! | `email`      | no       | string  |                                        |
//!
//! Missing string attributes load as empty strings; they are reported later
//! by customer validation, not by the loader.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8" ?>
//! <customers>
//!   <customer totalSales="100" firstName="Ann" lastName="Lee" isCompany="false" email="ann@x.com" />
//!   <customer totalSales="2500.50" firstName="Acme" lastName="" isCompany="true" email="sales@acme.com" />
//! </customers>
//! ```
use crm_core::{Customer, NegativeTotalSales};
use quick_xml::{Reader, events::Event};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

const ROOT_ELEMENT: &str = "customers";

#[derive(Debug, Deserialize)]
struct CustomersDocument {
    #[serde(rename = "customer", default)]
    customers: Vec<CustomerElement>,
}

#[derive(Debug, Deserialize)]
struct CustomerElement {
    #[serde(rename = "@totalSales", deserialize_with = "deserialize_decimal")]
    total_sales: Decimal,
    #[serde(rename = "@firstName", default)]
    first_name: String,
    #[serde(rename = "@lastName", default)]
    last_name: String,
    #[serde(rename = "@isCompany")]
    is_company: bool,
    #[serde(rename = "@email", default)]
    email: String,
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(serde::de::Error::custom)
}

/// Errors that can occur while loading the XML document.
#[derive(Debug, thiserror::Error)]
pub enum XmlLoadError {
    /// The markup itself is broken.
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// The markup is fine but an element or attribute does not fit the
    /// customer layout (missing `totalSales`, non-boolean `isCompany`, ...).
    #[error("XML structure error: {0}")]
    Deserialize(#[from] quick_xml::DeError),

    #[error("document has no root element")]
    MissingRoot,

    #[error("expected root element <customers>, found <{0}>")]
    UnexpectedRoot(String),

    /// `index` is the 1-based position of the `<customer>` element.
    #[error("negative total sales {total_sales} on customer {index}")]
    NegativeTotalSales { total_sales: Decimal, index: usize },
}

/// Parse the XML text and return the customers in document order.
///
/// # Errors
///
/// * [XmlLoadError::MissingRoot] / [XmlLoadError::UnexpectedRoot]: the
///   document is not a `<customers>` document.
/// * [XmlLoadError::Syntax] / [XmlLoadError::Deserialize]: the document is
///   not well formed or a required attribute is missing or invalid.
/// * [XmlLoadError::NegativeTotalSales]: a total is below zero.
pub fn load_from_str(input: &str) -> Result<Vec<Customer>, XmlLoadError> {
    match root_element_name(input)? {
        None => return Err(XmlLoadError::MissingRoot),
        Some(name) if name != ROOT_ELEMENT => return Err(XmlLoadError::UnexpectedRoot(name)),
        Some(_) => {}
    }

    let document: CustomersDocument = quick_xml::de::from_str(input)?;

    document
        .customers
        .into_iter()
        .enumerate()
        .map(|(idx, element)| convert_element(element, idx + 1))
        .collect()
}

fn convert_element(
    element: CustomerElement,
    index: usize,
) -> Result<Customer, XmlLoadError> {
    Customer::new(
        element.total_sales,
        element.first_name,
        element.last_name,
        element.is_company,
        element.email,
    )
    .map_err(|NegativeTotalSales(total_sales)| XmlLoadError::NegativeTotalSales {
        total_sales,
        index,
    })
}

/// Name of the first element in the document, skipping the declaration,
/// comments and processing instructions.
fn root_element_name(input: &str) -> Result<Option<String>, XmlLoadError> {
    let mut reader = Reader::from_str(input);
    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                return Ok(Some(String::from_utf8_lossy(e.name().as_ref()).into_owned()));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}
