//! CSV loader for customer exports.
//!
//! ## CSV Format
//!
//! Column order does **not** matter (headers are matched by name). Header
//! names are case-sensitive.
//!
//! | Column        | Required | Type    | Notes                             |
//! |---------------|----------|---------|-----------------------------------|
//! | `total_sales` | yes      | decimal | e.g. `2500.50`, never negative    |
//! | `first_name`  | yes      | string  | may be an empty cell              |
//! | `last_name`   | yes      | string  | empty for companies               |
//! | `is_company`  | yes      | boolean | `true` / `false`                  |
//! | `email`       | yes      | string  | may be an empty cell              |
//!
//! ```csv
//! total_sales,first_name,last_name,is_company,email
//! 100,Ann,Lee,false,ann@x.com
//! 2500.50,Acme,,true,sales@acme.com
//! ```
use crm_core::{Customer, NegativeTotalSales};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CsvRow {
    total_sales: Decimal,
    first_name: String,
    last_name: String,
    is_company: bool,
    email: String,
}

/// Errors that can occur while loading CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Bad structure, missing column, type mismatch, etc.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based (header = row 0).
    #[error("negative total sales {total_sales} on row {row}")]
    NegativeTotalSales { total_sales: Decimal, row: usize },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Customer, CsvLoadError> {
    Customer::new(
        row.total_sales,
        row.first_name,
        row.last_name,
        row.is_company,
        row.email,
    )
    .map_err(|NegativeTotalSales(total_sales)| CsvLoadError::NegativeTotalSales {
        total_sales,
        row: row_number,
    })
}

/// Parse CSV text and return the customers in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse]: structurally invalid CSV or a value that cannot
///   be deserialised.
/// * [CsvLoadError::NegativeTotalSales]: a total is below zero.
pub fn load_from_str(input: &str) -> Result<Vec<Customer>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TWO_ROWS: &str = "\
total_sales,first_name,last_name,is_company,email
100,Ann,Lee,false,ann@x.com
2500.50,Acme,,true,sales@acme.com
";

    #[test]
    fn test_rows_in_file_order() {
        let customers = load_from_str(TWO_ROWS).expect("should parse");

        assert_eq!(
            customers,
            vec![
                Customer::new(dec!(100), "Ann", "Lee", false, "ann@x.com").unwrap(),
                Customer::new(dec!(2500.50), "Acme", "", true, "sales@acme.com").unwrap(),
            ]
        );
    }

    #[test]
    fn test_header_only_yields_no_customers() {
        let csv = "total_sales,first_name,last_name,is_company,email\n";
        assert!(load_from_str(csv).unwrap().is_empty());
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "\
email,is_company,last_name,first_name,total_sales
ann@x.com,false,Lee,Ann,100
";
        let customers = load_from_str(csv).expect("column order should not matter");
        assert_eq!(
            customers[0],
            Customer::new(dec!(100), "Ann", "Lee", false, "ann@x.com").unwrap()
        );
    }

    #[test]
    fn test_whitespace_around_values_is_trimmed() {
        let csv = "\
total_sales , first_name , last_name , is_company , email
 42.10 , Ann , Lee , false , ann@x.com
";
        let customers = load_from_str(csv).expect("should tolerate surrounding whitespace");
        assert_eq!(customers[0].total_sales(), dec!(42.10));
        assert_eq!(customers[0].first_name, "Ann");
    }

    #[test]
    fn test_missing_column_returns_parse_error() {
        let csv = "total_sales,first_name,last_name,email\n1,Ann,Lee,ann@x.com\n";
        assert!(matches!(load_from_str(csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn test_non_boolean_is_company_returns_parse_error() {
        let csv = "total_sales,first_name,last_name,is_company,email\n1,Ann,Lee,yes,ann@x.com\n";
        assert!(matches!(load_from_str(csv), Err(CsvLoadError::Parse(_))));
    }

    #[test]
    fn test_negative_total_sales_reports_row() {
        let csv = "\
total_sales,first_name,last_name,is_company,email
1,Ann,Lee,false,ann@x.com
-2,Bob,Ray,false,bob@x.com
";
        match load_from_str(csv) {
            Err(CsvLoadError::NegativeTotalSales { total_sales, row }) => {
                assert_eq!(total_sales, dec!(-2));
                assert_eq!(row, 2);
            }
            other => panic!("expected NegativeTotalSales, got {other:?}"),
        }
    }
}
