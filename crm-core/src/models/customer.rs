use rust_decimal::Decimal;
use thiserror::Error;

use super::{CustomerField, ValidationError};
use crate::validation::{is_string_missing, is_valid_email_address};

/// A customer of the company, with its validation rules built in.
///
/// Validity is never stored: every check is recomputed from the current field
/// values. Identity belongs to the repository handle, not to the values, so
/// two customers with identical fields are still different entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub email: String,
    /// Holds the company name when `is_company` is set.
    pub first_name: String,
    /// Left blank for companies.
    pub last_name: String,
    pub is_company: bool,
    total_sales: Decimal,
}

/// Rejected by [`Customer::new`]: a customer's total sales never drop below
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("total sales cannot be negative: {0}")]
pub struct NegativeTotalSales(pub Decimal);

impl Customer {
    /// A blank customer, as created by the user before any field is filled in.
    pub fn new_blank() -> Self {
        Self::default()
    }

    /// A fully populated customer, as read from a data source.
    ///
    /// # Errors
    /// [`NegativeTotalSales`] when `total_sales` is below zero.
    pub fn new(
        total_sales: Decimal,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        is_company: bool,
        email: impl Into<String>,
    ) -> Result<Self, NegativeTotalSales> {
        if total_sales < Decimal::ZERO {
            return Err(NegativeTotalSales(total_sales));
        }

        Ok(Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            is_company,
            total_sales,
        })
    }

    /// Total amount of money spent by the customer. Fixed at creation.
    pub fn total_sales(&self) -> Decimal {
        self.total_sales
    }

    /// Returns `true` if none of the validated fields reports an error.
    pub fn is_valid(&self) -> bool {
        CustomerField::VALIDATED
            .iter()
            .all(|field| self.validate(*field).is_none())
    }

    /// Validates a single field. Fields without rules always pass.
    pub fn validate(
        &self,
        field: CustomerField,
    ) -> Option<ValidationError> {
        match field {
            CustomerField::Email => self.validate_email(),
            CustomerField::FirstName => self.validate_first_name(),
            CustomerField::LastName => self.validate_last_name(),
            CustomerField::IsCompany | CustomerField::TotalSales => None,
        }
    }

    /// String-keyed variant of [`Customer::validate`] for binding layers.
    ///
    /// An unknown property name is a programming error: it panics in debug
    /// builds and reports no error in release builds.
    pub fn error_for(
        &self,
        property_name: &str,
    ) -> Option<ValidationError> {
        match CustomerField::parse(property_name) {
            Some(field) => self.validate(field),
            None => {
                debug_assert!(
                    false,
                    "unexpected property being validated on Customer: {property_name}"
                );
                None
            }
        }
    }

    fn validate_email(&self) -> Option<ValidationError> {
        if is_string_missing(&self.email) {
            Some(ValidationError::MissingEmail)
        } else if !is_valid_email_address(&self.email) {
            Some(ValidationError::InvalidEmail)
        } else {
            None
        }
    }

    fn validate_first_name(&self) -> Option<ValidationError> {
        is_string_missing(&self.first_name).then_some(ValidationError::MissingFirstName)
    }

    fn validate_last_name(&self) -> Option<ValidationError> {
        let missing = is_string_missing(&self.last_name);
        if self.is_company {
            (!missing).then_some(ValidationError::CompanyHasNoLastName)
        } else {
            missing.then_some(ValidationError::MissingLastName)
        }
    }
}
