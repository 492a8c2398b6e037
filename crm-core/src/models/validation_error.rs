use thiserror::Error;

/// Advisory, per-field validation failures of a customer.
///
/// These are returned as data; they block saving but are never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Customer does not have an e-mail address.")]
    MissingEmail,

    #[error("Customer has an invalid e-mail address.")]
    InvalidEmail,

    #[error("Customer does not have a first name.")]
    MissingFirstName,

    #[error("Customer does not have a last name.")]
    MissingLastName,

    #[error("A company cannot have a last name.")]
    CompanyHasNoLastName,
}
