//! Observable wrappers that a UI binding layer talks to.
//!
//! View-models never own customers: they hold a [`CustomerId`] and the shared
//! [`CustomerRepository`](crm_core::CustomerRepository), so every write goes
//! straight through to the one entity all wrappers see.
//!
//! [`CustomerId`]: crm_core::CustomerId

mod all_customers;
mod customer;
mod customer_type;
mod property;

pub use all_customers::{AllCustomersViewModel, CollectionChange};
pub use customer::{CustomerViewModel, FieldError, SaveError};
pub use customer_type::CustomerType;
pub use property::Property;
