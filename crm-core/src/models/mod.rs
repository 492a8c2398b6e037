mod customer;
mod customer_field;
mod validation_error;

pub use customer::{Customer, NegativeTotalSales};
pub use customer_field::CustomerField;
pub use validation_error::ValidationError;
