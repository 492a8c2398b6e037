pub mod app;
pub mod logging;
pub mod viewmodels;

pub use viewmodels::{
    AllCustomersViewModel, CollectionChange, CustomerType, CustomerViewModel, FieldError,
    Property, SaveError,
};
