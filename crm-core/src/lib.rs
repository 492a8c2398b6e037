pub mod db;
pub mod events;
pub mod models;
pub mod validation;

pub use db::repository::{CustomerAdded, CustomerId, CustomerRepository, RepositoryError};
pub use db::source::{CustomerLoader, LoadError, LoaderRegistry, SourceConfig};
pub use events::{Event, SubscriptionId};
pub use models::*;
