pub mod repository;
pub mod source;

pub use repository::{CustomerAdded, CustomerId, CustomerRepository, RepositoryError};
pub use source::{CustomerLoader, LoadError, LoaderRegistry, SourceConfig};
