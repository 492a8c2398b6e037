use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use thiserror::Error;
use tracing::{debug, info};

use super::source::{LoadError, LoaderRegistry, SourceConfig};
use crate::{events::Event, models::Customer};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("customer {0} was not issued by this repository")]
    UnknownCustomer(CustomerId),
}

/// Stable handle to a customer held by a [`CustomerRepository`].
///
/// Handles are the identity of a customer: equal field values never make two
/// handles equal. A handle carries the repository that issued it and is
/// rejected everywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CustomerId {
    repository: u64,
    index: usize,
}

impl fmt::Display for CustomerId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Payload of [`CustomerRepository::customer_added`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerAdded {
    pub new_customer: CustomerId,
}

/// The in-memory source of customers for the application.
///
/// Every customer the process creates lives in the repository's store and is
/// addressed by a [`CustomerId`]. Only the handles in the member list are "in"
/// the repository; a freshly created customer stays outside it until
/// [`add_customer`](Self::add_customer) is called. Members are never removed.
#[derive(Debug)]
pub struct CustomerRepository {
    id: u64,
    store: RefCell<Vec<Customer>>,
    members: RefCell<Vec<CustomerId>>,
    customer_added: Event<CustomerAdded>,
}

static NEXT_REPOSITORY_ID: AtomicU64 = AtomicU64::new(0);

impl Default for CustomerRepository {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CustomerRepository {
    /// Builds a repository whose members are `customers`, in order.
    pub fn new(customers: Vec<Customer>) -> Self {
        let id = NEXT_REPOSITORY_ID.fetch_add(1, Ordering::Relaxed);
        let members = (0..customers.len())
            .map(|index| CustomerId {
                repository: id,
                index,
            })
            .collect();
        Self {
            id,
            store: RefCell::new(customers),
            members: RefCell::new(members),
            customer_added: Event::new(),
        }
    }

    /// Reads every customer from the configured data source.
    ///
    /// # Errors
    /// Any [`LoadError`] from the registry. There is no partial result: the
    /// caller is expected to abort start-up.
    pub fn load(
        registry: &LoaderRegistry,
        config: &SourceConfig,
    ) -> Result<Self, LoadError> {
        let customers = registry.load(config)?;
        info!(
            count = customers.len(),
            source = %config.location.display(),
            "loaded customers"
        );
        Ok(Self::new(customers))
    }

    /// Allocates a blank customer that is not yet a member.
    pub fn create_new_customer(&self) -> CustomerId {
        self.allocate(Customer::new_blank())
    }

    /// Allocates `customer` without making it a member.
    pub fn create_customer(
        &self,
        customer: Customer,
    ) -> CustomerId {
        self.allocate(customer)
    }

    /// Places the customer in the repository.
    ///
    /// Adding a member again is a silent no-op. Otherwise the handle is
    /// appended and [`customer_added`](Self::customer_added) fires once.
    ///
    /// # Errors
    /// [`RepositoryError::UnknownCustomer`] for a handle from elsewhere.
    pub fn add_customer(
        &self,
        id: CustomerId,
    ) -> Result<(), RepositoryError> {
        self.check_issued(id)?;

        {
            let mut members = self.members.borrow_mut();
            if members.contains(&id) {
                debug!(customer = %id, "customer already in repository");
                return Ok(());
            }
            members.push(id);
        }

        debug!(customer = %id, "customer added");
        self.customer_added.emit(&CustomerAdded { new_customer: id });
        Ok(())
    }

    /// Returns `true` if the customer is a member.
    ///
    /// # Errors
    /// [`RepositoryError::UnknownCustomer`] for a handle from elsewhere.
    pub fn contains_customer(
        &self,
        id: CustomerId,
    ) -> Result<bool, RepositoryError> {
        self.check_issued(id)?;
        Ok(self.members.borrow().contains(&id))
    }

    /// A copy of the member list. Changing the returned vector does not touch
    /// the repository; changing a customer through a handle does.
    pub fn customers(&self) -> Vec<CustomerId> {
        self.members.borrow().clone()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.borrow().is_empty()
    }

    /// Borrows the customer behind a handle.
    ///
    /// The borrow must be released before the repository notifies, so keep it
    /// short-lived.
    pub fn customer(
        &self,
        id: CustomerId,
    ) -> Result<Ref<'_, Customer>, RepositoryError> {
        self.check_issued(id)?;
        Ref::filter_map(self.store.borrow(), |store| store.get(id.index))
            .map_err(|_| RepositoryError::UnknownCustomer(id))
    }

    /// Mutably borrows the customer behind a handle.
    pub fn customer_mut(
        &self,
        id: CustomerId,
    ) -> Result<RefMut<'_, Customer>, RepositoryError> {
        self.check_issued(id)?;
        RefMut::filter_map(self.store.borrow_mut(), |store| store.get_mut(id.index))
            .map_err(|_| RepositoryError::UnknownCustomer(id))
    }

    /// Raised after a customer has been appended to the member list.
    pub fn customer_added(&self) -> &Event<CustomerAdded> {
        &self.customer_added
    }

    fn allocate(
        &self,
        customer: Customer,
    ) -> CustomerId {
        let mut store = self.store.borrow_mut();
        let id = CustomerId {
            repository: self.id,
            index: store.len(),
        };
        store.push(customer);
        id
    }

    fn check_issued(
        &self,
        id: CustomerId,
    ) -> Result<(), RepositoryError> {
        if id.repository == self.id && id.index < self.store.borrow().len() {
            Ok(())
        } else {
            Err(RepositoryError::UnknownCustomer(id))
        }
    }
}
