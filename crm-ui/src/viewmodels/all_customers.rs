use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crm_core::{
    CustomerAdded, CustomerId, CustomerRepository, Event, RepositoryError, SubscriptionId,
};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::{CustomerViewModel, Property};

pub const ALL_CUSTOMERS_DISPLAY_NAME: &str = "All Customers";

/// Structural change to the wrapped collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    Added { index: usize },
    Cleared,
}

/// The list of every customer in the repository, each wrapped in a
/// [`CustomerViewModel`], plus the running total of the selected ones.
///
/// Subscriptions are released by [`dispose`](Self::dispose), which also runs
/// on drop.
#[derive(Debug)]
pub struct AllCustomersViewModel {
    inner: Rc<Inner>,
}

#[derive(Debug)]
struct Inner {
    repository: Rc<CustomerRepository>,
    all_customers: RefCell<Vec<Child>>,
    added_subscription: Cell<Option<SubscriptionId>>,
    disposed: Cell<bool>,
    property_changed: Event<Property>,
    collection_changed: Event<CollectionChange>,
}

#[derive(Debug)]
struct Child {
    view_model: Rc<CustomerViewModel>,
    subscription: SubscriptionId,
}

impl AllCustomersViewModel {
    /// Wraps every current member of `repository` and starts following its
    /// additions.
    ///
    /// # Errors
    /// Only if the repository hands out a member it does not recognise.
    pub fn new(repository: Rc<CustomerRepository>) -> Result<Self, RepositoryError> {
        let inner = Rc::new(Inner {
            repository: repository.clone(),
            all_customers: RefCell::new(Vec::new()),
            added_subscription: Cell::new(None),
            disposed: Cell::new(false),
            property_changed: Event::new(),
            collection_changed: Event::new(),
        });

        for id in repository.customers() {
            let child = Inner::adopt(&inner, id)?;
            inner.all_customers.borrow_mut().push(child);
        }

        let weak = Rc::downgrade(&inner);
        let subscription = repository.customer_added().subscribe(move |event: &CustomerAdded| {
            if let Some(inner) = weak.upgrade() {
                Inner::on_customer_added(&inner, event.new_customer);
            }
        });
        inner.added_subscription.set(Some(subscription));

        debug!(customers = inner.all_customers.borrow().len(), "all customers view-model ready");
        Ok(Self { inner })
    }

    pub fn display_name(&self) -> &'static str {
        ALL_CUSTOMERS_DISPLAY_NAME
    }

    /// A snapshot of the wrapped customers in repository order.
    pub fn all_customers(&self) -> Vec<Rc<CustomerViewModel>> {
        self.inner
            .all_customers
            .borrow()
            .iter()
            .map(|child| child.view_model.clone())
            .collect()
    }

    pub fn get(
        &self,
        index: usize,
    ) -> Option<Rc<CustomerViewModel>> {
        self.inner
            .all_customers
            .borrow()
            .get(index)
            .map(|child| child.view_model.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.all_customers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.all_customers.borrow().is_empty()
    }

    /// Sum of `total_sales` over the selected customers, recomputed on every
    /// call.
    pub fn total_selected_sales(&self) -> Decimal {
        self.inner
            .all_customers
            .borrow()
            .iter()
            .filter(|child| child.view_model.is_selected())
            .map(|child| child.view_model.total_sales())
            .sum()
    }

    /// Raised with `TotalSelectedSales` whenever a child's selection changes.
    pub fn property_changed(&self) -> &Event<Property> {
        &self.inner.property_changed
    }

    pub fn collection_changed(&self) -> &Event<CollectionChange> {
        &self.inner.collection_changed
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Detaches from the repository and from every child, then empties the
    /// collection. Calling it again does nothing.
    pub fn dispose(&self) {
        let inner = &self.inner;
        if inner.disposed.replace(true) {
            return;
        }

        if let Some(subscription) = inner.added_subscription.take() {
            inner.repository.customer_added().unsubscribe(subscription);
        }

        let children = std::mem::take(&mut *inner.all_customers.borrow_mut());
        for child in &children {
            child.view_model.property_changed().unsubscribe(child.subscription);
        }

        debug!(customers = children.len(), "all customers view-model disposed");
        inner.collection_changed.emit(&CollectionChange::Cleared);
    }
}

impl Drop for AllCustomersViewModel {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl Inner {
    /// Wraps one customer and forwards its selection changes.
    fn adopt(
        this: &Rc<Self>,
        id: CustomerId,
    ) -> Result<Child, RepositoryError> {
        let view_model = Rc::new(CustomerViewModel::new(id, this.repository.clone())?);

        let weak: Weak<Self> = Rc::downgrade(this);
        let subscription = view_model.property_changed().subscribe(move |property: &Property| {
            if *property != Property::IsSelected {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                inner.property_changed.emit(&Property::TotalSelectedSales);
            }
        });

        Ok(Child {
            view_model,
            subscription,
        })
    }

    fn on_customer_added(
        this: &Rc<Self>,
        id: CustomerId,
    ) {
        if this.disposed.get() {
            return;
        }

        let child = match Self::adopt(this, id) {
            Ok(child) => child,
            Err(error) => {
                warn!(customer = %id, %error, "cannot wrap added customer");
                return;
            }
        };

        let index = {
            let mut all_customers = this.all_customers.borrow_mut();
            all_customers.push(child);
            all_customers.len() - 1
        };

        debug!(customer = %id, index, "customer appended to view-model");
        this.collection_changed.emit(&CollectionChange::Added { index });
    }
}
