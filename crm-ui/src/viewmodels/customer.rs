use std::{
    cell::{Cell, Ref, RefMut},
    rc::Rc,
};

use crm_core::{
    Customer, CustomerId, CustomerRepository, Event, RepositoryError, ValidationError,
};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{CustomerType, Property};

/// Shown instead of a name while the customer is not in the repository.
pub const NEW_CUSTOMER_DISPLAY_NAME: &str = "New Customer";

/// Validation message for one property, as shown next to an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error(transparent)]
    Customer(#[from] ValidationError),

    #[error("Customer type must be selected.")]
    MissingCustomerType,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// `save` was reached while the customer is invalid. Callers are expected
    /// to gate saving on [`CustomerViewModel::can_save`].
    #[error("Customer cannot be saved while it has validation errors.")]
    InvalidCustomer,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A UI-friendly wrapper for one customer.
#[derive(Debug)]
pub struct CustomerViewModel {
    customer: CustomerId,
    repository: Rc<CustomerRepository>,
    customer_type: Cell<CustomerType>,
    is_selected: Cell<bool>,
    property_changed: Event<Property>,
}

impl CustomerViewModel {
    /// Wraps a customer held by `repository`.
    ///
    /// # Errors
    /// [`RepositoryError::UnknownCustomer`] when the handle was not issued by
    /// `repository`.
    pub fn new(
        customer: CustomerId,
        repository: Rc<CustomerRepository>,
    ) -> Result<Self, RepositoryError> {
        drop(repository.customer(customer)?);

        Ok(Self {
            customer,
            repository,
            customer_type: Cell::new(CustomerType::NotSpecified),
            is_selected: Cell::new(false),
            property_changed: Event::new(),
        })
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer
    }

    // ── customer properties ──────────────────────────────────────────────

    pub fn email(&self) -> String {
        self.customer().email.clone()
    }

    pub fn set_email(
        &self,
        value: impl Into<String>,
    ) {
        self.write_through(Property::Email, value.into(), |c| &mut c.email);
    }

    pub fn first_name(&self) -> String {
        self.customer().first_name.clone()
    }

    pub fn set_first_name(
        &self,
        value: impl Into<String>,
    ) {
        self.write_through(Property::FirstName, value.into(), |c| &mut c.first_name);
    }

    pub fn last_name(&self) -> String {
        self.customer().last_name.clone()
    }

    pub fn set_last_name(
        &self,
        value: impl Into<String>,
    ) {
        self.write_through(Property::LastName, value.into(), |c| &mut c.last_name);
    }

    /// Read-only here; it follows [`set_customer_type`](Self::set_customer_type).
    pub fn is_company(&self) -> bool {
        self.customer().is_company
    }

    pub fn total_sales(&self) -> Decimal {
        self.customer().total_sales()
    }

    // ── presentation properties ──────────────────────────────────────────

    pub fn customer_type(&self) -> CustomerType {
        self.customer_type.get()
    }

    /// Changes the customer type and maps `Person` / `Company` onto the
    /// entity's `is_company` flag.
    ///
    /// Besides `CustomerType`, `LastName` is always announced: its validation
    /// rule depends on `is_company`, so its error may have changed even though
    /// its value did not.
    pub fn set_customer_type(
        &self,
        value: CustomerType,
    ) {
        if value == self.customer_type.get() {
            return;
        }

        self.customer_type.set(value);

        if let Some(is_company) = value.is_company() {
            self.customer_mut().is_company = is_company;
        }

        self.on_property_changed(Property::CustomerType);
        self.on_property_changed(Property::LastName);
    }

    /// Sets the customer type from a selector label. An empty label means
    /// nothing was picked and is ignored, as are labels that are not one of
    /// [`customer_type_options`](Self::customer_type_options).
    pub fn set_customer_type_label(
        &self,
        label: &str,
    ) {
        if label.is_empty() {
            return;
        }

        match CustomerType::try_from(label) {
            Ok(value) => self.set_customer_type(value),
            Err(error) => warn!(customer = %self.customer, %error, "ignoring customer type"),
        }
    }

    pub fn customer_type_options(&self) -> &'static [CustomerType] {
        CustomerType::all()
    }

    pub fn display_name(&self) -> String {
        if self.is_new_customer() {
            return NEW_CUSTOMER_DISPLAY_NAME.to_string();
        }

        let customer = self.customer();
        if customer.is_company {
            customer.first_name.clone()
        } else {
            format!("{}, {}", customer.last_name, customer.first_name)
        }
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected.get()
    }

    pub fn set_is_selected(
        &self,
        value: bool,
    ) {
        if value == self.is_selected.get() {
            return;
        }

        self.is_selected.set(value);
        self.on_property_changed(Property::IsSelected);
    }

    // ── saving ───────────────────────────────────────────────────────────

    /// `true` while the customer is not in the repository. Asked of the
    /// repository every time, so it flips as soon as a save adds it.
    pub fn is_new_customer(&self) -> bool {
        !matches!(self.repository.contains_customer(self.customer), Ok(true))
    }

    /// `true` if a customer type is chosen and the customer is valid.
    pub fn can_save(&self) -> bool {
        self.validate_customer_type().is_none() && self.customer().is_valid()
    }

    /// Saves the customer to the repository.
    ///
    /// # Errors
    /// [`SaveError::InvalidCustomer`] if the customer has validation errors;
    /// nothing is added and nothing is announced in that case.
    pub fn save(&self) -> Result<(), SaveError> {
        if !self.customer().is_valid() {
            warn!(customer = %self.customer, "refusing to save invalid customer");
            return Err(SaveError::InvalidCustomer);
        }

        if self.is_new_customer() {
            self.repository.add_customer(self.customer)?;
            info!(customer = %self.customer, "saved new customer");
        }

        self.on_property_changed(Property::DisplayName);
        Ok(())
    }

    // ── validation lookup ────────────────────────────────────────────────

    /// The validation message for `property`, if any.
    pub fn error(
        &self,
        property: Property,
    ) -> Option<FieldError> {
        match property {
            Property::CustomerType => self.validate_customer_type(),
            other => other
                .customer_field()
                .and_then(|field| self.customer().validate(field))
                .map(FieldError::from),
        }
    }

    /// String-keyed variant of [`error`](Self::error) for binding layers.
    ///
    /// Unknown names are a programming error: they panic in debug builds and
    /// report no error in release builds.
    pub fn error_for(
        &self,
        property_name: &str,
    ) -> Option<FieldError> {
        match Property::parse(property_name) {
            Some(property) => self.error(property),
            None => {
                debug_assert!(false, "invalid property name: {property_name}");
                None
            }
        }
    }

    /// Raised after a property of this view-model changed.
    pub fn property_changed(&self) -> &Event<Property> {
        &self.property_changed
    }

    // ── helpers ──────────────────────────────────────────────────────────

    fn validate_customer_type(&self) -> Option<FieldError> {
        (!self.customer_type.get().is_specified()).then_some(FieldError::MissingCustomerType)
    }

    fn write_through(
        &self,
        property: Property,
        value: String,
        slot: fn(&mut Customer) -> &mut String,
    ) {
        {
            let mut customer = self.customer_mut();
            let current = slot(&mut customer);
            if *current == value {
                return;
            }
            *current = value;
        }

        self.on_property_changed(property);
    }

    fn on_property_changed(
        &self,
        property: Property,
    ) {
        debug!(customer = %self.customer, %property, "property changed");
        self.property_changed.emit(&property);
    }

    // The handle was checked in `new` and the repository never drops
    // customers, so these lookups cannot fail.
    fn customer(&self) -> Ref<'_, Customer> {
        self.repository
            .customer(self.customer)
            .expect("view-model handle is checked on construction")
    }

    fn customer_mut(&self) -> RefMut<'_, Customer> {
        self.repository
            .customer_mut(self.customer)
            .expect("view-model handle is checked on construction")
    }
}
