use std::fmt;

/// UI-only classification of a customer.
///
/// `NotSpecified` is the "not chosen yet" state the entity's `is_company`
/// flag cannot express, so the two are kept side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerType {
    #[default]
    NotSpecified,
    Person,
    Company,
}

impl CustomerType {
    /// Options for a customer-type selector, in display order.
    pub fn all() -> &'static [CustomerType] {
        &[
            CustomerType::NotSpecified,
            CustomerType::Person,
            CustomerType::Company,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            CustomerType::NotSpecified => "(Not Specified)",
            CustomerType::Person => "Person",
            CustomerType::Company => "Company",
        }
    }

    /// The `is_company` value this type maps onto, if any.
    pub fn is_company(&self) -> Option<bool> {
        match self {
            CustomerType::NotSpecified => None,
            CustomerType::Person => Some(false),
            CustomerType::Company => Some(true),
        }
    }

    pub fn is_specified(&self) -> bool {
        self.is_company().is_some()
    }
}

impl TryFrom<&str> for CustomerType {
    type Error = String;

    fn try_from(label: &str) -> Result<Self, Self::Error> {
        CustomerType::all()
            .iter()
            .copied()
            .find(|t| t.label() == label)
            .ok_or_else(|| format!("unknown customer type '{label}'"))
    }
}

impl fmt::Display for CustomerType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}
