use std::fmt;

use crm_core::CustomerField;

/// Names of the observable properties published through `property_changed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Email,
    FirstName,
    LastName,
    IsCompany,
    TotalSales,
    CustomerType,
    IsSelected,
    DisplayName,
    TotalSelectedSales,
}

impl Property {
    pub fn all() -> &'static [Property] {
        &[
            Property::Email,
            Property::FirstName,
            Property::LastName,
            Property::IsCompany,
            Property::TotalSales,
            Property::CustomerType,
            Property::IsSelected,
            Property::DisplayName,
            Property::TotalSelectedSales,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Email => "email",
            Property::FirstName => "first_name",
            Property::LastName => "last_name",
            Property::IsCompany => "is_company",
            Property::TotalSales => "total_sales",
            Property::CustomerType => "customer_type",
            Property::IsSelected => "is_selected",
            Property::DisplayName => "display_name",
            Property::TotalSelectedSales => "total_selected_sales",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.as_str() == s)
    }

    /// The entity field behind this property, if it is one.
    pub fn customer_field(&self) -> Option<CustomerField> {
        CustomerField::parse(self.as_str())
    }
}

impl From<CustomerField> for Property {
    fn from(field: CustomerField) -> Self {
        match field {
            CustomerField::Email => Property::Email,
            CustomerField::FirstName => Property::FirstName,
            CustomerField::LastName => Property::LastName,
            CustomerField::IsCompany => Property::IsCompany,
            CustomerField::TotalSales => Property::TotalSales,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn names_round_trip_through_parse() {
        for property in Property::all() {
            assert_eq!(Property::parse(property.as_str()), Some(*property));
        }
        assert_eq!(Property::parse("shoe_size"), None);
    }

    #[test]
    fn entity_fields_map_both_ways() {
        for field in CustomerField::all() {
            assert_eq!(Property::from(*field).customer_field(), Some(*field));
        }
        assert_eq!(Property::CustomerType.customer_field(), None);
        assert_eq!(Property::DisplayName.customer_field(), None);
    }
}
