/// Names of the properties a [`Customer`](super::Customer) exposes to a
/// binding layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Email,
    FirstName,
    LastName,
    IsCompany,
    TotalSales,
}

impl CustomerField {
    /// The fields that take part in [`Customer::is_valid`](super::Customer::is_valid).
    pub const VALIDATED: [CustomerField; 3] = [Self::Email, Self::FirstName, Self::LastName];

    pub fn all() -> &'static [CustomerField] {
        &[
            Self::Email,
            Self::FirstName,
            Self::LastName,
            Self::IsCompany,
            Self::TotalSales,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::IsCompany => "is_company",
            Self::TotalSales => "total_sales",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "email" => Some(Self::Email),
            "first_name" => Some(Self::FirstName),
            "last_name" => Some(Self::LastName),
            "is_company" => Some(Self::IsCompany),
            "total_sales" => Some(Self::TotalSales),
            _ => None,
        }
    }

    pub fn is_validated(&self) -> bool {
        Self::VALIDATED.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_name_it_produces() {
        for field in CustomerField::all() {
            assert_eq!(CustomerField::parse(field.as_str()), Some(*field));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(CustomerField::parse("Email"), None);
        assert_eq!(CustomerField::parse("customer_type"), None);
    }

    #[test]
    fn only_names_and_email_are_validated() {
        assert!(CustomerField::Email.is_validated());
        assert!(CustomerField::FirstName.is_validated());
        assert!(CustomerField::LastName.is_validated());
        assert!(!CustomerField::IsCompany.is_validated());
        assert!(!CustomerField::TotalSales.is_validated());
    }
}
