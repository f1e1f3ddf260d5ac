//! Auth data models.

/// Coarse role claim supplied by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Regular signed-in shopper.
    #[default]
    Customer,

    /// Operator allowed to use the admin console.
    Admin,
}

impl Role {
    /// Map a raw role claim onto a role; anything but `admin` is a customer.
    #[must_use]
    pub fn from_claim(claim: Option<&str>) -> Self {
        match claim.map(str::trim) {
            Some(role) if role.eq_ignore_ascii_case("admin") => Self::Admin,
            _ => Self::Customer,
        }
    }
}

/// The authenticated identity making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable user id issued by the identity provider.
    pub user_id: String,

    /// Email address, when the provider shares one.
    pub email: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,

    pub role: Role,
}

impl Principal {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The trimmed email address, if one is present and non-empty.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Whether the principal carries everything needed to own an order.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.user_id.trim().is_empty() && self.email().is_some()
    }
}
