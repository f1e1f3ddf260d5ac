//! Users Data

use crate::auth::Principal;

/// Registry entry written on every upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    /// Build a registry entry from `principal`, or `None` when it lacks an
    /// id or email.
    ///
    /// The user id is kept exactly as the principal carries it, since order
    /// lookups key on the same value.
    #[must_use]
    pub fn from_principal(principal: &Principal) -> Option<Self> {
        if !principal.is_complete() {
            return None;
        }

        Some(Self {
            user_id: principal.user_id.clone(),
            email: principal.email()?.to_string(),
            first_name: principal.first_name.clone(),
            last_name: principal.last_name.clone(),
        })
    }
}
