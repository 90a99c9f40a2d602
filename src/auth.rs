//! Read-only identity handed to every component at construction.
//!
//! Login and logout belong to the surrounding application; components only ever
//! read the current user.

use serde::{Deserialize, Serialize};

/// A logged-in account: stable id for backend requests plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Current-user snapshot. `None` means guest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user: Option<User>,
}

impl AuthContext {
    #[must_use]
    pub const fn guest() -> Self {
        Self { user: None }
    }

    #[must_use]
    pub const fn logged_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Id of the current user; blank ids count as logged out.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.id.as_str())
            .filter(|id| !id.trim().is_empty())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user_id().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_has_no_user_id() {
        let auth = AuthContext::guest();
        assert!(auth.user_id().is_none());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_blank_id_is_not_authenticated() {
        let auth = AuthContext::logged_in(User {
            id: "  ".to_string(),
            name: "Nobody".to_string(),
        });
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_logged_in_exposes_user() {
        let auth = AuthContext::logged_in(User {
            id: "u1".to_string(),
            name: "Dana".to_string(),
        });
        assert_eq!(auth.user_id(), Some("u1"));
        assert_eq!(auth.current_user().map(|u| u.name.as_str()), Some("Dana"));
        assert!(auth.is_authenticated());
    }
}
