//! Admin authorization capability
//!
//! Who the user is comes from outside (the identity provider, or the
//! configured identity for the CLI). This module only answers whether that
//! user may use admin affordances. Mutating commands receive an
//! [`Authorizer`] explicitly instead of looking the answer up themselves.

use std::collections::BTreeSet;
use thiserror::Error;

/// Authorization errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The current session is not an admin
    #[error("{action} requires an admin session{}", identity.as_ref().map(|id| format!(" ({id} is not an admin)")).unwrap_or_default())]
    Forbidden {
        action: String,
        identity: Option<String>,
    },
}

/// Answers "is the current session authorized for admin actions"
pub trait Authorizer {
    fn is_admin(&self) -> bool;

    /// Identity the answer refers to, for error messages
    fn identity(&self) -> Option<&str> {
        None
    }

    /// Fail with `AuthError::Forbidden` unless the session is an admin
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` for non-admin sessions.
    fn require_admin(&self, action: &str) -> Result<(), AuthError> {
        if self.is_admin() {
            return Ok(());
        }
        tracing::warn!(action, identity = ?self.identity(), "admin action denied");
        Err(AuthError::Forbidden {
            action: action.to_string(),
            identity: self.identity().map(str::to_string),
        })
    }
}

/// Set of email addresses allowed to administer the site
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowlist {
    emails: BTreeSet<String>,
}

impl AdminAllowlist {
    /// Parse a comma-separated list; entries are trimmed, blanks ignored
    ///
    /// # Examples
    /// ```
    /// use atelier::auth::AdminAllowlist;
    /// let list = AdminAllowlist::from_csv(" a@studio.example , ,b@studio.example");
    /// assert!(list.contains("b@studio.example"));
    /// assert_eq!(list.len(), 2);
    /// ```
    #[must_use]
    pub fn from_csv(csv: &str) -> Self {
        let emails = csv
            .split(',')
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string)
            .collect();
        Self { emails }
    }

    /// Exact match against the allowlist
    #[must_use]
    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(email)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// A signed-in identity checked against the allowlist
#[derive(Debug, Clone)]
pub struct SessionAuthorizer {
    allowlist: AdminAllowlist,
    identity: Option<String>,
}

impl SessionAuthorizer {
    #[must_use]
    pub const fn new(allowlist: AdminAllowlist, identity: Option<String>) -> Self {
        Self { allowlist, identity }
    }
}

impl Authorizer for SessionAuthorizer {
    fn is_admin(&self) -> bool {
        self.identity
            .as_deref()
            .is_some_and(|email| self.allowlist.contains(email))
    }

    fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }
}

/// Fixed answer, for tests and trusted local tooling
#[derive(Debug, Clone, Copy)]
pub struct StaticAuthorizer(pub bool);

impl Authorizer for StaticAuthorizer {
    fn is_admin(&self) -> bool {
        self.0
    }
}
