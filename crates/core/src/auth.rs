use serde::{Deserialize, Serialize};

/// Role name that bypasses every module permission check.
pub const SUPER_ADMIN_ROLE: &str = "super_admin";

/// User information carried by an authenticated dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    email: Option<String>,
    role: String,
}

impl UserIdentity {
    /// Creates a user identity from authentication data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            email,
            role: role.into(),
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the role assigned by the backend.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }

    /// Returns whether the role bypasses module permission checks.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role.trim().eq_ignore_ascii_case(SUPER_ADMIN_ROLE)
    }
}

#[cfg(test)]
mod tests {
    use super::UserIdentity;

    #[test]
    fn super_admin_role_is_case_insensitive() {
        let identity = UserIdentity::new("ops-1", "Ops", None, " Super_Admin ");
        assert!(identity.is_super_admin());
    }

    #[test]
    fn other_roles_are_not_super_admin() {
        let identity = UserIdentity::new("ops-2", "Ops", None, "credit_analyst");
        assert!(!identity.is_super_admin());
    }
}
