//! Shared primitives for all Rust crates in the co-lending dashboard core.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use auth::{SUPER_ADMIN_ROLE, UserIdentity};

/// Result type used across colend crates.
pub type AppResult<T> = Result<T, AppError>;

/// Identifier of a partner NBFC selected in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NbfcId(Uuid);

impl NbfcId {
    /// Creates a random NBFC identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an NBFC identifier from its transport form.
    pub fn parse(value: &str) -> AppResult<Self> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid nbfc id '{value}': {error}")))
    }
}

impl Default for NbfcId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for NbfcId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// User is not authenticated or not allowed to access a resource.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{AppError, NbfcId};

    #[test]
    fn nbfc_id_formats_as_uuid() {
        let nbfc_id = NbfcId::new();
        assert_eq!(nbfc_id.to_string().len(), 36);
    }

    #[test]
    fn nbfc_id_parses_its_own_display_form() {
        let nbfc_id = NbfcId::new();
        let parsed = NbfcId::parse(nbfc_id.to_string().as_str());
        assert_eq!(parsed.ok(), Some(nbfc_id));
    }

    #[test]
    fn nbfc_id_rejects_garbage() {
        let parsed = NbfcId::parse("not-a-uuid");
        assert!(matches!(parsed, Err(AppError::Validation(_))));
    }
}
