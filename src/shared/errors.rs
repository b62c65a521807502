use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::CustomerId;

/// Business-rule failures surfaced by the customer service and its stores.
///
/// `NotFound` and `EmailUnavailable` carry the complete user-facing message;
/// build them through the constructors below so the wording stays consistent
/// across the service and every store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    EmailUnavailable(String),

    #[error("Database error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Lookup by id failed (read and update paths).
    pub fn customer_not_found(id: CustomerId) -> Self {
        Self::NotFound(format!("Customer with id {} doesn't found", id))
    }

    /// Existence check failed (delete path).
    pub fn customer_not_exists(id: CustomerId) -> Self {
        Self::NotFound(format!("Customer with id {} doesn't exist.", id))
    }

    /// Email already registered (create path and store-level constraint).
    pub fn email_unavailable(email: &str) -> Self {
        Self::EmailUnavailable(format!("The email {} unavailable.", email))
    }

    /// Email held by another customer (update path).
    pub fn email_unavailable_to_update(email: &str) -> Self {
        Self::EmailUnavailable(format!("The email \"{}\" unavailable to update", email))
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::Infra(InfraError::Database(e))
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Infra(InfraError::Config(e))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Infra(InfraError::Io(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_messages_differ_by_operation() {
        assert_eq!(
            DomainError::customer_not_found(5).to_string(),
            "Customer with id 5 doesn't found"
        );
        assert_eq!(
            DomainError::customer_not_exists(5).to_string(),
            "Customer with id 5 doesn't exist."
        );
    }

    #[test]
    fn email_messages_keep_both_formats() {
        assert_eq!(
            DomainError::email_unavailable("leon@gmail.com").to_string(),
            "The email leon@gmail.com unavailable."
        );
        assert_eq!(
            DomainError::email_unavailable_to_update("leon@gmail.com").to_string(),
            "The email \"leon@gmail.com\" unavailable to update"
        );
    }

    #[test]
    fn only_storage_errors_are_transient() {
        assert!(DomainError::Storage("connection reset".into()).is_transient());
        assert!(!DomainError::customer_not_found(1).is_transient());
        assert!(!DomainError::email_unavailable("a@b.c").is_transient());
    }
}
