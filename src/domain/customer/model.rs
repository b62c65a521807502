//! Customer domain entity

use serde::{Deserialize, Serialize};

/// Store-assigned customer identity
pub type CustomerId = i64;

/// One customer record.
///
/// `id` is `None` until the store has persisted the customer and assigned
/// an identity; it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Option<CustomerId>,
    pub name: String,
    /// Unique across all customers (exact match)
    pub email: String,
    pub address: String,
}

impl Customer {
    /// Build an unsaved customer; the store assigns the id on save.
    pub fn create(
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// Rehydrate a persisted customer.
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            ..Self::create(name, email, address)
        }
    }
}
