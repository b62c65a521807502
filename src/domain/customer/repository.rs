//! Customer store interface
//!
//! The store holds no business rules of its own beyond the email unique
//! constraint; everything else is enforced by `CustomerService`.

use async_trait::async_trait;

use super::{Customer, CustomerId};
use crate::domain::DomainResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers, ordered by id.
    async fn find_all(&self) -> DomainResult<Vec<Customer>>;
    async fn find_by_id(&self, id: CustomerId) -> DomainResult<Option<Customer>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>>;
    async fn exists_by_id(&self, id: CustomerId) -> DomainResult<bool>;

    /// Insert when `customer.id` is `None` (or unknown), update otherwise.
    /// Returns the stored customer with its id set. Fails with
    /// `DomainError::EmailUnavailable` if another customer holds the email.
    async fn save(&self, customer: Customer) -> DomainResult<Customer>;

    /// Deleting an unknown id is a no-op.
    async fn delete_by_id(&self, id: CustomerId) -> DomainResult<()>;
    async fn delete_all(&self) -> DomainResult<()>;
}
