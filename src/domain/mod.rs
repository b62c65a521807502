//! Domain layer: the Customer aggregate and the store contract it relies on.

pub mod customer;

pub use customer::{
    CreateCustomerDto, Customer, CustomerId, CustomerRepository, UpdateCustomerDto,
};

pub use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
