//! Customer aggregate
//!
//! Contains the Customer entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

pub use model::{Customer, CustomerId};

pub use dto_create::CreateCustomerDto;
pub use dto_update::UpdateCustomerDto;

pub use repository::CustomerRepository;
