//! Database entities module

pub mod customer;

pub use customer::Entity as Customer;
