//! Customer management
//!
//! `CustomerService` owns every business rule of the customer lifecycle:
//! email uniqueness on create and update, patch semantics on update and
//! existence checks before delete.

pub mod service;

pub use service::CustomerService;
